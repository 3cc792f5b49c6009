use core::str::FromStr;

use rustc_hash::FxHashMap;

use compact_str::CompactString;

use super::Level;

/// Per-target level table built from `RUST_LOG` style directives.
///
/// Directives are comma separated, either `level` (sets the base level) or
/// `target=level`. A target matches itself and every `::` path below it,
/// the longest match wins. Directives with unknown levels are skipped.
pub struct Filter {
    target_levels: FxHashMap<CompactString, Level>,
    base_level: Level,
}

impl Default for Filter {

    fn default() -> Self {
        Self {
            target_levels: FxHashMap::default(),
            base_level: Level::Error,
        }
    }
}

impl Filter {

    pub fn parse(directives: &str) -> Self {
        let mut filter = Self::default();
        for arg in directives.split(',') {
            let arg = arg.trim();
            if arg.is_empty() {
                continue
            }
            let (target, level) = match arg.find('=') {
                Some(j) => (Some(arg[0..j].trim()), arg[j + 1..].trim()),
                None => (None, arg),
            };
            let Ok(level) = Level::from_str(level) else {
                continue
            };
            if let Some(target) = target {
                let entry = filter.target_levels
                    .entry(CompactString::new(target))
                    .or_insert(level);
                *entry = (*entry).min(level);
            } else {
                filter.base_level = level;
            }
        }
        filter
    }

    #[inline(always)]
    pub fn from_env() -> Self {
        match std::env::var("RUST_LOG") {
            Ok(env) => Self::parse(&env),
            Err(_) => Self::default(),
        }
    }

    /// Like [`from_env`](Self::from_env), but parses `fallback` when
    /// `RUST_LOG` is unset.
    #[inline(always)]
    pub fn from_env_or(fallback: &str) -> Self {
        match std::env::var("RUST_LOG") {
            Ok(env) => Self::parse(&env),
            Err(_) => Self::parse(fallback),
        }
    }

    pub fn target_level(&self, target: &str) -> Level {
        let mut substr = target;
        if let Some(&level) = self.target_levels.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[0..i];
            if let Some(&level) = self.target_levels.get(substr) {
                return level
            }
        }
        self.base_level
    }

    #[inline(always)]
    pub fn enabled(&self, target: &str, level: Level) -> bool {
        level <= self.target_level(target)
    }
}
