pub mod fmt;
mod error;
mod filter;

use std::sync::{Mutex, MutexGuard, OnceLock};

use core::str::FromStr;

use termcolor::{StandardStream, ColorChoice};

pub use termcolor::{ColorSpec, Color};

use compact_str::CompactString;

use dynseq::DynSeq;

use crate::Result;

pub use error::LogError;
pub use filter::Filter;
pub use fmt::{LogFmt, LogFmtBuilder, LogSpec, SegmentSpec};

/// Handle to a format registered with [`custom_fmt`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CustomFmt(usize);

#[repr(i8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Level {
    Always = -1,
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

pub enum LevelFmt {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Other(CustomFmt, Level),
}

impl LevelFmt {

    #[inline(always)]
    pub fn level(&self) -> Level {
        match self {
            Self::Error => Level::Error,
            Self::Warn => Level::Warn,
            Self::Info => Level::Info,
            Self::Debug => Level::Debug,
            Self::Trace => Level::Trace,
            Self::Other(_, level) => *level,
        }
    }
}

impl FromStr for Level {

    type Err = LogError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(Self::Trace)
        } else {
            Err(LogError::UnknownLevel(CompactString::new(s)))
        }
    }
}

struct Logger {
    stderr: StandardStream,
    error_fmt: LogFmt,
    warn_fmt: LogFmt,
    info_fmt: LogFmt,
    debug_fmt: LogFmt,
    trace_fmt: LogFmt,
    custom_fmt: DynSeq<LogFmt>,
    filter: Filter,
}

impl Logger {

    fn new(filter: Filter) -> Result<Self> {
        Ok(Self {
            stderr: StandardStream::stderr(ColorChoice::Auto),
            error_fmt: LogFmt::labeled("ERROR", Color::Red)?,
            warn_fmt: LogFmt::labeled("WARN", Color::Yellow)?,
            info_fmt: LogFmt::labeled("INFO", Color::Green)?,
            debug_fmt: LogFmt::labeled("DEBUG", Color::Blue)?,
            trace_fmt: LogFmt::labeled("TRACE", Color::Magenta)?,
            custom_fmt: DynSeq::new(),
            filter,
        })
    }

    fn log(&mut self, target: &str, level: LevelFmt, msg: core::fmt::Arguments) -> Result<bool> {
        if !self.filter.enabled(target, level.level()) {
            return Ok(false)
        }
        let fmt = match level {
            LevelFmt::Error => &self.error_fmt,
            LevelFmt::Warn => &self.warn_fmt,
            LevelFmt::Info => &self.info_fmt,
            LevelFmt::Debug => &self.debug_fmt,
            LevelFmt::Trace => &self.trace_fmt,
            LevelFmt::Other(fmt, _) => self.custom_fmt.at(fmt.0)?,
        };
        fmt.render(&mut self.stderr, target, msg)?;
        Ok(true)
    }
}

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Installs the logger with `filter`. Returns `Ok(false)` when a logger
/// was already installed, in which case `filter` is dropped.
pub fn init_with(filter: Filter) -> Result<bool> {
    if LOGGER.get().is_some() {
        return Ok(false)
    }
    let logger = Logger::new(filter)?;
    Ok(LOGGER.set(Mutex::new(logger)).is_ok())
}

/// Installs the logger configured from `RUST_LOG`.
#[inline(always)]
pub fn init() -> Result<bool> {
    init_with(Filter::from_env())
}

fn logger() -> Result<MutexGuard<'static, Logger>> {
    if LOGGER.get().is_none() {
        init()?;
    }
    let logger = match LOGGER.get() {
        Some(logger) => logger,
        None => return Err(LogError::Io(std::io::Error::other("logger unavailable"))),
    };
    Ok(logger.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
}

macro_rules! level_fmt_fns {
    ($($level:ident),+ $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Replaces the `" $level "` line format."]
                pub fn [<$level _fmt>](f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<()> {
                    let mut logger = logger()?;
                    let mut builder = LogFmtBuilder::new(&mut logger.[<$level _fmt>]);
                    f(&mut builder)
                }
            )+
        }
    };
}

level_fmt_fns!(error, warn, info, debug, trace);

/// Registers a format for use with [`LevelFmt::Other`].
pub fn custom_fmt(fmt: LogFmt) -> Result<CustomFmt> {
    let mut logger = logger()?;
    let index = logger.custom_fmt.len();
    logger.custom_fmt.push(fmt)?;
    Ok(CustomFmt(index))
}

/// Writes one line for `target` if the filter allows `level`.
///
/// Returns whether the line was written.
#[inline(always)]
pub fn log(target: &str, level: LevelFmt, args: core::fmt::Arguments) -> Result<bool> {
    logger()?.log(target, level, args)
}

#[macro_export]
macro_rules! error {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Error, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! warn {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Warn, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! info {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Info, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! debug {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Debug, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! trace {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Trace, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn level_parsing() {
        assert_eq!("Info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("TRACE".parse::<Level>().unwrap(), Level::Trace);
        assert!(matches!("verbose".parse::<Level>(), Err(LogError::UnknownLevel(_))));
    }

    #[test]
    fn levels_order_by_verbosity() {
        assert!(Level::Always < Level::Error);
        assert!(Level::Error < Level::Warn);
        assert!(Level::Debug < Level::Trace);
        assert_eq!(LevelFmt::Other(CustomFmt(0), Level::Always).level(), Level::Always);
    }

    #[test]
    fn unknown_custom_format() {
        let mut logger = Logger::new(Filter::parse("trace")).unwrap();
        let err = logger
            .log("test", LevelFmt::Other(CustomFmt(3), Level::Info), format_args!("x"))
            .unwrap_err();
        assert!(matches!(
            err,
            LogError::Format(dynseq::SeqError::IndexOutOfBounds { index: 3, len: 0 })
        ));
    }

    #[test]
    fn filtered_lines_are_skipped() {
        let mut logger = Logger::new(Filter::parse("warn")).unwrap();
        let written = logger.log("test", LevelFmt::Debug, format_args!("hidden")).unwrap();
        assert!(!written);
        let written = logger
            .log("test", LevelFmt::Other(CustomFmt(9), Level::Trace), format_args!("hidden"))
            .unwrap();
        assert!(!written, "filter runs before the format lookup");
    }
}
