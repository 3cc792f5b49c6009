use std::io::Write;

use termcolor::{Color, ColorSpec, WriteColor};

use compact_str::CompactString;

use dynseq::{DynSeq, Iter};

use crate::Result;

/// An ordered list of segments making up one log line.
#[derive(Default)]
pub struct LogFmt {
    segments: DynSeq<SegmentSpec>,
}

impl LogFmt {

    fn clear(&mut self) {
        self.segments.clear();
    }

    /// `[label] target: message`, with the label in `color`.
    pub fn labeled(label: &str, color: Color) -> Result<Self> {
        let mut fmt = Self::default();
        LogFmtBuilder::new(&mut fmt)
            .text("[", |s| s)?
            .text(label, |s| s.with_color_spec(|c| { c.set_fg(Some(color)).set_bold(true); }))?
            .text("] ", |s| s)?
            .target(|s| s.with_color_spec(|c| { c.set_dimmed(true); }))?
            .text(": ", |s| s)?
            .message(|s| s)?;
        Ok(fmt)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn render<W: WriteColor>(
        &self,
        out: &mut W,
        target: &str,
        msg: core::fmt::Arguments,
    ) -> Result<()>
    {
        for segment in self {
            let (log_spec, text) = match segment {
                SegmentSpec::Message(log_spec) => (log_spec, None),
                SegmentSpec::Target(log_spec) => (log_spec, Some(target)),
                SegmentSpec::Text(text, log_spec) => (log_spec, Some(text.as_str())),
            };
            if let Some(color_spec) = &log_spec.color_spec {
                out.set_color(color_spec)?;
            }
            match text {
                Some(text) => out.write_all(text.as_bytes())?,
                None => write!(out, "{}", msg)?,
            }
            if log_spec.color_spec.is_some() {
                out.reset()?;
            }
        }
        out.write_all(b"\n")?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a LogFmt {

    type Item = &'a SegmentSpec;
    type IntoIter = Iter<'a, SegmentSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[derive(Default, Clone)]
pub struct LogSpec {
    pub color_spec: Option<ColorSpec>,
}

impl LogSpec {

    #[inline(always)]
    pub fn with_color_spec(mut self, f: impl FnOnce(&mut ColorSpec)) -> Self {
        let color_spec = self.color_spec.insert(ColorSpec::new());
        f(color_spec);
        self
    }
}

pub enum SegmentSpec {
    Message(LogSpec),
    Target(LogSpec),
    Text(CompactString, LogSpec),
}

pub struct LogFmtBuilder<'a> {
    fmt: &'a mut LogFmt,
}

impl<'a> LogFmtBuilder<'a> {

    /// Starts a new format, discarding the segments `fmt` had.
    #[inline(always)]
    pub fn new(fmt: &'a mut LogFmt) -> Self {
        fmt.clear();
        Self {
            fmt,
        }
    }

    #[inline(always)]
    pub fn message(&mut self, f: impl FnOnce(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.fmt.segments.push(SegmentSpec::Message(f(Default::default())))?;
        Ok(self)
    }

    #[inline(always)]
    pub fn target(&mut self, f: impl FnOnce(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.fmt.segments.push(SegmentSpec::Target(f(Default::default())))?;
        Ok(self)
    }

    #[inline(always)]
    pub fn text(&mut self, text: &str, f: impl FnOnce(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.fmt.segments.push(SegmentSpec::Text(CompactString::new(text), f(Default::default())))?;
        Ok(self)
    }
}
