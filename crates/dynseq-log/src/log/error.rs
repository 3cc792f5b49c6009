use compact_str::CompactString;

use dynseq::SeqError;

#[derive(Debug)]
pub enum LogError {
    Format(SeqError),
    UnknownLevel(CompactString),
    Io(std::io::Error),
}

impl core::fmt::Display for LogError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Format(_) => write!(f, "log format error"),
            Self::UnknownLevel(level) => write!(f, "unknown log level \"{}\"", level),
            Self::Io(_) => write!(f, "IO error"),
        }
    }
}

impl core::error::Error for LogError {

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Format(err) => Some(err),
            Self::UnknownLevel(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<SeqError> for LogError {

    fn from(value: SeqError) -> Self {
        Self::Format(value)
    }
}

impl From<std::io::Error> for LogError {

    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
