use dynseq::SeqError;

#[derive(Debug)]
pub enum CheckError {
    Seq(SeqError),
    Mismatch(&'static str),
}

impl core::fmt::Display for CheckError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Seq(err) => write!(f, "unexpected sequence error: {}", err),
            Self::Mismatch(what) => write!(f, "{}", what),
        }
    }
}

impl core::error::Error for CheckError {

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Seq(err) => Some(err),
            Self::Mismatch(_) => None,
        }
    }
}

impl From<SeqError> for CheckError {

    fn from(value: SeqError) -> Self {
        Self::Seq(value)
    }
}

pub type Result<T> = core::result::Result<T, CheckError>;

#[inline(always)]
pub fn ensure(condition: bool, what: &'static str) -> Result<()> {
    if condition {
        Ok(())
    }
    else {
        Err(CheckError::Mismatch(what))
    }
}
