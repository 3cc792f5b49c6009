#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SeqError {
    Empty,
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },
    AllocFailed {
        new_capacity: usize,
    },
    CapacityOverflow {
        capacity: usize,
    },
}

impl SeqError {

    /// Returns true for the errors caused by addressing a position the
    /// sequence does not hold.
    #[inline(always)]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::Empty | Self::IndexOutOfBounds { .. })
    }

    /// Returns true for the errors caused by failing to obtain a buffer.
    #[inline(always)]
    pub fn is_alloc_failure(&self) -> bool {
        matches!(self, Self::AllocFailed { .. } | Self::CapacityOverflow { .. })
    }
}

impl core::fmt::Display for SeqError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => {
                write!(f, "sequence is empty")
            },
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {} was out of bounds of len {}", index, len)
            },
            Self::AllocFailed { new_capacity } => {
                write!(f, "allocation failed with new capacity {}", new_capacity)
            },
            Self::CapacityOverflow { capacity } => {
                write!(f, "capacity {} cannot grow any further", capacity)
            },
        }
    }
}

impl core::error::Error for SeqError {}

#[cfg(test)]
mod tests {

    use super::SeqError;

    #[test]
    fn out_of_range_kinds() {
        assert!(SeqError::Empty.is_out_of_range());
        assert!(SeqError::IndexOutOfBounds { index: 3, len: 1 }.is_out_of_range());
        assert!(!SeqError::AllocFailed { new_capacity: 8 }.is_out_of_range());
        assert!(!SeqError::CapacityOverflow { capacity: 4 }.is_out_of_range());
        assert!(SeqError::CapacityOverflow { capacity: 4 }.is_alloc_failure());
        assert!(!SeqError::Empty.is_alloc_failure());
    }

    #[test]
    fn display_names_the_position() {
        let err = SeqError::IndexOutOfBounds { index: 10, len: 2 };
        assert_eq!(err.to_string(), "index 10 was out of bounds of len 2");
        assert_eq!(
            SeqError::AllocFailed { new_capacity: 16 }.to_string(),
            "allocation failed with new capacity 16",
        );
    }
}
