pub trait CapacityPolicy {

    /// Capacity to grow to when a full buffer of `current` slots needs one
    /// more. `None` when the next capacity is not representable.
    fn grow(current: usize) -> Option<usize>;
}

/// Geometric doubling starting from a single slot: 0, 1, 2, 4, 8, ...
pub struct Doubling {}

impl CapacityPolicy for Doubling {

    #[inline(always)]
    fn grow(current: usize) -> Option<usize> {
        if current == 0 { Some(1) }
        else { current.checked_mul(2) }
    }
}
