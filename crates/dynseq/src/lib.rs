#[macro_use]
mod macros;

pub mod capacity_policy;
pub mod seq_types;

mod errors;
mod allocator;
mod global_alloc;

pub use errors::SeqError;
pub use capacity_policy::{CapacityPolicy, Doubling};
pub use seq_types::{DynSeq, Iter, IterMut};

pub type Result<T> = core::result::Result<T, SeqError>;
