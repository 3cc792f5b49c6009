mod dyn_seq;
mod iter;
mod strategies;

pub use dyn_seq::DynSeq;
pub use iter::{Iter, IterMut};
