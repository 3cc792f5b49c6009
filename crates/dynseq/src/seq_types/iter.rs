use core::{
    iter::FusedIterator,
    marker::PhantomData,
    ptr::NonNull,
};

/// Borrowing iterator over a live prefix of a buffer.
///
/// `R` is the reference type handed out, `&'a T` or `&'a mut T`.
pub struct IterBase<T, R> {
    ptr: NonNull<T>,
    remaining: usize,
    _marker: PhantomData<R>,
}

pub type Iter<'a, T> = IterBase<T, &'a T>;
pub type IterMut<'a, T> = IterBase<T, &'a mut T>;

unsafe impl<'a, T: Sync> Send for Iter<'a, T> {}

unsafe impl<'a, T: Sync> Sync for Iter<'a, T> {}

unsafe impl<'a, T: Send> Send for IterMut<'a, T> {}

unsafe impl<'a, T: Sync> Sync for IterMut<'a, T> {}

impl<T, R> IterBase<T, R> {

    /// # Safety
    /// `ptr` must point at `len` initialized values that outlive the
    /// reference type `R`.
    #[inline(always)]
    pub(crate) unsafe fn new(ptr: NonNull<T>, len: usize) -> Self {
        Self {
            ptr,
            remaining: len,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    fn step_front(&mut self) -> Option<NonNull<T>> {
        if self.remaining == 0 {
            None
        }
        else {
            let item = self.ptr;
            self.ptr = unsafe { self.ptr.add(1) };
            self.remaining -= 1;
            Some(item)
        }
    }

    #[inline(always)]
    fn step_back(&mut self) -> Option<NonNull<T>> {
        if self.remaining == 0 {
            None
        }
        else {
            self.remaining -= 1;
            Some(unsafe { self.ptr.add(self.remaining) })
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {

    type Item = &'a T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.step_front().map(|ptr| unsafe { ptr.as_ref() })
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {

    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.step_back().map(|ptr| unsafe { ptr.as_ref() })
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {

    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {

    type Item = &'a mut T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.step_front().map(|mut ptr| unsafe { ptr.as_mut() })
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {

    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.step_back().map(|mut ptr| unsafe { ptr.as_mut() })
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

#[cfg(test)]
mod tests {

    use std::{
        cell::Cell,
        thread,
    };

    use crate::DynSeq;

    use super::*;

    fn assert_send<S: Send>(_: &S) {}

    fn assert_sync<S: Sync>(_: &S) {}

    #[test]
    fn iterators_cross_threads() {
        let mut seq: DynSeq<u32> = (1..=4).collect();
        let iter = seq.iter();
        assert_send(&iter);
        assert_sync(&iter);
        let sum = thread::scope(|scope| {
            scope.spawn(move || iter.sum::<u32>()).join().unwrap()
        });
        assert_eq!(sum, 10);
        let iter_mut = seq.iter_mut();
        assert_send(&iter_mut);
        assert_sync(&iter_mut);
        thread::scope(|scope| {
            scope.spawn(move || iter_mut.for_each(|v| *v *= 2));
        });
        assert_eq!(seq, [2, 4, 6, 8]);
    }

    #[test]
    fn mutable_iterator_needs_only_send_values() {
        let mut seq: DynSeq<Cell<u8>> = DynSeq::new();
        seq.push(Cell::new(1)).unwrap();
        let iter_mut: IterMut<'_, Cell<u8>> = seq.iter_mut();
        assert_send(&iter_mut);
    }
}
