use core::{
    fmt,
    marker::PhantomData,
    ops::{Index, IndexMut, Deref, DerefMut},
    ptr::NonNull,
    slice,
};

use crate::{
    allocator::Allocator,
    capacity_policy::{CapacityPolicy, Doubling},
    errors::SeqError,
    global_alloc::GLOBAL_ALLOC,
    Result,
    const_assert,
    size_of,
    impl_traits,
};

use super::{
    strategies,
    Iter,
    IterMut,
};

use SeqError::{Empty, IndexOutOfBounds, AllocFailed, CapacityOverflow};

/// A growable, contiguous sequence that exclusively owns its buffer.
///
/// The buffer is unallocated while `capacity() == 0`. Slots `[0, len)` hold
/// live values, the remaining `[len, capacity)` slots are uninitialized.
/// Pushing into a full sequence doubles the capacity (starting from one
/// slot) and relocates the live values into the new buffer.
///
/// Zero-sized values never touch the allocator: the buffer stays dangling
/// and only the capacity counter follows the doubling sequence.
///
/// Values discarded by [`pop_back`](Self::pop_back) are handed to the
/// caller, values discarded by [`clear`](Self::clear) and by dropping the
/// sequence are dropped immediately.
pub struct DynSeq<T> {
    data: NonNull<T>,
    capacity: usize,
    len: usize,
    _marker: PhantomData<T>,
}

const_assert!(size_of!(DynSeq<u32>) == size_of!(Option<DynSeq<u32>>));

unsafe impl<T: Send> Send for DynSeq<T> {}

unsafe impl<T: Sync> Sync for DynSeq<T> {}

impl<T> DynSeq<T> {

    /// Creates an empty sequence without allocating.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: 0,
            len: 0,
            _marker: PhantomData,
        }
    }

    fn allocate(capacity: usize) -> Result<NonNull<T>> {
        if size_of::<T>() == 0 {
            return Ok(NonNull::dangling())
        }
        unsafe { GLOBAL_ALLOC
            .allocate_uninit(capacity)
            .ok_or(AllocFailed { new_capacity: capacity })
        }
    }

    /// Whether `data` came from the allocator and has to be freed.
    #[inline(always)]
    fn is_allocated(&self) -> bool {
        self.capacity != 0 && size_of::<T>() != 0
    }

    /// Moves the live values into a fresh buffer of `new_capacity` slots.
    /// On failure nothing is touched.
    fn relocate(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(self.len <= self.capacity);
        debug_assert!(new_capacity > self.capacity);
        let tmp = Self::allocate(new_capacity)?;
        unsafe {
            strategies::move_elements(self.data, tmp, self.len);
        }
        if self.is_allocated() {
            unsafe { GLOBAL_ALLOC.free_uninit(self.data, self.capacity); }
        }
        self.data = tmp;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Copies this sequence into a new buffer with the same capacity.
    ///
    /// Only the live values are cloned. Copying an unallocated sequence
    /// allocates nothing.
    pub fn try_clone(&self) -> Result<Self>
        where
            T: Clone
    {
        let mut copy = Self::new();
        if self.capacity == 0 {
            return Ok(copy)
        }
        copy.data = Self::allocate(self.capacity)?;
        copy.capacity = self.capacity;
        unsafe {
            strategies::clone_elements(self.data, copy.data, self.len, &mut copy.len);
        }
        Ok(copy)
    }

    /// Replaces the contents of `self` with a copy of `from`.
    ///
    /// The copy is built before the old buffer is released, so a failed
    /// allocation leaves `self` as it was.
    pub fn try_clone_from(&mut self, from: &Self) -> Result<()>
        where
            T: Clone
    {
        *self = from.try_clone()?;
        Ok(())
    }

    /// Drops the current contents and takes over the buffer of `from`,
    /// leaving `from` empty and unallocated.
    #[inline(always)]
    pub fn take_from(&mut self, from: &mut Self) {
        *self = core::mem::take(from);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), self.len) }
    }

    /// Makes room for at least `capacity` values, allocating exactly that
    /// many slots when the buffer is too small.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.capacity {
            return Ok(())
        }
        self.relocate(capacity)
    }

    /// Appends `value`, growing the buffer first when it is full.
    pub fn push(&mut self, value: T) -> Result<&mut T> {
        if self.len == self.capacity {
            let new_capacity = Doubling::grow(self.capacity)
                .ok_or(CapacityOverflow { capacity: self.capacity })?;
            self.relocate(new_capacity)?
        }
        let mut ptr = unsafe { self.data.add(self.len) };
        unsafe { ptr.write(value) };
        self.len += 1;
        Ok(unsafe { ptr.as_mut() })
    }

    /// Removes the last value and returns it. The capacity is kept.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Empty)
        }
        self.len -= 1;
        Ok(unsafe { self.data.add(self.len).read() })
    }

    #[inline(always)]
    pub fn at(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len })
        }
        Ok(unsafe { self.data.add(index).as_ref() })
    }

    #[inline(always)]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len })
        }
        Ok(unsafe { self.data.add(index).as_mut() })
    }

    #[inline(always)]
    pub fn back(&self) -> Option<&T> {
        if self.len == 0 {
            None
        }
        else {
            unsafe {
                Some(
                    self.data.add(self.len - 1).as_ref()
                )
            }
        }
    }

    #[inline(always)]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            None
        }
        else {
            unsafe {
                Some(
                    self.data.add(self.len - 1).as_mut()
                )
            }
        }
    }

    /// Drops every live value. The buffer and its capacity are kept.
    pub fn clear(&mut self) {
        let len = self.len;
        self.len = 0;
        unsafe {
            strategies::drop_in_place(self.data, len);
        }
    }

    pub fn contains(&self, value: &T) -> bool
        where
            T: PartialEq
    {
        self.iter().any(|v| v == value)
    }

    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, T> {
        unsafe { Iter::new(self.data, self.len) }
    }

    #[inline(always)]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        unsafe { IterMut::new(self.data, self.len) }
    }
}

impl_traits!{
    for DynSeq<T>
    Drop =>

        fn drop(&mut self) {
            debug_assert!(self.len <= self.capacity);
            self.clear();
            if self.is_allocated() {
                unsafe { GLOBAL_ALLOC.free_uninit(self.data, self.capacity) }
            }
        }
    ,
    Default =>

        #[inline(always)]
        fn default() -> Self {
            Self::new()
        }
    ,
    Index<usize> =>

        type Output = T;

        #[inline(always)]
        fn index(&self, index: usize) -> &Self::Output {
            match self.at(index) {
                Ok(value) => value,
                Err(err) => panic!("{}", err),
            }
        }
    ,
    IndexMut<usize> =>

        #[inline(always)]
        fn index_mut(&mut self, index: usize) -> &mut Self::Output {
            match self.at_mut(index) {
                Ok(value) => value,
                Err(err) => panic!("{}", err),
            }
        }
    ,
    AsRef<[T]> =>

        #[inline(always)]
        fn as_ref(&self) -> &[T] {
            self.as_slice()
        }
    ,
    AsMut<[T]> =>

        #[inline(always)]
        fn as_mut(&mut self) -> &mut [T] {
            self.as_mut_slice()
        }
    ,
    Deref =>

        type Target = [T];

        #[inline(always)]
        fn deref(&self) -> &Self::Target {
            self.as_slice()
        }
    ,
    DerefMut =>

        #[inline(always)]
        fn deref_mut(&mut self) -> &mut Self::Target {
            self.as_mut_slice()
        }
    ,
}

impl_traits!{
    for DynSeq<T: Clone>
    Clone =>

        fn clone(&self) -> Self {
            match self.try_clone() {
                Ok(copy) => copy,
                Err(err) => panic!("{}", err),
            }
        }

        fn clone_from(&mut self, source: &Self) {
            if let Err(err) = self.try_clone_from(source) {
                panic!("{}", err)
            }
        }
    ,
}

impl_traits!{
    for DynSeq<T: PartialEq>
    PartialEq =>

        #[inline(always)]
        fn eq(&self, other: &Self) -> bool {
            self.as_slice() == other.as_slice()
        }
    ,
    PartialEq<[T]> =>

        #[inline(always)]
        fn eq(&self, other: &[T]) -> bool {
            self.as_slice() == other
        }
    ,
}

impl<T: Eq> Eq for DynSeq<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynSeq<T> {

    #[inline(always)]
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynSeq<T> {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for DynSeq<T> {

    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(err) = self.push(value) {
                panic!("{}", err)
            }
        }
    }
}

impl<T> FromIterator<T> for DynSeq<T> {

    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<'seq, T> IntoIterator for &'seq DynSeq<T> {

    type Item = &'seq T;
    type IntoIter = Iter<'seq, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'seq, T> IntoIterator for &'seq mut DynSeq<T> {

    type Item = &'seq mut T;
    type IntoIter = IterMut<'seq, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {

    use std::{
        cell::Cell,
        rc::Rc,
    };

    use super::*;

    /// Counts clones and drops through shared counters.
    struct Probe {
        clones: Rc<Cell<usize>>,
        drops: Rc<Cell<usize>>,
        value: u32,
    }

    impl Probe {

        fn new(value: u32, clones: &Rc<Cell<usize>>, drops: &Rc<Cell<usize>>) -> Self {
            Self {
                clones: clones.clone(),
                drops: drops.clone(),
                value,
            }
        }
    }

    impl Clone for Probe {

        fn clone(&self) -> Self {
            self.clones.set(self.clones.get() + 1);
            Self {
                clones: self.clones.clone(),
                drops: self.drops.clone(),
                value: self.value,
            }
        }
    }

    impl Drop for Probe {

        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    fn counters() -> (Rc<Cell<usize>>, Rc<Cell<usize>>) {
        (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)))
    }

    #[test]
    fn new_does_not_allocate() {
        let seq = DynSeq::<u64>::new();
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.capacity(), 0);
        assert!(seq.is_empty());
        assert_eq!(seq.as_ptr(), NonNull::<u64>::dangling().as_ptr() as *const u64);
    }

    #[test]
    fn push_returns_the_stored_slot() {
        let mut seq = DynSeq::new();
        *seq.push(4).unwrap() += 1;
        assert_eq!(seq[0], 5);
    }

    #[test]
    fn growth_moves_instead_of_cloning() {
        let (clones, drops) = counters();
        let mut seq = DynSeq::new();
        for i in 0..33 {
            seq.push(Probe::new(i, &clones, &drops)).unwrap();
        }
        assert_eq!(seq.capacity(), 64);
        assert_eq!(clones.get(), 0, "relocation must not clone");
        assert_eq!(drops.get(), 0, "relocation must not drop");
        for (i, tracked) in seq.iter().enumerate() {
            assert_eq!(tracked.value, i as u32);
        }
    }

    #[test]
    fn every_value_dropped_once() {
        let (clones, drops) = counters();
        {
            let mut seq = DynSeq::new();
            for i in 0..10 {
                seq.push(Probe::new(i, &clones, &drops)).unwrap();
            }
            let popped = seq.pop_back().unwrap();
            assert_eq!(popped.value, 9);
            assert_eq!(drops.get(), 0, "pop hands the value to the caller");
            drop(popped);
            assert_eq!(drops.get(), 1);
            while seq.len() > 6 {
                seq.pop_back().unwrap();
            }
            assert_eq!(drops.get(), 4);
            seq.clear();
            assert_eq!(drops.get(), 10);
            assert_eq!(seq.capacity(), 16, "clear keeps the buffer");
            seq.push(Probe::new(42, &clones, &drops)).unwrap();
        }
        assert_eq!(drops.get(), 11);
        assert_eq!(clones.get(), 0);
    }

    #[test]
    fn take_from_drops_previous_contents() {
        let (clones, drops) = counters();
        let mut dst = DynSeq::new();
        dst.push(Probe::new(1, &clones, &drops)).unwrap();
        dst.push(Probe::new(2, &clones, &drops)).unwrap();
        let mut src = DynSeq::new();
        src.push(Probe::new(3, &clones, &drops)).unwrap();
        let src_ptr = src.as_ptr();
        dst.take_from(&mut src);
        assert_eq!(drops.get(), 2);
        assert_eq!(dst.len(), 1);
        assert_eq!(dst.as_ptr(), src_ptr, "buffer is transferred, not copied");
        assert_eq!(src.len(), 0);
        assert_eq!(src.capacity(), 0);
        assert_eq!(clones.get(), 0);
    }

    #[test]
    fn clone_copies_live_values_only() {
        let (clones, drops) = counters();
        let mut seq = DynSeq::new();
        for i in 0..3 {
            seq.push(Probe::new(i, &clones, &drops)).unwrap();
        }
        let copy = seq.try_clone().unwrap();
        assert_eq!(clones.get(), 3);
        assert_eq!(copy.capacity(), 4);
        assert_ne!(copy.as_ptr(), seq.as_ptr());
        drop(copy);
        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn clone_of_unallocated_is_unallocated() {
        let seq = DynSeq::<String>::new();
        let copy = seq.clone();
        assert_eq!(copy.capacity(), 0);
        assert!(copy.is_empty());
    }

    #[test]
    fn reserve_uses_exact_count() {
        let mut seq = DynSeq::<u8>::new();
        seq.reserve(5).unwrap();
        assert_eq!(seq.capacity(), 5);
        seq.reserve(3).unwrap();
        assert_eq!(seq.capacity(), 5);
        for i in 0..6 {
            seq.push(i).unwrap();
        }
        assert_eq!(seq.capacity(), 10);
    }

    #[test]
    fn reserve_overflow_leaves_sequence_untouched() {
        let mut seq = DynSeq::<u64>::new();
        seq.push(1).unwrap();
        seq.push(2).unwrap();
        let err = seq.reserve(usize::MAX / 2).unwrap_err();
        assert_eq!(err, AllocFailed { new_capacity: usize::MAX / 2 });
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.capacity(), 2);
        assert_eq!(seq, [1, 2]);
    }

    #[test]
    fn zero_sized_elements_follow_doubling() {
        let mut seq = DynSeq::<()>::new();
        let mut capacities = vec![];
        for _ in 0..5 {
            seq.push(()).unwrap();
            capacities.push(seq.capacity());
        }
        assert_eq!(seq.len(), 5);
        assert_eq!(capacities, [1, 2, 4, 4, 8]);
        assert_eq!(seq.iter().count(), 5);
        assert_eq!(seq.pop_back(), Ok(()));
        assert_eq!(seq.len(), 4);
        let copy = seq.clone();
        assert_eq!(copy.len(), 4);
        assert_eq!(copy.capacity(), 8);
        let collected: DynSeq<()> = core::iter::repeat(()).take(2).collect();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn zero_sized_values_dropped_once() {
        thread_local! {
            static DROPS: Cell<usize> = const { Cell::new(0) };
        }

        #[derive(Clone)]
        struct Marker;

        impl Drop for Marker {

            fn drop(&mut self) {
                DROPS.with(|drops| drops.set(drops.get() + 1));
            }
        }

        {
            let mut seq = DynSeq::new();
            for _ in 0..3 {
                seq.push(Marker).unwrap();
            }
            assert_eq!(seq.len(), 3);
            drop(seq.pop_back().unwrap());
            assert_eq!(DROPS.with(Cell::get), 1);
            let copy = seq.clone();
            drop(copy);
            assert_eq!(DROPS.with(Cell::get), 3);
        }
        assert_eq!(DROPS.with(Cell::get), 5);
    }

    #[test]
    fn capacity_overflow_is_reported() {
        let mut seq = DynSeq::<()>::new();
        seq.capacity = usize::MAX / 2 + 1;
        seq.len = seq.capacity;
        let err = seq.push(()).unwrap_err();
        assert_eq!(err, CapacityOverflow { capacity: usize::MAX / 2 + 1 });
        assert!(err.is_alloc_failure());
        assert_eq!(seq.len(), usize::MAX / 2 + 1, "failed push changes nothing");
        seq.len = 0;
    }

    #[test]
    fn back_and_contains() {
        let mut seq: DynSeq<i32> = [3, 1, 4].into_iter().collect();
        assert_eq!(seq.back(), Some(&4));
        *seq.back_mut().unwrap() = 9;
        assert!(seq.contains(&9));
        assert!(!seq.contains(&4));
        seq.clear();
        assert_eq!(seq.back(), None);
    }

    #[test]
    fn iterators_run_both_ways() {
        let mut seq: DynSeq<i32> = (1..=4).collect();
        let rev: Vec<i32> = seq.iter().rev().copied().collect();
        assert_eq!(rev, [4, 3, 2, 1]);
        let mut iter = seq.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 2);
        for value in &mut seq {
            *value *= 10;
        }
        assert_eq!(seq, [10, 20, 30, 40]);
        assert_eq!(format!("{:?}", seq), "[10, 20, 30, 40]");
    }

    #[test]
    #[should_panic(expected = "index 2 was out of bounds of len 2")]
    fn index_panics_past_the_end() {
        let seq: DynSeq<i32> = [1, 2].into_iter().collect();
        let _ = seq[2];
    }
}
