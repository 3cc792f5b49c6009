use core::{
    alloc::Layout,
    ptr::NonNull,
};

pub trait Allocator {

    unsafe fn allocate_raw(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Allocates uninitialized storage for `count` values of `T`.
    ///
    /// Returns `None` when the byte size overflows, when it is zero or when
    /// the underlying allocation fails.
    unsafe fn allocate_uninit<T>(&self, count: usize) -> Option<NonNull<T>> {
        let layout = Layout::array::<T>(count).ok()?;
        unsafe { self.allocate_raw(layout).map(|ptr| ptr.cast::<T>()) }
    }

    unsafe fn free_raw(&self, ptr: NonNull<u8>, layout: Layout);

    /// Frees storage obtained from `allocate_uninit` with the same `count`.
    unsafe fn free_uninit<T>(&self, ptr: NonNull<T>, count: usize) {
        let layout = Layout::array::<T>(count);
        debug_assert!(layout.is_ok(), "freeing {} values that could never have been allocated", count);
        let Ok(layout) = layout else {
            return
        };
        unsafe { self.free_raw(ptr.cast::<u8>(), layout) }
    }
}
