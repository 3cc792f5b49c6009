use core::{
    mem::needs_drop,
    ptr::NonNull,
};

/// Relocates `len` live values from `src` to `dst`. After the call the
/// source slots are logically uninitialized.
#[inline(always)]
pub unsafe fn move_elements<T>(src: NonNull<T>, dst: NonNull<T>, len: usize) {
    unsafe {
        src.copy_to_nonoverlapping(dst, len);
    }
}

/// Clones `len` values from `src` into uninitialized slots at `dst`.
///
/// `written` is bumped after each slot so a panicking `clone` leaves it
/// counting exactly the initialized prefix.
#[inline(always)]
pub unsafe fn clone_elements<T: Clone>(
    src: NonNull<T>,
    dst: NonNull<T>,
    len: usize,
    written: &mut usize,
) {
    unsafe {
        for i in 0..len {
            dst.add(i).write(src.add(i).as_ref().clone());
            *written += 1;
        }
    }
}

#[inline(always)]
pub unsafe fn drop_in_place<T>(ptr: NonNull<T>, len: usize) {
    if needs_drop::<T>() {
        unsafe {
            for i in 0..len {
                ptr.add(i).drop_in_place();
            }
        }
    }
}
