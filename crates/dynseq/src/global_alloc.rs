use std::alloc::{Layout, alloc, dealloc};

use core::ptr::NonNull;

use crate::allocator::Allocator;

pub struct GlobalAlloc;

pub static GLOBAL_ALLOC: GlobalAlloc = GlobalAlloc;

impl Allocator for GlobalAlloc {

    unsafe fn allocate_raw(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None
        }
        let ptr = unsafe { alloc(layout) };
        NonNull::new(ptr)
    }

    unsafe fn free_raw(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return
        }
        unsafe { dealloc(ptr.as_ptr(), layout) }
    }
}
