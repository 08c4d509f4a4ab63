//! Heap usage measurement for the benchmark report
//!
//! The harness reports how much heap the parallel multiply retained. Used
//! memory is defined as bytes allocated minus bytes freed, maintained by a
//! counting wrapper around the system allocator.
//!
//! The counters only move while [`TrackingAllocator`] is installed as the
//! global allocator; binaries that want memory figures in their report do:
//!
//! ```rust,ignore
//! use parmul::TrackingAllocator;
//!
//! #[global_allocator]
//! static ALLOC: TrackingAllocator = TrackingAllocator;
//! ```
//!
//! Without it, [`used_bytes`] stays at zero and the report's memory delta
//! reads 0.00 MB.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

static ALLOCATED: AtomicU64 = AtomicU64::new(0);
static FREED: AtomicU64 = AtomicU64::new(0);

/// Counting allocator wrapping [`std::alloc::System`]
///
/// Tracks total bytes allocated and freed across the process so the harness
/// can take before/after snapshots around a multiply.
pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            ALLOCATED.fetch_add(layout.size() as u64, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            ALLOCATED.fetch_add(layout.size() as u64, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        FREED.fetch_add(layout.size() as u64, Ordering::Relaxed);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            ALLOCATED.fetch_add(new_size as u64, Ordering::Relaxed);
            FREED.fetch_add(layout.size() as u64, Ordering::Relaxed);
        }
        new_ptr
    }
}

/// Returns currently used heap bytes: total allocated minus total freed
///
/// Always zero unless [`TrackingAllocator`] is installed as the global
/// allocator in the running binary.
pub fn used_bytes() -> u64 {
    ALLOCATED
        .load(Ordering::Relaxed)
        .saturating_sub(FREED.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the counters are process-global, and splitting this up
    // would let the parallel test runner interleave the assertions.
    #[test]
    fn test_counters_follow_alloc_dealloc_and_realloc() {
        let layout = Layout::from_size_align(64, 8).unwrap();
        let before = used_bytes();

        let ptr = unsafe { TrackingAllocator.alloc(layout) };
        assert!(!ptr.is_null());
        assert_eq!(used_bytes(), before + 64);

        let grown = unsafe { TrackingAllocator.realloc(ptr, layout, 128) };
        assert!(!grown.is_null());
        assert_eq!(used_bytes(), before + 128);

        let grown_layout = Layout::from_size_align(128, 8).unwrap();
        unsafe { TrackingAllocator.dealloc(grown, grown_layout) };
        assert_eq!(used_bytes(), before);
    }
}
