#![cfg(test)]

use std::mem::MaybeUninit;
use std::ptr::NonNull;

use super::*;
use crate::util::alloc::ZeroSizedType;
use crate::util::error::{AllocError, CapacityOverflow};

fn filled(size: usize) -> RawArray<u64> {
    let buf = RawArray::<u64>::try_new(size).expect("small allocations should succeed");
    for i in 0..size {
        // SAFETY: i < size, so the slot is within the allocation.
        unsafe { buf.slot(i).write(MaybeUninit::new(i as u64 * 10)) }
    }
    buf
}

fn read_all(buf: &RawArray<u64>, count: usize) -> Vec<u64> {
    (0..count)
        // SAFETY: Callers only read slots which have been written.
        .map(|i| unsafe { buf.slot(i).read().assume_init() })
        .collect()
}

#[test]
fn test_failed_realloc_leaves_buffer() {
    let mut buf = filled(4);
    let old_ptr = buf.ptr;

    assert_eq!(
        buf.try_realloc(usize::MAX),
        Err(AllocError::CapacityOverflow(CapacityOverflow)),
        "A layout larger than isize::MAX bytes should be rejected."
    );
    assert_eq!(
        buf.try_realloc(isize::MAX as usize / size_of::<u64>() + 1),
        Err(AllocError::CapacityOverflow(CapacityOverflow))
    );

    assert_eq!(buf.ptr, old_ptr, "A failed realloc shouldn't move the allocation.");
    assert_eq!(buf.size(), 4, "A failed realloc shouldn't change the size.");
    assert_eq!(read_all(&buf, 4), [0, 10, 20, 30], "Contents should be untouched.");
}

#[test]
fn test_realloc() {
    let mut buf = filled(4);

    assert_eq!(buf.try_realloc(16), Ok(()));
    assert_eq!(buf.size(), 16);
    assert_eq!(read_all(&buf, 4), [0, 10, 20, 30], "Growing should keep every element.");

    assert_eq!(buf.try_realloc(2), Ok(()));
    assert_eq!(buf.size(), 2);
    assert_eq!(read_all(&buf, 2), [0, 10], "Shrinking should keep the leading elements.");

    let old_ptr = buf.ptr;
    assert_eq!(buf.try_realloc(2), Ok(()));
    assert_eq!(buf.ptr, old_ptr, "Reallocating to the same size shouldn't move.");

    assert_eq!(buf.try_realloc(0), Ok(()));
    assert_eq!(buf.ptr, NonNull::dangling(), "A zero size should hold a dangling pointer.");
    assert_eq!(buf.try_realloc(3), Ok(()));
    assert_ne!(buf.ptr, NonNull::dangling());
}

#[test]
fn test_zst_support() {
    let mut buf = RawArray::<ZeroSizedType>::try_new(usize::MAX)
        .expect("zero-sized types should never need to allocate");
    assert_eq!(buf.ptr, NonNull::dangling());

    assert_eq!(buf.try_realloc(5), Ok(()));
    assert_eq!(buf.ptr, NonNull::dangling(), "Pointer shouldn't change for a ZST.");
    assert_eq!(buf.size(), 5);
}
