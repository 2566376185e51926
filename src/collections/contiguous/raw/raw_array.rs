use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use tracing::debug;

use crate::util::error::{AllocError, AllocFailed, CapacityOverflow};

/// An owned, heap allocated run of `size` uninitialized slots of `T`. This is the storage shared
/// by [`DynArray`](crate::collections::contiguous::DynArray) and
/// [`FixedArray`](crate::collections::contiguous::FixedArray).
///
/// A RawArray only manages its allocation. It never reads, writes or drops the contained values,
/// which is left to the owning collection.
pub(crate) struct RawArray<T> {
    pub(crate) ptr: NonNull<MaybeUninit<T>>,
    pub(crate) size: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> RawArray<T> {
    /// Allocates a new RawArray with `size` uninitialized slots.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the memory layout would exceed [`isize::MAX`] bytes, or
    /// [`AllocFailed`] if the global allocator is unable to provide the memory.
    pub fn try_new(size: usize) -> Result<RawArray<T>, AllocError> {
        let layout = RawArray::<T>::make_layout(size)?;
        let ptr = RawArray::<T>::make_ptr(layout)?;

        Ok(RawArray {
            ptr,
            size,
            _phantom: PhantomData,
        })
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns a raw pointer to the slot at `index`.
    ///
    /// # Safety
    /// `index` must be less than or equal to `size`. (Equal is allowed to produce a pointer one
    /// past the end, which must not be dereferenced.)
    pub const unsafe fn slot(&self, index: usize) -> *mut MaybeUninit<T> {
        // SAFETY: The caller guarantees that index is within (or one past) the allocation, whose
        // size in bytes can't exceed isize::MAX.
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Reallocates the RawArray to hold `new_size` slots. Slots below `min(size, new_size)` keep
    /// their contents, any new slots are uninitialized.
    ///
    /// If an error is returned, the RawArray is left untouched, still owning its previous
    /// allocation.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the memory layout would exceed [`isize::MAX`] bytes, or
    /// [`AllocFailed`] if the global allocator is unable to provide the memory.
    pub fn try_realloc(&mut self, new_size: usize) -> Result<(), AllocError> {
        let new_layout = RawArray::<T>::make_layout(new_size)?;
        let old_layout = RawArray::<T>::make_layout(self.size)?;

        let new_ptr = match (old_layout.size(), new_layout.size()) {
            (old, new) if old == new => {
                // Equal byte sizes, including every zero-sized T. Nothing to move.
                self.size = new_size;
                return Ok(());
            },
            (0, _) => RawArray::<T>::make_ptr(new_layout)?,
            (_, 0) => {
                // SAFETY: ptr was allocated in the global allocator with old_layout, which has a
                // non-zero size.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), old_layout) }
                NonNull::dangling()
            },
            (_, new) => {
                // SAFETY: ptr was allocated in the global allocator with old_layout, and the new
                // size is non-zero and was validated by Layout::array.
                let raw_ptr = unsafe {
                    alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new)
                };

                NonNull::new(raw_ptr.cast()).ok_or_else(|| {
                    debug!(size = new, "reallocation failed");
                    AllocFailed { size: new }
                })?
            },
        };

        self.ptr = new_ptr;
        self.size = new_size;
        Ok(())
    }

    /// Creates a [`Layout`] for `size` elements of type `T`.
    pub(crate) fn make_layout(size: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(size).map_err(|_| CapacityOverflow)
    }

    /// Allocates memory for the provided [`Layout`], returning a dangling pointer for a zero-sized
    /// layout.
    pub(crate) fn make_ptr(layout: Layout) -> Result<NonNull<MaybeUninit<T>>, AllocFailed> {
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: Zero-sized layouts have been guarded against.
        let raw_ptr = unsafe { alloc::alloc(layout) };

        NonNull::new(raw_ptr.cast()).ok_or_else(|| {
            debug!(size = layout.size(), "allocation failed");
            AllocFailed { size: layout.size() }
        })
    }
}

impl<T> Drop for RawArray<T> {
    fn drop(&mut self) {
        // The layout was valid when allocated, so this can't fail.
        if let Ok(layout) = RawArray::<T>::make_layout(self.size) {
            if layout.size() != 0 {
                // SAFETY: ptr is always allocated in the global allocator and layout is the same
                // as when allocated. Zero-sized layouts are never allocated.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
            }
        }
    }
}
