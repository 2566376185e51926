use std::iter::FusedIterator;
use std::mem::ManuallyDrop;
use std::ptr;

use super::DynArray;
use crate::collections::contiguous::raw::RawArray;

impl<T> IntoIterator for DynArray<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let arr = ManuallyDrop::new(self);
        IntoIter {
            // SAFETY: arr is never dropped, so ownership of the buffer moves into the iterator
            // without a double free.
            buf: unsafe { ptr::read(&arr.buf) },
            start: 0,
            end: arr.len,
        }
    }
}

/// A type for owned iteration over a [`DynArray`], yielding elements in index order. Any
/// elements which aren't yielded are dropped with the iterator.
///
/// Borrowed iteration uses [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from
/// [`std::slice`], through `Deref<Target = [T]>`.
pub struct IntoIter<T> {
    pub(crate) buf: RawArray<T>,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        // SAFETY: Every slot in [start, end) is initialized. Incrementing start afterwards means
        // the value is effectively moved off of the heap.
        let value = unsafe { self.buf.slot(self.start).read().assume_init() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        self.end -= 1;
        // SAFETY: The slot at the newly decremented end is initialized and no longer tracked.
        Some(unsafe { self.buf.slot(self.end).read().assume_init() })
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for i in self.start..self.end {
            // SAFETY: Every slot in [start, end) is initialized and hasn't been yielded.
            unsafe { (*self.buf.slot(i)).assume_init_drop() }
        }
    }
}

// SAFETY: IntoIter uniquely owns its remaining elements, like the DynArray it came from.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: IntoIter provides no shared access to its elements.
unsafe impl<T: Sync> Sync for IntoIter<T> {}
