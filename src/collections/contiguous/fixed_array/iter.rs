use std::iter::{Enumerate, FusedIterator};
use std::mem::ManuallyDrop;
use std::ptr;
use std::slice;

use super::FixedArray;
use crate::collections::contiguous::raw::RawArray;

impl<T> IntoIterator for FixedArray<T> {
    type Item = (usize, T);

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let fa = ManuallyDrop::new(self);
        IntoIter {
            // SAFETY: fa is never dropped, so ownership of the slots moves into the iterator
            // without a double free.
            slots: unsafe { ptr::read(&fa.slots) },
            next: 0,
        }
    }
}

/// A type for owned iteration over the occupied slots of a [`FixedArray`], yielding each index
/// with its value in ascending order.
pub struct IntoIter<T> {
    pub(crate) slots: RawArray<Option<T>>,
    pub(crate) next: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = (usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.slots.size() {
            let index = self.next;
            self.next += 1;
            // SAFETY: Every slot at or above next is initialized and hasn't been read yet.
            // Incrementing next first means the slot is never read or dropped again.
            if let Some(value) = unsafe { self.slots.slot(index).read().assume_init() } {
                return Some((index, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.size() - self.next))
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for i in self.next..self.slots.size() {
            // SAFETY: Every slot at or above next is initialized and hasn't been yielded.
            unsafe { (*self.slots.slot(i)).assume_init_drop() }
        }
    }
}

// SAFETY: IntoIter uniquely owns its remaining values, like the FixedArray it came from.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: IntoIter provides no shared access to its values.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a FixedArray<T> {
    type Item = (usize, &'a T);

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.as_slots().iter().enumerate())
    }
}

/// A type for borrowed iteration over the occupied slots of a [`FixedArray`]. See
/// [`FixedArray::iter`].
pub struct Iter<'a, T>(pub(crate) Enumerate<slice::Iter<'a, Option<T>>>);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.find_map(|(index, slot)| Some((index, slot.as_ref()?)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.0.size_hint().1)
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while let Some((index, slot)) = self.0.next_back() {
            if let Some(value) = slot.as_ref() {
                return Some((index, value));
            }
        }
        None
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a mut FixedArray<T> {
    type Item = (usize, &'a mut T);

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut(self.as_mut_slots().iter_mut().enumerate())
    }
}

/// A type for mutable borrowed iteration over the occupied slots of a [`FixedArray`]. See
/// [`FixedArray::iter_mut`].
pub struct IterMut<'a, T>(pub(crate) Enumerate<slice::IterMut<'a, Option<T>>>);

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = (usize, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.find_map(|(index, slot)| Some((index, slot.as_mut()?)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.0.size_hint().1)
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while let Some((index, slot)) = self.0.next_back() {
            if let Some(value) = slot.as_mut() {
                return Some((index, value));
            }
        }
        None
    }
}

impl<'a, T> FusedIterator for IterMut<'a, T> {}
