use std::fmt::{self, Debug, Display, Formatter};
use std::mem::MaybeUninit;
use std::ptr;
use std::slice;

use super::{Iter, IterMut};
use crate::collections::contiguous::raw::RawArray;
use crate::collections::traits::Identity;
#[doc(inline)]
pub use crate::util::error::{CreateError, IndexOutOfBounds, NotFound, ZeroCapacity};
use crate::util::result::ResultExtension;

/// A fixed-size table of slots, each of which is either occupied by a value or empty.
///
/// The size of a FixedArray is chosen at construction and never changes afterwards. Slots are
/// independent of one another: filling, emptying or replacing one slot never moves any other
/// value, so the index of a value is stable for as long as it stays in the table.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The size of the FixedArray.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `set` / `unset` / `swap` | `O(1)` |
/// | `size` | `O(1)` |
/// | `count` | `O(n)` |
/// | `put` | `O(n)` |
/// | `find_first` | `O(n)` |
/// | `clear` | `O(n)` |
pub struct FixedArray<T> {
    pub(crate) slots: RawArray<Option<T>>,
}

impl<T> FixedArray<T> {
    /// Creates a new FixedArray with `size` empty slots.
    ///
    /// # Panics
    /// Panics if `size` is zero or if the allocation fails. See [`FixedArray::try_new`].
    pub fn new(size: usize) -> FixedArray<T> {
        FixedArray::try_new(size).throw()
    }

    /// Creates a new FixedArray with `size` empty slots.
    ///
    /// # Errors
    /// Returns [`ZeroCapacity`] if `size` is zero, or an
    /// [`AllocError`](crate::error::AllocError) if the memory couldn't be allocated.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::FixedArray;
    /// let fa: FixedArray<&str> = FixedArray::try_new(4).unwrap();
    /// assert_eq!(fa.size(), 4);
    /// assert_eq!(fa.count(), 0);
    /// assert!(FixedArray::<&str>::try_new(0).is_err());
    /// ```
    pub fn try_new(size: usize) -> Result<FixedArray<T>, CreateError> {
        if size == 0 {
            return Err(ZeroCapacity.into());
        }

        let slots = RawArray::try_new(size)?;
        for i in 0..size {
            // SAFETY: i < size, so the slot is within the allocation.
            unsafe { slots.slot(i).write(MaybeUninit::new(None)) }
        }

        Ok(FixedArray { slots })
    }

    /// Returns the number of slots in the FixedArray, occupied or not.
    pub const fn size(&self) -> usize {
        self.slots.size()
    }

    /// Returns the number of occupied slots.
    pub fn count(&self) -> usize {
        self.as_slots().iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns true if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.as_slots().iter().all(Option::is_some)
    }

    /// Returns the contents of the slot at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.try_get(index).throw()
    }

    /// Returns the contents of the slot at `index`, which may be empty, or an [`Err`] if the
    /// index is out of bounds.
    pub fn try_get(&self, index: usize) -> Result<Option<&T>, IndexOutOfBounds> {
        Ok(self.checked_slot(index)?.as_ref())
    }

    /// Returns the mutable contents of the slot at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.try_get_mut(index).throw()
    }

    /// Returns the mutable contents of the slot at `index`, which may be empty, or an [`Err`] if
    /// the index is out of bounds.
    pub fn try_get_mut(&mut self, index: usize) -> Result<Option<&mut T>, IndexOutOfBounds> {
        Ok(self.checked_slot_mut(index)?.as_mut())
    }

    /// Places `value` in the slot at `index`, dropping any previous value.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: T) {
        self.try_set(index, value).throw()
    }

    /// Places `value` in the slot at `index`, dropping any previous value, or returns an [`Err`]
    /// if the index is out of bounds.
    pub fn try_set(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        *self.checked_slot_mut(index)? = Some(value);
        Ok(())
    }

    /// Empties the slot at `index`, returning its previous contents.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn unset(&mut self, index: usize) -> Option<T> {
        self.try_unset(index).throw()
    }

    /// Empties the slot at `index`, returning its previous contents, or returns an [`Err`] if
    /// the index is out of bounds.
    pub fn try_unset(&mut self, index: usize) -> Result<Option<T>, IndexOutOfBounds> {
        Ok(self.checked_slot_mut(index)?.take())
    }

    /// Places `value` in the slot at `index`, returning the previous contents.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn swap(&mut self, index: usize, value: T) -> Option<T> {
        self.try_swap(index, value).throw()
    }

    /// Places `value` in the slot at `index`, returning the previous contents, or returns an
    /// [`Err`] if the index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::FixedArray;
    /// let mut fa = FixedArray::new(2);
    /// assert_eq!(fa.try_swap(0, 'a'), Ok(None));
    /// assert_eq!(fa.try_swap(0, 'b'), Ok(Some('a')));
    /// assert!(fa.try_swap(2, 'c').is_err());
    /// ```
    pub fn try_swap(&mut self, index: usize, value: T) -> Result<Option<T>, IndexOutOfBounds> {
        Ok(self.checked_slot_mut(index)?.replace(value))
    }

    /// Places `value` in the first empty slot, in ascending index order, and returns its index.
    ///
    /// A full FixedArray is an ordinary outcome rather than an error: the value is handed back
    /// as the [`Err`] variant so that it isn't lost.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::FixedArray;
    /// let mut fa = FixedArray::new(2);
    /// assert_eq!(fa.put("a"), Ok(0));
    /// assert_eq!(fa.put("b"), Ok(1));
    /// assert_eq!(fa.put("c"), Err("c"));
    /// fa.unset(0);
    /// assert_eq!(fa.put("d"), Ok(0));
    /// ```
    pub fn put(&mut self, value: T) -> Result<usize, T> {
        match self.as_slots().iter().position(Option::is_none) {
            Some(index) => {
                self.as_mut_slots()[index] = Some(value);
                Ok(index)
            },
            None => Err(value),
        }
    }

    /// Returns the index of the first slot, in ascending order, for which
    /// `predicate(contents, probe)` holds. The predicate is applied to empty slots as well.
    pub fn position_first_by<P, F>(&self, probe: &P, mut predicate: F) -> Option<usize>
    where
        P: ?Sized,
        F: FnMut(Option<&T>, &P) -> bool,
    {
        self.as_slots().iter().position(|slot| predicate(slot.as_ref(), probe))
    }

    /// Returns the contents of the first slot, in ascending order, for which
    /// `predicate(contents, probe)` holds. The predicate is applied to empty slots as well, so a
    /// match may itself be empty.
    ///
    /// # Errors
    /// Returns [`NotFound`] if no slot matches.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::FixedArray;
    /// let mut fa = FixedArray::new(3);
    /// fa.set(1, 10);
    /// fa.set(2, 20);
    /// assert_eq!(fa.find_first_by(&15, |slot, min| slot.is_some_and(|v| v > min)), Ok(Some(&20)));
    /// assert_eq!(fa.find_first_by(&(), |slot, _| slot.is_none()), Ok(None));
    /// ```
    pub fn find_first_by<P, F>(&self, probe: &P, predicate: F) -> Result<Option<&T>, NotFound>
    where
        P: ?Sized,
        F: FnMut(Option<&T>, &P) -> bool,
    {
        let index = self.position_first_by(probe, predicate).ok_or(NotFound)?;
        Ok(self.as_slots()[index].as_ref())
    }

    /// Empties the first slot, in ascending order, for which `predicate(contents, probe)` holds,
    /// returning its previous contents.
    ///
    /// # Errors
    /// Returns [`NotFound`] if no slot matches, leaving the FixedArray unchanged.
    pub fn remove_first_by<P, F>(&mut self, probe: &P, predicate: F) -> Result<Option<T>, NotFound>
    where
        P: ?Sized,
        F: FnMut(Option<&T>, &P) -> bool,
    {
        let index = self.position_first_by(probe, predicate).ok_or(NotFound)?;
        Ok(self.as_mut_slots()[index].take())
    }

    /// Calls `visitor` on every occupied slot, in ascending index order.
    pub fn for_each<F: FnMut(&T)>(&self, mut visitor: F) {
        self.iter().for_each(|(_, item)| visitor(item));
    }

    /// Calls `visitor` on a mutable reference to every occupied slot, in ascending index order.
    pub fn for_each_mut<F: FnMut(&mut T)>(&mut self, mut visitor: F) {
        self.iter_mut().for_each(|(_, item)| visitor(item));
    }

    /// Returns an iterator over the occupied slots, yielding each index with its value.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    /// Returns an iterator over the occupied slots, yielding each index with a mutable reference
    /// to its value.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.into_iter()
    }

    /// Empties every slot, dropping the contained values.
    pub fn clear(&mut self) {
        self.as_mut_slots().fill_with(|| None);
    }

    /// Empties every slot, handing each contained value to `disposer` in ascending index order.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::FixedArray;
    /// let mut fa = FixedArray::new(3);
    /// fa.set(0, 'x');
    /// fa.set(2, 'y');
    /// let mut disposed = String::new();
    /// fa.clear_with(|c| disposed.push(c));
    /// assert_eq!(disposed, "xy");
    /// assert_eq!(fa.count(), 0);
    /// ```
    pub fn clear_with<F: FnMut(T)>(&mut self, mut disposer: F) {
        for slot in self.as_mut_slots() {
            if let Some(value) = slot.take() {
                disposer(value);
            }
        }
    }

    /// Drops the FixedArray, along with every value it contains.
    pub fn release(self) {
        drop(self);
    }

    /// Hands every contained value to `disposer`, in ascending index order, before releasing the
    /// FixedArray's storage.
    pub fn release_with<F: FnMut(T)>(mut self, disposer: F) {
        self.clear_with(disposer);
    }

    /// Returns every slot as a slice, including the empty ones.
    pub const fn as_slots(&self) -> &[Option<T>] {
        // SAFETY: Every slot is initialized at construction and stays initialized. The pointer is
        // nonnull, properly aligned and the range entirely contained within this FixedArray.
        unsafe {
            slice::from_raw_parts(self.slots.ptr.as_ptr().cast_const().cast(), self.slots.size())
        }
    }

    /// Returns every slot as a mutable slice, including the empty ones. Slots may be freely
    /// filled or emptied through the slice, but never added or removed.
    pub const fn as_mut_slots(&mut self) -> &mut [Option<T>] {
        // SAFETY: As for as_slots, and the borrow checker enforces that self isn't accessed
        // through any other path while the slice lives.
        unsafe { slice::from_raw_parts_mut(self.slots.ptr.as_ptr().cast(), self.slots.size()) }
    }

    pub(crate) fn checked_slot(&self, index: usize) -> Result<&Option<T>, IndexOutOfBounds> {
        let len = self.size();
        self.as_slots().get(index).ok_or(IndexOutOfBounds { index, len })
    }

    pub(crate) fn checked_slot_mut(
        &mut self,
        index: usize,
    ) -> Result<&mut Option<T>, IndexOutOfBounds> {
        let len = self.size();
        self.as_mut_slots().get_mut(index).ok_or(IndexOutOfBounds { index, len })
    }
}

impl<T: Identity> FixedArray<T> {
    /// Returns the index of the first slot holding the same value as `probe`, compared by
    /// [`Identity`]. Empty slots never match.
    pub fn position_first(&self, probe: &T) -> Option<usize> {
        self.position_first_by(probe, |slot, probe| slot.is_some_and(|item| item.is_same(probe)))
    }

    /// Returns the value in the first slot holding the same value as `probe`, compared by
    /// [`Identity`].
    ///
    /// # Errors
    /// Returns [`NotFound`] if no slot matches.
    pub fn find_first(&self, probe: &T) -> Result<&T, NotFound> {
        let index = self.position_first(probe).ok_or(NotFound)?;
        self.as_slots()[index].as_ref().ok_or(NotFound)
    }

    /// Empties the first slot holding the same value as `probe`, compared by [`Identity`],
    /// returning the value.
    ///
    /// # Errors
    /// Returns [`NotFound`] if no slot matches.
    pub fn remove_first(&mut self, probe: &T) -> Result<T, NotFound> {
        let index = self.position_first(probe).ok_or(NotFound)?;
        self.as_mut_slots()[index].take().ok_or(NotFound)
    }
}

impl<T> Drop for FixedArray<T> {
    fn drop(&mut self) {
        // SAFETY: Every slot is initialized and safe to drop. The storage itself is released
        // afterwards by RawArray.
        unsafe { ptr::drop_in_place(self.as_mut_slots()) }
    }
}

// SAFETY: FixedArrays, when used safely rely on unique pointers and are therefore safe for Send
// when T: Send.
unsafe impl<T: Send> Send for FixedArray<T> {}
// SAFETY: FixedArray's safe API obeys all rules of the borrow checker, so no interior mutability
// occurs. This means that FixedArray<T> can safely implement Sync when T: Sync.
unsafe impl<T: Sync> Sync for FixedArray<T> {}

impl<T: Clone> Clone for FixedArray<T> {
    fn clone(&self) -> Self {
        let mut fa = FixedArray::new(self.size());
        fa.as_mut_slots().clone_from_slice(self.as_slots());
        fa
    }
}

impl<T: PartialEq> PartialEq for FixedArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slots() == other.as_slots()
    }
}

impl<T: Eq> Eq for FixedArray<T> {}

impl<T: Debug> Debug for FixedArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedArray")
            .field("slots", &self.as_slots())
            .field("size", &self.size())
            .finish()
    }
}

impl<T: Display> Display for FixedArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, slot) in self.as_slots().iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            match slot {
                Some(item) => write!(f, "{item}")?,
                None => write!(f, "_")?,
            }
        }
        write!(f, "]")
    }
}
