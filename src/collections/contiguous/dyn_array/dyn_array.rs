use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use tracing::trace;

use crate::collections::contiguous::raw::RawArray;
use crate::collections::traits::Identity;
#[doc(inline)]
pub use crate::util::error::{
    AllocError, CapacityOverflow, CreateError, IndexOutOfBounds, InsertError, MissingProbe,
    NotFound, Rejected, SearchError, ZeroCapacity,
};
use crate::util::result::ResultExtension;

/// The smallest capacity a DynArray can have.
pub const MIN_CAP: usize = 1;

/// The factor by which the capacity of a full DynArray is multiplied when it grows.
pub const GROWTH_FACTOR: usize = 2;

/// A growable, densely packed, index-addressable sequence.
///
/// A DynArray always owns an allocation of at least [`MIN_CAP`] slots, and only ever grows:
/// removing elements never shrinks the capacity. When an insertion finds the DynArray full, the
/// capacity becomes `max(cap + 1, cap * GROWTH_FACTOR)`, giving amortized `O(1)` appends.
///
/// Every fallible method has a `try_` form which returns a [`Result`], and a plain form which
/// panics with the error instead.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the DynArray.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `set` / `swap` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `find_first` | `O(n)` |
/// | `remove_first` | `O(n)` |
///
/// \* If the DynArray doesn't have enough capacity for the new element, `push` will take `O(n)`.
pub struct DynArray<T> {
    pub(crate) buf: RawArray<T>,
    pub(crate) len: usize,
}

impl<T> DynArray<T> {
    /// Creates a new, empty DynArray with capacity exactly equal to `cap`.
    ///
    /// # Panics
    /// Panics if `cap` is zero or if the allocation fails. See [`DynArray::try_with_cap`].
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::DynArray;
    /// let arr: DynArray<u8> = DynArray::with_cap(5);
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(arr.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> DynArray<T> {
        DynArray::try_with_cap(cap).throw()
    }

    /// Creates a new, empty DynArray with capacity exactly equal to `cap`.
    ///
    /// # Errors
    /// Returns [`ZeroCapacity`] if `cap` is zero, or an [`AllocError`] if the memory couldn't be
    /// allocated.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::DynArray;
    /// # use seq_lib::error::{ContainerError, ErrorKind};
    /// let err = DynArray::<u8>::try_with_cap(0).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    /// ```
    pub fn try_with_cap(cap: usize) -> Result<DynArray<T>, CreateError> {
        if cap < MIN_CAP {
            return Err(ZeroCapacity.into());
        }

        Ok(DynArray {
            buf: RawArray::try_new(cap)?,
            len: 0,
        })
    }

    /// Creates a DynArray with capacity equal to the length of `iter`, then appends every item
    /// in order.
    ///
    /// # Panics
    /// Panics if `iter` is empty or if allocation fails. See [`DynArray::try_from_iter_sized`].
    pub fn from_iter_sized<I>(iter: I) -> DynArray<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        DynArray::try_from_iter_sized(iter).throw()
    }

    /// Creates a DynArray with capacity equal to the length of `iter`, then appends every item
    /// in order.
    ///
    /// # Errors
    /// Returns [`ZeroCapacity`] if `iter` is empty, or an [`AllocError`] if the memory couldn't
    /// be allocated.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::DynArray;
    /// let arr = DynArray::try_from_iter_sized([4, 8, 15]).unwrap();
    /// assert_eq!(&*arr, &[4, 8, 15]);
    /// assert_eq!(arr.cap(), 3);
    /// ```
    pub fn try_from_iter_sized<I>(iter: I) -> Result<DynArray<T>, CreateError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let mut arr = DynArray::try_with_cap(iter.len())?;

        for item in iter {
            // An ExactSizeIterator may still lie about its length, so growth stays possible.
            if arr.len == arr.cap() {
                arr.try_grow()?;
            }
            // SAFETY: The capacity has just been checked to support the addition of the new item.
            unsafe { arr.push_unchecked(item) }
        }

        Ok(arr)
    }

    /// Returns the number of live elements in the DynArray.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the DynArray contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots allocated by the DynArray. Always at least [`MIN_CAP`] and at
    /// least [`len`](DynArray::len).
    pub const fn cap(&self) -> usize {
        self.buf.size()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    /// Returns a reference to the element at `index`, returning an [`Err`] on a failure rather
    /// than panicking.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::DynArray;
    /// let arr = DynArray::from_iter_sized([1, 2, 3]);
    /// assert_eq!(arr.try_get(2), Ok(&3));
    /// assert!(arr.try_get(3).is_err());
    /// ```
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        let len = self.len;
        self.as_slice().get(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    /// Returns a mutable reference to the element at `index`, returning an [`Err`] on a failure
    /// rather than panicking.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        let len = self.len;
        self.as_mut_slice().get_mut(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Replaces the element at `index` with `value`, dropping the previous element.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: T) {
        self.try_set(index, value).throw()
    }

    /// Replaces the element at `index` with `value`, dropping the previous element. Returns an
    /// [`Err`] on a failure rather than panicking, in which case `value` is dropped.
    pub fn try_set(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        *self.try_get_mut(index)? = value;
        Ok(())
    }

    /// Replaces the element at `index` with `value`, returning the previous element.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn swap(&mut self, index: usize, value: T) -> T {
        self.try_swap(index, value).throw()
    }

    /// Replaces the element at `index` with `value`, returning the previous element or an
    /// [`Err`] on a failure rather than panicking.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::DynArray;
    /// let mut arr = DynArray::from_iter_sized(["a", "b", "c"]);
    /// assert_eq!(arr.try_swap(1, "z"), Ok("b"));
    /// assert_eq!(&*arr, &["a", "z", "c"]);
    /// ```
    pub fn try_swap(&mut self, index: usize, value: T) -> Result<T, IndexOutOfBounds> {
        Ok(mem::replace(self.try_get_mut(index)?, value))
    }

    /// Inserts `value` at `index`, shifting all following elements one place to the right and
    /// growing if required. Returns the new length of the DynArray.
    ///
    /// # Panics
    /// Panics if `index > len` or if the DynArray needs to grow and allocation fails.
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.try_insert(index, value).throw()
    }

    /// Inserts `value` at `index`, shifting all following elements one place to the right and
    /// growing if required. Returns the new length of the DynArray.
    ///
    /// Any index up to and including `len` is valid, inserting at `len` is equivalent to a
    /// [`push`](DynArray::push).
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index > len`, or an [`AllocError`] if growth was
    /// required and failed. In both cases the DynArray is left unchanged and `value` is handed
    /// back inside the [`Rejected`] error.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::DynArray;
    /// let mut arr = DynArray::from_iter_sized(0..3);
    /// assert_eq!(arr.try_insert(1, 100), Ok(4));
    /// assert_eq!(arr.try_insert(4, 200), Ok(5));
    /// assert_eq!(arr.try_insert(6, 300).unwrap_err().into_value(), 300);
    /// assert_eq!(&*arr, &[0, 100, 1, 2, 200]);
    /// ```
    pub fn try_insert(
        &mut self,
        index: usize,
        value: T,
    ) -> Result<usize, Rejected<T, InsertError>> {
        if index > self.len {
            let error = IndexOutOfBounds { index, len: self.len };
            return Err(Rejected::new(error.into(), value));
        }

        if self.len == self.cap() {
            if let Err(error) = self.try_grow() {
                return Err(Rejected::new(error.into(), value));
            }
        }

        // SAFETY: index <= len < cap, so both the source and destination ranges lie within the
        // allocation. ptr::copy handles the overlap. The slot at index is then overwritten
        // without dropping, because its previous value now lives at index + 1.
        unsafe {
            let slot = self.buf.slot(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            slot.write(MaybeUninit::new(value));
        }

        self.len += 1;
        Ok(self.len)
    }

    /// Appends `value` to the end of the DynArray, returning the index it was placed at.
    ///
    /// # Panics
    /// Panics if the DynArray needs to grow and allocation fails.
    pub fn push(&mut self, value: T) -> usize {
        self.try_push(value).throw()
    }

    /// Appends `value` to the end of the DynArray, returning the index it was placed at.
    ///
    /// # Errors
    /// Returns an [`AllocError`] if growth was required and failed, leaving the DynArray
    /// unchanged and handing `value` back.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::DynArray;
    /// let mut arr = DynArray::with_cap(1);
    /// assert_eq!(arr.try_push('a'), Ok(0));
    /// assert_eq!(arr.try_push('b'), Ok(1));
    /// assert_eq!(arr.cap(), 2);
    /// ```
    pub fn try_push(&mut self, value: T) -> Result<usize, Rejected<T, InsertError>> {
        self.try_insert(self.len, value).map(|len| len - 1)
    }

    /// Removes and returns the element at `index`, shifting all following elements one place to
    /// the left. The capacity is unchanged.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes and returns the element at `index`, shifting all following elements one place to
    /// the left, or returns an [`Err`] on a failure rather than panicking.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::DynArray;
    /// let mut arr: DynArray<_> = "Hello world!".chars().collect();
    /// assert_eq!(arr.try_remove(1), Ok('e'));
    /// assert_eq!(arr.try_remove(4), Ok(' '));
    /// assert_eq!(arr, "Hlloworld!".chars().collect());
    /// ```
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index has just been checked to be less than len.
        Ok(unsafe { self.remove_unchecked(index) })
    }

    /// Returns the index of the first element for which `predicate(element, probe)` holds.
    pub fn position_first_by<P, F>(&self, probe: &P, mut predicate: F) -> Option<usize>
    where
        P: ?Sized,
        F: FnMut(&T, &P) -> bool,
    {
        self.iter().position(|item| predicate(item, probe))
    }

    /// Returns the first element, scanning from index 0, for which `predicate(element, probe)`
    /// holds.
    ///
    /// # Errors
    /// Returns [`NotFound`] if no element matches.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::DynArray;
    /// let arr = DynArray::from_iter_sized([3, 14, 15, 92]);
    /// assert_eq!(arr.find_first_by(&10, |item, min| item > min), Ok(&14));
    /// assert!(arr.find_first_by(&100, |item, min| item > min).is_err());
    /// ```
    pub fn find_first_by<P, F>(&self, probe: &P, mut predicate: F) -> Result<&T, NotFound>
    where
        P: ?Sized,
        F: FnMut(&T, &P) -> bool,
    {
        self.iter().find(|item| predicate(item, probe)).ok_or(NotFound)
    }

    /// Removes and returns the first element, scanning from index 0, for which
    /// `predicate(element, probe)` holds. Following elements are shifted as in
    /// [`remove`](DynArray::remove).
    ///
    /// # Errors
    /// Returns [`NotFound`] if no element matches, leaving the DynArray unchanged.
    pub fn remove_first_by<P, F>(&mut self, probe: &P, predicate: F) -> Result<T, NotFound>
    where
        P: ?Sized,
        F: FnMut(&T, &P) -> bool,
    {
        let index = self.position_first_by(probe, predicate).ok_or(NotFound)?;
        // SAFETY: position_first_by only returns indices of existing elements.
        Ok(unsafe { self.remove_unchecked(index) })
    }

    /// Calls `visitor` on every element, in index order.
    pub fn for_each<F: FnMut(&T)>(&self, visitor: F) {
        self.iter().for_each(visitor);
    }

    /// Calls `visitor` on a mutable reference to every element, in index order.
    pub fn for_each_mut<F: FnMut(&mut T)>(&mut self, visitor: F) {
        self.iter_mut().for_each(visitor);
    }

    /// Drops the DynArray, along with every element it contains.
    pub fn release(self) {
        drop(self);
    }

    /// Hands every element to `disposer`, in index order, before releasing the DynArray's
    /// storage.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::DynArray;
    /// let arr = DynArray::from_iter_sized([1, 2, 3]);
    /// let mut seen = Vec::new();
    /// arr.release_with(|item| seen.push(item));
    /// assert_eq!(seen, [1, 2, 3]);
    /// ```
    pub fn release_with<F: FnMut(T)>(self, disposer: F) {
        self.into_iter().for_each(disposer);
    }

    pub const fn as_slice(&self) -> &[T] {
        // SAFETY: DynArray is valid as a slice for len values, which are all initialized. The
        // pointer is nonnull, properly aligned and the range entirely contained within this
        // DynArray.
        unsafe { slice::from_raw_parts(self.buf.ptr.as_ptr().cast_const().cast(), self.len) }
    }

    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: As for as_slice, and the borrow checker enforces that self isn't accessed
        // through any other path while the slice lives.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr.as_ptr().cast(), self.len) }
    }

    /// Pushes `value` onto the end of the DynArray, assuming that there is enough capacity to do
    /// so.
    ///
    /// # Safety
    /// `len` must be less than `cap`.
    pub(crate) unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: The caller guarantees that the slot at len is within the allocation.
        unsafe { self.buf.slot(self.len).write(MaybeUninit::new(value)) }
        self.len += 1;
    }

    /// Removes the element at `index` without checking bounds.
    ///
    /// # Safety
    /// `index` must be less than `len`.
    pub(crate) unsafe fn remove_unchecked(&mut self, index: usize) -> T {
        // SAFETY: The caller guarantees index < len, so the slot is initialized and the moved
        // range [index + 1, len) lies within the allocation. The value is read out before its
        // slot is overwritten by the shift.
        unsafe {
            let slot = self.buf.slot(index);
            let value = slot.read().assume_init();
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Grows the internal RawArray so that at least one more element fits. If growth fails the
    /// DynArray keeps its previous allocation.
    pub(crate) fn try_grow(&mut self) -> Result<(), AllocError> {
        let old_cap = self.cap();
        let new_cap = cmp::max(
            old_cap.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?,
            old_cap.checked_add(1).ok_or(CapacityOverflow)?,
        );

        trace!(old_cap, new_cap, "growing DynArray");
        self.buf.try_realloc(new_cap)
    }

    /// Checks that the provided index refers to an existing element.
    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index < self.len {
            Ok(())
        } else {
            Err(IndexOutOfBounds { index, len: self.len })
        }
    }
}

impl<T: Identity> DynArray<T> {
    /// Returns the index of the first element which is the same value as `probe`, compared by
    /// [`Identity`].
    pub fn position_first(&self, probe: &T) -> Option<usize> {
        self.position_first_by(probe, T::is_same)
    }

    /// Returns the first element which is the same value as `probe`, compared by [`Identity`].
    ///
    /// # Errors
    /// Returns [`MissingProbe`] if `probe` is [`None`], as there is nothing to compare against,
    /// or [`NotFound`] if no element matches.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::contiguous::DynArray;
    /// let (a, b, c) = (1, 2, 2);
    /// let arr = DynArray::from_iter_sized([&a, &b]);
    /// assert!(arr.find_first(Some(&&b)).is_ok());
    /// // Equal, but not the same value.
    /// assert!(arr.find_first(Some(&&c)).is_err());
    /// ```
    pub fn find_first(&self, probe: Option<&T>) -> Result<&T, SearchError> {
        let probe = probe.ok_or(MissingProbe)?;
        Ok(self.find_first_by(probe, T::is_same)?)
    }

    /// Removes and returns the first element which is the same value as `probe`, compared by
    /// [`Identity`].
    ///
    /// # Errors
    /// Returns [`MissingProbe`] if `probe` is [`None`], or [`NotFound`] if no element matches.
    pub fn remove_first(&mut self, probe: Option<&T>) -> Result<T, SearchError> {
        let probe = probe.ok_or(MissingProbe)?;
        Ok(self.remove_first_by(probe, T::is_same)?)
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut arr = DynArray::with_cap(cmp::max(iter.size_hint().0, MIN_CAP));
        arr.extend(iter);
        arr
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        // SAFETY: All values less than len are initialized and safe to drop. The storage itself
        // is released afterwards by RawArray.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for DynArray<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for DynArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

// SAFETY: DynArrays, when used safely rely on unique pointers and are therefore safe for Send when
// T: Send.
unsafe impl<T: Send> Send for DynArray<T> {}
// SAFETY: DynArray's safe API obeys all rules of the borrow checker, so no interior mutability
// occurs. This means that DynArray<T> can safely implement Sync when T: Sync.
unsafe impl<T: Sync> Sync for DynArray<T> {}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        let mut arr = DynArray::with_cap(self.cap());
        arr.extend(self.iter().cloned());
        arr
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: Debug> Debug for DynArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynArray")
            .field("contents", &self.as_slice())
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Display> Display for DynArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, item) in self.iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}
