use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};

use super::{Iter, IterMut, Length, Node, NodePtr, ONE};
use crate::collections::traits::Identity;
#[doc(inline)]
pub use crate::util::error::{
    AllocError, CapacityOverflow, IndexOutOfBounds, InsertError, MissingProbe, NotFound,
    Rejected, SearchError,
};
use crate::util::result::ResultExtension;

/// A list with links in both directions, caching both its head and its tail.
///
/// Every fallible method has a `try_` form which returns a [`Result`], and a plain form which
/// panics with the error instead. Nodes are allocated fallibly, so a failed allocation is reported
/// as an [`AllocError`] and leaves the list untouched, handing the value back in a [`Rejected`].
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the LinkedList.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `front/back` | `O(1)` |
/// | `push_front/back` | `O(1)` |
/// | `pop_front/back` | `O(1)` |
/// | `get` | `O(min(i, n-i))` |
/// | `set` / `swap` | `O(min(i, n-i))` |
/// | `insert` | `O(min(i, n-i))` |
/// | `remove` | `O(min(i, n-i))` |
/// | `find_first` | `O(n)` |
/// | `remove_first` | `O(n)` |
///
/// As a general note, modern computer architecture isn't kind to linked lists, because all `O(i)`
/// or `O(n)` operations will consist primarily of cache misses. For this reason,
/// [`DynArray`](crate::collections::contiguous::DynArray) should be preferred unless the `O(1)`
/// methods at either end are being heavily utilized.
pub struct LinkedList<T> {
    pub(crate) state: ListState<T>,
    pub(crate) _phantom: PhantomData<T>,
}

pub(crate) enum ListState<T> {
    Empty,
    Full(ListContents<T>),
}

use ListState::*;

pub(crate) struct ListContents<T> {
    pub len: Length,
    pub head: NodePtr<T>,
    pub tail: NodePtr<T>,
}

impl<T> LinkedList<T> {
    /// Creates a new LinkedList with no elements.
    pub const fn new() -> LinkedList<T> {
        LinkedList {
            state: Empty,
            _phantom: PhantomData,
        }
    }

    /// Returns the length of the LinkedList.
    pub const fn len(&self) -> usize {
        self.state.len()
    }

    /// Returns true if the LinkedList contains no elements.
    pub const fn is_empty(&self) -> bool {
        matches!(self.state, Empty)
    }

    /// Returns a reference to the first element in the list, if it exists.
    pub const fn front(&self) -> Option<&T> {
        match &self.state {
            Empty => None,
            Full(ListContents { head, .. }) => Some(head.value()),
        }
    }

    /// Returns a mutable reference to the first element in the list, if it exists.
    pub const fn front_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            Empty => None,
            Full(ListContents { head, .. }) => Some(head.value_mut()),
        }
    }

    /// Returns a reference to the last element in the list, if it exists.
    pub const fn back(&self) -> Option<&T> {
        match &self.state {
            Empty => None,
            Full(ListContents { tail, .. }) => Some(tail.value()),
        }
    }

    /// Returns a mutable reference to the last element in the list, if it exists.
    pub const fn back_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            Empty => None,
            Full(ListContents { tail, .. }) => Some(tail.value_mut()),
        }
    }

    /// Adds the provided element to the front of the LinkedList.
    ///
    /// # Panics
    /// Panics if the node can't be allocated.
    pub fn push_front(&mut self, value: T) {
        self.try_push_front(value).throw()
    }

    /// Adds the provided element to the front of the LinkedList, returning an [`Err`] holding the
    /// element if the node can't be allocated.
    pub fn try_push_front(&mut self, value: T) -> Result<(), Rejected<T, AllocError>> {
        match &mut self.state {
            Empty => self.state = ListState::try_single(value)?,
            Full(contents) => contents.try_push_front(value)?,
        }
        Ok(())
    }

    /// Adds the provided element to the back of the LinkedList.
    ///
    /// # Panics
    /// Panics if the node can't be allocated.
    pub fn push_back(&mut self, value: T) {
        self.try_push_back(value).throw()
    }

    /// Adds the provided element to the back of the LinkedList, returning an [`Err`] holding the
    /// element if the node can't be allocated.
    pub fn try_push_back(&mut self, value: T) -> Result<(), Rejected<T, AllocError>> {
        match &mut self.state {
            Empty => self.state = ListState::try_single(value)?,
            Full(contents) => contents.try_push_back(value)?,
        }
        Ok(())
    }

    /// Removes the first element from the list and returns it, if the list isn't empty.
    pub fn pop_front(&mut self) -> Option<T> {
        match &mut self.state {
            Empty => None,
            Full(ListContents { len, head, .. }) => {
                // SAFETY: head is a live node owned by this list, and it is unlinked below.
                let node = unsafe { head.take_node() };

                match len.checked_sub(1) {
                    Some(new_len) => {
                        // SAFETY: Previous length is greater than 1, so the first element is
                        // followed by at least one more.
                        let new_head = unsafe { node.next.unwrap_unchecked() };
                        new_head.set_prev(None);
                        *head = new_head;
                        *len = new_len;
                    },
                    None => self.state = Empty,
                }

                Some(node.value)
            },
        }
    }

    /// Removes the last element from the list and returns it, if the list isn't empty.
    pub fn pop_back(&mut self) -> Option<T> {
        match &mut self.state {
            Empty => None,
            Full(ListContents { len, tail, .. }) => {
                // SAFETY: tail is a live node owned by this list, and it is unlinked below.
                let node = unsafe { tail.take_node() };

                match len.checked_sub(1) {
                    Some(new_len) => {
                        // SAFETY: Previous length is greater than 1, so the last element is
                        // preceded by at least one more.
                        let new_tail = unsafe { node.prev.unwrap_unchecked() };
                        new_tail.set_next(None);
                        *tail = new_tail;
                        *len = new_len;
                    },
                    None => self.state = Empty,
                }

                Some(node.value)
            },
        }
    }

    /// Returns a reference to the element at the provided `index`, panicking on a failure.
    ///
    /// The same functionality can be achieved using the [`Index`] operator.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    /// Returns a reference to the element at the provided `index`, returning an [`Err`] on a
    /// failure rather than panicking.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        Ok(self.checked_seek(index)?.value())
    }

    /// Returns a mutable reference to the element at the provided `index`, panicking on a failure.
    ///
    /// The same functionality can be achieved using the [`IndexMut`] operator.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    /// Returns a mutable reference to the element at the provided `index`, returning an [`Err`] on
    /// a failure rather than panicking.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        Ok(self.checked_seek(index)?.value_mut())
    }

    /// Replaces the element at `index` with `value`, dropping the previous element.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn set(&mut self, index: usize, value: T) {
        self.try_set(index, value).throw()
    }

    /// Replaces the element at `index` with `value`, dropping the previous element, or returns an
    /// [`Err`] on a failure rather than panicking.
    pub fn try_set(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        *self.try_get_mut(index)? = value;
        Ok(())
    }

    /// Replaces the element at `index` with `value`, returning the previous element.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn swap(&mut self, index: usize, value: T) -> T {
        self.try_swap(index, value).throw()
    }

    /// Replaces the element at `index` with `value`, returning the previous element or an [`Err`]
    /// on a failure rather than panicking.
    pub fn try_swap(&mut self, index: usize, value: T) -> Result<T, IndexOutOfBounds> {
        Ok(mem::replace(self.try_get_mut(index)?, value))
    }

    /// Inserts `value` so that it ends up at `index`, before the element which was previously
    /// there. Returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len` or if the node can't be allocated.
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.try_insert(index, value).throw()
    }

    /// Inserts `value` so that it ends up at `index`, before the element which was previously
    /// there. Inserting at `len` appends to the back. Returns `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index > len`, or an [`AllocError`] if the node can't be
    /// allocated. In both cases the LinkedList is left unchanged and `value` is handed back inside
    /// the [`Rejected`] error.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::linked::LinkedList;
    /// let mut list: LinkedList<_> = [1, 2, 4].into_iter().collect();
    /// assert_eq!(list.try_insert(2, 3), Ok(2));
    /// assert_eq!(list.try_insert(4, 5), Ok(4));
    /// assert_eq!(list.try_insert(6, 6).unwrap_err().into_value(), 6);
    /// assert!(list.iter().eq(&[1, 2, 3, 4, 5]));
    /// ```
    pub fn try_insert(
        &mut self,
        index: usize,
        value: T,
    ) -> Result<usize, Rejected<T, InsertError>> {
        let len = self.len();
        if index > len {
            return Err(Rejected::new(IndexOutOfBounds { index, len }.into(), value));
        }

        let inserted = match &mut self.state {
            Empty => ListState::try_single(value).map(|state| self.state = state),
            Full(contents) => contents.try_insert(index, value),
        };
        inserted.map(|()| index).map_err(Rejected::convert)
    }

    /// Appends `value` to the back of the LinkedList, returning the index it was placed at.
    ///
    /// # Panics
    /// Panics if the node can't be allocated.
    pub fn push(&mut self, value: T) -> usize {
        self.try_push(value).throw()
    }

    /// Appends `value` to the back of the LinkedList, returning the index it was placed at, or an
    /// [`Err`] holding `value` if the node can't be allocated.
    pub fn try_push(&mut self, value: T) -> Result<usize, Rejected<T, InsertError>> {
        self.try_insert(self.len(), value)
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes and returns the element at `index`, or returns an [`Err`] on a failure rather than
    /// panicking.
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        let last = self.checked_contents_for_index(index)?.last_index();

        let value = match index {
            0 => self.pop_front(),
            val if val == last => self.pop_back(),
            val => match &mut self.state {
                Empty => None,
                Full(contents) => Some(contents.remove_inner(val)),
            },
        };

        // SAFETY: index has been checked to refer to an existing element, so each branch has
        // removed exactly one.
        Ok(unsafe { value.unwrap_unchecked() })
    }

    /// Returns the index of the first element, from the head, for which
    /// `predicate(element, probe)` holds.
    pub fn position_first_by<P, F>(&self, probe: &P, mut predicate: F) -> Option<usize>
    where
        P: ?Sized,
        F: FnMut(&T, &P) -> bool,
    {
        self.iter().position(|item| predicate(item, probe))
    }

    /// Returns the first element, from the head, for which `predicate(element, probe)` holds.
    ///
    /// # Errors
    /// Returns [`NotFound`] if no element matches.
    pub fn find_first_by<P, F>(&self, probe: &P, mut predicate: F) -> Result<&T, NotFound>
    where
        P: ?Sized,
        F: FnMut(&T, &P) -> bool,
    {
        self.iter().find(|item| predicate(item, probe)).ok_or(NotFound)
    }

    /// Removes and returns the first element, from the head, for which `predicate(element, probe)`
    /// holds.
    ///
    /// # Errors
    /// Returns [`NotFound`] if no element matches, leaving the LinkedList unchanged.
    ///
    /// # Examples
    /// ```
    /// # use seq_lib::collections::linked::LinkedList;
    /// let mut list: LinkedList<_> = ["ab", "cd", "ef"].into_iter().collect();
    /// assert_eq!(list.remove_first_by("d", |item, probe| item.contains(probe)), Ok("cd"));
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn remove_first_by<P, F>(&mut self, probe: &P, predicate: F) -> Result<T, NotFound>
    where
        P: ?Sized,
        F: FnMut(&T, &P) -> bool,
    {
        let index = self.position_first_by(probe, predicate).ok_or(NotFound)?;
        self.try_remove(index).map_err(|_| NotFound)
    }

    /// Calls `visitor` on every element, from head to tail.
    pub fn for_each<F: FnMut(&T)>(&self, visitor: F) {
        self.iter().for_each(visitor);
    }

    /// Calls `visitor` on a mutable reference to every element, from head to tail.
    pub fn for_each_mut<F: FnMut(&mut T)>(&mut self, visitor: F) {
        self.iter_mut().for_each(visitor);
    }

    /// Drops the LinkedList, freeing every node and the element it holds.
    pub fn release(self) {
        drop(self);
    }

    /// Hands every element to `disposer`, from head to tail, freeing each node along the way.
    pub fn release_with<F: FnMut(T)>(self, disposer: F) {
        self.into_iter().for_each(disposer);
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.into_iter()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }
}

impl<T: Identity> LinkedList<T> {
    /// Returns the index of the first element which is the same value as `probe`, compared by
    /// [`Identity`].
    pub fn position_first(&self, probe: &T) -> Option<usize> {
        self.position_first_by(probe, T::is_same)
    }

    /// Returns the first element which is the same value as `probe`, compared by [`Identity`].
    ///
    /// # Errors
    /// Returns [`MissingProbe`] if `probe` is [`None`], or [`NotFound`] if no element matches.
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

impl<T> LinkedList<T> {
    pub(crate) fn checked_seek(&self, index: usize) -> Result<NodePtr<T>, IndexOutOfBounds> {
        Ok(self.checked_contents_for_index(index)?.seek(index))
    }

    pub(crate) const fn checked_contents_for_index(
        &self,
        index: usize,
    ) -> Result<&ListContents<T>, IndexOutOfBounds> {
        match &self.state {
            Empty => Err(IndexOutOfBounds { index, len: 0 }),
            Full(contents) => {
                let len = contents.len.get();
                if index < len {
                    Ok(contents)
                } else {
                    Err(IndexOutOfBounds { index, len })
                }
            },
        }
    }

    /// Walks the list in both directions, asserting that every link agrees with its neighbour and
    /// that the walk covers exactly `len` nodes.
    #[cfg(test)]
    pub(crate) fn verify_double_links(&self) {
        match &self.state {
            Empty => {},
            Full(ListContents { len, head, tail }) => {
                assert!(head.prev().is_none(), "Head shouldn't have a previous node.");
                assert!(tail.next().is_none(), "Tail shouldn't have a next node.");

                let mut count = 1;
                let mut curr = *head;
                while let Some(next) = curr.next() {
                    assert!(next.prev() == Some(curr), "Links should agree in both directions.");
                    curr = next;
                    count += 1;
                }

                assert!(*tail == curr, "Walking forward from head should end at tail.");
                assert_eq!(count, len.get(), "Walking forward should visit len nodes.");
            },
        }
    }
}

impl<T> ListContents<T> {
    /// Finds the node at `index`, walking from whichever end is closer.
    pub fn seek(&self, index: usize) -> NodePtr<T> {
        if index < self.len.get() / 2 {
            self.seek_fwd(index, self.head)
        } else {
            self.seek_bwd(self.last_index() - index, self.tail)
        }
    }

    pub fn seek_fwd(&self, count: usize, mut node: NodePtr<T>) -> NodePtr<T> {
        for _ in 0..count {
            // SAFETY: Callers never seek past the tail, so every visited node has a next node.
            node = unsafe { node.next().unwrap_unchecked() };
        }
        node
    }

    pub fn seek_bwd(&self, count: usize, mut node: NodePtr<T>) -> NodePtr<T> {
        for _ in 0..count {
            // SAFETY: Callers never seek past the head, so every visited node has a prev node.
            node = unsafe { node.prev().unwrap_unchecked() };
        }
        node
    }

    pub fn try_push_front(&mut self, value: T) -> Result<(), Rejected<T, AllocError>> {
        let len = match self.len.checked_add(1) {
            Ok(len) => len,
            Err(error) => return Err(Rejected::new(error.into(), value)),
        };

        let node = NodePtr::try_from_node(Node {
            value,
            prev: None,
            next: Some(self.head),
        })
        .map_err(Rejected::convert::<AllocError>)?;

        self.head.set_prev(Some(node));
        self.head = node;
        self.len = len;
        Ok(())
    }

    pub fn try_push_back(&mut self, value: T) -> Result<(), Rejected<T, AllocError>> {
        let len = match self.len.checked_add(1) {
            Ok(len) => len,
            Err(error) => return Err(Rejected::new(error.into(), value)),
        };

        let node = NodePtr::try_from_node(Node {
            value,
            prev: Some(self.tail),
            next: None,
        })
        .map_err(Rejected::convert::<AllocError>)?;

        self.tail.set_next(Some(node));
        self.tail = node;
        self.len = len;
        Ok(())
    }

    /// Inserts `value` at `index`, where `index <= len`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), Rejected<T, AllocError>> {
        if index == 0 {
            return self.try_push_front(value);
        }
        if index == self.len.get() {
            return self.try_push_back(value);
        }

        let len = match self.len.checked_add(1) {
            Ok(len) => len,
            Err(error) => return Err(Rejected::new(error.into(), value)),
        };
        let next = self.seek(index);
        // SAFETY: index > 0, so the node at index is preceded by another.
        let prev = unsafe { next.prev().unwrap_unchecked() };

        let node = NodePtr::try_from_node(Node {
            value,
            prev: Some(prev),
            next: Some(next),
        })
        .map_err(Rejected::convert::<AllocError>)?;

        prev.set_next(Some(node));
        next.set_prev(Some(node));
        self.len = len;
        Ok(())
    }

    /// Unlinks and returns the value at `index`, where `0 < index < last_index`.
    pub fn remove_inner(&mut self, index: usize) -> T {
        // SAFETY: The node is live and owned by this list. It is unlinked below before anything
        // else can observe it.
        let node = unsafe { self.seek(index).take_node() };

        // SAFETY: Inner nodes always have both a prev and a next node. Head and tail removals are
        // handled by pop_front / pop_back.
        unsafe {
            node.prev.unwrap_unchecked().set_next(node.next);
            node.next.unwrap_unchecked().set_prev(node.prev);
        }
        // SAFETY: An inner node exists, so the length was at least 3.
        self.len = unsafe { self.len.checked_sub(1).unwrap_unchecked() };

        node.value
    }

    pub fn try_wrap_one(value: T) -> Result<ListContents<T>, Rejected<T, AllocError>> {
        let node = NodePtr::try_from_node(Node {
            value,
            prev: None,
            next: None,
        })
        .map_err(Rejected::convert::<AllocError>)?;

        Ok(ListContents {
            len: ONE,
            head: node,
            tail: node,
        })
    }

    pub const fn last_index(&self) -> usize {
        self.len.get() - 1
    }
}

impl<T> ListState<T> {
    pub fn try_single(value: T) -> Result<ListState<T>, Rejected<T, AllocError>> {
        Ok(Full(ListContents::try_wrap_one(value)?))
    }

    pub const fn len(&self) -> usize {
        match self {
            Empty => 0,
            Full(ListContents { len, .. }) => len.get(),
        }
    }
}

impl<T> Clone for ListContents<T> {
    fn clone(&self) -> Self {
        ListContents {
            len: self.len,
            head: self.head,
            tail: self.tail,
        }
    }
}

impl<T> Clone for ListState<T> {
    fn clone(&self) -> Self {
        match self {
            Empty => Empty,
            Full(contents) => Full(contents.clone()),
        }
    }
}

impl<T> Index<usize> for LinkedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
    }
}

impl<T> IndexMut<usize> for LinkedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index)
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        if let Full(ListContents { head, .. }) = self.state {
            let mut curr = Some(head);
            while let Some(ptr) = curr {
                curr = ptr.next();
                // SAFETY: Every node reachable from head is live and owned by this list, and is
                // visited exactly once.
                drop(unsafe { ptr.take_node() });
            }
        }
    }
}

// SAFETY: LinkedLists uniquely own their nodes and are therefore safe for Send when T: Send.
unsafe impl<T: Send> Send for LinkedList<T> {}
// SAFETY: LinkedList's safe API obeys all rules of the borrow checker, so no interior mutability
// occurs. This means that LinkedList<T> can safely implement Sync when T: Sync.
unsafe impl<T: Sync> Sync for LinkedList<T> {}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: Debug> Debug for LinkedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedList")
            .field("contents", &DebugEntries(self))
            .field("len", &self.len())
            .finish()
    }
}

struct DebugEntries<'a, T>(&'a LinkedList<T>);

impl<T: Debug> Debug for DebugEntries<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T: Display> Display for LinkedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (index, item) in self.iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, ")")
    }
}
