use std::iter::FusedIterator;
use std::marker::PhantomData;

use ListState::*;

use super::{LinkedList, ListContents, ListState, NodePtr};

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

/// An owning iterator over the elements of a [`LinkedList`], freeing each node as its element is
/// yielded. Elements left over when the iterator is dropped are dropped with the list.
pub struct IntoIter<T> {
    pub(crate) list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.list.len()
    }
}

impl<T> ListState<T> {
    /// Shrinks a borrowed view of the list by one node at the front, returning the node which was
    /// dropped from the view. The nodes themselves are never modified.
    fn advance_front(&mut self) -> Option<NodePtr<T>> {
        let Full(ListContents { len, head, .. }) = self else {
            return None;
        };
        let node = *head;

        match len.checked_sub(1) {
            Some(new_len) => {
                // SAFETY: The view holds more than one node, so head is followed by another.
                *head = unsafe { node.next().unwrap_unchecked() };
                *len = new_len;
            },
            None => *self = Empty,
        }

        Some(node)
    }

    /// Shrinks a borrowed view of the list by one node at the back, returning the node which was
    /// dropped from the view.
    fn advance_back(&mut self) -> Option<NodePtr<T>> {
        let Full(ListContents { len, tail, .. }) = self else {
            return None;
        };
        let node = *tail;

        match len.checked_sub(1) {
            Some(new_len) => {
                // SAFETY: The view holds more than one node, so tail is preceded by another.
                *tail = unsafe { node.prev().unwrap_unchecked() };
                *len = new_len;
            },
            None => *self = Empty,
        }

        Some(node)
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            view: self.state.clone(),
            _phantom: PhantomData,
        }
    }
}

/// A mutable iterator over the elements of a [`LinkedList`].
pub struct IterMut<'a, T> {
    // A copy of the list's head, tail and length, which shrinks as elements are yielded. Each
    // node leaves the view exactly once, so no element is borrowed mutably twice.
    pub(crate) view: ListState<T>,
    pub(crate) _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.view.advance_front().map(|mut node| node.value_mut())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.view.advance_back().map(|mut node| node.value_mut())
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    fn len(&self) -> usize {
        self.view.len()
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            view: self.state.clone(),
            _phantom: PhantomData,
        }
    }
}

/// An iterator over references to the elements of a [`LinkedList`].
pub struct Iter<'a, T> {
    pub(crate) view: ListState<T>,
    pub(crate) _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.view.advance_front().map(|node| node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.view.advance_back().map(|node| node.value())
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.view.len()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            view: self.view.clone(),
            _phantom: PhantomData,
        }
    }
}
