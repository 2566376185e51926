use std::alloc::{self, Layout};
use std::ptr::NonNull;

use tracing::debug;

use crate::util::error::{AllocFailed, Rejected};

pub(crate) type Link<T> = Option<NodePtr<T>>;

/// A non-owning pointer to a [`Node`] allocated by a [`LinkedList`](super::LinkedList).
///
/// Nodes are owned by the list they belong to. Links between neighbours are plain copies of a
/// NodePtr and never imply ownership; only the list frees nodes, via
/// [`take_node`](NodePtr::take_node).
#[derive(Debug)]
pub(crate) struct NodePtr<T>(pub NonNull<Node<T>>);

pub(crate) struct Node<T> {
    pub value: T,
    pub prev: Link<T>,
    pub next: Link<T>,
}

impl<T> NodePtr<T> {
    /// Moves `node` onto the heap, returning an error rather than aborting if the allocation
    /// fails. On an error, the node's value is handed back and its links are discarded.
    pub fn try_from_node(node: Node<T>) -> Result<NodePtr<T>, Rejected<T, AllocFailed>> {
        let layout = Layout::new::<Node<T>>();

        // SAFETY: Node<T> always contains two links, so its layout is never zero-sized.
        let raw_ptr = unsafe { alloc::alloc(layout) }.cast::<Node<T>>();

        match NonNull::new(raw_ptr) {
            Some(ptr) => {
                // SAFETY: ptr has just been allocated with the layout of Node<T>.
                unsafe { ptr.write(node) }
                Ok(NodePtr(ptr))
            },
            None => {
                debug!(size = layout.size(), "node allocation failed");
                Err(Rejected::new(AllocFailed { size: layout.size() }, node.value))
            },
        }
    }

    /// Moves the node back off of the heap, freeing its allocation.
    ///
    /// # Safety
    /// The pointer must refer to a live node, and neither it nor any copy of it may be used
    /// afterwards.
    pub unsafe fn take_node(self) -> Node<T> {
        // SAFETY: Nodes are allocated in the global allocator with the layout of Node<T>, which
        // is exactly what Box expects. The caller guarantees the node is live and unaliased.
        unsafe { *Box::from_raw(self.0.as_ptr()) }
    }

    pub const fn value<'a>(&self) -> &'a T {
        // SAFETY: A NodePtr held by a list always refers to a live node, which outlives every
        // borrow the list hands out.
        unsafe { &(*self.0.as_ptr()).value }
    }

    pub const fn value_mut<'a>(&mut self) -> &'a mut T {
        // SAFETY: As for value, and the list only hands out one mutable borrow per node.
        unsafe { &mut (*self.0.as_ptr()).value }
    }

    pub fn prev(&self) -> Link<T> {
        // SAFETY: A NodePtr held by a list always refers to a live node.
        unsafe { (*self.0.as_ptr()).prev }
    }

    pub fn set_prev(&self, link: Link<T>) {
        // SAFETY: A NodePtr held by a list always refers to a live node, and lists are never
        // shared mutably.
        unsafe { (*self.0.as_ptr()).prev = link }
    }

    pub fn next(&self) -> Link<T> {
        // SAFETY: A NodePtr held by a list always refers to a live node.
        unsafe { (*self.0.as_ptr()).next }
    }

    pub fn set_next(&self, link: Link<T>) {
        // SAFETY: As for set_prev.
        unsafe { (*self.0.as_ptr()).next = link }
    }
}

impl<T> Clone for NodePtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodePtr<T> {}

impl<T> PartialEq for NodePtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
