use std::ptr::{self, NonNull};
use std::rc::Rc;
use std::sync::Arc;

/// A payload which refers to some other value, and can therefore be compared by identity rather
/// than by structure.
///
/// This is the default predicate used by the `find_first` and `remove_first` family of methods:
/// two payloads match only if they refer to the very same value. The collections never inspect
/// the referent, so structural equality always requires a caller-supplied predicate (see the
/// `_by` variants of those methods).
///
/// # Examples
/// ```
/// # use seq_lib::collections::traits::Identity;
/// let (a, b) = (42, 42);
/// assert!((&a).is_same(&&a));
/// assert!(!(&a).is_same(&&b));
/// ```
pub trait Identity {
    /// Returns true if `self` and `other` refer to the same value.
    fn is_same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for &T {
    fn is_same(&self, other: &Self) -> bool {
        ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Identity for &mut T {
    fn is_same(&self, other: &Self) -> bool {
        ptr::eq(&**self, &**other)
    }
}

impl<T: ?Sized> Identity for *const T {
    fn is_same(&self, other: &Self) -> bool {
        ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Identity for *mut T {
    fn is_same(&self, other: &Self) -> bool {
        ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Identity for NonNull<T> {
    fn is_same(&self, other: &Self) -> bool {
        ptr::eq(self.as_ptr(), other.as_ptr())
    }
}

impl<T: ?Sized> Identity for Box<T> {
    fn is_same(&self, other: &Self) -> bool {
        ptr::eq(&**self, &**other)
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}
