//! Generic sequence containers.
//!
//! # Purpose
//! Three containers which cover the usual trade-offs for holding a sequence of values:
//! - [`DynArray`](contiguous::DynArray): dense, ordered and growable.
//! - [`FixedArray`](contiguous::FixedArray): a fixed number of slots, each either occupied or
//!   empty.
//! - [`LinkedList`](linked::LinkedList): ordered, with cheap insertion and removal at both ends.
//!
//! # Method
//! Each container owns the values placed into it. Values which are removed are handed back to the
//! caller, and values which are still held when a container is released are dropped, or passed to
//! a disposer with the `_with` variants. [`DynArray`](contiguous::DynArray) implements
//! [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which saves repeating most of the
//! slice API.

#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "linked")]
pub mod linked;
pub mod traits;
