//! Generic sequence containers with explicit, strongly typed failure reporting.
//!
//! # Purpose
//! This crate provides a growable dense array, a fixed-size table of optional slots and a doubly
//! linked list. All three report failures in the same way, so that code using more than one of
//! them can treat errors uniformly.
//!
//! # Error Handling
//! Every fallible operation comes in two forms. The `try_` form returns a [`Result`] with an error
//! type specific to the operation, using enums for static dispatch rather than dynamic, with
//! structs (often ZSTs) that implement [`Error`](std::error::Error). The plain form panics with
//! that same error instead, which is usually more ergonomic. For example, imagine having to handle
//! the possibility of a capacity overflow every time you push into a
//! [`DynArray`](collections::contiguous::DynArray).
//!
//! Each error also implements [`ContainerError`](error::ContainerError), which maps it onto one of
//! three broad [`ErrorKind`](error::ErrorKind)s: `OutOfMemory`, `InvalidArgument` and
//! `OutOfRange`. A failed operation never leaves its container partially modified.
//!
//! ```
//! # use seq_lib::collections::contiguous::DynArray;
//! # use seq_lib::error::{ErrorKind, KindExt};
//! let mut arr = DynArray::<i32>::with_cap(1);
//! assert_eq!(arr.try_insert(1, 5).err_kind(), Some(ErrorKind::OutOfRange));
//! assert_eq!(arr.try_insert(0, 5), Ok(1));
//! ```
//!
//! # Dependencies
//! Allocation goes directly through [`std::alloc`], so that a failed allocation can be reported
//! as an error rather than aborting the process. This crate doesn't use [`Vec`] at all.
//!
//! This crate depends on some derive macros because they're helpful and remove the need for some
//! very repetitive programming, and on `tracing` to report growth and allocation failures.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;

pub mod error {
    //! The error types shared by every container, along with their [`ErrorKind`]s.

    #[doc(inline)]
    pub use crate::util::error::*;
    #[doc(inline)]
    pub use crate::util::result::KindExt;
}

pub(crate) mod util;
