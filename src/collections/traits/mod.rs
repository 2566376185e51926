//! Traits shared by the collections in this crate.

pub mod identity;

#[doc(inline)]
pub use identity::Identity;
