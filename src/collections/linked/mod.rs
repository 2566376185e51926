//! Linked collection types. Currently just [`LinkedList`], a list with links in both directions.

pub mod list;

#[doc(inline)]
pub use list::LinkedList;
