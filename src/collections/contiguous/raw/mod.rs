//! The heap storage shared by the contiguous collections.

mod raw_array;
mod tests;

pub(crate) use raw_array::*;
