//! Contiguous collection types, backed by a single heap allocation: [`DynArray`], a growable
//! dense sequence, and [`FixedArray`], a fixed-size table of optional slots.

pub mod dyn_array;
pub mod fixed_array;

pub(crate) mod raw;

#[doc(inline)]
pub use dyn_array::DynArray;
#[doc(inline)]
pub use fixed_array::FixedArray;
