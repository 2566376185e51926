//! A module containing [`FixedArray`] and associated types.
//!
//! The other included types are for iteration, which only ever visits occupied slots and yields
//! each value alongside its index.
//!
//! [`FixedArray`] is also re-exported under the parent module.

mod fixed_array;
mod iter;
mod tests;

pub use fixed_array::*;
pub use iter::*;
