use std::num::NonZero;

use crate::util::error::CapacityOverflow;

/// The length of a non-empty list. An empty list has no [`ListContents`](super::ListContents) at
/// all, so a zero length is unrepresentable.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Length(pub NonZero<usize>);

impl Length {
    pub const fn checked_add(self, other: usize) -> Result<Length, CapacityOverflow> {
        match self.0.checked_add(other) {
            Some(res) => Ok(Length(res)),
            None => Err(CapacityOverflow),
        }
    }

    /// Subtracts `other`, returning [`None`] if the result would be zero (or less).
    pub const fn checked_sub(self, other: usize) -> Option<Length> {
        match self.0.get().checked_sub(other) {
            Some(res) => match NonZero::new(res) {
                Some(res) => Some(Length(res)),
                None => None,
            },
            None => None,
        }
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }
}

pub(crate) const ONE: Length = Length(NonZero::<usize>::MIN);
