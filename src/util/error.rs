use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// The broad category of a failure, shared by every container in this crate.
///
/// Each concrete error type maps onto exactly one kind, which allows callers to branch on the
/// category without matching every error type individually.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum ErrorKind {
    /// An allocation or reallocation failed, or the requested layout could never be allocated.
    OutOfMemory,
    /// An argument was unusable: a zero size, a search without any basis for comparison, or a
    /// search which failed to locate a match.
    InvalidArgument,
    /// An index was outside of the interval permitted by the operation.
    OutOfRange,
}

/// Implemented by every error produced by the containers in this crate.
pub trait ContainerError: Error {
    /// Returns the [`ErrorKind`] of this error.
    fn kind(&self) -> ErrorKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

impl ContainerError for IndexOutOfBounds {
    fn kind(&self) -> ErrorKind {
        ErrorKind::OutOfRange
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

impl ContainerError for CapacityOverflow {
    fn kind(&self) -> ErrorKind {
        ErrorKind::OutOfMemory
    }
}

/// The global allocator returned null for a request of `size` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocFailed {
    pub size: usize,
}

impl Display for AllocFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to allocate {} bytes!", self.size)
    }
}

impl Error for AllocFailed {}

impl ContainerError for AllocFailed {
    fn kind(&self) -> ErrorKind {
        ErrorKind::OutOfMemory
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroCapacity;

impl Display for ZeroCapacity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unable to create a collection with capacity 0!")
    }
}

impl Error for ZeroCapacity {}

impl ContainerError for ZeroCapacity {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFound;

impl Display for NotFound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "No element matched the provided predicate!")
    }
}

impl Error for NotFound {}

impl ContainerError for NotFound {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingProbe;

impl Display for MissingProbe {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unable to search by identity without a probe!")
    }
}

impl Error for MissingProbe {}

impl ContainerError for MissingProbe {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error, From, TryInto, IsVariant)]
pub enum AllocError {
    CapacityOverflow(CapacityOverflow),
    AllocFailed(AllocFailed),
}

impl ContainerError for AllocError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::OutOfMemory
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error, From, TryInto, IsVariant)]
pub enum CreateError {
    ZeroCapacity(ZeroCapacity),
    Alloc(AllocError),
}

impl From<CapacityOverflow> for CreateError {
    fn from(value: CapacityOverflow) -> Self {
        AllocError::from(value).into()
    }
}

impl ContainerError for CreateError {
    fn kind(&self) -> ErrorKind {
        match self {
            CreateError::ZeroCapacity(e) => e.kind(),
            CreateError::Alloc(e) => e.kind(),
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error, From, TryInto, IsVariant)]
pub enum InsertError {
    IndexOutOfBounds(IndexOutOfBounds),
    Alloc(AllocError),
}

impl From<CapacityOverflow> for InsertError {
    fn from(value: CapacityOverflow) -> Self {
        AllocError::from(value).into()
    }
}

impl ContainerError for InsertError {
    fn kind(&self) -> ErrorKind {
        match self {
            InsertError::IndexOutOfBounds(e) => e.kind(),
            InsertError::Alloc(e) => e.kind(),
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error, From, TryInto, IsVariant)]
pub enum SearchError {
    MissingProbe(MissingProbe),
    NotFound(NotFound),
}

impl ContainerError for SearchError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

/// An error paired with the value which the failed operation was unable to store.
///
/// Inserting operations move their value in before they can fail, so on a failure the value is
/// handed back alongside the reason rather than dropped.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Rejected<T, E> {
    pub error: E,
    pub value: T,
}

impl<T, E> Rejected<T, E> {
    pub const fn new(error: E, value: T) -> Rejected<T, E> {
        Rejected { error, value }
    }

    /// Returns the value which couldn't be stored, discarding the error.
    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (E, T) {
        (self.error, self.value)
    }

    /// Widens the error into a composite error type, keeping the value.
    pub fn convert<F: From<E>>(self) -> Rejected<T, F> {
        Rejected {
            error: self.error.into(),
            value: self.value,
        }
    }
}

impl<T, E: Debug> Debug for Rejected<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T, E: Display> Display for Rejected<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl<T, E: Error> Error for Rejected<T, E> {}

impl<T, E: ContainerError> ContainerError for Rejected<T, E> {
    fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}
