use crate::util::error::{ContainerError, ErrorKind};

pub(crate) trait ResultExtension<T, E: ContainerError> {
    /// A method similar to [`Result::unwrap`], except that it panics with the kind and message of
    /// the error itself.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: ContainerError> ResultExtension<T, E> for Result<T, E> {
    #[track_caller]
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{}: {}", error.kind(), error),
        }
    }
}

/// Provides the [`ErrorKind`] of a failed operation without consuming its [`Result`].
pub trait KindExt {
    /// Returns the kind of the contained error, or [`None`] if the operation succeeded.
    fn err_kind(&self) -> Option<ErrorKind>;
}

impl<T, E: ContainerError> KindExt for Result<T, E> {
    fn err_kind(&self) -> Option<ErrorKind> {
        self.as_ref().err().map(ContainerError::kind)
    }
}
