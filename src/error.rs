use core::fmt;

/// Why a mutation of a [`WavlTree`](crate::WavlTree) was not applied.
///
/// A failed operation never changes the tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// `insert` was given a key that is already present.
    DuplicateKey(i32),
    /// `delete` was given a key that is not present.
    KeyNotFound(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateKey(key) => write!(f, "key {key} is already present"),
            Error::KeyNotFound(key) => write!(f, "key {key} not found"),
        }
    }
}

impl core::error::Error for Error {}
