//! Construction errors.
//!
//! Only building a simulation or selecting a mode by raw index can fail.
//! Everything that runs per frame is infallible.

use core::fmt;

/// Errors surfaced to the host before it enters the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Width or height was zero.
    InvalidDimensions,
    /// The cell or pixel storage could not be allocated.
    OutOfMemory,
    /// A mode index past the last animation mode.
    InvalidMode(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions => f.write_str("grid dimensions must be non-zero"),
            Self::OutOfMemory => f.write_str("not enough heap for the grid"),
            Self::InvalidMode(index) => write!(f, "no animation mode with index {index}"),
        }
    }
}

impl core::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;

impl From<alloc::collections::TryReserveError> for Error {
    fn from(_: alloc::collections::TryReserveError) -> Self {
        Self::OutOfMemory
    }
}
