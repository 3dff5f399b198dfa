//! Input source trait and error types.

use core::fmt;
use core::future::Future;
use port4_proto::{MeasurementRecord, ParseError};

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Read from the underlying transport failed.
    Io,
    /// Malformed measurement input.
    Parse(ParseError),
    /// The source has no more records.
    Closed,
}

impl From<ParseError> for InputError {
    fn from(err: ParseError) -> Self {
        InputError::Parse(err)
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "input I/O error"),
            Self::Parse(err) => write!(f, "{}", err),
            Self::Closed => write!(f, "input closed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InputError {}

/// Async trait for measurement sources.
///
/// This trait abstracts where records come from (sensor task, console,
/// file replay), allowing implementations to be used interchangeably.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait InputSource {
    /// Wait for and receive the next complete measurement record.
    ///
    /// Returns [`InputError::Closed`] once the source is exhausted.
    fn receive(&mut self) -> impl Future<Output = Result<MeasurementRecord, InputError>>;

    /// Check if the source can still produce records.
    fn is_connected(&self) -> bool;
}
