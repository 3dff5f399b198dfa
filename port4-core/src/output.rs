//! Output sink trait and error types.

use core::fmt;
use core::future::Future;
use port4_proto::MeasurementRecord;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// Write to the underlying transport failed.
    Io,
    /// Transport not ready (e.g., radio not joined).
    NotReady,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "output I/O error"),
            Self::NotReady => write!(f, "output not ready"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutputError {}

/// Async trait for encoded message sinks.
///
/// This trait abstracts the destination of encoded messages, enabling
/// different transports (radio uplink, serial debug, test-vector dump).
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait OutputSink {
    /// Send one encoded message.
    ///
    /// `record` is the measurement `message` was encoded from. Transports
    /// only need `message`; annotating sinks may print both.
    fn send(
        &mut self,
        record: &MeasurementRecord,
        message: &[u8],
    ) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the output is ready to accept data.
    fn is_ready(&self) -> bool;
}
