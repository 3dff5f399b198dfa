//! Host-side adapters for generating port 0x04 test vectors.
//!
//! Records are read as `key value` text from any [`std::io::BufRead`] and
//! each encoded message is printed as a hex dump to any [`std::io::Write`].
//! Both plug into [`port4_core::EncoderBridge`].

pub mod input;
pub mod logger;
pub mod output;

pub use input::ConsoleInputSource;
pub use output::HexDumpSink;
