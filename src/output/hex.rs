use std::io::Write;

use port4_core::{MeasurementRecord, OutputError, OutputSink};
use port4_proto::HexDump;

/// Test-vector output sink.
///
/// For every message writes the record echo (unless disabled), the bytes as
/// lowercase hex, and the length:
///
/// ```text
/// Vbat 3.3 .
/// 01 34 cd
/// length: 3
/// ```
pub struct HexDumpSink<W> {
    writer: W,
    echo: bool,
}

impl<W: Write> HexDumpSink<W> {
    /// Create a sink that echoes each record before its encoding.
    pub fn new(writer: W) -> Self {
        Self { writer, echo: true }
    }

    /// Enable or disable the record echo line.
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_vector(&mut self, record: &MeasurementRecord, message: &[u8]) -> std::io::Result<()> {
        if self.echo {
            writeln!(self.writer, "{}", record)?;
        }
        writeln!(self.writer, "{}", HexDump(message))?;
        writeln!(self.writer, "length: {}", message.len())?;
        self.writer.flush()
    }
}

impl<W: Write> OutputSink for HexDumpSink<W> {
    async fn send(&mut self, record: &MeasurementRecord, message: &[u8]) -> Result<(), OutputError> {
        self.write_vector(record, message).map_err(|e| {
            log::error!("write failed: {}", e);
            OutputError::Io
        })
    }

    fn is_ready(&self) -> bool {
        true
    }
}
