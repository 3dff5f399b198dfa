//! EncoderBridge: connects measurement sources to message sinks.

use core::fmt;

use crate::input::{InputError, InputSource};
use crate::output::{OutputError, OutputSink};
use port4_proto::{Serialize, SerializeError, MAX_MESSAGE_SIZE};

/// A bridge that encodes records from an input source and forwards the
/// messages to an output sink.
///
/// This abstraction decouples the producer and transport implementations,
/// making the system more testable and flexible. Messages are encoded into
/// a stack buffer of [`MAX_MESSAGE_SIZE`] bytes, so the bridge never
/// allocates.
pub struct EncoderBridge<I, O> {
    input: I,
    output: O,
}

impl<I: InputSource, O: OutputSink> EncoderBridge<I, O> {
    /// Create a new bridge from an input source and output sink.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Process records until the source reports [`InputError::Closed`].
    ///
    /// Returns the number of messages sent. Any other error stops the bridge.
    pub async fn run_until_closed(&mut self) -> Result<usize, BridgeError> {
        let mut sent = 0;
        loop {
            match self.process_one().await {
                Ok(_) => sent += 1,
                Err(BridgeError::Input(InputError::Closed)) => {
                    log::debug!("input closed after {} messages", sent);
                    return Ok(sent);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Receive one record, encode it, and forward the message.
    ///
    /// Returns the encoded message length.
    pub async fn process_one(&mut self) -> Result<usize, BridgeError> {
        let record = self.input.receive().await.map_err(BridgeError::Input)?;

        let mut buf = [0u8; MAX_MESSAGE_SIZE];
        let len = record.serialize(&mut buf).map_err(BridgeError::Encode)?;
        log::trace!("flags {:#04x}, {} bytes", record.flags().raw(), len);

        self.output
            .send(&record, &buf[..len])
            .await
            .map_err(BridgeError::Output)?;
        Ok(len)
    }

    /// Get a reference to the input source.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get a mutable reference to the input source.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get a reference to the output sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Decompose the bridge into its input and output components.
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Error from the input source.
    Input(InputError),
    /// Error from the output sink.
    Output(OutputError),
    /// The record did not fit the message buffer.
    Encode(SerializeError),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "input: {}", e),
            Self::Output(e) => write!(f, "output: {}", e),
            Self::Encode(e) => write!(f, "encode: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BridgeError {}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use port4_proto::{EnvironmentReading, FieldKey, MeasurementRecord, ParseError, RegisterBank};
    use std::sync::{Arc, Mutex};
    use std::vec;
    use std::vec::Vec;

    // Simple mock input source
    struct MockInput {
        records: Vec<Result<MeasurementRecord, InputError>>,
        index: usize,
    }

    impl MockInput {
        fn new(records: Vec<Result<MeasurementRecord, InputError>>) -> Self {
            Self { records, index: 0 }
        }
    }

    impl InputSource for MockInput {
        fn receive(&mut self) -> impl Future<Output = Result<MeasurementRecord, InputError>> {
            let result = if self.index < self.records.len() {
                let r = self.records[self.index].clone();
                self.index += 1;
                r
            } else {
                Err(InputError::Closed)
            };
            core::future::ready(result)
        }

        fn is_connected(&self) -> bool {
            self.index < self.records.len()
        }
    }

    // Simple mock output sink
    struct MockOutput {
        sent: Arc<Mutex<Vec<(MeasurementRecord, Vec<u8>)>>>,
        fail: bool,
    }

    impl MockOutput {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }
    }

    impl OutputSink for MockOutput {
        fn send(
            &mut self,
            record: &MeasurementRecord,
            message: &[u8],
        ) -> impl Future<Output = Result<(), OutputError>> {
            let result = if self.fail {
                Err(OutputError::NotReady)
            } else {
                self.sent
                    .lock()
                    .unwrap()
                    .push((record.clone(), message.to_vec()));
                Ok(())
            };
            core::future::ready(result)
        }

        fn is_ready(&self) -> bool {
            !self.fail
        }
    }

    // Helper to run a future to completion (simple blocking executor)
    fn block_on<F: Future>(mut f: F) -> F::Output {
        fn noop_raw_waker() -> RawWaker {
            fn noop(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
        let mut cx = Context::from_waker(&waker);

        // SAFETY: We don't move f after pinning
        let mut f = unsafe { Pin::new_unchecked(&mut f) };

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {
                    panic!("Mock future returned Pending unexpectedly");
                }
            }
        }
    }

    #[test]
    fn test_bridge_encodes_and_forwards() {
        let record = MeasurementRecord {
            boot_count: Some(7),
            environment: Some(EnvironmentReading::new(22.5, 45.0)),
            ..MeasurementRecord::new()
        };

        let input = MockInput::new(vec![Ok(record.clone())]);
        let output = MockOutput::new();
        let sent_ref = output.sent.clone();

        let mut bridge = EncoderBridge::new(input, output);

        let result = block_on(bridge.process_one());
        assert_eq!(result, Ok(6));

        let sent = sent_ref.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, record);
        assert_eq!(sent[0].1, [0x0C, 0x07, 0x16, 0x80, 0x73, 0x33]);
    }

    #[test]
    fn test_bridge_input_error_sends_nothing() {
        let parse = ParseError::InvalidNumber(FieldKey::BatteryVoltage);
        let input = MockInput::new(vec![Err(parse.into())]);
        let output = MockOutput::new();
        let sent_ref = output.sent.clone();

        let mut bridge = EncoderBridge::new(input, output);

        let result = block_on(bridge.process_one());
        assert_eq!(result, Err(BridgeError::Input(InputError::Parse(parse))));
        assert!(sent_ref.lock().unwrap().is_empty());
    }

    #[test]
    fn test_bridge_output_error() {
        let input = MockInput::new(vec![Ok(MeasurementRecord::new())]);
        let mut bridge = EncoderBridge::new(input, MockOutput::failing());

        let result = block_on(bridge.process_one());
        assert_eq!(result, Err(BridgeError::Output(OutputError::NotReady)));
    }

    #[test]
    fn test_run_until_closed_counts_messages() {
        let registers = RegisterBank::from_slice(&[100.0, 200.0]).unwrap();
        let input = MockInput::new(vec![
            Ok(MeasurementRecord::new()),
            Ok(MeasurementRecord {
                registers: Some(registers),
                ..MeasurementRecord::new()
            }),
        ]);
        let output = MockOutput::new();
        let sent_ref = output.sent.clone();

        let mut bridge = EncoderBridge::new(input, output);
        assert_eq!(block_on(bridge.run_until_closed()), Ok(2));
        assert!(!bridge.input().is_connected());

        let sent = sent_ref.lock().unwrap();
        assert_eq!(sent[0].1, [0x00]);
        assert_eq!(sent[1].1, [0x00, 0x00, 0x64, 0x00, 0xC8]);
    }

    #[test]
    fn test_run_until_closed_stops_on_error() {
        let input = MockInput::new(vec![
            Ok(MeasurementRecord::new()),
            Err(InputError::Parse(ParseError::ExpectedCloseBracket)),
            Ok(MeasurementRecord::new()),
        ]);
        let output = MockOutput::new();
        let sent_ref = output.sent.clone();

        let mut bridge = EncoderBridge::new(input, output);
        assert_eq!(
            block_on(bridge.run_until_closed()),
            Err(BridgeError::Input(InputError::Parse(
                ParseError::ExpectedCloseBracket
            )))
        );
        assert_eq!(sent_ref.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_into_parts() {
        let bridge = EncoderBridge::new(MockInput::new(vec![]), MockOutput::new());
        let (input, output) = bridge.into_parts();
        assert!(!input.is_connected());
        assert!(output.is_ready());
    }

    #[test]
    fn test_error_display() {
        use std::string::ToString;

        assert_eq!(
            BridgeError::Input(InputError::Closed).to_string(),
            "input: input closed"
        );
        assert_eq!(
            BridgeError::Encode(SerializeError::BufferTooSmall).to_string(),
            "encode: buffer too small"
        );
    }
}
