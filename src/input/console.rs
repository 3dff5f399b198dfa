use std::collections::VecDeque;
use std::io::BufRead;

use port4_core::{InputError, InputSource, MeasurementRecord, RecordParser};

/// Text input source for measurement records.
///
/// Reads `key value` tokens from a buffered reader one line at a time and
/// feeds them to a [`RecordParser`]. Line breaks carry no meaning, so a
/// record may span several lines and a line may hold several records.
///
/// At end of input a record that was started but not closed with `.` is
/// still returned. After that every call yields [`InputError::Closed`].
pub struct ConsoleInputSource<R> {
    reader: R,
    line: String,
    tokens: VecDeque<String>,
    parser: Option<RecordParser>,
}

impl<R: BufRead> ConsoleInputSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            tokens: VecDeque::new(),
            parser: Some(RecordParser::new()),
        }
    }

    /// Refill the token queue. Returns `false` at end of input.
    fn read_line(&mut self) -> Result<bool, InputError> {
        self.line.clear();
        let n = self.reader.read_line(&mut self.line).map_err(|e| {
            log::error!("read failed: {}", e);
            InputError::Io
        })?;
        if n == 0 {
            return Ok(false);
        }

        self.tokens
            .extend(self.line.split_whitespace().map(str::to_owned));
        Ok(true)
    }
}

impl<R: BufRead> InputSource for ConsoleInputSource<R> {
    async fn receive(&mut self) -> Result<MeasurementRecord, InputError> {
        loop {
            let Some(parser) = self.parser.as_mut() else {
                return Err(InputError::Closed);
            };

            if let Some(token) = self.tokens.pop_front() {
                if let Some(record) = parser.push_token(&token)? {
                    return Ok(record);
                }
                continue;
            }

            if !self.read_line()? {
                let pending = self.parser.take().map(RecordParser::finish);
                return match pending {
                    Some(Ok(Some(record))) => Ok(record),
                    Some(Ok(None)) | None => Err(InputError::Closed),
                    Some(Err(e)) => Err(e.into()),
                };
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.parser.is_some()
    }
}
