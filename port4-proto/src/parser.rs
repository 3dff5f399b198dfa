//! Token reader that builds measurement records from text.
//!
//! Input is a stream of whitespace-separated tokens; line breaks carry no
//! meaning. Each record is a sequence of keys with their values, closed by
//! a lone `.`:
//!
//! ```text
//! Vbat 3.3 Vsys 3.1 Boot 7
//! Env 22.5 45 Modbus [ 100 200 ] .
//! ```
//!
//! | Key | Values |
//! |-----|--------|
//! | `Vbat` | battery voltage (float) |
//! | `Vsys` | system voltage (float) |
//! | `Boot` | boot count (unsigned, truncated to 8 bits) |
//! | `Env` | temperature, humidity (two floats) |
//! | `Modbus` | `[`, up to 113 floats, `]` |
//!
//! Unknown keys are logged and skipped.

use core::fmt;

use crate::types::{EnvironmentReading, FieldKey, MeasurementField, MeasurementRecord, RegisterBank};

/// Token that closes a record.
pub const END_OF_RECORD: &str = ".";

const OPEN_BRACKET: &str = "[";
const CLOSE_BRACKET: &str = "]";

/// Error type for the token reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// A value token is not a valid number for its key.
    InvalidNumber(FieldKey),
    /// `Modbus` was not followed by `[`.
    ExpectedOpenBracket,
    /// The register list did not end with `]`.
    ExpectedCloseBracket,
    /// Input ended before a key received all of its values.
    MissingValue(FieldKey),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber(key) => write!(f, "invalid number for {}", key.as_str()),
            Self::ExpectedOpenBracket => write!(f, "Modbus parse error: expected '['"),
            Self::ExpectedCloseBracket => write!(f, "Modbus parse error: expected ']'"),
            Self::MissingValue(key) => write!(f, "missing value for {}", key.as_str()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// What the next token is expected to be.
#[derive(Debug, Clone, PartialEq)]
enum State {
    Key,
    BatteryVoltage,
    SystemVoltage,
    BootCount,
    Temperature,
    Humidity(f32),
    OpenBracket,
    Registers(RegisterBank),
}

/// Incremental reader turning `key value` tokens into [`MeasurementRecord`]s.
///
/// # Example
///
/// ```
/// use port4_proto::RecordParser;
///
/// let mut parser = RecordParser::new();
/// assert_eq!(parser.push_token("Boot").unwrap(), None);
/// assert_eq!(parser.push_token("300").unwrap(), None);
///
/// let record = parser.push_token(".").unwrap().unwrap();
/// assert_eq!(record.boot_count, Some(44)); // 300 truncated to 8 bits
/// ```
#[derive(Debug, Clone)]
pub struct RecordParser {
    record: MeasurementRecord,
    state: State,
    dirty: bool,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            record: MeasurementRecord::new(),
            state: State::Key,
            dirty: false,
        }
    }

    /// The record assembled so far.
    #[must_use]
    pub fn pending(&self) -> &MeasurementRecord {
        &self.record
    }

    /// Check if any field was set since the last completed record.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.dirty
    }

    /// Feed one token.
    ///
    /// Returns the completed record when `token` is `.`. Empty tokens are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed values. The reader then expects
    /// a key again; fields set before the error are kept.
    pub fn push_token(&mut self, token: &str) -> Result<Option<MeasurementRecord>, ParseError> {
        if token.is_empty() {
            return Ok(None);
        }

        let state = core::mem::replace(&mut self.state, State::Key);
        match state {
            State::Key => return Ok(self.push_key(token)),
            State::BatteryVoltage => {
                let v = parse_f32(token, FieldKey::BatteryVoltage)?;
                self.set(MeasurementField::BatteryVoltage(v));
            }
            State::SystemVoltage => {
                let v = parse_f32(token, FieldKey::SystemVoltage)?;
                self.set(MeasurementField::SystemVoltage(v));
            }
            State::BootCount => {
                let n: u32 = token
                    .parse()
                    .map_err(|_| invalid_number(token, FieldKey::BootCount))?;
                self.set(MeasurementField::BootCount(n as u8));
            }
            State::Temperature => {
                let t = parse_f32(token, FieldKey::Environment)?;
                self.state = State::Humidity(t);
            }
            State::Humidity(t) => {
                let rh = parse_f32(token, FieldKey::Environment)?;
                self.set(MeasurementField::Environment(EnvironmentReading::new(t, rh)));
            }
            State::OpenBracket => {
                if token != OPEN_BRACKET {
                    log::warn!("expected '[', got {}", token);
                    return Err(ParseError::ExpectedOpenBracket);
                }
                self.state = State::Registers(RegisterBank::new());
            }
            State::Registers(mut bank) => {
                // A number that does not fit the bank must be followed by `]` instead.
                if let Ok(value) = token.parse::<f32>() {
                    if bank.push(value).is_ok() {
                        self.state = State::Registers(bank);
                        return Ok(None);
                    }
                }
                if token != CLOSE_BRACKET {
                    log::warn!("expected ']', got {}", token);
                    return Err(ParseError::ExpectedCloseBracket);
                }
                self.set(MeasurementField::Registers(bank));
            }
        }

        Ok(None)
    }

    /// Signal end of input.
    ///
    /// Returns the pending record if any field was set since the last `.`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if input ended in the middle of a key's values.
    pub fn finish(self) -> Result<Option<MeasurementRecord>, ParseError> {
        match self.state {
            State::Key => Ok(self.dirty.then_some(self.record)),
            State::BatteryVoltage => Err(ParseError::MissingValue(FieldKey::BatteryVoltage)),
            State::SystemVoltage => Err(ParseError::MissingValue(FieldKey::SystemVoltage)),
            State::BootCount => Err(ParseError::MissingValue(FieldKey::BootCount)),
            State::Temperature | State::Humidity(_) => {
                Err(ParseError::MissingValue(FieldKey::Environment))
            }
            State::OpenBracket => Err(ParseError::ExpectedOpenBracket),
            State::Registers(_) => Err(ParseError::ExpectedCloseBracket),
        }
    }

    fn push_key(&mut self, token: &str) -> Option<MeasurementRecord> {
        if token == END_OF_RECORD {
            self.dirty = false;
            let record = core::mem::replace(&mut self.record, MeasurementRecord::new());
            log::debug!("record complete: flags {:#04x}", record.flags().raw());
            return Some(record);
        }

        self.state = match FieldKey::from_token(token) {
            Some(FieldKey::BatteryVoltage) => State::BatteryVoltage,
            Some(FieldKey::SystemVoltage) => State::SystemVoltage,
            Some(FieldKey::BootCount) => State::BootCount,
            Some(FieldKey::Environment) => State::Temperature,
            Some(FieldKey::Registers) => State::OpenBracket,
            None => {
                log::warn!("unknown key: {}", token);
                State::Key
            }
        };
        None
    }

    fn set(&mut self, field: MeasurementField) {
        log::trace!("set {}", field.key().as_str());
        self.record.apply(field);
        self.dirty = true;
    }
}

fn parse_f32(token: &str, key: FieldKey) -> Result<f32, ParseError> {
    token.parse().map_err(|_| invalid_number(token, key))
}

fn invalid_number(token: &str, key: FieldKey) -> ParseError {
    log::warn!("parse error: {} {}", key.as_str(), token);
    ParseError::InvalidNumber(key)
}
