//! Measurement types: MeasurementRecord, EnvironmentReading, RegisterBank, Flags.

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign};

/// Maximum number of registers in one message.
///
/// Derived from the radio payload budget: `(240 - 13) / 2`.
pub const MAX_REGISTERS: usize = (240 - 13) / 2;

/// Presence bits carried in the first byte of a message.
///
/// Registers have no bit: when present they always trail the message.
///
/// # Example
///
/// ```
/// use port4_proto::Flags;
///
/// let flags = Flags::BOOT_COUNT | Flags::ENVIRONMENT;
/// assert_eq!(flags.raw(), 0x0C);
/// assert!(flags.contains(Flags::ENVIRONMENT));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Flags(pub u8);

impl Flags {
    pub const BATTERY_VOLTAGE: Self = Self(1 << 0);
    pub const SYSTEM_VOLTAGE: Self = Self(1 << 1);
    pub const BOOT_COUNT: Self = Self(1 << 2);
    pub const ENVIRONMENT: Self = Self(1 << 3);

    /// No optional field present.
    pub const NONE: Self = Self(0);

    /// Check if the given flag(s) are set.
    #[inline]
    #[must_use]
    pub const fn contains(self, flag: Flags) -> bool {
        (self.0 & flag.0) == flag.0
    }

    /// Get the raw flag byte.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Flags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Flags {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

/// Temperature and relative humidity, always sampled and sent together.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnvironmentReading {
    /// Degrees Celsius.
    pub temperature: f32,
    /// Percent relative humidity, 0-100.
    pub humidity: f32,
}

impl EnvironmentReading {
    #[must_use]
    pub const fn new(temperature: f32, humidity: f32) -> Self {
        Self {
            temperature,
            humidity,
        }
    }
}

/// Returned when a register bank is already holding [`MAX_REGISTERS`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityError;

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "register bank full ({} registers)", MAX_REGISTERS)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CapacityError {}

/// Raw register values in device-defined units.
///
/// Storage is fixed at [`MAX_REGISTERS`]; [`count`](Self::count) is the
/// number of registers actually sampled.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct RegisterBank {
    registers: heapless::Vec<f32, MAX_REGISTERS>,
}

impl RegisterBank {
    /// Create an empty bank.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registers: heapless::Vec::new(),
        }
    }

    /// Create a bank holding a copy of `values`.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if `values` is longer than [`MAX_REGISTERS`].
    pub fn from_slice(values: &[f32]) -> Result<Self, CapacityError> {
        heapless::Vec::from_slice(values)
            .map(|registers| Self { registers })
            .map_err(|_| CapacityError)
    }

    /// Append a register.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the bank is full.
    pub fn push(&mut self, value: f32) -> Result<(), CapacityError> {
        self.registers.push(value).map_err(|_| CapacityError)
    }

    /// Number of registers held.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.registers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.registers.is_full()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.registers
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, f32> {
        self.registers.iter()
    }

    pub fn clear(&mut self) {
        self.registers.clear();
    }
}

impl<'a> IntoIterator for &'a RegisterBank {
    type Item = &'a f32;
    type IntoIter = core::slice::Iter<'a, f32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RegisterBank {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "RegisterBank({=[?]})", self.as_slice())
    }
}

/// One port 0x04 measurement.
///
/// Each field is independently optional; absent fields are omitted from the
/// encoded message. Construct a fresh record per message.
///
/// `Display` prints the record in the same `key value` syntax that
/// [`RecordParser`](crate::RecordParser) reads, ending with `.`:
///
/// ```
/// use port4_proto::{EnvironmentReading, MeasurementRecord};
///
/// let record = MeasurementRecord {
///     boot_count: Some(7),
///     environment: Some(EnvironmentReading::new(22.5, 45.0)),
///     ..MeasurementRecord::new()
/// };
/// assert_eq!(record.to_string(), "Boot 7 Env 22.5 45 .");
/// ```
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementRecord {
    /// Battery voltage (V).
    pub battery_voltage: Option<f32>,
    /// System supply voltage (V).
    pub system_voltage: Option<f32>,
    /// Boot counter.
    pub boot_count: Option<u8>,
    /// Temperature and humidity.
    pub environment: Option<EnvironmentReading>,
    /// Register bank (no flag bit on the wire).
    pub registers: Option<RegisterBank>,
}

impl MeasurementRecord {
    /// Create a record with every field absent.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            battery_voltage: None,
            system_voltage: None,
            boot_count: None,
            environment: None,
            registers: None,
        }
    }

    /// Check if no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.battery_voltage.is_none()
            && self.system_voltage.is_none()
            && self.boot_count.is_none()
            && self.environment.is_none()
            && self.registers.is_none()
    }

    /// Presence bits for the flag byte.
    #[must_use]
    pub fn flags(&self) -> Flags {
        let mut flags = Flags::NONE;
        if self.battery_voltage.is_some() {
            flags |= Flags::BATTERY_VOLTAGE;
        }
        if self.system_voltage.is_some() {
            flags |= Flags::SYSTEM_VOLTAGE;
        }
        if self.boot_count.is_some() {
            flags |= Flags::BOOT_COUNT;
        }
        if self.environment.is_some() {
            flags |= Flags::ENVIRONMENT;
        }
        flags
    }

    /// Set a single field present, replacing any previous value.
    #[inline]
    pub fn apply(&mut self, field: MeasurementField) {
        match field {
            MeasurementField::BatteryVoltage(v) => self.battery_voltage = Some(v),
            MeasurementField::SystemVoltage(v) => self.system_voltage = Some(v),
            MeasurementField::BootCount(n) => self.boot_count = Some(n),
            MeasurementField::Environment(env) => self.environment = Some(env),
            MeasurementField::Registers(bank) => self.registers = Some(bank),
        }
    }
}

impl fmt::Display for MeasurementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(v) = self.battery_voltage {
            write!(f, "{} {} ", FieldKey::BatteryVoltage.as_str(), v)?;
        }
        if let Some(v) = self.system_voltage {
            write!(f, "{} {} ", FieldKey::SystemVoltage.as_str(), v)?;
        }
        if let Some(n) = self.boot_count {
            write!(f, "{} {} ", FieldKey::BootCount.as_str(), n)?;
        }
        if let Some(env) = &self.environment {
            write!(
                f,
                "{} {} {} ",
                FieldKey::Environment.as_str(),
                env.temperature,
                env.humidity
            )?;
        }
        if let Some(bank) = &self.registers {
            write!(f, "{} [", FieldKey::Registers.as_str())?;
            for value in bank {
                write!(f, " {}", value)?;
            }
            f.write_str(" ] ")?;
        }
        f.write_str(".")
    }
}

/// Name of a record field in the text syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKey {
    BatteryVoltage,
    SystemVoltage,
    BootCount,
    Environment,
    Registers,
}

impl FieldKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKey::BatteryVoltage => "Vbat",
            FieldKey::SystemVoltage => "Vsys",
            FieldKey::BootCount => "Boot",
            FieldKey::Environment => "Env",
            FieldKey::Registers => "Modbus",
        }
    }

    /// Look up a key token. Matching is case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Vbat" => Some(FieldKey::BatteryVoltage),
            "Vsys" => Some(FieldKey::SystemVoltage),
            "Boot" => Some(FieldKey::BootCount),
            "Env" => Some(FieldKey::Environment),
            "Modbus" => Some(FieldKey::Registers),
            _ => None,
        }
    }
}

/// A single field assignment, as supplied by a record producer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum MeasurementField {
    /// `Vbat <volts>`
    BatteryVoltage(f32),
    /// `Vsys <volts>`
    SystemVoltage(f32),
    /// `Boot <count>`
    BootCount(u8),
    /// `Env <celsius> <percent>`
    Environment(EnvironmentReading),
    /// `Modbus [ <value>... ]`
    Registers(RegisterBank),
}

impl MeasurementField {
    #[must_use]
    pub fn key(&self) -> FieldKey {
        match self {
            Self::BatteryVoltage(_) => FieldKey::BatteryVoltage,
            Self::SystemVoltage(_) => FieldKey::SystemVoltage,
            Self::BootCount(_) => FieldKey::BootCount,
            Self::Environment(_) => FieldKey::Environment,
            Self::Registers(_) => FieldKey::Registers,
        }
    }
}
