//! Driver configuration and the output data rate setting.

use crate::register::DEFAULT_ADDRESS;

/// Output data rate of the humidity and temperature measurements (`ODR` field of `CTRL_REG1`).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DataRate {
    /// A single acquisition per [`Hts221::trigger_one_shot`](crate::Hts221::trigger_one_shot).
    OneShot = 0,
    /// 1 Hz.
    Hz1 = 1,
    /// 7 Hz.
    Hz7 = 2,
    /// 12.5 Hz.
    Hz12_5 = 3,
}

impl DataRate {
    /// Returns the data rate encoded by `bits`, or `None` if the value is out of range.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::OneShot),
            1 => Some(Self::Hz1),
            2 => Some(Self::Hz7),
            3 => Some(Self::Hz12_5),
            _ => None,
        }
    }

    /// Returns `true` if `bits` encodes a supported data rate.
    pub const fn is_valid(bits: u8) -> bool {
        Self::from_bits(bits).is_some()
    }

    /// Raw value of the two-bit `ODR` field.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Sampling frequency in millihertz. `OneShot` reports 0.
    pub const fn millihertz(self) -> u32 {
        match self {
            Self::OneShot => 0,
            Self::Hz1 => 1_000,
            Self::Hz7 => 7_000,
            Self::Hz12_5 => 12_500,
        }
    }
}

impl TryFrom<u8> for DataRate {
    type Error = u8;

    /// Fails with the rejected value.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_bits(value).ok_or(value)
    }
}

/// Number of times the boot bit is polled after a reset before giving up.
pub const DEFAULT_RESET_POLL_ATTEMPTS: u16 = 100;

/// Pause between two polls of the boot bit, in microseconds.
pub const DEFAULT_RESET_POLL_INTERVAL_US: u32 = 1_000;

/// Settings applied when the driver is created.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// 7-bit I2C address of the device.
    pub address: u8,
    /// Data rate written during initialization.
    pub data_rate: DataRate,
    /// Maximum number of boot bit reads while waiting for a reset to finish.
    pub reset_poll_attempts: u16,
    /// Delay between boot bit reads, in microseconds.
    pub reset_poll_interval_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            data_rate: DataRate::Hz12_5,
            reset_poll_attempts: DEFAULT_RESET_POLL_ATTEMPTS,
            reset_poll_interval_us: DEFAULT_RESET_POLL_INTERVAL_US,
        }
    }
}

impl Config {
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_data_rate(mut self, data_rate: DataRate) -> Self {
        self.data_rate = data_rate;
        self
    }

    /// Bounds the wait for a reset to `attempts` polls spaced `interval_us` apart.
    pub fn with_reset_polling(mut self, attempts: u16, interval_us: u32) -> Self {
        self.reset_poll_attempts = attempts;
        self.reset_poll_interval_us = interval_us;
        self
    }
}
