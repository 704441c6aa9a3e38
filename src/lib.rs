//! HTS221 Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the ST HTS221 capacitive
//! relative humidity and temperature sensor, built on top of the [`embedded-hal`] traits.
//!
//! The HTS221 stores two calibration points per quantity in its non-volatile
//! memory. The driver reads them once when it is created and converts every
//! raw sample by linear interpolation between them.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Bounded wait on device reset
//! - Optional logging support via `defmt`
//!
//! # Usage
//!
//! ```ignore
//! use hts221_sensor::{DataRate, Hts221};
//!
//! let mut hts = Hts221::new(i2c, delay)?;
//! hts.set_data_rate(DataRate::Hz1)?;
//!
//! let reading = hts.read()?;
//! // reading.temperature in °C, reading.relative_humidity in %
//! ```
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`I2c`] for register access
//! - [`DelayNs`] for pacing the reset poll
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` for public types and logs driver events
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`I2c`]: embedded_hal::i2c::I2c
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod bus;
pub mod calibration;
pub mod config;
pub mod error;
pub mod hts221;
pub mod register;

pub use calibration::{Calibration, CalibrationError, HumidityPoints, TemperaturePoints};
pub use config::{Config, DataRate};
pub use error::Error;
pub use hts221::{Hts221, Reading, Status};
pub use register::DEFAULT_ADDRESS;
