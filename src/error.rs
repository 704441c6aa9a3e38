use crate::calibration::CalibrationError;

/// Possible errors from the HTS221 driver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// Error from the underlying I2C bus.
    Bus(E),
    /// The `WHO_AM_I` register did not hold the HTS221 identifier.
    ///
    /// Carries the value that was read instead.
    DeviceNotFound(u8),
    /// The value is not one of the supported output data rates.
    InvalidConfig(u8),
    /// The boot bit was still set after the configured number of polls.
    ResetTimeout,
    /// The factory calibration stored on the device cannot be used for conversion.
    Calibration(CalibrationError),
}

impl<E> From<E> for Error<E> {
    fn from(value: E) -> Self {
        Self::Bus(value)
    }
}
