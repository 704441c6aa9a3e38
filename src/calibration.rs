//! Factory calibration of the HTS221 and the conversion of raw ADC output.
//!
//! Each quantity is calibrated by two points, pairs of a raw ADC output and
//! the physical value it corresponds to. Readings are mapped to physical units
//! by linear interpolation between these points.

/// The two temperature calibration points.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemperaturePoints {
    /// First calibration temperature in 1/8 °C (10 bits).
    pub t0_deg_c_x8: u16,
    /// Second calibration temperature in 1/8 °C (10 bits).
    pub t1_deg_c_x8: u16,
    /// ADC output at `t0_deg_c_x8`.
    pub t0_out: i16,
    /// ADC output at `t1_deg_c_x8`.
    pub t1_out: i16,
}

/// The two humidity calibration points.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HumidityPoints {
    /// First calibration humidity in 1/2 %rH.
    pub h0_rh_x2: u8,
    /// Second calibration humidity in 1/2 %rH.
    pub h1_rh_x2: u8,
    /// ADC output at `h0_rh_x2`.
    pub h0_t0_out: i16,
    /// ADC output at `h1_rh_x2`.
    pub h1_t0_out: i16,
}

/// Reasons a set of calibration points cannot be used.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationError {
    /// `t0_out` equals `t1_out`.
    TemperatureOutputsEqual,
    /// `h0_t0_out` equals `h1_t0_out`.
    HumidityOutputsEqual,
}

/// Validated calibration constants.
///
/// Construction rejects points sharing the same ADC output, so the
/// conversions never divide by zero.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calibration {
    temperature: TemperaturePoints,
    humidity: HumidityPoints,
}

/// Rebuilds the 10-bit T0 value from its low byte and the shared `T1/T0 msb` register.
pub fn decode_t0_deg_c_x8(msb: u8, lsb: u8) -> u16 {
    lsb as u16 | (((msb & 0b0011) as u16) << 8)
}

/// Rebuilds the 10-bit T1 value from its low byte and the shared `T1/T0 msb` register.
pub fn decode_t1_deg_c_x8(msb: u8, lsb: u8) -> u16 {
    lsb as u16 | (((msb & 0b1100) as u16) << 6)
}

impl Calibration {
    pub fn new(
        temperature: TemperaturePoints,
        humidity: HumidityPoints,
    ) -> Result<Self, CalibrationError> {
        if temperature.t0_out == temperature.t1_out {
            return Err(CalibrationError::TemperatureOutputsEqual);
        }
        if humidity.h0_t0_out == humidity.h1_t0_out {
            return Err(CalibrationError::HumidityOutputsEqual);
        }
        Ok(Calibration {
            temperature,
            humidity,
        })
    }

    pub fn temperature_points(&self) -> &TemperaturePoints {
        &self.temperature
    }

    pub fn humidity_points(&self) -> &HumidityPoints {
        &self.humidity
    }

    /// Converts a raw humidity output into relative humidity in percent.
    ///
    /// The result is not clamped: readings outside the calibrated range may
    /// fall below 0 % or above 100 %.
    pub fn humidity(&self, raw: i16) -> f32 {
        let HumidityPoints {
            h0_rh_x2,
            h1_rh_x2,
            h0_t0_out,
            h1_t0_out,
        } = self.humidity;

        let half_range = (h1_rh_x2 as f32 - h0_rh_x2 as f32) / 2.0;
        let adc_range = h1_t0_out as i32 - h0_t0_out as i32;
        let meas = raw as i32 - h0_t0_out as i32;

        let interpolated = meas as f32 * half_range / adc_range as f32;
        h0_rh_x2 as f32 / 2.0 + interpolated
    }

    /// Converts a raw temperature output into degrees Celsius.
    pub fn temperature(&self, raw: i16) -> f32 {
        let TemperaturePoints {
            t0_deg_c_x8,
            t1_deg_c_x8,
            t0_out,
            t1_out,
        } = self.temperature;

        let t0 = t0_deg_c_x8 as f32 / 8.0;
        let t1 = t1_deg_c_x8 as f32 / 8.0;
        let adc_range = t1_out as i32 - t0_out as i32;
        let meas = raw as i32 - t0_out as i32;

        t0 + meas as f32 * (t1 - t0) / adc_range as f32
    }
}
