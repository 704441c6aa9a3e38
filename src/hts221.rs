use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::bus::Bus;
use crate::calibration::{
    Calibration, HumidityPoints, TemperaturePoints, decode_t0_deg_c_x8, decode_t1_deg_c_x8,
};
use crate::config::{Config, DataRate};
use crate::error::Error;
use crate::register::{
    BOOT, CHIP_ID, CHIP_ID_REG, DATA_RATE, ENABLED, H0_OUT, H0_RH, H1_OUT, H1_RH, ONE_SHOT,
    RAW_HUMIDITY, RAW_TEMPERATURE, STATUS, T0_DEG_C_LSB, T0_OUT_REG, T1_DEG_C_LSB, T1_OUT_REG,
    T1_T0_DEG_C_MSB,
};

/// Driver for the HTS221 humidity and temperature sensor.
pub struct Hts221<I2C, D> {
    bus: Bus<I2C>,
    delay: D,
    config: Config,
    calibration: Calibration,
}

/// Reading returned by the HTS221 sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub relative_humidity: f32,
}

/// Content of the status register.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status {
    /// A new temperature sample is available.
    pub temperature_available: bool,
    /// A new humidity sample is available.
    pub humidity_available: bool,
}

impl<I2C, D, E> Hts221<I2C, D>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
{
    /// Creates a new instance of the HTS221 driver with the default [`Config`].
    ///
    /// See [`Hts221::with_config`].
    pub fn new(i2c: I2C, delay: D) -> Result<Self, Error<E>> {
        Self::with_config(i2c, delay, Config::default())
    }

    /// Creates a new instance of the HTS221 driver and brings the device up.
    ///
    /// The sequence is: check `WHO_AM_I`, reset, power up, set the configured
    /// data rate and load the factory calibration.
    ///
    /// # Arguments
    ///
    /// * `i2c` - The I2C bus the HTS221 is connected to.
    /// * `delay` - A delay provider implementing the `DelayNs` trait, used while waiting for a reset.
    /// * `config` - Device address, initial data rate and reset polling bounds.
    ///
    /// # Errors
    ///
    /// * `Error::DeviceNotFound` if the chip identifier does not match. No other
    ///   register is touched in that case.
    /// * `Error::ResetTimeout` if the device does not finish its reset in time.
    /// * `Error::Calibration` if the stored calibration points are unusable.
    /// * `Error::Bus` on any I2C failure.
    pub fn with_config(i2c: I2C, mut delay: D, config: Config) -> Result<Self, Error<E>> {
        let mut bus = Bus::new(i2c, config.address);

        let chip_id = CHIP_ID_REG.read(&mut bus)?;
        if chip_id != CHIP_ID {
            warn!("unexpected chip id {:#x} at {:#x}", chip_id, bus.address());
            return Err(Error::DeviceNotFound(chip_id));
        }
        info!("HTS221 found at {:#x}", bus.address());

        Self::boot(&mut bus, &mut delay, &config)?;
        ENABLED.write(&mut bus, true)?;
        DATA_RATE.write(&mut bus, config.data_rate.bits())?;

        let calibration = Self::load_calibration(&mut bus)?;

        Ok(Hts221 {
            bus,
            delay,
            config,
            calibration,
        })
    }

    /// Reboots the device memory content.
    ///
    /// The control registers return to their power-on values, which leaves the
    /// device powered down. The cached calibration is kept.
    ///
    /// # Errors
    ///
    /// Returns `Error::ResetTimeout` if the boot bit is still set after
    /// `Config::reset_poll_attempts` reads.
    pub fn reset(&mut self) -> Result<(), Error<E>> {
        Self::boot(&mut self.bus, &mut self.delay, &self.config)
    }

    /// Reads the relative humidity in percent.
    ///
    /// The value is not clamped to 0-100 %.
    pub fn read_humidity(&mut self) -> Result<f32, Error<E>> {
        let raw = RAW_HUMIDITY.read_signed(&mut self.bus)?;
        Ok(self.calibration.humidity(raw as i16))
    }

    /// Reads the temperature in degrees Celsius.
    pub fn read_temperature(&mut self) -> Result<f32, Error<E>> {
        let raw = RAW_TEMPERATURE.read(&mut self.bus)?;
        Ok(self.calibration.temperature(raw))
    }

    /// Reads temperature and humidity, in that order.
    pub fn read(&mut self) -> Result<Reading, Error<E>> {
        let temperature = self.read_temperature()?;
        let relative_humidity = self.read_humidity()?;
        Ok(Reading {
            temperature,
            relative_humidity,
        })
    }

    pub fn set_data_rate(&mut self, rate: DataRate) -> Result<(), Error<E>> {
        debug!("data rate {}", rate);
        DATA_RATE.write(&mut self.bus, rate.bits())?;
        Ok(())
    }

    /// Sets the data rate from its raw `ODR` encoding.
    ///
    /// Values other than 0-3 are rejected with `Error::InvalidConfig` before
    /// anything is written.
    pub fn set_data_rate_raw(&mut self, bits: u8) -> Result<(), Error<E>> {
        let rate = DataRate::try_from(bits).map_err(Error::InvalidConfig)?;
        self.set_data_rate(rate)
    }

    pub fn data_rate(&mut self) -> Result<DataRate, Error<E>> {
        let bits = DATA_RATE.read(&mut self.bus)?;
        // the field is two bits wide, every value is a valid rate
        Ok(DataRate::from_bits(bits).unwrap_or(DataRate::OneShot))
    }

    /// Powers the device up (`true`) or down (`false`).
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), Error<E>> {
        debug!("enabled {}", enabled);
        ENABLED.write(&mut self.bus, enabled)?;
        Ok(())
    }

    pub fn is_enabled(&mut self) -> Result<bool, Error<E>> {
        Ok(ENABLED.read(&mut self.bus)?)
    }

    /// Starts a single acquisition. Only meaningful with [`DataRate::OneShot`].
    ///
    /// Poll [`Hts221::status`] to know when the new sample is available.
    pub fn trigger_one_shot(&mut self) -> Result<(), Error<E>> {
        ONE_SHOT.write(&mut self.bus, true)?;
        Ok(())
    }

    pub fn status(&mut self) -> Result<Status, Error<E>> {
        let bits = STATUS.read(&mut self.bus)?;
        Ok(Status {
            temperature_available: bits & 0b01 != 0,
            humidity_available: bits & 0b10 != 0,
        })
    }

    /// Reads the `WHO_AM_I` register.
    pub fn chip_id(&mut self) -> Result<u8, Error<E>> {
        Ok(CHIP_ID_REG.read(&mut self.bus)?)
    }

    /// Calibration loaded when the driver was created.
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Destroys the driver and gives back the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.bus.release(), self.delay)
    }

    /// Sets the boot bit and waits for the device to clear it.
    fn boot(bus: &mut Bus<I2C>, delay: &mut D, config: &Config) -> Result<(), Error<E>> {
        trace!("reset");
        BOOT.write(bus, true)?;

        for _ in 0..config.reset_poll_attempts {
            if !BOOT.read(bus)? {
                return Ok(());
            }
            delay.delay_us(config.reset_poll_interval_us);
        }

        warn!(
            "boot bit still set after {} polls",
            config.reset_poll_attempts
        );
        Err(Error::ResetTimeout)
    }

    /// Reads the factory calibration registers.
    ///
    /// Every register is read once; the first failure aborts the load.
    fn load_calibration(bus: &mut Bus<I2C>) -> Result<Calibration, Error<E>> {
        let msb = T1_T0_DEG_C_MSB.read(bus)?;
        let t0_lsb = T0_DEG_C_LSB.read(bus)?;
        let t1_lsb = T1_DEG_C_LSB.read(bus)?;

        let temperature = TemperaturePoints {
            t0_deg_c_x8: decode_t0_deg_c_x8(msb, t0_lsb),
            t1_deg_c_x8: decode_t1_deg_c_x8(msb, t1_lsb),
            t0_out: T0_OUT_REG.read(bus)?,
            t1_out: T1_OUT_REG.read(bus)?,
        };

        let humidity = HumidityPoints {
            h0_rh_x2: H0_RH.read(bus)?,
            h1_rh_x2: H1_RH.read(bus)?,
            h0_t0_out: H0_OUT.read(bus)?,
            h1_t0_out: H1_OUT.read(bus)?,
        };

        debug!("calibration {} {}", temperature, humidity);

        Calibration::new(temperature, humidity).map_err(Error::Calibration)
    }
}
