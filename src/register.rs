//! HTS221 register map and the accessors the driver reads and writes it through.
//!
//! Each accessor binds a register address with the position and encoding of
//! the value it holds. They are plain constants; the driver hands them its
//! [`Bus`] on every access.

use embedded_hal::i2c::I2c;

use crate::bus::Bus;

/// Default 7-bit I2C address of the HTS221.
pub const DEFAULT_ADDRESS: u8 = 0x5F;

/// Content of `WHO_AM_I` on a genuine HTS221.
pub const CHIP_ID: u8 = 0xBC;

pub const WHO_AM_I: u8 = 0x0F;
pub const CTRL_REG1: u8 = 0x20;
pub const CTRL_REG2: u8 = 0x21;
pub const STATUS_REG: u8 = 0x27;
pub const HUMIDITY_OUT_L: u8 = 0x28;
pub const TEMP_OUT_L: u8 = 0x2A;
pub const H0_RH_X2: u8 = 0x30;
pub const H1_RH_X2: u8 = 0x31;
pub const T0_DEGC_X8: u8 = 0x32;
pub const T1_DEGC_X8: u8 = 0x33;
pub const T1_T0_MSB: u8 = 0x35;
pub const H0_T0_OUT: u8 = 0x36;
pub const H1_T0_OUT: u8 = 0x3A;
pub const T0_OUT: u8 = 0x3C;
pub const T1_OUT: u8 = 0x3E;

/// A single read/write bit.
#[derive(Clone, Copy, Debug)]
pub struct Bit {
    register: u8,
    offset: u8,
}

impl Bit {
    pub const fn new(register: u8, offset: u8) -> Self {
        Bit { register, offset }
    }

    pub fn read<I2C: I2c>(&self, bus: &mut Bus<I2C>) -> Result<bool, I2C::Error> {
        Ok(bus.read_bits(self.register, self.offset, 1)? != 0)
    }

    pub fn write<I2C: I2c>(&self, bus: &mut Bus<I2C>, value: bool) -> Result<(), I2C::Error> {
        bus.write_bit(self.register, self.offset, value)
    }
}

/// An unsigned field of `width` bits inside one register.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    register: u8,
    offset: u8,
    width: u8,
}

impl Field {
    pub const fn new(register: u8, offset: u8, width: u8) -> Self {
        Field {
            register,
            offset,
            width,
        }
    }

    pub fn read<I2C: I2c>(&self, bus: &mut Bus<I2C>) -> Result<u8, I2C::Error> {
        bus.read_bits(self.register, self.offset, self.width)
    }

    pub fn write<I2C: I2c>(&self, bus: &mut Bus<I2C>, value: u8) -> Result<(), I2C::Error> {
        bus.write_bits(self.register, self.offset, self.width, value)
    }
}

/// A read-only register holding one byte.
#[derive(Clone, Copy, Debug)]
pub struct Byte {
    register: u8,
}

impl Byte {
    pub const fn new(register: u8) -> Self {
        Byte { register }
    }

    pub fn read<I2C: I2c>(&self, bus: &mut Bus<I2C>) -> Result<u8, I2C::Error> {
        bus.read_u8(self.register)
    }

    /// Reads the register as a two's complement byte, using an auto-increment read.
    pub fn read_signed<I2C: I2c>(&self, bus: &mut Bus<I2C>) -> Result<i8, I2C::Error> {
        bus.read_i8(self.register)
    }
}

/// A read-only signed 16-bit value stored little-endian in two consecutive registers.
#[derive(Clone, Copy, Debug)]
pub struct Word {
    register: u8,
}

impl Word {
    pub const fn new(register: u8) -> Self {
        Word { register }
    }

    pub fn read<I2C: I2c>(&self, bus: &mut Bus<I2C>) -> Result<i16, I2C::Error> {
        bus.read_i16(self.register)
    }
}

pub const CHIP_ID_REG: Byte = Byte::new(WHO_AM_I);

/// `PD` bit: the device is active when set, powered down when clear.
pub const ENABLED: Bit = Bit::new(CTRL_REG1, 7);
/// `ODR` field.
pub const DATA_RATE: Field = Field::new(CTRL_REG1, 0, 2);
/// Reboots memory content; cleared by the device once done.
pub const BOOT: Bit = Bit::new(CTRL_REG2, 7);
/// Starts a single acquisition; cleared by the device once the sample is available.
pub const ONE_SHOT: Bit = Bit::new(CTRL_REG2, 0);
/// `T_DA` and `H_DA` flags.
pub const STATUS: Field = Field::new(STATUS_REG, 0, 2);

pub const RAW_HUMIDITY: Byte = Byte::new(HUMIDITY_OUT_L);
pub const RAW_TEMPERATURE: Word = Word::new(TEMP_OUT_L);

pub const H0_RH: Byte = Byte::new(H0_RH_X2);
pub const H1_RH: Byte = Byte::new(H1_RH_X2);
pub const T0_DEG_C_LSB: Byte = Byte::new(T0_DEGC_X8);
pub const T1_DEG_C_LSB: Byte = Byte::new(T1_DEGC_X8);
/// Two high bits of T0 (bits 0-1) and T1 (bits 2-3).
pub const T1_T0_DEG_C_MSB: Field = Field::new(T1_T0_MSB, 0, 4);
pub const H0_OUT: Word = Word::new(H0_T0_OUT);
pub const H1_OUT: Word = Word::new(H1_T0_OUT);
pub const T0_OUT_REG: Word = Word::new(T0_OUT);
pub const T1_OUT_REG: Word = Word::new(T1_OUT);
