use embedded_hal::i2c::I2c;

/// Address bit that makes the HTS221 advance its register pointer on multi-byte reads.
pub const AUTO_INCREMENT: u8 = 0x80;

/// Register-level access to one device on an I2C bus.
///
/// Every method is exactly one bus transaction, except the read-modify-write
/// helpers which are a read followed by a write. Nothing is cached.
pub struct Bus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Bus<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Bus { i2c, address }
    }

    /// 7-bit address of the device.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Reads a single register.
    pub fn read_u8(&mut self, register: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0; 1];
        self.i2c.write_read(self.address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    /// Writes a single register.
    pub fn write_u8(&mut self, register: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    /// Reads `width` bits of `register` starting at `offset`, right-aligned.
    pub fn read_bits(&mut self, register: u8, offset: u8, width: u8) -> Result<u8, I2C::Error> {
        let value = self.read_u8(register)?;
        Ok((value >> offset) & mask(width))
    }

    /// Writes `width` bits of `register` starting at `offset`, leaving the other bits untouched.
    pub fn write_bits(
        &mut self,
        register: u8,
        offset: u8,
        width: u8,
        value: u8,
    ) -> Result<(), I2C::Error> {
        let field = mask(width) << offset;
        let current = self.read_u8(register)?;
        let updated = (current & !field) | ((value << offset) & field);
        self.write_u8(register, updated)
    }

    /// Sets or clears a single bit of `register`.
    pub fn write_bit(&mut self, register: u8, offset: u8, value: bool) -> Result<(), I2C::Error> {
        self.write_bits(register, offset, 1, value as u8)
    }

    /// Reads a signed byte, addressed with the auto-increment flag.
    pub fn read_i8(&mut self, register: u8) -> Result<i8, I2C::Error> {
        let mut buf = [0; 1];
        self.i2c
            .write_read(self.address, &[register | AUTO_INCREMENT], &mut buf)?;
        Ok(i8::from_le_bytes(buf))
    }

    /// Reads a little-endian signed word from `register` and `register + 1` in one transaction.
    pub fn read_i16(&mut self, register: u8) -> Result<i16, I2C::Error> {
        let mut buf = [0; 2];
        self.i2c
            .write_read(self.address, &[register | AUTO_INCREMENT], &mut buf)?;
        Ok(i16::from_le_bytes(buf))
    }

    /// Gives back the underlying bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

fn mask(width: u8) -> u8 {
    if width >= 8 { 0xFF } else { (1 << width) - 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTx};

    const ADDR: u8 = 0x5F;

    #[test]
    fn test_mask() {
        assert_eq!(mask(1), 0b1);
        assert_eq!(mask(2), 0b11);
        assert_eq!(mask(4), 0b1111);
        assert_eq!(mask(8), 0xFF);
    }

    #[test]
    fn test_read_bits() {
        let mut i2c = I2cMock::new(&[I2cTx::write_read(ADDR, vec![0x20], vec![0b1000_0110])]);

        let mut bus = Bus::new(i2c.clone(), ADDR);
        assert_eq!(bus.read_bits(0x20, 1, 2).unwrap(), 0b11);

        i2c.done();
    }

    #[test]
    fn test_write_bits_preserves_other_bits() {
        let mut i2c = I2cMock::new(&[
            I2cTx::write_read(ADDR, vec![0x20], vec![0b1000_0101]),
            I2cTx::write(ADDR, vec![0x20, 0b1000_0110]),
        ]);

        let mut bus = Bus::new(i2c.clone(), ADDR);
        bus.write_bits(0x20, 0, 2, 0b10).unwrap();

        i2c.done();
    }

    #[test]
    fn test_write_bit_clear() {
        let mut i2c = I2cMock::new(&[
            I2cTx::write_read(ADDR, vec![0x20], vec![0b1000_0011]),
            I2cTx::write(ADDR, vec![0x20, 0b0000_0011]),
        ]);

        let mut bus = Bus::new(i2c.clone(), ADDR);
        bus.write_bit(0x20, 7, false).unwrap();

        i2c.done();
    }

    #[test]
    fn test_multi_byte_reads_use_auto_increment() {
        let mut i2c = I2cMock::new(&[
            // 0xFF38 little-endian = -200
            I2cTx::write_read(ADDR, vec![0x2A | 0x80], vec![0x38, 0xFF]),
            I2cTx::write_read(ADDR, vec![0x28 | 0x80], vec![0xF6]),
        ]);

        let mut bus = Bus::new(i2c.clone(), ADDR);
        assert_eq!(bus.read_i16(0x2A).unwrap(), -200);
        assert_eq!(bus.read_i8(0x28).unwrap(), -10);

        i2c.done();
    }

    #[test]
    fn test_bus_error_is_propagated() {
        let mut i2c = I2cMock::new(&[
            I2cTx::write_read(ADDR, vec![0x0F], vec![0x00]).with_error(ErrorKind::Other)
        ]);

        let mut bus = Bus::new(i2c.clone(), ADDR);
        assert_eq!(bus.read_u8(0x0F), Err(ErrorKind::Other));

        i2c.done();
    }
}
