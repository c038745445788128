//! LSM6DSOX accelerometer (I2C)
//!
//! Only the accelerometer half of the IMU is used. The gyroscope stays in
//! power-down.
//!
//! # Register access
//!
//! Reads are a register-address write followed by a repeated-start read.
//! With `IF_INC` set, a multi-byte read walks consecutive registers, which
//! is how the six output bytes are fetched in one transaction. `BDU` keeps
//! the high and low bytes of an axis from different conversions.

use embedded_hal::i2c::I2c;
use tremor_core::detector::Sample;
use tremor_core::traits::{SensorError, SensorSource};

/// Default I2C address (SDO/SA0 pulled low)
pub const DEFAULT_ADDRESS: u8 = 0x6A;

/// Expected `WHO_AM_I` value
pub const WHO_AM_I_VALUE: u8 = 0x6C;

/// LSM6DSOX register addresses
pub mod reg {
    /// Device identification
    pub const WHO_AM_I: u8 = 0x0F;
    /// Accelerometer control (ODR, full scale)
    pub const CTRL1_XL: u8 = 0x10;
    /// Gyroscope control
    pub const CTRL2_G: u8 = 0x11;
    /// Interface control (BDU, IF_INC, SW_RESET)
    pub const CTRL3_C: u8 = 0x12;
    /// Data-ready flags
    pub const STATUS_REG: u8 = 0x1E;
    /// First accelerometer output byte (X low)
    pub const OUTX_L_A: u8 = 0x28;
}

/// CTRL3_C bits
mod ctrl3 {
    pub const BDU: u8 = 1 << 6;
    pub const IF_INC: u8 = 1 << 2;
}

/// STATUS_REG accelerometer data available
const STATUS_XLDA: u8 = 1 << 0;

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FullScale {
    /// ±2 g
    #[default]
    G2,
    /// ±4 g
    G4,
    /// ±8 g
    G8,
    /// ±16 g
    G16,
}

impl FullScale {
    /// Pick the range for a configured value in g
    pub fn from_g(g: u8) -> Option<Self> {
        match g {
            2 => Some(FullScale::G2),
            4 => Some(FullScale::G4),
            8 => Some(FullScale::G8),
            16 => Some(FullScale::G16),
            _ => None,
        }
    }

    /// FS_XL field value (not in range order)
    pub fn bits(self) -> u8 {
        match self {
            FullScale::G2 => 0b00,
            FullScale::G16 => 0b01,
            FullScale::G4 => 0b10,
            FullScale::G8 => 0b11,
        }
    }

    /// Sensitivity in mg per LSB
    pub fn sensitivity_mg(self) -> f32 {
        match self {
            FullScale::G2 => 0.061,
            FullScale::G4 => 0.122,
            FullScale::G8 => 0.244,
            FullScale::G16 => 0.488,
        }
    }
}

/// Accelerometer output data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OutputDataRate {
    PowerDown = 0,
    Hz12_5 = 1,
    Hz26 = 2,
    Hz52 = 3,
    Hz104 = 4,
    Hz208 = 5,
    Hz416 = 6,
    Hz833 = 7,
}

impl OutputDataRate {
    /// Active rates, slowest first
    const ACTIVE: [OutputDataRate; 7] = [
        OutputDataRate::Hz12_5,
        OutputDataRate::Hz26,
        OutputDataRate::Hz52,
        OutputDataRate::Hz104,
        OutputDataRate::Hz208,
        OutputDataRate::Hz416,
        OutputDataRate::Hz833,
    ];

    /// Conversion period in microseconds, zero when powered down
    pub fn period_us(self) -> u32 {
        match self {
            OutputDataRate::PowerDown => 0,
            OutputDataRate::Hz12_5 => 80_000,
            OutputDataRate::Hz26 => 38_462,
            OutputDataRate::Hz52 => 19_231,
            OutputDataRate::Hz104 => 9_615,
            OutputDataRate::Hz208 => 4_808,
            OutputDataRate::Hz416 => 2_404,
            OutputDataRate::Hz833 => 1_200,
        }
    }

    /// Slowest rate that still produces a fresh sample every `interval_ms`
    pub fn for_interval_ms(interval_ms: u32) -> Result<Self, SensorError> {
        let interval_us = interval_ms.saturating_mul(1000);
        Self::ACTIVE
            .iter()
            .copied()
            .find(|odr| odr.period_us() <= interval_us)
            .ok_or(SensorError::InvalidConfig)
    }
}

/// LSM6DSOX accelerometer driver
pub struct Lsm6dsox<I2C> {
    i2c: I2C,
    address: u8,
    full_scale: FullScale,
    /// Set once `WHO_AM_I` has matched
    present: bool,
}

impl<I2C: I2c> Lsm6dsox<I2C> {
    /// Create a driver for a device at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            full_scale: FullScale::default(),
            present: false,
        }
    }

    /// Create a driver at [`DEFAULT_ADDRESS`]
    pub fn with_default_address(i2c: I2C) -> Self {
        Self::new(i2c, DEFAULT_ADDRESS)
    }

    /// Read `WHO_AM_I` and remember whether the device answered
    ///
    /// Only a match is kept. A failed probe is retried on the next
    /// `is_available`.
    pub fn probe(&mut self) -> bool {
        self.present = matches!(self.read_reg(reg::WHO_AM_I), Ok(WHO_AM_I_VALUE));
        self.present
    }

    /// Set the range used by the next `subscribe`
    pub fn set_full_scale(&mut self, full_scale: FullScale) {
        self.full_scale = full_scale;
    }

    /// Configured range
    pub fn full_scale(&self) -> FullScale {
        self.full_scale
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|_| SensorError::Bus)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|_| SensorError::Bus)
    }

    fn ctrl1_xl(&self, odr: OutputDataRate) -> u8 {
        ((odr as u8) << 4) | (self.full_scale.bits() << 2)
    }

    fn scale(&self, raw: i16) -> f32 {
        f32::from(raw) * self.full_scale.sensitivity_mg() / 1000.0
    }
}

impl<I2C: I2c> SensorSource for Lsm6dsox<I2C> {
    fn is_available(&mut self) -> bool {
        self.present || self.probe()
    }

    fn subscribe(&mut self, interval_ms: u32) -> Result<(), SensorError> {
        if !self.is_available() {
            return Err(SensorError::NotPresent);
        }

        let odr = OutputDataRate::for_interval_ms(interval_ms)?;
        self.write_reg(reg::CTRL3_C, ctrl3::BDU | ctrl3::IF_INC)?;
        self.write_reg(reg::CTRL1_XL, self.ctrl1_xl(odr))
    }

    fn unsubscribe(&mut self) {
        // Nothing to do if the bus is gone, the next subscribe rewrites it
        let _ = self.write_reg(reg::CTRL1_XL, self.ctrl1_xl(OutputDataRate::PowerDown));
    }

    fn read_sample(&mut self) -> Result<Sample, SensorError> {
        let status = self.read_reg(reg::STATUS_REG)?;
        if status & STATUS_XLDA == 0 {
            return Err(SensorError::NotReady);
        }

        let mut raw = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::OUTX_L_A], &mut raw)
            .map_err(|_| SensorError::Bus)?;

        let x = i16::from_le_bytes([raw[0], raw[1]]);
        let y = i16::from_le_bytes([raw[2], raw[3]]);
        let z = i16::from_le_bytes([raw[4], raw[5]]);

        Ok(Sample::new(self.scale(x), self.scale(y), self.scale(z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    // Register-file stand-in for the IMU
    struct MockBus {
        address: u8,
        regs: [u8; 0x80],
        pointer: usize,
        fail: bool,
    }

    impl MockBus {
        fn new() -> Self {
            let mut regs = [0u8; 0x80];
            regs[reg::WHO_AM_I as usize] = WHO_AM_I_VALUE;
            Self {
                address: DEFAULT_ADDRESS,
                regs,
                pointer: 0,
                fail: false,
            }
        }

        fn set_output(&mut self, x: i16, y: i16, z: i16) {
            let base = reg::OUTX_L_A as usize;
            for (i, v) in [x, y, z].iter().enumerate() {
                let bytes = v.to_le_bytes();
                self.regs[base + 2 * i] = bytes[0];
                self.regs[base + 2 * i + 1] = bytes[1];
            }
            self.regs[reg::STATUS_REG as usize] |= STATUS_XLDA;
        }
    }

    impl ErrorType for MockBus {
        type Error = ErrorKind;
    }

    impl I2c for MockBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Bus);
            }
            if address != self.address {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }

            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((first, rest)) = bytes.split_first() {
                            self.pointer = *first as usize;
                            for b in rest {
                                self.regs[self.pointer] = *b;
                                self.pointer += 1;
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        for b in buf.iter_mut() {
                            *b = self.regs[self.pointer];
                            self.pointer += 1;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    fn close(a: f32, b: f32) -> bool {
        libm::fabsf(a - b) < 1e-4
    }

    #[test]
    fn test_probe_detects_device() {
        let mut imu = Lsm6dsox::with_default_address(MockBus::new());
        assert!(imu.is_available());
    }

    #[test]
    fn test_probe_rejects_wrong_identity() {
        let mut bus = MockBus::new();
        bus.regs[reg::WHO_AM_I as usize] = 0x69;
        let mut imu = Lsm6dsox::with_default_address(bus);
        assert!(!imu.is_available());
        assert_eq!(imu.subscribe(50), Err(SensorError::NotPresent));
    }

    #[test]
    fn test_probe_wrong_address() {
        let mut imu = Lsm6dsox::new(MockBus::new(), 0x6B);
        assert!(!imu.probe());
    }

    #[test]
    fn test_probe_result_is_cached() {
        let mut imu = Lsm6dsox::with_default_address(MockBus::new());
        assert!(imu.is_available());
        imu.i2c.fail = true;
        assert!(imu.is_available());
    }

    #[test]
    fn test_failed_probe_is_retried() {
        let mut bus = MockBus::new();
        bus.fail = true;
        let mut imu = Lsm6dsox::with_default_address(bus);
        assert!(!imu.is_available());
        assert_eq!(imu.subscribe(50), Err(SensorError::NotPresent));

        imu.i2c.fail = false;
        assert!(imu.is_available());
        assert_eq!(imu.subscribe(50), Ok(()));
    }

    #[test]
    fn test_odr_for_interval() {
        assert_eq!(OutputDataRate::for_interval_ms(50), Ok(OutputDataRate::Hz26));
        assert_eq!(OutputDataRate::for_interval_ms(100), Ok(OutputDataRate::Hz12_5));
        assert_eq!(OutputDataRate::for_interval_ms(20), Ok(OutputDataRate::Hz52));
        assert_eq!(OutputDataRate::for_interval_ms(2), Ok(OutputDataRate::Hz833));
        assert_eq!(
            OutputDataRate::for_interval_ms(1),
            Err(SensorError::InvalidConfig)
        );
        assert_eq!(
            OutputDataRate::for_interval_ms(0),
            Err(SensorError::InvalidConfig)
        );
    }

    #[test]
    fn test_full_scale_encoding() {
        assert_eq!(FullScale::from_g(16), Some(FullScale::G16));
        assert_eq!(FullScale::from_g(3), None);
        assert_eq!(FullScale::G16.bits(), 0b01);
        assert_eq!(FullScale::G4.bits(), 0b10);
    }

    #[test]
    fn test_subscribe_configures_registers() {
        let mut imu = Lsm6dsox::with_default_address(MockBus::new());
        imu.set_full_scale(FullScale::G4);
        imu.subscribe(50).unwrap();

        let bus = imu.release();
        assert_eq!(bus.regs[reg::CTRL3_C as usize], 0x44);
        // 26 Hz, ±4 g
        assert_eq!(bus.regs[reg::CTRL1_XL as usize], 0x28);
        assert_eq!(bus.regs[reg::CTRL2_G as usize], 0x00);
    }

    #[test]
    fn test_unsubscribe_powers_down() {
        let mut imu = Lsm6dsox::with_default_address(MockBus::new());
        imu.subscribe(50).unwrap();
        imu.unsubscribe();

        let bus = imu.release();
        assert_eq!(bus.regs[reg::CTRL1_XL as usize] >> 4, 0);
    }

    #[test]
    fn test_read_sample_scales_to_g() {
        let mut bus = MockBus::new();
        // 1 g on Z at ±2 g is ~16393 LSB
        bus.set_output(0, -8197, 16393);
        let mut imu = Lsm6dsox::with_default_address(bus);
        imu.subscribe(50).unwrap();

        let sample = imu.read_sample().unwrap();
        assert!(close(sample.x, 0.0));
        assert!(close(sample.y, -0.5));
        assert!(close(sample.z, 1.0));
    }

    #[test]
    fn test_read_sample_respects_full_scale() {
        let mut bus = MockBus::new();
        bus.set_output(8196, 0, 0);
        let mut imu = Lsm6dsox::with_default_address(bus);
        imu.set_full_scale(FullScale::G8);
        imu.subscribe(50).unwrap();

        let sample = imu.read_sample().unwrap();
        assert!(close(sample.x, 8196.0 * 0.244 / 1000.0));
    }

    #[test]
    fn test_read_sample_not_ready() {
        let mut imu = Lsm6dsox::with_default_address(MockBus::new());
        imu.subscribe(50).unwrap();
        assert_eq!(imu.read_sample(), Err(SensorError::NotReady));
    }

    #[test]
    fn test_bus_error_maps_to_sensor_error() {
        let mut bus = MockBus::new();
        bus.set_output(1, 2, 3);
        let mut imu = Lsm6dsox::with_default_address(bus);
        imu.subscribe(50).unwrap();
        imu.i2c.fail = true;

        assert_eq!(imu.read_sample(), Err(SensorError::Bus));
        // Must not panic with the bus gone
        imu.unsubscribe();
    }
}
