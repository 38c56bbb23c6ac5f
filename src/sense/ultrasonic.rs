use crate::result::Result;
use crate::sense::{Address, Error, Reading, Sense};

use derivative::Derivative;
use embedded_hal::blocking::i2c::{Write, WriteRead};
use failure::ResultExt;
#[cfg(target_os = "linux")]
use failure::format_err;
#[cfg(target_os = "linux")]
use linux_embedded_hal::I2cdev;
use log::{debug, trace, warn};

use std::fmt::Debug;
use std::time::Duration;

/// Expected contents of the WHOAMI register.
const DEVICE_ID: u16 = 578;

const REG_WHOAMI: u8 = 0x01;
const REG_FIRMWARE_MAJOR: u8 = 0x02;
const REG_FIRMWARE_MINOR: u8 = 0x03;
const REG_RAW: u8 = 0x05;
const REG_PERIOD: u8 = 0x06;
const REG_LED: u8 = 0x07;
const REG_STATUS: u8 = 0x08;

/// Set on the register address to write instead of read.
const WRITE_BIT: u8 = 0x80;
const STATUS_NEW_SAMPLE: u8 = 0x01;

/// Driver for the PiicoDev ultrasonic rangefinder.
///
/// The firmware measures on its own with the configured sample
/// period and keeps the latest echo time in a register, flagging
/// fresh samples in the status register.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Ultrasonic<I2C> {
    #[derivative(Debug = "ignore")]
    i2c: I2C,
    address: Address,
}

#[cfg(target_os = "linux")]
impl Ultrasonic<I2cdev> {
    /// Connects to the rangefinder at the given I2C device file,
    /// e.g. `/dev/i2c-1`, using the specified slave address.
    pub fn connect(device: &str, address: Address) -> Result<Self> {
        let i2c = I2cdev::new(device)
            .map_err(|e| format_err!("failed to open I2C device {}: {}", device, e))?;
        Ultrasonic::new(i2c, address)
    }
}

impl<I2C, E> Ultrasonic<I2C>
where
    I2C: WriteRead<Error = E> + Write<Error = E>,
    E: Debug,
{
    /// Talks to the rangefinder over an I2C bus and checks that
    /// something answers at the address.
    ///
    /// A device that answers with an unexpected id is only
    /// warned about, it may still be a rangefinder with other
    /// firmware.
    pub fn new(i2c: I2C, address: Address) -> Result<Self> {
        let mut ranger = Ultrasonic { i2c, address };

        let id = ranger
            .whoami()
            .context("couldn't find a device, check switches and wiring")?;
        if id == DEVICE_ID {
            debug!("rangefinder found at address {}", address);
        } else {
            warn!(
                "incorrect device found at address {}, id {} instead of {}",
                address, id, DEVICE_ID
            );
        }

        Ok(ranger)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn whoami(&mut self) -> Result<u16> {
        self.read_u16(REG_WHOAMI)
    }

    /// Major and minor firmware version.
    pub fn firmware(&mut self) -> Result<(u8, u8)> {
        Ok((
            self.read_u8(REG_FIRMWARE_MAJOR)?,
            self.read_u8(REG_FIRMWARE_MINOR)?,
        ))
    }

    /// Time in microseconds between the last pulse and its echo.
    pub fn round_trip_us(&mut self) -> Result<u16> {
        self.read_u16(REG_RAW)
    }

    pub fn distance_mm(&mut self) -> Result<u16> {
        let micros = self.round_trip_us()?;
        Ok(Reading::from_round_trip(micros).millimeters())
    }

    pub fn sample_period_ms(&mut self) -> Result<u16> {
        self.read_u16(REG_PERIOD)
    }

    pub fn set_sample_period_ms(&mut self, period_ms: u16) -> Result<()> {
        self.write_register(REG_PERIOD, &period_ms.to_be_bytes())
    }

    pub fn led(&mut self) -> Result<bool> {
        Ok(self.read_u8(REG_LED)? != 0)
    }

    pub fn set_led(&mut self, on: bool) -> Result<()> {
        self.write_register(REG_LED, &[on as u8])
    }

    pub fn new_sample_available(&mut self) -> Result<bool> {
        Ok(self.read_u8(REG_STATUS)? & STATUS_NEW_SAMPLE != 0)
    }

    fn read_u8(&mut self, register: u8) -> Result<u8> {
        let mut buf = [0; 1];
        self.read_register(register, &mut buf)?;
        Ok(buf[0])
    }

    fn read_u16(&mut self, register: u8) -> Result<u16> {
        let mut buf = [0; 2];
        self.read_register(register, &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Result<()> {
        // in range [0x08,0x77], cast is lossless
        let address = self.address.value() as u8;
        self.i2c
            .write_read(address, &[register], buf)
            .map_err(|e| Error::Bus {
                register,
                cause: format!("{:?}", e),
            })?;
        Ok(())
    }

    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<()> {
        let address = self.address.value() as u8;
        let mut frame = Vec::with_capacity(data.len() + 1);
        frame.push(register | WRITE_BIT);
        frame.extend_from_slice(data);

        self.i2c.write(address, &frame).map_err(|e| Error::Bus {
            register,
            cause: format!("{:?}", e),
        })?;
        Ok(())
    }
}

impl<I2C, E> Sense for Ultrasonic<I2C>
where
    I2C: WriteRead<Error = E> + Write<Error = E>,
    E: Debug,
{
    fn set_sample_period(&mut self, period: Duration) -> Result<()> {
        let period_ms = period.as_millis();
        if period_ms > u128::from(std::u16::MAX) {
            return Err(Error::PeriodOutOfRange(period_ms).into());
        }

        self.set_sample_period_ms(period_ms as u16)
            .context("failed to set sample period")?;
        debug!("sample period of rangefinder set to {} ms", period_ms);
        Ok(())
    }

    fn new_sample_available(&mut self) -> Result<bool> {
        Ok(Ultrasonic::new_sample_available(self).context("failed to read status")?)
    }

    fn distance(&mut self) -> Result<Reading> {
        let micros = self.round_trip_us().context("failed to read round trip time")?;
        trace!("round trip of {} us", micros);
        Ok(Reading::from_round_trip(micros))
    }
}
