//! Functionality to perform hardware checks without polling
//! for readings.
use crate::result::Result;
use crate::sense::Address;

use log::{error, info};

/// Checks that the rangefinder answers on the given bus and
/// address, switches its LED on for a second and takes one
/// measurement.
///
/// If the rangefinder does not stand the check, then an error
/// with more details is returned.
pub fn check_rangefinder(on_i2c_device: &str, address: Address) -> Result<()> {
    info!(
        "Testing communication with rangefinder on {}, address {}...",
        on_i2c_device, address
    );

    let check_result = check_ultrasonic(on_i2c_device, address);

    match check_result {
        Ok(_) => info!("Rangefinder check successful."),
        Err(ref e) => error!("Rangefinder check failure: {}.", e),
    }

    check_result
}

#[cfg(target_os = "linux")]
fn check_ultrasonic(on_i2c_device: &str, address: Address) -> Result<()> {
    use crate::sense::{Reading, Ultrasonic};
    use std::thread::sleep;
    use std::time::Duration;

    let mut ranger = Ultrasonic::connect(on_i2c_device, address)?;

    let id = ranger.whoami()?;
    let (major, minor) = ranger.firmware()?;
    info!("Device id {}, firmware version {}.{}.", id, major, minor);

    ranger.set_led(true)?;
    sleep(Duration::from_secs(1));
    ranger.set_led(false)?;

    let micros = ranger.round_trip_us()?;
    info!(
        "Echo after {} us, {} mm.",
        micros,
        Reading::from_round_trip(micros).millimeters()
    );

    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn check_ultrasonic(_on_i2c_device: &str, _address: Address) -> Result<()> {
    Err(crate::sense::Error::Unsupported.into())
}
