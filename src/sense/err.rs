use failure::Fail;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(
        display = "I2C address {:#04x} is outside of the usable range [0x08,0x77]",
        _0
    )]
    AddressOutOfRange(u16),
    #[fail(
        display = "address switches must be four 0 or 1 values, e.g. 0,1,0,0, but got \"{}\"",
        _0
    )]
    BadSwitches(String),
    #[fail(display = "could not parse \"{}\" as an I2C address", _0)]
    BadAddress(String),
    #[fail(
        display = "sample period of {} ms does not fit into the 16 bit period register",
        _0
    )]
    PeriodOutOfRange(u128),
    #[fail(display = "I2C transfer on register {:#04x} failed: {}", register, cause)]
    Bus { register: u8, cause: String },
    #[fail(display = "I2C devices are only supported on Linux")]
    Unsupported,
}
