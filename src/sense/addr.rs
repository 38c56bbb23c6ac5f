use crate::sense::Error;
use std::fmt;
use std::str::FromStr;

/// Factory address of the rangefinder with all address
/// switches off.
const DEFAULT_ADDRESS: u16 = 0x35;

/// First address of the pool selectable with the switches.
const SWITCH_POOL_BASE: u16 = 0x08;
const MIN_ADDRESS: u16 = 0x08;
const MAX_ADDRESS: u16 = 0x77;

/// A 7-bit I2C slave address outside of the reserved ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address(u16);

impl Address {
    pub fn new(address: u16) -> Result<Self, Error> {
        if address >= MIN_ADDRESS && address <= MAX_ADDRESS {
            Ok(Address(address))
        } else {
            Err(Error::AddressOutOfRange(address))
        }
    }

    /// Picks an address from the pool selected with the four
    /// address switches ASW1 to ASW4 on the board.
    ///
    /// Returns `None` if all switches are off, in which case the
    /// device listens on the explicitly configured address,
    /// usually `DEFAULT_ADDRESS`.
    pub fn from_switches(switches: [bool; 4]) -> Option<Self> {
        if switches.iter().all(|on| !on) {
            return None;
        }

        let offset = switches
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(bit, _)| 1u16 << bit)
            .sum::<u16>();

        Some(Address(SWITCH_POOL_BASE + offset))
    }

    /// Parses switch positions like `0,1,0,0` or `0100`, ASW1 first.
    pub fn parse_switches(switches: &str) -> Result<[bool; 4], Error> {
        let bad = || Error::BadSwitches(switches.to_string());
        let digits: Vec<char> = switches
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect();

        if digits.len() != 4 {
            return Err(bad());
        }

        let mut parsed = [false; 4];
        for (position, digit) in digits.into_iter().enumerate() {
            parsed[position] = match digit {
                '0' => false,
                '1' => true,
                _ => return Err(bad()),
            };
        }

        Ok(parsed)
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl Default for Address {
    fn default() -> Self {
        Address(DEFAULT_ADDRESS)
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Accepts decimal or `0x` prefixed hexadecimal numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
            u16::from_str_radix(&trimmed[2..], 16)
        } else {
            trimmed.parse()
        };

        parsed
            .map_err(|_| Error::BadAddress(s.to_string()))
            .and_then(Address::new)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
