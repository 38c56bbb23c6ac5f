/// Speed of sound at room temperature, 0.343 mm/us.
const MICROMETERS_PER_MICROSECOND: u32 = 343;
const MILLIMETERS_PER_INCH: f64 = 25.4;

/// A single distance measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    millimeters: u16,
}

/// Unit that readings are printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Millimeters,
    Inches,
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Millimeters
    }
}

impl Reading {
    pub fn from_millimeters(millimeters: u16) -> Self {
        Reading { millimeters }
    }

    /// Converts the time between sending a pulse and receiving
    /// its echo into the distance to the reflecting object.
    ///
    /// Exact half millimeters round to the nearest even value.
    pub fn from_round_trip(micros: u16) -> Self {
        // there and back in thousandths of a millimeter
        let micrometers = u32::from(micros) * MICROMETERS_PER_MICROSECOND;
        let mut millimeters = micrometers / 2000;
        let remainder = micrometers % 2000;
        if remainder > 1000 || (remainder == 1000 && millimeters % 2 == 1) {
            millimeters += 1;
        }

        Reading {
            // at most 11239 for the longest round trip
            millimeters: millimeters as u16,
        }
    }

    pub fn millimeters(&self) -> u16 {
        self.millimeters
    }

    pub fn inches(&self) -> f64 {
        f64::from(self.millimeters) / MILLIMETERS_PER_INCH
    }

    /// Formats the bare number without a unit suffix.
    pub fn format(&self, unit: Unit) -> String {
        match unit {
            Unit::Millimeters => self.millimeters.to_string(),
            Unit::Inches => format!("{:.2}", self.inches()),
        }
    }
}
