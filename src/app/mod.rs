mod builder;
mod pause;

use crate::result::Result;
use crate::sense::{Reading, Sense, Unit};

use log::{debug, trace};

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering::SeqCst};
use std::sync::Arc;
use std::time::Duration;

pub use builder::Builder;
pub use pause::{Pause, Sleep};

/// Sample period of the rangefinder, unless configured otherwise.
pub const DEFAULT_SAMPLE_PERIOD: Duration = Duration::from_millis(1000);
/// Pause between two checks for a new sample, unless configured
/// otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Controls the main loop, checking the rangefinder for new
/// samples and printing each one as a line to the output.
///
/// The loop has no terminal state, it only stops when the
/// termination flag is raised or the rangefinder fails.
pub struct App {
    sense: Box<dyn Sense>,
    output: Box<dyn Write>,
    pause: Box<dyn Pause>,
    poll_interval: Duration,
    unit: Unit,
    termination_flag: Arc<AtomicBool>,
}

impl App {
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Keeps polling until requested to terminate with the
    /// termination flag, pausing after every check regardless
    /// of whether a sample was found.
    ///
    /// Errors from the rangefinder or from writing the output
    /// end the loop and are returned.
    pub fn run(&mut self) -> Result<()> {
        while !self.should_terminate() {
            self.tick()?;
            self.pause.pause(self.poll_interval);
        }

        debug!("termination requested, stopping to poll");
        Ok(())
    }

    /// Checks for a new sample once and writes it to the output
    /// if there is one.
    ///
    /// Returns the printed reading, if any.
    pub fn tick(&mut self) -> Result<Option<Reading>> {
        if !self.sense.new_sample_available()? {
            return Ok(None);
        }

        let reading = self.sense.distance()?;
        trace!("new sample: {:?}", reading);

        writeln!(self.output, "{}", reading.format(self.unit))?;
        self.output.flush()?;

        Ok(Some(reading))
    }

    fn should_terminate(&self) -> bool {
        self.termination_flag.load(SeqCst)
    }
}
