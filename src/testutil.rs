use crate::app::Pause;
use crate::result::Result;
use crate::sense::{Reading, Sense};

use failure::format_err;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering::SeqCst};
use std::sync::Arc;
use std::time::Duration;

/// Sense that reports the scripted availability flags in order
/// and hands out increasing distances, starting at 100mm.
///
/// Fails once the script is exhausted.
pub struct ScriptedSense {
    flags: VecDeque<bool>,
    next_millimeters: u16,
    pub log: Rc<RefCell<SenseLog>>,
}

#[derive(Default, Debug)]
pub struct SenseLog {
    pub periods: Vec<Duration>,
    pub flag_reads: usize,
    pub distance_reads: usize,
}

impl ScriptedSense {
    pub fn new(flags: &[bool]) -> Self {
        ScriptedSense {
            flags: flags.iter().cloned().collect(),
            next_millimeters: 100,
            log: Default::default(),
        }
    }
}

impl Sense for ScriptedSense {
    fn set_sample_period(&mut self, period: Duration) -> Result<()> {
        self.log.borrow_mut().periods.push(period);
        Ok(())
    }

    fn new_sample_available(&mut self) -> Result<bool> {
        self.log.borrow_mut().flag_reads += 1;
        self.flags
            .pop_front()
            .ok_or_else(|| format_err!("rangefinder unplugged"))
    }

    fn distance(&mut self) -> Result<Reading> {
        self.log.borrow_mut().distance_reads += 1;
        let reading = Reading::from_millimeters(self.next_millimeters);
        self.next_millimeters += 1;
        Ok(reading)
    }
}

/// Pause that returns immediately and requests termination after
/// the given amount of pauses.
pub struct CountingPause {
    pub durations: Rc<RefCell<Vec<Duration>>>,
    remaining: usize,
    termination_flag: Arc<AtomicBool>,
}

impl CountingPause {
    pub fn terminating_after(pauses: usize, termination_flag: &Arc<AtomicBool>) -> Self {
        CountingPause {
            durations: Default::default(),
            remaining: pauses,
            termination_flag: Arc::clone(termination_flag),
        }
    }
}

impl Pause for CountingPause {
    fn pause(&mut self, duration: Duration) {
        self.durations.borrow_mut().push(duration);
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.termination_flag.store(true, SeqCst);
        }
    }
}

/// Output that can still be inspected after handing it to an app.
#[derive(Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.borrow())
            .lines()
            .map(String::from)
            .collect()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
