use std::thread;
use std::time::Duration;

/// Waits between two polls of the rangefinder.
pub trait Pause {
    fn pause(&mut self, duration: Duration);
}

/// Blocks the current thread for the whole duration.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sleep;

impl Pause for Sleep {
    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration)
    }
}
