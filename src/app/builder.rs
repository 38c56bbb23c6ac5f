use super::{App, Pause, Sleep, DEFAULT_POLL_INTERVAL, DEFAULT_SAMPLE_PERIOD};

use crate::result::Result;
use crate::sense::{Address, Sense, Unit};

use failure::bail;
use log::{debug, error};

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering::SeqCst};
use std::sync::Arc;
use std::time::Duration;

pub struct Builder {
    sense: Option<Box<dyn Sense>>,
    /// If `None`, prints to stdout.
    output: Option<Box<dyn Write>>,
    pause: Box<dyn Pause>,
    sample_period: Duration,
    poll_interval: Duration,
    unit: Unit,
    termination_flag: Arc<AtomicBool>,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            sense: None,
            output: None,
            pause: Box::new(Sleep),
            sample_period: DEFAULT_SAMPLE_PERIOD,
            poll_interval: DEFAULT_POLL_INTERVAL,
            unit: Unit::default(),
            // if never set up, termination flag never changes to true
            termination_flag: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Builder {
    pub fn new() -> Builder {
        Default::default()
    }

    /// Tries to connect to the rangefinder at the given I2C device
    /// file, using the specified slave address.
    #[cfg(target_os = "linux")]
    pub fn ultrasonic(&mut self, on_i2c_device: &str, address: Address) -> Result<&mut Self> {
        let ranger = crate::sense::Ultrasonic::connect(on_i2c_device, address)?;
        Ok(self.sense(ranger))
    }

    #[cfg(not(target_os = "linux"))]
    pub fn ultrasonic(&mut self, _on_i2c_device: &str, _address: Address) -> Result<&mut Self> {
        Err(crate::sense::Error::Unsupported.into())
    }

    /// Polls the given sense instead of a rangefinder on I2C.
    pub fn sense(&mut self, sense: impl Sense + 'static) -> &mut Self {
        self.sense = Some(Box::new(sense));
        self
    }

    /// Writes readings somewhere other than stdout.
    pub fn output(&mut self, output: impl Write + 'static) -> &mut Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Waits between polls with something other than sleeping.
    pub fn pause(&mut self, pause: impl Pause + 'static) -> &mut Self {
        self.pause = Box::new(pause);
        self
    }

    pub fn sample_period(&mut self, period: Duration) -> &mut Self {
        self.sample_period = period;
        self
    }

    pub fn poll_interval(&mut self, interval: Duration) -> &mut Self {
        self.poll_interval = interval;
        self
    }

    pub fn unit(&mut self, unit: Unit) -> &mut Self {
        self.unit = unit;
        self
    }

    /// Sets a custom termination flag.
    pub fn termination_flag(&mut self, flag: &Arc<AtomicBool>) -> &mut Self {
        self.termination_flag = Arc::clone(flag);
        self
    }

    pub fn terminate_on_ctrlc_and_sigterm(&mut self) -> &mut Self {
        let termination_requested = Arc::new(AtomicBool::new(false));

        let termination_requested_handler_reference = Arc::clone(&termination_requested);
        let result = ctrlc::set_handler(move || {
            termination_requested_handler_reference.store(true, SeqCst);
        });

        match result {
            Ok(()) => self.termination_flag(&termination_requested),
            Err(e) => {
                error!(
                    "Failed to set up signal handler for safe termination, \
                     stopping will be abrupt. Error: {:?}",
                    e
                );
                self
            }
        }
    }

    /// Consumes the builder and tries to create an app from it,
    /// configuring the sample period of the rangefinder.
    ///
    /// Fails if no rangefinder or other sense has been set up, or
    /// if the rangefinder rejects the sample period.
    pub fn build(self) -> Result<App> {
        let Builder {
            sense,
            output,
            pause,
            sample_period,
            poll_interval,
            unit,
            termination_flag,
        } = self;

        let mut sense = match sense {
            Some(sense) => sense,
            None => bail!("no rangefinder to poll"),
        };
        sense.set_sample_period(sample_period)?;
        debug!(
            "polling every {:?} for samples taken every {:?}",
            poll_interval, sample_period
        );

        let app = App {
            sense,
            output: output.unwrap_or_else(|| Box::new(io::stdout())),
            pause,
            poll_interval,
            unit,
            termination_flag,
        };

        Ok(app)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sense::Reading;
    use crate::testutil::ScriptedSense;
    use failure::format_err;

    #[test]
    fn build_with_default_settings() {
        // given
        let mut builder = App::builder();
        builder.sense(ScriptedSense::new(&[]));

        // when
        let app = builder.build().unwrap();

        // then
        assert_eq!(app.poll_interval, Duration::from_millis(100));
        assert_eq!(app.unit, Unit::Millimeters);
        assert_eq!(app.termination_flag.load(SeqCst), false);
    }

    #[test]
    fn build_without_sense_fails() {
        let builder = App::builder();

        assert!(builder.build().is_err());
    }

    #[test]
    fn custom_sample_period_is_applied() {
        let sense = ScriptedSense::new(&[]);
        let log = std::rc::Rc::clone(&sense.log);
        let mut builder = App::builder();
        builder
            .sense(sense)
            .sample_period(Duration::from_millis(250))
            .poll_interval(Duration::from_millis(20));

        let app = builder.build().unwrap();

        assert_eq!(log.borrow().periods, vec![Duration::from_millis(250)]);
        assert_eq!(app.poll_interval, Duration::from_millis(20));
    }

    struct RejectingSense;

    impl Sense for RejectingSense {
        fn set_sample_period(&mut self, _: Duration) -> Result<()> {
            Err(format_err!("NACK"))
        }

        fn new_sample_available(&mut self) -> Result<bool> {
            Ok(true)
        }

        fn distance(&mut self) -> Result<Reading> {
            Ok(Reading::from_millimeters(1))
        }
    }

    #[test]
    fn rejected_sample_period_fails_build() {
        let mut builder = App::builder();
        builder.sense(RejectingSense);

        let err = builder.build().err().expect("expected build to fail");

        assert_eq!(err.to_string(), "NACK");
    }
}
