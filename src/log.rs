use failure::Error;
use log::{debug, error, LevelFilter};

#[cfg(test)]
use std::sync::Once;

#[cfg(test)]
static INIT_TEST_LOGGING: Once = Once::new();

/// Initializes logging to stderr for normal operation, keeping
/// stdout free for readings.
///
/// `None` turns logging off, otherwise every step raises the level
/// from warnings up to trace.
///
/// If fails, prints a message once and then never logs anything.
pub fn init_logging(verbosity_level: Option<u64>) {
    let level = match verbosity_level {
        None => LevelFilter::Off,
        Some(0) => LevelFilter::Warn,
        Some(1) => LevelFilter::Info,
        Some(2) => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let res = env_logger::Builder::new()
        .filter_level(level)
        .default_format_timestamp(false)
        .try_init();
    if let Err(err) = res {
        eprintln!(
            "Failed to initialize logging, staying silent from now on. Error: {}",
            err
        )
    }
}

/// Initializes logging output for test builds.
#[cfg(test)]
pub fn init_test_logging() {
    INIT_TEST_LOGGING.call_once(|| {
        let _ = env_logger::builder()
            .filter_level(LevelFilter::Trace)
            .is_test(true)
            .try_init();
    })
}

/// Logs that the given error ends polling and the program.
///
/// Every cause in the chain gets its own line, debug level
/// adds the backtrace.
pub fn log_fatal(error: &Error) {
    error!("Stopping due to fatal error.");
    for cause in error.iter_chain() {
        error!("Cause: {}", cause);
    }
    debug!("Backtrace: {}", error.backtrace());
}
