//! Parses command line arguments, connects to the rangefinder
//! and keeps printing new samples until ctrl+c or SIGTERM.
//!
//! Handles exit codes based on whether polling ended with an
//! error.
//!
//! Calls into the respective modules to set up logging and ensures
//! fatal errors are being logged.
//!
//! Also provides CLI access to the hardware check.
use clap::{self, crate_authors, crate_name, crate_version, Arg, ArgMatches};
use failure::{Error, ResultExt};
use log::{debug, info};
use rangefinder::{
    check::check_rangefinder,
    log::{init_logging, log_fatal},
    Address, App, Unit,
};
use std::process::exit;
use std::time::Duration;

const DEFAULT_BUS: &str = "/dev/i2c-1";
const DEFAULT_PERIOD_MS: &str = "1000";
const DEFAULT_INTERVAL_MS: &str = "100";

fn main() {
    if bootstrap().is_err() {
        exit(1);
    }
}

fn bootstrap() -> Result<(), Error> {
    let matches = clap::App::new(crate_name!())
        .version(crate_version!())
        .about("Prints distances from a PiicoDev ultrasonic rangefinder whenever a new sample is available.")
        .author(crate_authors!())
        .arg(
            Arg::with_name("bus")
                .short("b")
                .long("bus")
                .takes_value(true)
                .value_name("DEVICE")
                .default_value(DEFAULT_BUS)
                .help("I2C device file the rangefinder is connected to"),
        )
        .arg(
            Arg::with_name("address")
                .short("a")
                .long("addr")
                .takes_value(true)
                .value_name("ADDRESS")
                .help("I2C address of the rangefinder")
                .long_help(&format!(
                    "Sets the I2C address of the rangefinder, decimal or hexadecimal \
                     with 0x prefix. Defaults to {addr}, the address with all address \
                     switches off.",
                    addr = Address::default()
                ))
                .conflicts_with("asw"),
        )
        .arg(
            Arg::with_name("asw")
                .long("asw")
                .takes_value(true)
                .value_name("SWITCHES")
                .help("Positions of the address switches, e.g. 0,1,0,0")
                .long_help(
                    "Derives the I2C address from the positions of the four address \
                     switches ASW1 to ASW4, given as 0 or 1 each, e.g. 0,1,0,0 or 0100. \
                     All switches off selects the default address.",
                ),
        )
        .arg(
            Arg::with_name("period")
                .short("p")
                .long("period")
                .takes_value(true)
                .value_name("MILLIS")
                .default_value(DEFAULT_PERIOD_MS)
                .help("Sample period of the rangefinder in milliseconds"),
        )
        .arg(
            Arg::with_name("interval")
                .short("i")
                .long("interval")
                .takes_value(true)
                .value_name("MILLIS")
                .default_value(DEFAULT_INTERVAL_MS)
                .help("Pause between checks for new samples in milliseconds"),
        )
        .arg(
            Arg::with_name("inch")
                .long("inch")
                .help("Print distances in inches instead of millimeters"),
        )
        .arg(
            Arg::with_name("check")
                .short("c")
                .long("check")
                .help("Perform hardware check, then exit")
                .long_help(
                    "Identifies the rangefinder, lights its LED for one second as a basic \
                     hardware check, takes a single measurement, then exits.",
                ),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Silence warnings and errors")
                .long_help("Turn off logging completely, including warnings and errors."),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Verbose logging")
                .long_help(
                    "Print non-essential output with diagnostic information to stderr. \
                     Multiple occurrences increase logging verbosity. -vvv is the highest verbosity, \
                     printing every sample.",
                )
                .conflicts_with("quiet"),
        )
        .get_matches();

    let verbosity_level = if matches.is_present("quiet") {
        None
    } else {
        Some(matches.occurrences_of("verbose"))
    };
    init_logging(verbosity_level);

    let result = if matches.is_present("check") {
        address(&matches).and_then(|addr| check_rangefinder(bus(&matches), addr))
    } else {
        build_app(&matches).and_then(|mut app| {
            debug!("initialization complete, starting to poll");
            app.run()
        })
    };

    match result {
        Ok(_) => debug!("exiting after normal operation."),
        Err(ref err) => log_fatal(err),
    }

    result
}

fn build_app(matches: &ArgMatches) -> Result<App, Error> {
    let mut app = App::builder();

    let bus = bus(matches);
    let address = address(matches)?;
    app.ultrasonic(bus, address)?;
    info!("rangefinder connected on {}, address {}.", bus, address);

    app.sample_period(millis(matches, "period")?)
        .poll_interval(millis(matches, "interval")?)
        .unit(if matches.is_present("inch") {
            Unit::Inches
        } else {
            Unit::Millimeters
        })
        .terminate_on_ctrlc_and_sigterm();

    Ok(app.build()?)
}

fn bus<'a>(matches: &'a ArgMatches) -> &'a str {
    matches
        .value_of("bus")
        // unwrap is safe: /dev/i2c-1 is specified as default value
        .unwrap()
}

fn address(matches: &ArgMatches) -> Result<Address, Error> {
    if let Some(switches) = matches.value_of("asw") {
        let switches = Address::parse_switches(switches)?;
        if let Some(address) = Address::from_switches(switches) {
            return Ok(address);
        }
    }

    match matches.value_of("address") {
        Some(address) => Ok(address.parse()?),
        None => Ok(Address::default()),
    }
}

fn millis(matches: &ArgMatches, name: &str) -> Result<Duration, Error> {
    let value = matches
        .value_of(name)
        // unwrap is safe: all durations have default values
        .unwrap();
    let millis = value
        .parse::<u64>()
        .with_context(|_| format!("--{} expects milliseconds, got \"{}\"", name, value))?;

    Ok(Duration::from_millis(millis))
}
