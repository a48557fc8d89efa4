//! CLI interface for Flightline.
//!
//! One invocation, one lookup:
//!
//! ```text
//! AVIATION_KEY=... flightline '{"icao":"BA249"}'
//! ```
//!
//! The raw input is echoed to stdout, followed by a one-line summary of the
//! first matching flight. Every failure is terminal.
//!
//! [`run`] takes its arguments, environment and transport explicitly so the
//! whole flow can be exercised without a process or a network.

mod format;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::warn;

use crate::config::{API_KEY_VAR, CONFIG_PATH_VAR, Config};
use crate::lookup::{FlightLookup, LookupError, Transport};
use crate::query::{QueryError, parse_flight_query};

use format::format_summary;

/// Flightline: look up a flight's schedule by ICAO designator.
#[derive(Debug, Parser)]
#[command(name = "flightline", version, after_long_help = USAGE_HELP)]
pub struct Cli {
    /// Flight request as JSON, e.g. `{"icao":"BA249"}`.
    ///
    /// The designator must be 2 to 4 letters followed by 1 to 4 digits.
    input: Option<String>,

    /// Read configuration from this file instead of `~/.flightline/config.toml`.
    /// Falls back to `FLIGHTLINE_CONFIG` when not given.
    #[arg(long)]
    config: Option<PathBuf>,
}

const USAGE_HELP: &str = r#"Environment:
  AVIATION_KEY        Aviation Stack access key (required)
  FLIGHTLINE_CONFIG   Config file path (optional)
  RUST_LOG            Log filter for stderr diagnostics (default: warn)

Example:
  AVIATION_KEY=... flightline '{"icao":"BA249"}'
  {"icao":"BA249"}
  Flight BA249 from LHR to JFK operated by British Airways on 2023-01-01"#;

/// Everything that stops a lookup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("no flights found for {0}")]
    NotFound(String),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Run one lookup, writing the echo and summary lines to `out`.
///
/// `args` includes the program name. `env` resolves environment variables.
pub fn run<W: Write>(
    args: &[String],
    env: impl Fn(&str) -> Option<String>,
    transport: &dyn Transport,
    out: &mut W,
) -> Result<(), Error> {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(out, "{e}")?;
            return Ok(());
        }
        Err(e) => return Err(Error::Usage(usage_message(&e))),
    };

    let input = cli
        .input
        .ok_or_else(|| Error::Usage("expected JSON input as the first argument".to_string()))?;

    // The key is required whether or not the input turns out to be valid.
    let api_key = env(API_KEY_VAR)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| Error::Config(format!("{API_KEY_VAR} is not set")))?;

    let config_path = cli
        .config
        .or_else(|| env(CONFIG_PATH_VAR).filter(|p| !p.is_empty()).map(PathBuf::from));
    let config = Config::load(config_path.as_deref()).map_err(Error::Config)?;

    writeln!(out, "{input}")?;

    let query = parse_flight_query(&input)?;
    let flights = FlightLookup::new(config.base_url, transport).fetch(&query, &api_key)?;

    let Some(flight) = flights.first() else {
        return Err(Error::NotFound(query.designator().to_string()));
    };
    if flights.len() > 1 {
        warn!(
            designator = query.designator(),
            count = flights.len(),
            "multiple flights matched; reporting the first"
        );
    }

    writeln!(out, "{}", format_summary(&query, flight))?;
    Ok(())
}

/// Clap's rendered message without its own `error: ` prefix.
fn usage_message(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let rendered = rendered.trim_end();
    rendered
        .strip_prefix("error: ")
        .unwrap_or(rendered)
        .to_string()
}
