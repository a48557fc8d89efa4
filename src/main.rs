mod cli;
mod config;
mod lookup;
mod model;
mod query;

use std::{env, io, process};

use tracing_subscriber::EnvFilter;

use lookup::HttpTransport;

fn main() {
    // Diagnostics go to stderr; stdout carries only the echo and summary lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let transport = HttpTransport::new();

    if let Err(e) = cli::run(&args, |k| env::var(k).ok(), &transport, &mut io::stdout().lock()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
