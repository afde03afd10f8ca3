//! CLI that reads HTML from a file (or stdin) and prints the discovered
//! candidate configurations as JSON.
//!
//! Usage: `autoscrape [PAGE]` where `PAGE` is a path or `file://` URL.
//! Tuning via environment: `AUTOSCRAPE_MIN_OCC`, `AUTOSCRAPE_URL`,
//! `AUTOSCRAPE_REQUIRE_LINK`; log level via `RUST_LOG`.

use std::io::{self, Read};
use std::process::ExitCode;

use rs_autoscrape::{Discoverer, Discovery, Error, FileFetcher, Options};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn options_from_env() -> Options {
    let mut options = Options::default();
    if let Some(min) = std::env::var("AUTOSCRAPE_MIN_OCC")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        options.min_occurrence = min;
    }
    if let Ok(url) = std::env::var("AUTOSCRAPE_URL") {
        options.url = Some(url);
    }
    if std::env::var("AUTOSCRAPE_REQUIRE_LINK").is_ok_and(|v| v == "1" || v == "true") {
        options.require_subpage_link = true;
    }
    options
}

fn run() -> Result<Discovery, Error> {
    let discoverer = Discoverer::new(options_from_env());
    match std::env::args().nth(1) {
        Some(page) => discoverer.discover_url(&FileFetcher::new(), &page),
        None => {
            let mut html = String::new();
            io::stdin().read_to_string(&mut html)?;
            discoverer.discover(&html)
        }
    }
}

/// Candidate map as pretty-printed JSON.
fn render(discovery: &Discovery) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&discovery.candidates)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(discovery) => match render(&discovery) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("autoscrape: failed to serialize candidates: {e}");
                ExitCode::FAILURE
            }
        },
        Err(Error::NoFieldsFound) => {
            eprintln!("no repeating fields found");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("autoscrape: {e}");
            ExitCode::FAILURE
        }
    }
}
