//! Generate one round and print it as JSON.
//!
//! Usage: `imigrasi-round [CONFIG_JSON]`
//!
//! Without a config file the defaults apply (six travellers, unseeded).
//! Set `RUST_LOG=debug` to see every generated set and corruption.

use std::path::PathBuf;

use anyhow::Context;
use imigrasi_engine::prelude::*;
use serde::Serialize;

#[derive(Serialize)]
struct Printout<'a> {
    narrations: Vec<String>,
    snapshot: &'a RoundSnapshot,
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => RoundConfig::load(&PathBuf::from(path))?,
        None => RoundConfig::default(),
    };

    let now = chrono::Local::now().naive_local();
    let round = Round::generate(&config, now).context("failed to generate round")?;
    let snapshot = round.capture_snapshot();

    let printout = Printout {
        narrations: round.sets().iter().map(|s| s.narration.text()).collect(),
        snapshot: &snapshot,
    };
    println!("{}", serde_json::to_string_pretty(&printout)?);
    Ok(())
}
