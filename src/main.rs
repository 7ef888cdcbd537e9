//! Koenigsberg -- a rules engine for the Evacuation of Königsberg.
//!
//! This binary reads host commands from stdin and writes responses to
//! stdout, one line each. Diagnostics go to stderr via `tracing`.

use std::io::{self, BufRead, Write};

use koenigsberg::config::STANDARD_SCENARIO;
use koenigsberg::engine::Engine;
use koenigsberg::protocol::parser::{parse_command, Command};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Runs the host loop until `quit` or end of input.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine: Option<Engine> = None;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let reply = match cmd {
            Command::New { seed, options } => match Engine::new(seed, STANDARD_SCENARIO, &options) {
                Ok(e) => {
                    info!(seed, "new game");
                    engine = Some(e);
                    "ok".to_string()
                }
                Err(e) => format!("error {}", e),
            },
            Command::View { role } => match &engine {
                Some(e) => e.view(role).to_json(),
                None => "error no game".to_string(),
            },
            Command::Act { role, verb, arg } => match engine.as_mut() {
                Some(e) => match e.act(role, &verb, arg.as_deref()) {
                    Ok(()) => "ok".to_string(),
                    Err(err) => format!("error {}", err),
                },
                None => "error no game".to_string(),
            },
            Command::Quit => break,
        };

        if writeln!(out, "{}", reply).and_then(|_| out.flush()).is_err() {
            error!("stdout closed");
            break;
        }
    }
}
