// model = "claude-opus-4-5"
// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Replay a persisted operation log and print the document it builds.
//!
//! Usage: replica <log.json>
//!
//! The log is a JSON array of operations, as `State::list_operations`
//! produces them. Set `RUST_LOG=replica=debug` to watch the replay.

use std::fs;
use std::process::ExitCode;

use replica::crdt::op::Operation;
use replica::crdt::state::State;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: replica <log.json>");
        return ExitCode::FAILURE;
    };

    match run(&path) {
        Ok(()) => return ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("replica: {}", message);
            return ExitCode::FAILURE;
        }
    }
}

fn run(path: &str) -> Result<(), String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    let ops: Vec<Operation> = serde_json::from_str(&text).map_err(|e| format!("{}: {}", path, e))?;
    let state = State::from_log(ops).map_err(|e| e.to_string())?;
    let rendered = serde_json::to_string_pretty(&state.render()).map_err(|e| e.to_string())?;
    println!("{}", rendered);
    tracing::info!(
        ops = state.len(),
        deferred = state.deferred(),
        digest = %state.digest(),
        "replayed"
    );
    return Ok(());
}
