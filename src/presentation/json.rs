//! NDJSON output for `--json` mode.
//!
//! Every command emits a `start` event, then a `complete` event carrying its
//! data (or an `error` event).

use std::io::{self, Write};

use serde_json::json;

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Convenience helper that writes to stdout.
pub fn emit(event: serde_json::Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}

pub fn emit_start(command: &str) -> io::Result<()> {
    emit(json!({ "event": "start", "command": command }))
}

pub fn emit_complete(command: &str, data: serde_json::Value) -> io::Result<()> {
    emit(json!({ "event": "complete", "command": command, "data": data }))
}

pub fn emit_error(command: &str, message: &str) -> io::Result<()> {
    emit(json!({ "event": "error", "command": command, "message": message }))
}
