//! Shared rendering helpers for CLI commands.

use crate::exit_codes::ExitCode;
use ew_common::{RunId, SCHEMA_VERSION};
use serde::Serialize;
use serde_json::{Map, Value};

/// Wrap a command payload in the standard JSON envelope.
///
/// Object payloads are flattened into the envelope; anything else lands
/// under `"result"`.
pub fn envelope(command: &str, payload: impl Serialize) -> Value {
    let mut out = Map::new();
    out.insert("schema_version".into(), Value::from(SCHEMA_VERSION));
    out.insert("run_id".into(), Value::from(RunId::new().0));
    out.insert(
        "generated_at".into(),
        Value::from(chrono::Utc::now().to_rfc3339()),
    );
    out.insert("command".into(), Value::from(command));
    match serde_json::to_value(payload) {
        Ok(Value::Object(fields)) => out.extend(fields),
        Ok(other) => {
            out.insert("result".into(), other);
        }
        Err(e) => {
            out.insert("error".into(), Value::from(e.to_string()));
        }
    }
    Value::Object(out)
}

/// Print the envelope as pretty JSON on stdout.
pub fn print_json(command: &str, payload: impl Serialize) {
    let value = envelope(command, payload);
    match serde_json::to_string_pretty(&value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("errwatch: failed to render {command}: {e}"),
    }
}

/// Report a library error on stderr and pick its exit code.
pub fn fail(command: &str, err: &ew_common::Error) -> ExitCode {
    eprintln!("errwatch {command}: {err} (code {})", err.code());
    ExitCode::from_error(err)
}

/// Format a dollar amount.
pub fn dollars(amount: f64) -> String {
    format!("${amount:.2}")
}
