//! JSON I/O handling for CLI
//!
//! - Input: single JSON object via stdin
//! - Output: single JSON object via stdout
//! - UTF-8 only

use std::collections::HashMap;
use std::io::{self, Read, Write};

use serde::Serialize;
use serde_json::Value;

use crate::api::{ErrorResponse, SuccessResponse};

use super::errors::{CliError, CliResult};

/// Read listing parameters from stdin
pub fn read_request() -> CliResult<HashMap<String, String>> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_request(&input)
}

/// Parse one JSON object into raw listing parameters.
///
/// Numbers and booleans are accepted and rendered as strings; `null`
/// drops the key.
pub fn parse_request(input: &str) -> CliResult<HashMap<String, String>> {
    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(input)?;
    let Value::Object(object) = value else {
        return Err(CliError::io_error("Request must be a JSON object"));
    };

    let mut params = HashMap::with_capacity(object.len());
    for (key, value) in object {
        let raw = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(CliError::io_error(format!(
                    "Parameter '{}' must be a string",
                    key
                )))
            }
        };
        params.insert(key, raw);
    }

    Ok(params)
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: T) -> CliResult<()> {
    write_line(&SuccessResponse::new(data))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_line(&ErrorResponse::new(code, message))
}

fn write_line<T: Serialize>(body: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, body)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
