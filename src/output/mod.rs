pub mod json;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Flattens a payload into the uniform `{"status":"success", ...}` envelope.
pub fn success_envelope<T: Serialize>(data: &T) -> AppResult<Value> {
    let mut envelope = Map::new();
    envelope.insert("status".to_string(), Value::String("success".to_string()));

    match serde_json::to_value(data)? {
        Value::Object(fields) => envelope.extend(fields),
        other => {
            envelope.insert("result".to_string(), other);
        }
    }

    Ok(Value::Object(envelope))
}

pub fn print_success<T: Serialize>(data: &T) -> AppResult<()> {
    json::print(&success_envelope(data)?)
}

/// Pretty-printed `{"status":"error", ...}` envelope for the exit path.
pub fn error_envelope(err: &AppError) -> String {
    let envelope = serde_json::json!({
        "status": "error",
        "error_type": err.error_type(),
        "message": err.to_string(),
    });

    serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| envelope.to_string())
}
