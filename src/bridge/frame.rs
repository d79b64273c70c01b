use crate::router::{Arguments, Outcome};
use serde::Deserialize;
use serde_json::{json, Map, Value};

pub const BAD_FRAME: &str = "BAD_FRAME";

/// Inbound call: `{"id": .., "method": "openVideo", "arguments": {"url": ..}}`
#[derive(Debug, Deserialize)]
pub struct MethodCall {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub arguments: Option<Arguments>,
}

impl MethodCall {
    pub fn arguments(&self) -> Arguments {
        self.arguments.clone().unwrap_or_default()
    }
}

/// Decode one line. On failure returns whatever `id` could be recovered along
/// with the error message, so the reply can still be correlated.
pub fn decode(line: &str) -> Result<MethodCall, (Option<Value>, String)> {
    let value: Value = serde_json::from_str(line).map_err(|e| (None, e.to_string()))?;
    let id = value.get("id").cloned().filter(|id| !id.is_null());

    serde_json::from_value(value).map_err(|e| (id, e.to_string()))
}

pub fn encode(id: Option<&Value>, outcome: &Outcome) -> Value {
    let mut frame = Map::new();
    if let Some(id) = id {
        frame.insert("id".to_string(), id.clone());
    }

    match outcome {
        Outcome::Success(value) => {
            frame.insert("success".to_string(), value.clone());
        }
        Outcome::Error {
            code,
            message,
            details,
        } => {
            frame.insert(
                "error".to_string(),
                json!({
                    "code": code,
                    "message": message,
                    "details": details,
                }),
            );
        }
        Outcome::NotImplemented => {
            frame.insert("notImplemented".to_string(), Value::Bool(true));
        }
    }

    Value::Object(frame)
}

pub fn bad_frame(id: Option<&Value>, message: &str) -> Value {
    encode(
        id,
        &Outcome::Error {
            code: BAD_FRAME.to_string(),
            message: message.to_string(),
            details: None,
        },
    )
}
