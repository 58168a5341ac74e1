// File: src/formatter/json_api.rs
// Purpose: JSON:API error objects (`{ errors: [{ title, detail, source }] }`)

use serde::Serialize;
use serde_json::{json, Value};

use super::{ErrorFormatter, ENGINE_EXCEPTION};
use crate::message::ErrorMessage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonApiSource {
    pub pointer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonApiError {
    pub title: String,
    pub detail: String,
    pub source: JsonApiSource,
}

#[derive(Debug, Clone, Default)]
pub struct JsonApiFormatter {
    errors: Vec<JsonApiError>,
}

impl JsonApiFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[JsonApiError] {
        &self.errors
    }
}

impl ErrorFormatter for JsonApiFormatter {
    fn add_error(&mut self, message: ErrorMessage, field: &str, rule: &str, _args: &[Value]) {
        let title = if message.is_thrown() { ENGINE_EXCEPTION } else { rule };
        self.errors.push(JsonApiError {
            title: title.to_string(),
            detail: message.text(),
            source: JsonApiSource {
                pointer: field.to_string(),
            },
        });
    }

    fn to_json(&self) -> Option<Value> {
        if self.errors.is_empty() {
            return None;
        }
        Some(json!({ "errors": self.errors }))
    }
}
