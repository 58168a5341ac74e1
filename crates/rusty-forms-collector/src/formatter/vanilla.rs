// File: src/formatter/vanilla.rs
// Purpose: Flat `{ field, message, validation }` error list

use serde::Serialize;
use serde_json::Value;

use super::{ErrorFormatter, ENGINE_EXCEPTION};
use crate::message::ErrorMessage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VanillaError {
    pub field: String,
    pub message: String,
    pub validation: String,
}

/// Collects errors as a flat array
#[derive(Debug, Clone, Default)]
pub struct VanillaFormatter {
    errors: Vec<VanillaError>,
}

impl VanillaFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[VanillaError] {
        &self.errors
    }
}

impl ErrorFormatter for VanillaFormatter {
    fn add_error(&mut self, message: ErrorMessage, field: &str, rule: &str, _args: &[Value]) {
        let validation = if message.is_thrown() { ENGINE_EXCEPTION } else { rule };
        self.errors.push(VanillaError {
            field: field.to_string(),
            message: message.text(),
            validation: validation.to_string(),
        });
    }

    fn to_json(&self) -> Option<Value> {
        if self.errors.is_empty() {
            return None;
        }
        serde_json::to_value(&self.errors).ok()
    }
}
