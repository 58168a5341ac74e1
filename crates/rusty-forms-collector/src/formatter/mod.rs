// File: src/formatter/mod.rs
// Purpose: Formatter contract and the built-in error formatters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::CollectorError;
use crate::message::ErrorMessage;

pub mod json_api;
pub mod vanilla;

pub use json_api::JsonApiFormatter;
pub use vanilla::VanillaFormatter;

/// Validation name recorded when a rule threw instead of failing
pub const ENGINE_EXCEPTION: &str = "ENGINE_EXCEPTION";

/// Accumulates validation errors and serializes them
pub trait ErrorFormatter {
    /// Record one error for `field` raised by `rule`
    fn add_error(&mut self, message: ErrorMessage, field: &str, rule: &str, args: &[Value]);

    /// Serialized errors, `None` when nothing was recorded
    fn to_json(&self) -> Option<Value>;
}

/// Built-in formatter selection
///
/// Parsing is case-insensitive and accepts `jsonapi` or `json_api`, both
/// from strings and from config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatterKind {
    #[default]
    Vanilla,
    JsonApi,
}

impl FormatterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatterKind::Vanilla => "vanilla",
            FormatterKind::JsonApi => "jsonapi",
        }
    }

    /// Create an empty formatter of this kind
    pub fn build(&self) -> Box<dyn ErrorFormatter> {
        match self {
            FormatterKind::Vanilla => Box::new(VanillaFormatter::new()),
            FormatterKind::JsonApi => Box::new(JsonApiFormatter::new()),
        }
    }
}

impl FromStr for FormatterKind {
    type Err = CollectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vanilla" => Ok(FormatterKind::Vanilla),
            "jsonapi" | "json_api" => Ok(FormatterKind::JsonApi),
            _ => Err(CollectorError::UnknownFormatter(s.to_string())),
        }
    }
}

impl Serialize for FormatterKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FormatterKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<F: ErrorFormatter + ?Sized> ErrorFormatter for Box<F> {
    fn add_error(&mut self, message: ErrorMessage, field: &str, rule: &str, args: &[Value]) {
        (**self).add_error(message, field, rule, args)
    }

    fn to_json(&self) -> Option<Value> {
        (**self).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("vanilla".parse::<FormatterKind>().unwrap(), FormatterKind::Vanilla);
        assert_eq!("JsonApi".parse::<FormatterKind>().unwrap(), FormatterKind::JsonApi);
        assert_eq!("json_api".parse::<FormatterKind>().unwrap(), FormatterKind::JsonApi);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = "xml".parse::<FormatterKind>().unwrap_err();
        assert!(matches!(err, CollectorError::UnknownFormatter(ref name) if name == "xml"));
    }

    #[test]
    fn test_deserialize_matches_from_str() {
        for name in ["vanilla", "JsonApi", "json_api", " JSONAPI "] {
            let from_serde: FormatterKind = serde_json::from_value(Value::from(name)).unwrap();
            assert_eq!(from_serde, name.parse::<FormatterKind>().unwrap(), "{}", name);
        }
        assert!(serde_json::from_value::<FormatterKind>(Value::from("xml")).is_err());
    }

    #[test]
    fn test_serialize_round_trips_name() {
        assert_eq!(serde_json::to_value(FormatterKind::JsonApi).unwrap(), Value::from("jsonapi"));
    }

    #[test]
    fn test_built_formatter_starts_empty() {
        for kind in [FormatterKind::Vanilla, FormatterKind::JsonApi] {
            assert!(kind.build().to_json().is_none(), "{} should start empty", kind);
        }
    }
}
