// File: src/rule.rs
// Purpose: Rule descriptor handed to the collector when a check fails

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named validation rule with its invocation arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRule {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl ParsedRule {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Rule without arguments, e.g. `required`
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_without_args() {
        let rule: ParsedRule = serde_json::from_value(json!({ "name": "required" })).unwrap();
        assert_eq!(rule, ParsedRule::bare("required"));
    }

    #[test]
    fn test_deserialize_with_args() {
        let rule: ParsedRule =
            serde_json::from_value(json!({ "name": "range", "args": [1, 10] })).unwrap();
        assert_eq!(rule.name, "range");
        assert_eq!(rule.args, vec![json!(1), json!(10)]);
    }
}
