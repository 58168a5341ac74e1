// File: src/collector.rs
// Purpose: Collects errors and the validated data tree for one validation run

use serde_json::{Map, Value};

use crate::config::CollectorConfig;
use crate::formatter::ErrorFormatter;
use crate::message::{ErrorMessage, Message};
use crate::pointer;
use crate::rule::ParsedRule;
use crate::sink::{ErrorSink, FormatterSink};

/// Collects all errors of a validation run and, when `generate_tree` is
/// set, a copy of the values that passed validation.
///
/// The tree stops accepting values as soon as the first error is recorded,
/// even for fields unrelated to the failure, so a caller never sees values
/// written after validation started failing.
pub struct Collector<'f> {
    tree: Value,
    has_errors: bool,
    generate_tree: bool,
    formatter: &'f mut dyn ErrorFormatter,
    sink: Box<dyn ErrorSink + 'f>,
}

impl<'f> Collector<'f> {
    /// Create a collector that reports errors straight to `formatter`
    pub fn new(formatter: &'f mut dyn ErrorFormatter, generate_tree: bool) -> Self {
        Self::with_error_collector(formatter, generate_tree, FormatterSink)
    }

    /// Create a collector whose errors are routed through `sink`
    pub fn with_error_collector<S>(
        formatter: &'f mut dyn ErrorFormatter,
        generate_tree: bool,
        sink: S,
    ) -> Self
    where
        S: ErrorSink + 'f,
    {
        Self {
            tree: Value::Object(Map::new()),
            has_errors: false,
            generate_tree,
            formatter,
            sink: Box::new(sink),
        }
    }

    /// Same as [`Collector::with_error_collector`], taking a closure
    pub fn with_error_fn<F>(
        formatter: &'f mut dyn ErrorFormatter,
        generate_tree: bool,
        collect: F,
    ) -> Self
    where
        F: FnMut(&mut dyn ErrorFormatter, ErrorMessage, &str, &str, &[Value]) + 'f,
    {
        Self::with_error_collector(formatter, generate_tree, collect)
    }

    /// Create a collector using the tree setting from `config`
    pub fn from_config(formatter: &'f mut dyn ErrorFormatter, config: &CollectorConfig) -> Self {
        Self::new(formatter, config.collector.generate_tree)
    }

    /// Set the value of a node in the validated tree
    ///
    /// No-op when tree generation is off, when `value` is `None`, or when
    /// any error has been recorded on this collector.
    pub fn set_value(&mut self, pointer: &str, value: Option<Value>) {
        if !self.generate_tree {
            return;
        }
        let Some(value) = value else {
            return;
        };
        if self.has_errors {
            tracing::debug!(pointer, "Skipping tree write, collector already has errors");
            return;
        }

        let path = pointer::normalize(pointer);
        tracing::trace!(path = %path, "Writing validated value");
        pointer::deep_set(&mut self.tree, &path, value);
    }

    /// Validated data collected so far
    pub fn get_data(&self) -> &Value {
        &self.tree
    }

    /// Consume the collector and return the validated data
    pub fn into_data(self) -> Value {
        self.tree
    }

    /// Errors as serialized by the formatter
    pub fn get_errors(&self) -> Option<Value> {
        self.formatter.to_json()
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Formatter errors are reported to; custom sinks may bypass it
    pub fn formatter(&self) -> &dyn ErrorFormatter {
        &*self.formatter
    }

    /// Record a failure of `rule` on `pointer`
    ///
    /// Missing or empty messages become `"<rule> validation failed on <pointer>"`.
    /// Plain string messages are rendered as templates with `field`, `args`
    /// and `validation` bound.
    pub fn set_error(&mut self, pointer: &str, rule: &ParsedRule, message: impl Into<Message>) {
        self.has_errors = true;

        let message = message.into().resolve(pointer, rule);
        tracing::trace!(pointer, rule = %rule.name, "Recording validation error");

        self.sink
            .record(&mut *self.formatter, message, pointer, &rule.name, &rule.args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::VanillaFormatter;
    use serde_json::json;

    #[test]
    fn test_tree_disabled_ignores_values() {
        let mut formatter = VanillaFormatter::new();
        let mut collector = Collector::new(&mut formatter, false);

        collector.set_value("user.name", Some(json!("Alice")));

        assert_eq!(collector.get_data(), &json!({}));
    }

    #[test]
    fn test_absent_value_is_ignored() {
        let mut formatter = VanillaFormatter::new();
        let mut collector = Collector::new(&mut formatter, true);

        collector.set_value("user.name", None);
        collector.set_value("user.age", Some(Value::Null));

        assert_eq!(collector.get_data(), &json!({ "user": { "age": null } }));
    }

    #[test]
    fn test_tip_marker_is_stripped() {
        let mut formatter = VanillaFormatter::new();
        let mut collector = Collector::new(&mut formatter, true);

        collector.set_value("tags.::tip::", Some(json!(["a", "b"])));

        assert_eq!(collector.get_data(), &json!({ "tags": ["a", "b"] }));
    }

    #[test]
    fn test_set_error_flips_flag() {
        let mut formatter = VanillaFormatter::new();
        let mut collector = Collector::new(&mut formatter, true);
        assert!(!collector.has_errors());

        collector.set_error("email", &ParsedRule::bare("required"), Message::Absent);
        assert!(collector.has_errors());

        collector.set_error("name", &ParsedRule::bare("required"), Message::Absent);
        assert!(collector.has_errors());
    }

    #[test]
    fn test_errors_come_from_formatter() {
        let mut formatter = VanillaFormatter::new();
        {
            let collector = Collector::new(&mut formatter, false);
            assert_eq!(collector.get_errors(), None);
        }

        let mut collector = Collector::new(&mut formatter, false);
        collector.set_error("email", &ParsedRule::bare("email"), "{{ field }} is invalid");
        assert_eq!(
            collector.get_errors(),
            Some(json!([{ "field": "email", "message": "email is invalid", "validation": "email" }]))
        );
    }

    #[test]
    fn test_formatter_accessor_sees_recorded_errors() {
        let mut formatter = VanillaFormatter::new();
        let mut collector = Collector::new(&mut formatter, false);
        assert_eq!(collector.formatter().to_json(), None);

        collector.set_error("email", &ParsedRule::bare("required"), Message::Absent);

        assert_eq!(collector.formatter().to_json(), collector.get_errors());
        assert!(collector.formatter().to_json().is_some());
    }

    #[test]
    fn test_huge_index_does_not_panic() {
        let mut formatter = VanillaFormatter::new();
        let mut collector = Collector::new(&mut formatter, true);

        collector.set_value("items.18446744073709551615", Some(json!("x")));
        collector.set_value("tags.4000000000", Some(json!("y")));

        assert_eq!(
            collector.get_data(),
            &json!({
                "items": { "18446744073709551615": "x" },
                "tags": { "4000000000": "y" },
            })
        );
    }

    #[test]
    fn test_into_data() {
        let mut formatter = VanillaFormatter::new();
        let mut collector = Collector::new(&mut formatter, true);
        collector.set_value("a", Some(json!(1)));

        assert_eq!(collector.into_data(), json!({ "a": 1 }));
    }
}
