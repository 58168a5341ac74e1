// File: src/sink.rs
// Purpose: Routing strategy deciding how a failure reaches the formatter

use serde_json::Value;

use crate::formatter::ErrorFormatter;
use crate::message::ErrorMessage;

/// Receives every failure recorded by a [`Collector`](crate::Collector)
///
/// A custom sink fully replaces the default routing: it may forward to the
/// formatter, rewrite the message first, or drop the error altogether.
/// Closures with the matching signature implement this trait.
pub trait ErrorSink {
    fn record(
        &mut self,
        formatter: &mut dyn ErrorFormatter,
        message: ErrorMessage,
        field: &str,
        rule: &str,
        args: &[Value],
    );
}

/// Default sink: hands the error straight to the formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatterSink;

impl ErrorSink for FormatterSink {
    fn record(
        &mut self,
        formatter: &mut dyn ErrorFormatter,
        message: ErrorMessage,
        field: &str,
        rule: &str,
        args: &[Value],
    ) {
        formatter.add_error(message, field, rule, args);
    }
}

impl<F> ErrorSink for F
where
    F: FnMut(&mut dyn ErrorFormatter, ErrorMessage, &str, &str, &[Value]),
{
    fn record(
        &mut self,
        formatter: &mut dyn ErrorFormatter,
        message: ErrorMessage,
        field: &str,
        rule: &str,
        args: &[Value],
    ) {
        self(formatter, message, field, rule, args)
    }
}
