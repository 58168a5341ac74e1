// File: src/message.rs
// Purpose: Message shapes accepted by the collector and delivered to formatters

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::rule::ParsedRule;
use crate::template;

/// Callback producing a message from `(field, rule, args)`
pub type MessageFn = dyn Fn(&str, &str, &[Value]) -> String + Send + Sync;

/// Error raised while a rule was running
pub type SharedError = Arc<dyn StdError + Send + Sync>;

/// Message supplied when a rule fails
///
/// Plain strings convert into [`Message::Templated`], so `{{ field }}`,
/// `{{ validation }}` and `{{ args.N }}` placeholders are always rendered
/// unless the caller asks for [`Message::Literal`].
#[derive(Clone, Default)]
pub enum Message {
    /// No message; a generic one is synthesized
    #[default]
    Absent,
    /// Used verbatim
    Literal(String),
    /// Rendered with `{ field, args, validation }`
    Templated(String),
    /// Invoked with `(field, rule, args)`
    Generator(Arc<MessageFn>),
    /// Error thrown by the rule itself
    Thrown(SharedError),
}

impl Message {
    pub fn literal(text: impl Into<String>) -> Self {
        Message::Literal(text.into())
    }

    pub fn templated(template: impl Into<String>) -> Self {
        Message::Templated(template.into())
    }

    pub fn generator<F>(generate: F) -> Self
    where
        F: Fn(&str, &str, &[Value]) -> String + Send + Sync + 'static,
    {
        Message::Generator(Arc::new(generate))
    }

    pub fn thrown<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Message::Thrown(Arc::new(error))
    }

    /// Turn the supplied message into the one handed to the formatter
    pub(crate) fn resolve(self, pointer: &str, rule: &ParsedRule) -> ErrorMessage {
        match self {
            Message::Absent => ErrorMessage::Text(fallback(pointer, rule)),
            Message::Literal(text) | Message::Templated(text) if text.is_empty() => {
                ErrorMessage::Text(fallback(pointer, rule))
            }
            Message::Literal(text) => ErrorMessage::Text(text),
            Message::Templated(template) => {
                let binding = json!({
                    "field": pointer,
                    "args": rule.args,
                    "validation": rule.name,
                });
                let rendered = template::render(&template, &binding);
                if rendered.is_empty() {
                    ErrorMessage::Text(fallback(pointer, rule))
                } else {
                    ErrorMessage::Text(rendered)
                }
            }
            Message::Generator(generate) => {
                ErrorMessage::Text(generate(pointer, &rule.name, &rule.args))
            }
            Message::Thrown(error) => ErrorMessage::Thrown(error),
        }
    }
}

fn fallback(pointer: &str, rule: &ParsedRule) -> String {
    format!("{} validation failed on {}", rule.name, pointer)
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Absent => f.write_str("Absent"),
            Message::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Message::Templated(text) => f.debug_tuple("Templated").field(text).finish(),
            Message::Generator(_) => f.write_str("Generator(..)"),
            Message::Thrown(error) => f.debug_tuple("Thrown").field(&error.to_string()).finish(),
        }
    }
}

impl From<&str> for Message {
    fn from(template: &str) -> Self {
        Message::Templated(template.to_string())
    }
}

impl From<String> for Message {
    fn from(template: String) -> Self {
        Message::Templated(template)
    }
}

impl<M: Into<Message>> From<Option<M>> for Message {
    fn from(message: Option<M>) -> Self {
        message.map(Into::into).unwrap_or_default()
    }
}

/// Final message recorded by a formatter
#[derive(Clone)]
pub enum ErrorMessage {
    Text(String),
    Thrown(SharedError),
}

impl ErrorMessage {
    /// Message text; thrown errors render through `Display`
    pub fn text(&self) -> String {
        match self {
            ErrorMessage::Text(text) => text.clone(),
            ErrorMessage::Thrown(error) => error.to_string(),
        }
    }

    pub fn is_thrown(&self) -> bool {
        matches!(self, ErrorMessage::Thrown(_))
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMessage::Text(text) => f.write_str(text),
            ErrorMessage::Thrown(error) => write!(f, "{}", error),
        }
    }
}

impl fmt::Debug for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMessage::Text(text) => f.debug_tuple("Text").field(text).finish(),
            ErrorMessage::Thrown(error) => f.debug_tuple("Thrown").field(&error.to_string()).finish(),
        }
    }
}
