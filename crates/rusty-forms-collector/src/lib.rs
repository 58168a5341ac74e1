// rusty-forms-collector
// Collects validation errors and the tree of validated values for one run

pub mod collector;
pub mod config;
pub mod error;
pub mod formatter;
pub mod message;
pub mod pointer;
pub mod rule;
pub mod sink;
pub mod template;

// Re-export core types
pub use collector::Collector;
pub use config::CollectorConfig;
pub use error::CollectorError;
pub use formatter::{ErrorFormatter, FormatterKind, JsonApiFormatter, VanillaFormatter};
pub use message::{ErrorMessage, Message};
pub use rule::ParsedRule;
pub use sink::{ErrorSink, FormatterSink};

// Re-export the value type used for trees and rule arguments
pub use serde_json::Value;
