// File: src/config.rs
// Purpose: Collector configuration parsing from collector.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CollectorError;
use crate::formatter::{ErrorFormatter, FormatterKind};

/// Collector configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CollectorConfig {
    #[serde(default)]
    pub collector: CollectorSection,
}

/// `[collector]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorSection {
    /// Build a tree of validated values (default: false)
    #[serde(default = "default_false")]
    pub generate_tree: bool,

    /// Formatter used for errors (default: "vanilla")
    #[serde(default)]
    pub formatter: FormatterKind,
}

fn default_false() -> bool {
    false
}

impl Default for CollectorSection {
    fn default() -> Self {
        Self {
            generate_tree: default_false(),
            formatter: FormatterKind::default(),
        }
    }
}

impl CollectorConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> std::result::Result<Self, CollectorError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from collector.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            tracing::debug!("No collector config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read collector config: {:?}", path))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse collector config: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./collector.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("collector.toml")
    }

    /// Create an empty formatter of the configured kind
    pub fn build_formatter(&self) -> Box<dyn ErrorFormatter> {
        self.collector.formatter.build()
    }
}
