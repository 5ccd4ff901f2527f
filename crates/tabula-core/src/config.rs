//! Encoding configuration
//!
//! Controls the width a string dictionary starts at, whether it may fall
//! back to unencoded text once the int width is full, and whether keys are
//! released when no row refers to them any more.

use crate::dictionary::KeyWidth;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Settings for dictionary-encoded string columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Width a new dictionary starts at
    pub initial_width: KeyWidth,
    /// Whether a full int dictionary may promote to unencoded text
    pub can_promote_to_text: bool,
    /// Whether keys are dropped once no row references them
    pub release_unreferenced_keys: bool,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            initial_width: KeyWidth::Byte,
            can_promote_to_text: true,
            release_unreferenced_keys: true,
        }
    }
}

impl EncodingConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration that never leaves dictionary encoding
    pub fn dictionary_only() -> Self {
        Self {
            can_promote_to_text: false,
            ..Self::default()
        }
    }

    /// Look up a named preset
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::new()),
            "dictionary_only" => Some(Self::dictionary_only()),
            _ => None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.initial_width == KeyWidth::Unencoded && !self.can_promote_to_text {
            errors.push("an unencoded initial width requires can_promote_to_text".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_configuration(errors.join("; ")))
        }
    }

    /// Parse a configuration from JSON and validate it
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::invalid_configuration(format!("malformed JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
