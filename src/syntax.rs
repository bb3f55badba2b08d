//! Delimiter configuration for template source
//!
//! The tokenizer is driven by a `Syntax` describing the three tag delimiter
//! pairs. The defaults match the common `{% %}` / `{{ }}` / `{# #}` family;
//! alternate delimiters can be set programmatically or loaded from a TOML
//! file, which is useful when template output itself contains braces.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or validating a syntax configuration
#[derive(Error, Debug)]
pub enum SyntaxConfigError {
    #[error("Failed to read syntax config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse syntax config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid delimiter for {0}: delimiters must not be empty")]
    EmptyDelimiter(&'static str),
}

/// Tag delimiters recognized by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Syntax {
    /// Opening delimiter for directive tags
    pub block_start: String,
    /// Closing delimiter for directive tags
    pub block_end: String,
    /// Opening delimiter for variable tags
    pub variable_start: String,
    /// Closing delimiter for variable tags
    pub variable_end: String,
    /// Opening delimiter for comment tags
    pub comment_start: String,
    /// Closing delimiter for comment tags
    pub comment_end: String,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            block_start: "{%".to_string(),
            block_end: "%}".to_string(),
            variable_start: "{{".to_string(),
            variable_end: "}}".to_string(),
            comment_start: "{#".to_string(),
            comment_end: "#}".to_string(),
        }
    }
}

impl Syntax {
    /// Create the default syntax
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a syntax configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SyntaxConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a syntax configuration from a TOML string
    ///
    /// Omitted keys keep their default values.
    pub fn from_toml_str(content: &str) -> Result<Self, SyntaxConfigError> {
        let syntax: Syntax = toml::from_str(content)?;
        syntax.validate()?;
        Ok(syntax)
    }

    /// Set the directive tag delimiters
    pub fn with_block_delimiters(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.block_start = start.into();
        self.block_end = end.into();
        self
    }

    /// Set the variable tag delimiters
    pub fn with_variable_delimiters(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.variable_start = start.into();
        self.variable_end = end.into();
        self
    }

    /// Set the comment tag delimiters
    pub fn with_comment_delimiters(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.comment_start = start.into();
        self.comment_end = end.into();
        self
    }

    fn validate(&self) -> Result<(), SyntaxConfigError> {
        let pairs = [
            ("block_start", &self.block_start),
            ("block_end", &self.block_end),
            ("variable_start", &self.variable_start),
            ("variable_end", &self.variable_end),
            ("comment_start", &self.comment_start),
            ("comment_end", &self.comment_end),
        ];
        for (key, delimiter) in pairs {
            if delimiter.is_empty() {
                return Err(SyntaxConfigError::EmptyDelimiter(key));
            }
        }
        Ok(())
    }
}
