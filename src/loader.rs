//! Template loading
//!
//! A loader maps a template name to parsed template content. The crate
//! ships a single in-memory implementation; file-system or network backed
//! loaders live with the host application.

use std::collections::HashMap;

use crate::environment::Environment;
use crate::error::TemplateError;
use crate::template::Template;

/// Capability to load a template by name
pub trait Loader {
    /// Load and parse the template registered under `name`
    ///
    /// Failures are reported to the caller untouched; the engine never
    /// wraps, retries, or suppresses a failed load.
    fn load_template(
        &self,
        name: &str,
        environment: &Environment,
    ) -> Result<Template, TemplateError>;
}

/// In-memory loader mapping template names to source strings
#[derive(Debug, Clone, Default)]
pub struct DictLoader {
    templates: HashMap<String, String>,
}

impl DictLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template source under a name
    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.insert(name.into(), source.into());
        self
    }

    /// Register a template source under a name
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(name.into(), source.into());
    }
}

impl Loader for DictLoader {
    fn load_template(
        &self,
        name: &str,
        environment: &Environment,
    ) -> Result<Template, TemplateError> {
        let source = self
            .templates
            .get(name)
            .ok_or_else(|| TemplateError::TemplateNotFound {
                name: name.to_string(),
            })?;
        environment.parse_template_named(source, name)
    }
}
