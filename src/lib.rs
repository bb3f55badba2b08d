//! Weft - a small text-template engine with importable macro libraries
//!
//! Templates interleave plain text with `{{ expression }}` substitutions,
//! `{% directive %}` blocks, and `{# comments #}`. The flagship directive
//! is `import`: it loads another template by name and renders it into a
//! flattened snapshot of the current context, so any macros the imported
//! template defines become callable by the importer while its text output
//! is discarded.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use weft::{DictLoader, Environment, Value};
//!
//! let loader = DictLoader::new()
//!     .with_template("macros.weft", "{% macro greet name %}Hello {{ name }}!{% endmacro %}");
//! let environment = Environment::new(loader);
//!
//! let mut values = HashMap::new();
//! values.insert("user".to_string(), Value::from("world"));
//!
//! let output = environment
//!     .render_str(r#"{% import "macros.weft" %}{% call greet user %}"#, values)
//!     .unwrap();
//! assert_eq!(output, "Hello world!");
//! ```

pub mod context;
pub mod directive;
pub mod environment;
pub mod error;
pub mod loader;
pub mod parser;
pub mod syntax;
pub mod template;
pub mod value;

pub use context::Context;
pub use environment::Environment;
pub use error::{Span, TemplateError};
pub use loader::{DictLoader, Loader};
pub use parser::{ExprKind, Expression, Node, Spanned, Token, TokenParser};
pub use syntax::{Syntax, SyntaxConfigError};
pub use template::Template;
pub use value::Value;

use std::collections::HashMap;

/// Render template source against a default environment holding `values`
///
/// The default environment has an empty in-memory loader, so `import`
/// reports every template as not found; build an [`Environment`] around a
/// populated [`DictLoader`] to make templates importable.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use weft::{render, Value};
///
/// let mut values = HashMap::new();
/// values.insert("name".to_string(), Value::from("weft"));
///
/// let output = render("Hello {{ name }}!", values).unwrap();
/// assert_eq!(output, "Hello weft!");
/// ```
pub fn render(source: &str, values: HashMap<String, Value>) -> Result<String, TemplateError> {
    Environment::default().render_str(source, values)
}
