//! Error types for template compilation and rendering

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in template source text
pub type Span = std::ops::Range<usize>;

/// Errors raised while compiling or rendering a template
///
/// Syntax errors originate in this crate; the loader variants are raised by
/// whichever loader backs the environment and pass through the engine
/// untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// Malformed template source or directive usage
    #[error("syntax error: {message}")]
    Syntax { message: String, span: Span },

    /// The loader has no template registered under the requested name
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    /// The loader located the template but could not produce it
    #[error("failed to load template '{name}': {message}")]
    Load { name: String, message: String },
}

impl TemplateError {
    /// Create a syntax error at a source location
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::Syntax {
            message: message.into(),
            span,
        }
    }

    /// The source location of the error, if it carries one
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Syntax { span, .. } => Some(span),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// Errors without a source location fall back to their display form.
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            TemplateError::Syntax { span, message } => {
                let mut buf = Vec::new();
                Report::build(ReportKind::Error, filename, span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf)
                    .unwrap();
                String::from_utf8(buf).unwrap()
            }
            other => other.to_string(),
        }
    }
}
