//! Built-in directives and the registry types for adding new ones
//!
//! A directive is a keyword mapped to a pure parse function in the
//! environment's registry. The parse function receives the whole token so
//! it can split it into components, plus the token parser so block-style
//! directives can keep consuming the stream for their body.

mod import;
mod macros;

pub use import::ImportTag;
pub use macros::{CallTag, Macro, MacroTag};

use crate::error::TemplateError;
use crate::parser::{Node, Spanned, Token, TokenParser};

/// Parse function a directive keyword maps to
pub type DirectiveParser =
    fn(&mut TokenParser<'_>, &Spanned<Token>) -> Result<Node, TemplateError>;
