//! Compiled template representation

use crate::context::Context;
use crate::directive::{CallTag, ImportTag, MacroTag};
use crate::error::{Span, TemplateError};
use crate::parser::grammar::parse_expression;
use crate::value::Value;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// An unresolved reference into the rendering context, or a literal
///
/// The raw source text of the argument is kept verbatim, quotes included.
/// Construction never fails; a malformed argument is one that never
/// resolves, and the directive owning it reports that at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    raw: String,
    kind: Option<ExprKind>,
}

/// Parsed shape of an expression
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A literal string, number, or boolean
    Literal(Value),
    /// A dotted lookup path into the context
    Path(Vec<String>),
}

impl Expression {
    /// Build an expression from its raw source text
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = parse_expression(&raw);
        Self { raw, kind }
    }

    /// The verbatim source text of the expression
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Resolve against the current context
    ///
    /// Resolution happens fresh on every call; nothing is cached between
    /// renders. Returns `None` for malformed expressions and names the
    /// context does not bind.
    pub fn resolve(&self, context: &Context) -> Option<Value> {
        match self.kind.as_ref()? {
            ExprKind::Literal(value) => Some(value.clone()),
            ExprKind::Path(segments) => context.resolve_path(segments),
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// A compiled template node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text copied to the output
    Text(String),
    /// A variable substitution
    Variable(Expression),
    /// An `import` directive
    Import(ImportTag),
    /// A `macro` definition
    Macro(MacroTag),
    /// A `call` invocation
    Call(CallTag),
}

impl Node {
    /// Render this node against the live context
    ///
    /// An unresolved variable substitution renders as the empty string;
    /// directives decide their own failure behavior.
    pub fn render(&self, context: &mut Context) -> Result<String, TemplateError> {
        match self {
            Node::Text(text) => Ok(text.clone()),
            Node::Variable(expression) => Ok(expression
                .resolve(context)
                .map(|value| value.to_string())
                .unwrap_or_default()),
            Node::Import(tag) => tag.render(context),
            Node::Macro(tag) => tag.render(context),
            Node::Call(tag) => tag.render(context),
        }
    }
}
