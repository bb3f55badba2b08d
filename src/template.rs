//! Parsed templates

use crate::context::Context;
use crate::environment::Environment;
use crate::error::TemplateError;
use crate::parser::{tokenize, Node, Spanned, TokenParser};

/// A compiled template, ready to render any number of times
///
/// The original source is retained so errors can be formatted with their
/// surrounding context.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: Option<String>,
    source: String,
    nodes: Vec<Spanned<Node>>,
}

impl Template {
    /// Tokenize and parse template source
    pub fn parse(
        source: &str,
        environment: &Environment,
        name: Option<String>,
    ) -> Result<Self, TemplateError> {
        let tokens = tokenize(source, environment.syntax())?;
        let mut parser = TokenParser::new(tokens, environment);
        let nodes = parser.parse()?;
        Ok(Self {
            name,
            source: source.to_string(),
            nodes,
        })
    }

    /// The name this template was loaded under, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The original source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled node tree
    pub fn nodes(&self) -> &[Spanned<Node>] {
        &self.nodes
    }

    /// Render against the given context
    ///
    /// Output is the concatenation of each node's output; the first node
    /// error aborts the render, and a failing node contributes nothing.
    pub fn render(&self, context: &mut Context) -> Result<String, TemplateError> {
        let mut output = String::new();
        for node in &self.nodes {
            output.push_str(&node.node.render(context)?);
        }
        Ok(output)
    }
}
