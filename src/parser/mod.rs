//! Parser for template token streams

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::{ExprKind, Expression, Node, Spanned};
pub use lexer::{tokenize, Token};

use crate::environment::Environment;
use crate::error::TemplateError;

/// Parses a token stream into compiled nodes
///
/// Text and variable tokens become nodes directly; directive tokens are
/// dispatched through the environment's directive registry, and comments
/// are dropped. Directive parse functions receive the parser itself so
/// block-style directives can keep consuming the stream for their body.
pub struct TokenParser<'env> {
    environment: &'env Environment,
    tokens: Vec<Spanned<Token>>,
    pos: usize,
}

impl<'env> TokenParser<'env> {
    /// Create a parser over a token stream
    pub fn new(tokens: Vec<Spanned<Token>>, environment: &'env Environment) -> Self {
        Self {
            environment,
            tokens,
            pos: 0,
        }
    }

    /// The environment whose directive registry this parser consults
    pub fn environment(&self) -> &'env Environment {
        self.environment
    }

    /// Parse the whole stream
    pub fn parse(&mut self) -> Result<Vec<Spanned<Node>>, TemplateError> {
        let (nodes, _) = self.parse_until(&[])?;
        Ok(nodes)
    }

    /// Parse until a directive whose keyword is in `until` is consumed
    ///
    /// Returns the parsed nodes together with the terminating token, or
    /// `None` in its place when the stream ran out first. Callers that
    /// require the terminator turn `None` into their own syntax error.
    pub fn parse_until(
        &mut self,
        until: &[&str],
    ) -> Result<(Vec<Spanned<Node>>, Option<Spanned<Token>>), TemplateError> {
        let mut nodes = Vec::new();

        while self.pos < self.tokens.len() {
            let token = self.tokens[self.pos].clone();
            self.pos += 1;

            match &token.node {
                Token::Text(text) => {
                    nodes.push(Spanned::new(Node::Text(text.clone()), token.span.clone()));
                }
                Token::Variable(contents) => {
                    nodes.push(Spanned::new(
                        Node::Variable(Expression::new(contents.as_str())),
                        token.span.clone(),
                    ));
                }
                Token::Comment(_) => {}
                Token::Block(_) => {
                    let components = token.node.components();
                    let Some(keyword) = components.first() else {
                        return Err(TemplateError::syntax(
                            "empty directive tag",
                            token.span.clone(),
                        ));
                    };

                    if until.contains(&keyword.as_str()) {
                        return Ok((nodes, Some(token)));
                    }

                    let parse_directive =
                        self.environment.directive(keyword).ok_or_else(|| {
                            TemplateError::syntax(
                                format!("unknown directive '{}'", keyword),
                                token.span.clone(),
                            )
                        })?;

                    let node = parse_directive(self, &token)?;
                    nodes.push(Spanned::new(node, token.span.clone()));
                }
            }
        }

        Ok((nodes, None))
    }
}
