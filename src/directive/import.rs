//! The `import` directive
//!
//! `{% import "macros.weft" %}` resolves its single argument against the
//! live context, loads the named template through the environment's
//! loader, and renders it into a flattened snapshot of the current scope
//! stack. The rendered text is discarded: importing exists for its side
//! effects, typically macro definitions that become callable by the
//! importing template.

use crate::context::Context;
use crate::error::{Span, TemplateError};
use crate::parser::{Expression, Node, Spanned, Token, TokenParser};
use crate::value::Value;

/// Compiled `import` invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ImportTag {
    template_name: Expression,
    span: Span,
}

impl ImportTag {
    /// Parse `import <expression>`
    ///
    /// Exactly one argument is required: the template to import, either a
    /// quoted name or an expression that resolves to one.
    pub fn parse(
        _parser: &mut TokenParser<'_>,
        token: &Spanned<Token>,
    ) -> Result<Node, TemplateError> {
        let components = token.node.components();
        if components.len() != 2 {
            return Err(TemplateError::syntax(
                "the import directive requires exactly one argument: the template to import",
                token.span.clone(),
            ));
        }

        Ok(Node::Import(ImportTag {
            template_name: Expression::new(components[1].as_str()),
            span: token.span.clone(),
        }))
    }

    /// The expression naming the template to import
    pub fn template_name(&self) -> &Expression {
        &self.template_name
    }

    /// Resolve the template name, load the template, and render it against
    /// a flattened snapshot of `context`
    ///
    /// The name expression is resolved fresh on every call and must yield
    /// a string; numbers, collections, and unknown names are rejected
    /// before the loader is consulted. Loader and nested render failures
    /// propagate unchanged. On success the nested output is discarded and
    /// the directive contributes the empty string.
    pub fn render(&self, context: &mut Context) -> Result<String, TemplateError> {
        let name = match self.template_name.resolve(context) {
            Some(Value::String(name)) => name,
            _ => {
                return Err(TemplateError::syntax(
                    format!(
                        "'{}' could not be resolved as a string",
                        self.template_name.raw()
                    ),
                    self.span.clone(),
                ));
            }
        };

        let template = context.environment().load_template(&name)?;

        let mut snapshot = context.flatten();
        template.render(&mut snapshot)?;

        Ok(String::new())
    }
}
