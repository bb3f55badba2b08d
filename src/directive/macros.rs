//! Macro definition and invocation directives
//!
//! `{% macro greet name %}Hello {{ name }}{% endmacro %}` registers a
//! reusable fragment under its name; `{% call greet "world" %}` renders
//! the fragment with arguments bound in a fresh scope. Registration
//! writes into the context's shared macro store, which is what lets an
//! imported template's definitions survive into the importing template.

use crate::context::Context;
use crate::error::{Span, TemplateError};
use crate::parser::{Expression, Node, Spanned, Token, TokenParser};
use crate::value::Value;

/// A registered macro: parameter names plus a compiled body
#[derive(Debug, Clone, PartialEq)]
pub struct Macro {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Spanned<Node>>,
}

/// Compiled `macro` definition
#[derive(Debug, Clone, PartialEq)]
pub struct MacroTag {
    name: String,
    params: Vec<String>,
    body: Vec<Spanned<Node>>,
}

impl MacroTag {
    /// Parse `macro <name> <param>…` up to the matching `endmacro`
    pub fn parse(
        parser: &mut TokenParser<'_>,
        token: &Spanned<Token>,
    ) -> Result<Node, TemplateError> {
        let components = token.node.components();
        if components.len() < 2 {
            return Err(TemplateError::syntax(
                "the macro directive requires a name",
                token.span.clone(),
            ));
        }

        let name = components[1].clone();
        for component in &components[1..] {
            if component.starts_with('"') || component.starts_with('\'') {
                return Err(TemplateError::syntax(
                    format!(
                        "macro names and parameters must be bare identifiers, got {}",
                        component
                    ),
                    token.span.clone(),
                ));
            }
        }
        let params = components[2..].to_vec();

        let (body, terminator) = parser.parse_until(&["endmacro"])?;
        if terminator.is_none() {
            return Err(TemplateError::syntax(
                format!("macro '{}' is missing its endmacro", name),
                token.span.clone(),
            ));
        }

        Ok(Node::Macro(MacroTag { name, params, body }))
    }

    /// The macro name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register the macro in the context's shared store
    ///
    /// Definitions produce no output; redefining a name replaces the
    /// previous macro.
    pub fn render(&self, context: &mut Context) -> Result<String, TemplateError> {
        context.register_macro(Macro {
            name: self.name.clone(),
            params: self.params.clone(),
            body: self.body.clone(),
        });
        Ok(String::new())
    }
}

/// Compiled `call` invocation
#[derive(Debug, Clone, PartialEq)]
pub struct CallTag {
    name: String,
    args: Vec<Expression>,
    span: Span,
}

impl CallTag {
    /// Parse `call <name> <arg>…`
    pub fn parse(
        _parser: &mut TokenParser<'_>,
        token: &Spanned<Token>,
    ) -> Result<Node, TemplateError> {
        let components = token.node.components();
        if components.len() < 2 {
            return Err(TemplateError::syntax(
                "the call directive requires a macro name",
                token.span.clone(),
            ));
        }

        Ok(Node::Call(CallTag {
            name: components[1].clone(),
            args: components[2..]
                .iter()
                .map(|arg| Expression::new(arg.as_str()))
                .collect(),
            span: token.span.clone(),
        }))
    }

    /// Look the macro up, bind its arguments in a fresh scope, and render
    /// its body
    ///
    /// Arguments are resolved against the caller's context before the
    /// parameter scope is pushed; an argument that fails to resolve leaves
    /// its parameter unbound.
    pub fn render(&self, context: &mut Context) -> Result<String, TemplateError> {
        let Some(macro_def) = context.macro_named(&self.name) else {
            return Err(TemplateError::syntax(
                format!("unknown macro '{}'", self.name),
                self.span.clone(),
            ));
        };

        if macro_def.params.len() != self.args.len() {
            return Err(TemplateError::syntax(
                format!(
                    "macro '{}' takes {} argument(s), {} given",
                    self.name,
                    macro_def.params.len(),
                    self.args.len()
                ),
                self.span.clone(),
            ));
        }

        let bindings: Vec<(String, Option<Value>)> = macro_def
            .params
            .iter()
            .zip(&self.args)
            .map(|(param, arg)| (param.clone(), arg.resolve(context)))
            .collect();

        context.push_scope();
        for (param, value) in bindings {
            if let Some(value) = value {
                context.set(param, value);
            }
        }

        let mut output = String::new();
        for node in &macro_def.body {
            match node.node.render(context) {
                Ok(text) => output.push_str(&text),
                Err(err) => {
                    context.pop_scope();
                    return Err(err);
                }
            }
        }
        context.pop_scope();

        Ok(output)
    }
}
