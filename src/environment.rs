//! Environment owning the loader, syntax configuration, and directive registry

use std::collections::HashMap;

use crate::context::Context;
use crate::directive::{self, DirectiveParser};
use crate::error::TemplateError;
use crate::loader::{DictLoader, Loader};
use crate::syntax::Syntax;
use crate::template::Template;
use crate::value::Value;

/// Shared engine state: the loader, the tag delimiters, and the mapping
/// from directive keywords to their parse functions
pub struct Environment {
    loader: Box<dyn Loader>,
    syntax: Syntax,
    directives: HashMap<String, DirectiveParser>,
}

impl Environment {
    /// Create an environment around a loader, with the default syntax and
    /// the built-in directives registered
    pub fn new(loader: impl Loader + 'static) -> Self {
        let mut environment = Self {
            loader: Box::new(loader),
            syntax: Syntax::default(),
            directives: HashMap::new(),
        };
        environment.register_directive("import", directive::ImportTag::parse);
        environment.register_directive("macro", directive::MacroTag::parse);
        environment.register_directive("call", directive::CallTag::parse);
        environment
    }

    /// Replace the syntax configuration
    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// The active delimiter configuration
    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Map a directive keyword to a parse function
    ///
    /// Registering an existing keyword replaces the previous entry, which
    /// is how a host overrides a built-in directive.
    pub fn register_directive(&mut self, keyword: impl Into<String>, parser: DirectiveParser) {
        self.directives.insert(keyword.into(), parser);
    }

    /// Look up the parse function for a directive keyword
    pub fn directive(&self, keyword: &str) -> Option<DirectiveParser> {
        self.directives.get(keyword).copied()
    }

    /// Load a template by name through the configured loader
    ///
    /// Loader failures propagate unchanged.
    pub fn load_template(&self, name: &str) -> Result<Template, TemplateError> {
        self.loader.load_template(name, self)
    }

    /// Parse template source into an anonymous template
    pub fn parse_template(&self, source: &str) -> Result<Template, TemplateError> {
        Template::parse(source, self, None)
    }

    /// Parse template source under a template name
    pub fn parse_template_named(&self, source: &str, name: &str) -> Result<Template, TemplateError> {
        Template::parse(source, self, Some(name.to_string()))
    }

    /// Parse and render source against a fresh context holding `values`
    pub fn render_str(
        &self,
        source: &str,
        values: HashMap<String, Value>,
    ) -> Result<String, TemplateError> {
        let template = self.parse_template(source)?;
        let mut context = Context::with_values(self, values);
        template.render(&mut context)
    }
}

impl Default for Environment {
    /// An environment backed by an empty in-memory loader
    fn default() -> Self {
        Self::new(DictLoader::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Node, Spanned, Token, TokenParser};

    #[test]
    fn test_builtin_directives_are_registered() {
        let environment = Environment::default();
        assert!(environment.directive("import").is_some());
        assert!(environment.directive("macro").is_some());
        assert!(environment.directive("call").is_some());
        assert!(environment.directive("frob").is_none());
    }

    #[test]
    fn test_custom_directive_registration() {
        fn parse_noop(
            _parser: &mut TokenParser<'_>,
            _token: &Spanned<Token>,
        ) -> Result<Node, TemplateError> {
            Ok(Node::Text(String::new()))
        }

        let mut environment = Environment::default();
        environment.register_directive("noop", parse_noop);

        let template = environment
            .parse_template("a{% noop %}b")
            .expect("Should parse");
        let mut context = Context::new(&environment);
        assert_eq!(template.render(&mut context).unwrap(), "ab");
    }

    #[test]
    fn test_render_str_substitutes_values() {
        let environment = Environment::default();
        let mut values = HashMap::new();
        values.insert("name".to_string(), Value::from("weft"));
        let output = environment
            .render_str("Hello {{ name }}!", values)
            .expect("Should render");
        assert_eq!(output, "Hello weft!");
    }
}
