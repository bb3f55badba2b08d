//! Rendering context: an ordered stack of variable scopes
//!
//! The context owns the scope stack consulted while rendering plus a
//! reference to the owning environment. Macro definitions live in a store
//! shared between a context and every flattened snapshot taken from it, so
//! side effects applied during a nested render stay visible to the caller
//! even though the snapshot's scope stack is independent.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::directive::Macro;
use crate::environment::Environment;
use crate::value::Value;

/// Live variable state for one render pass
pub struct Context<'env> {
    environment: &'env Environment,
    /// Scope stack, bottom = outermost
    scopes: Vec<HashMap<String, Value>>,
    /// Macro store shared with flattened snapshots
    macros: Rc<RefCell<HashMap<String, Macro>>>,
}

impl<'env> Context<'env> {
    /// Create an empty context with a single root scope
    pub fn new(environment: &'env Environment) -> Self {
        Self {
            environment,
            scopes: vec![HashMap::new()],
            macros: Rc::default(),
        }
    }

    /// Create a context whose root scope holds the given values
    pub fn with_values(environment: &'env Environment, values: HashMap<String, Value>) -> Self {
        Self {
            environment,
            scopes: vec![values],
            macros: Rc::default(),
        }
    }

    /// The environment that owns the loader and directive registry
    pub fn environment(&self) -> &'env Environment {
        self.environment
    }

    /// Push a fresh innermost scope
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pop the innermost scope. The root scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind a name in the innermost scope
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value.into());
        }
    }

    /// Look a name up through the scope stack, innermost first
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Resolve a dotted path
    ///
    /// The head segment goes through the scope stack; the remaining
    /// segments step into maps by key and into lists by numeric index.
    pub fn resolve_path(&self, segments: &[String]) -> Option<Value> {
        let (head, rest) = segments.split_first()?;
        let mut current = self.lookup(head)?;
        for segment in rest {
            current = match current {
                Value::Map(entries) => entries.get(segment)?,
                Value::List(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current.clone())
    }

    /// Merge the scope stack, bottom to top, into a single-scope snapshot
    ///
    /// Inner scopes override outer ones on key collision. The snapshot's
    /// stack is independent of this context, so a nested render cannot
    /// push, pop, or rebind anything here; the macro store is the one
    /// piece of shared backing storage, so macros registered against the
    /// snapshot remain visible to this context.
    pub fn flatten(&self) -> Context<'env> {
        let mut merged = HashMap::new();
        for scope in &self.scopes {
            for (name, value) in scope {
                merged.insert(name.clone(), value.clone());
            }
        }
        Context {
            environment: self.environment,
            scopes: vec![merged],
            macros: Rc::clone(&self.macros),
        }
    }

    /// Register a macro in the shared store
    pub fn register_macro(&self, definition: Macro) {
        self.macros
            .borrow_mut()
            .insert(definition.name.clone(), definition);
    }

    /// Fetch a macro from the shared store
    pub fn macro_named(&self, name: &str) -> Option<Macro> {
        self.macros.borrow().get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_macro(name: &str) -> Macro {
        Macro {
            name: name.to_string(),
            params: vec![],
            body: vec![],
        }
    }

    #[test]
    fn test_lookup_innermost_first() {
        let environment = Environment::default();
        let mut context = Context::new(&environment);
        context.set("x", "outer");
        context.push_scope();
        context.set("x", "inner");
        assert_eq!(context.lookup("x"), Some(&Value::from("inner")));
        context.pop_scope();
        assert_eq!(context.lookup("x"), Some(&Value::from("outer")));
    }

    #[test]
    fn test_root_scope_is_never_popped() {
        let environment = Environment::default();
        let mut context = Context::new(&environment);
        context.set("x", "kept");
        context.pop_scope();
        assert_eq!(context.lookup("x"), Some(&Value::from("kept")));
    }

    #[test]
    fn test_resolve_path_into_maps_and_lists() {
        let environment = Environment::default();
        let mut context = Context::new(&environment);
        let mut article = HashMap::new();
        article.insert(
            "tags".to_string(),
            Value::List(vec![Value::from("rust"), Value::from("templates")]),
        );
        context.set("article", Value::Map(article));

        let path = ["article".to_string(), "tags".to_string(), "1".to_string()];
        assert_eq!(context.resolve_path(&path), Some(Value::from("templates")));

        let missing = ["article".to_string(), "author".to_string()];
        assert_eq!(context.resolve_path(&missing), None);
    }

    #[test]
    fn test_flatten_merges_inner_over_outer() {
        let environment = Environment::default();
        let mut context = Context::new(&environment);
        context.set("x", "outer");
        context.set("y", "outer");
        context.push_scope();
        context.set("x", "inner");

        let flat = context.flatten();
        assert_eq!(flat.lookup("x"), Some(&Value::from("inner")));
        assert_eq!(flat.lookup("y"), Some(&Value::from("outer")));
    }

    #[test]
    fn test_flatten_is_isolated_from_caller_scopes() {
        let environment = Environment::default();
        let mut context = Context::new(&environment);
        context.set("x", "original");

        let mut flat = context.flatten();
        flat.set("x", "mutated");
        flat.set("fresh", "value");

        assert_eq!(context.lookup("x"), Some(&Value::from("original")));
        assert_eq!(context.lookup("fresh"), None);
    }

    #[test]
    fn test_flatten_shares_macro_store() {
        let environment = Environment::default();
        let context = Context::new(&environment);

        let flat = context.flatten();
        flat.register_macro(test_macro("greet"));

        assert!(context.macro_named("greet").is_some());
    }
}
