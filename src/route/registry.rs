//! Static registry of route modules.
//!
//! Route files are not imported at runtime. The host registers each module
//! under the path of its file relative to the routes directory
//! (`/`-separated, e.g. `thing/:id.route.rs`), and the table builder looks
//! modules up by that key while walking the directory.

use std::collections::HashMap;

use serde_json::Value;

use crate::route::definition::RouteDefinition;

/// A named value exported by a route module.
#[derive(Debug, Clone)]
pub enum Export {
    /// A route definition.
    Route(RouteDefinition),
    /// Any other exported value.
    Value(Value),
}

impl Export {
    /// Short description of what was exported, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Export::Route(_) => "route definition",
            Export::Value(Value::Null) => "null",
            Export::Value(Value::Bool(_)) => "boolean",
            Export::Value(Value::Number(_)) => "number",
            Export::Value(Value::String(_)) => "string",
            Export::Value(Value::Array(_)) => "array",
            Export::Value(Value::Object(_)) => "object",
        }
    }
}

impl From<RouteDefinition> for Export {
    fn from(route: RouteDefinition) -> Self {
        Export::Route(route)
    }
}

impl From<Value> for Export {
    fn from(value: Value) -> Self {
        Export::Value(value)
    }
}

/// The exports of one route file.
#[derive(Debug, Clone, Default)]
pub struct RouteModule {
    exports: HashMap<String, Export>,
}

impl RouteModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named export.
    pub fn export(mut self, name: impl Into<String>, value: impl Into<Export>) -> Self {
        self.exports.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Export> {
        self.exports.get(name)
    }
}

/// Route modules keyed by relative file path.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    modules: HashMap<String, RouteModule>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under its relative file path.
    /// A later registration for the same path replaces the earlier one.
    pub fn register(mut self, file: impl Into<String>, module: RouteModule) -> Self {
        let file = file.into();
        if self.modules.insert(file.clone(), module).is_some() {
            tracing::debug!(file = %file, "Route module registered twice, keeping the latest");
        }
        self
    }

    /// Shorthand for a module whose only export is a route definition.
    pub fn route(
        self,
        file: impl Into<String>,
        export: impl Into<String>,
        route: RouteDefinition,
    ) -> Self {
        self.register(file, RouteModule::new().export(export, route))
    }

    pub fn module(&self, file: &str) -> Option<&RouteModule> {
        self.modules.get(file)
    }

    /// Look up one export of one module.
    pub fn lookup(&self, file: &str, export: &str) -> Option<&Export> {
        self.module(file).and_then(|m| m.get(export))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_by_file_and_export() {
        let registry = RouteRegistry::new()
            .register(
                "thing/:id.route.rs",
                RouteModule::new()
                    .export("route", RouteDefinition::new())
                    .export("meta", json!({ "owner": "team" })),
            );

        assert!(matches!(registry.lookup("thing/:id.route.rs", "route"), Some(Export::Route(_))));
        assert!(matches!(registry.lookup("thing/:id.route.rs", "meta"), Some(Export::Value(_))));
        assert!(registry.lookup("thing/:id.route.rs", "missing").is_none());
        assert!(registry.lookup("other.route.rs", "route").is_none());
    }

    #[test]
    fn test_register_replaces_previous_module() {
        let registry = RouteRegistry::new()
            .register("a.route.rs", RouteModule::new().export("route", json!(1)))
            .route("a.route.rs", "route", RouteDefinition::new());

        assert_eq!(registry.len(), 1);
        assert!(matches!(registry.lookup("a.route.rs", "route"), Some(Export::Route(_))));
    }

    #[test]
    fn test_export_kind() {
        assert_eq!(Export::from(json!("x")).kind(), "string");
        assert_eq!(Export::from(json!({})).kind(), "object");
        assert_eq!(Export::from(RouteDefinition::new()).kind(), "route definition");
    }
}
