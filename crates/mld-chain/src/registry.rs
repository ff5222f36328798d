//! Registries for chain assembly
//!
//! Provides [`DecoratorRegistry`] (reference name → decorator constructor)
//! and [`ModelRegistry`] (reference name → base model factory).
//!
//! Both are populated in code before the service starts. Configuration can
//! only select among registered names; it never names code to load.

use crate::error::{ChainError, ChainResult};
use indexmap::IndexMap;
use mld_model::{
    Alias, Decoration, Decorator, DecoratorConfig, DecoratorError, LifecycleLogging, Model,
    PredictionId, Transparent,
};
use std::fmt;
use std::sync::Arc;

/// Builds one decorator layer around `wrapped`
pub type DecoratorConstructor = Arc<
    dyn Fn(Box<dyn Model>, DecoratorConfig) -> Result<Box<dyn Model>, DecoratorError>
        + Send
        + Sync,
>;

/// Builds a fresh base model
pub type ModelFactory = Arc<dyn Fn() -> Box<dyn Model> + Send + Sync>;

/// Registry of decorator constructors keyed by stable name
#[derive(Default, Clone)]
pub struct DecoratorRegistry {
    constructors: IndexMap<String, DecoratorConstructor>,
}

impl DecoratorRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            constructors: IndexMap::new(),
        }
    }

    /// Create registry with built-in decorations
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<Transparent>("transparent");
        registry.register::<PredictionId>("prediction_id");
        registry.register::<LifecycleLogging>("lifecycle_logging");
        registry.register::<Alias>("alias");
        registry
    }

    /// Register a decoration type under `name`
    ///
    /// Re-registering a name replaces the previous constructor.
    pub fn register<D: Decoration>(&mut self, name: &str) {
        self.register_fn(name, |wrapped, config| {
            let decorator = Decorator::<D>::with_config(wrapped, config)?;
            Ok(Box::new(decorator) as Box<dyn Model>)
        });
    }

    /// Register an arbitrary constructor under `name`
    pub fn register_fn<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(Box<dyn Model>, DecoratorConfig) -> Result<Box<dyn Model>, DecoratorError>
            + Send
            + Sync
            + 'static,
    {
        self.constructors
            .insert(name.to_string(), Arc::new(constructor));
    }

    /// Look up a constructor
    ///
    /// # Errors
    /// `ChainError::UnresolvableReference` if `name` is not registered
    pub fn resolve(&self, name: &str) -> ChainResult<&DecoratorConstructor> {
        self.constructors
            .get(name)
            .ok_or_else(|| ChainError::unknown_decorator(name))
    }

    /// Check if decorator exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Remove decorator
    #[inline]
    pub fn remove(&mut self, name: &str) -> bool {
        self.constructors.shift_remove(name).is_some()
    }

    /// List registered names in registration order
    #[inline]
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Get number of registered decorators
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for DecoratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratorRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Registry of base model factories keyed by stable name
#[derive(Default, Clone)]
pub struct ModelRegistry {
    factories: IndexMap<String, ModelFactory>,
}

impl ModelRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// Register a factory under `name`
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Model> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Arc::new(factory));
    }

    /// Register a `Default`-constructible model type under `name`
    pub fn register_default<M: Model + Default + 'static>(&mut self, name: &str) {
        self.register(name, || Box::new(M::default()) as Box<dyn Model>);
    }

    /// Build a fresh model instance
    ///
    /// # Errors
    /// `ChainError::UnresolvableReference` if `name` is not registered
    pub fn create(&self, name: &str) -> ChainResult<Box<dyn Model>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| ChainError::unknown_model(name))
    }

    /// Check if model exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// List registered names in registration order
    #[inline]
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Get number of registered models
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mld_contract::{Contract, Record};
    use mld_model::PredictResult;

    #[derive(Debug, Default)]
    struct Constant;

    impl Model for Constant {
        fn display_name(&self) -> String {
            "Constant".into()
        }
        fn qualified_name(&self) -> String {
            "constant".into()
        }
        fn description(&self) -> String {
            String::new()
        }
        fn version(&self) -> String {
            "1".into()
        }
        fn input_contract(&self) -> Arc<Contract> {
            Arc::new(Contract::new("In"))
        }
        fn output_contract(&self) -> Arc<Contract> {
            Arc::new(Contract::new("Out"))
        }
        fn predict(&self, _input: &Record) -> PredictResult<Record> {
            Ok(Record::new().with("value", 1))
        }
    }

    #[test]
    fn registry_new_empty() {
        let registry = DecoratorRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_with_defaults() {
        let registry = DecoratorRegistry::with_defaults();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.names(),
            vec!["transparent", "prediction_id", "lifecycle_logging", "alias"]
        );
    }

    #[test]
    fn registry_resolve_unknown() {
        let registry = DecoratorRegistry::with_defaults();
        let err = registry.resolve("mymodule.MyDecorator").err().unwrap();
        assert!(matches!(err, ChainError::UnresolvableReference { .. }));
    }

    #[test]
    fn registry_resolved_constructor_wraps() {
        let registry = DecoratorRegistry::with_defaults();
        let constructor = registry.resolve("alias").unwrap();
        let config = DecoratorConfig::new().with("qualified_name", "renamed");
        let model = constructor(Box::new(Constant), config).unwrap();
        assert_eq!(model.qualified_name(), "renamed");
    }

    #[test]
    fn registry_register_fn_and_remove() {
        let mut registry = DecoratorRegistry::new();
        registry.register_fn("identity", |wrapped, _config| Ok(wrapped));
        assert!(registry.contains("identity"));
        assert!(registry.remove("identity"));
        assert!(!registry.contains("identity"));
    }

    #[test]
    fn model_registry_creates_fresh_instances() {
        let mut models = ModelRegistry::new();
        models.register_default::<Constant>("constant");

        let model = models.create("constant").unwrap();
        assert_eq!(model.qualified_name(), "constant");
        assert!(models.create("other").is_err());
        assert_eq!(models.names(), vec!["constant"]);
    }

    #[test]
    fn registry_debug() {
        let debug_str = format!("{:?}", DecoratorRegistry::with_defaults());
        assert!(debug_str.contains("DecoratorRegistry"));
        assert!(debug_str.contains("prediction_id"));
    }
}
