//! Chain assembly
//!
//! Folds an ordered list of decorator specs around a base model:
//!
//! ```text
//! specs = [A, B, C]   →   C( B( A( base ) ) )
//! ```
//!
//! Assembly runs once, before traffic is accepted. Every reference is
//! resolved before the first layer is built, and the first construction
//! failure aborts the whole chain.

use crate::error::{ChainError, ChainResult};
use crate::registry::{DecoratorRegistry, ModelRegistry};
use crate::spec::{DecoratorSpec, ModelSpec, ServiceConfig};
use indexmap::IndexMap;
use mld_model::Model;
use std::sync::Arc;

/// Wrap `base` in the decorators named by `specs`, innermost first
///
/// # Returns
/// The outermost decorator (or `base` itself when `specs` is empty)
///
/// # Errors
/// - `ChainError::UnresolvableReference` if any reference is unknown; no
///   decorator is constructed in that case
/// - `ChainError::ConstructionFailure` if a decorator rejects its wrapped
///   component or configuration
pub fn build_chain(
    registry: &DecoratorRegistry,
    base: Box<dyn Model>,
    specs: &[DecoratorSpec],
) -> ChainResult<Box<dyn Model>> {
    let constructors = specs
        .iter()
        .map(|spec| registry.resolve(&spec.reference))
        .collect::<ChainResult<Vec<_>>>()?;

    let mut current = base;
    for (index, (spec, constructor)) in specs.iter().zip(constructors).enumerate() {
        current = constructor(current, spec.configuration.clone()).map_err(|source| {
            ChainError::ConstructionFailure {
                index,
                reference: spec.reference.clone(),
                source,
            }
        })?;
        tracing::debug!(
            index,
            reference = %spec.reference,
            model = %current.qualified_name(),
            "wrapped layer"
        );
    }

    Ok(current)
}

/// Assembles served models from a [`ServiceConfig`]
#[derive(Debug, Clone, Default)]
pub struct ChainAssembler {
    decorators: DecoratorRegistry,
    models: ModelRegistry,
}

impl ChainAssembler {
    /// Create assembler over the given registries
    #[inline]
    #[must_use]
    pub fn new(decorators: DecoratorRegistry, models: ModelRegistry) -> Self {
        Self { decorators, models }
    }

    /// Assembler with built-in decorators and the given models
    #[inline]
    #[must_use]
    pub fn with_models(models: ModelRegistry) -> Self {
        Self::new(DecoratorRegistry::with_defaults(), models)
    }

    /// Decorator registry
    #[inline]
    #[must_use]
    pub fn decorators(&self) -> &DecoratorRegistry {
        &self.decorators
    }

    /// Mutable decorator registry
    #[inline]
    pub fn decorators_mut(&mut self) -> &mut DecoratorRegistry {
        &mut self.decorators
    }

    /// Model registry
    #[inline]
    #[must_use]
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// Mutable model registry
    #[inline]
    pub fn models_mut(&mut self) -> &mut ModelRegistry {
        &mut self.models
    }

    /// Wrap an existing model
    ///
    /// # Errors
    /// See [`build_chain`]
    pub fn build(
        &self,
        base: Box<dyn Model>,
        specs: &[DecoratorSpec],
    ) -> ChainResult<Box<dyn Model>> {
        build_chain(&self.decorators, base, specs)
    }

    /// Build one configured model
    ///
    /// # Errors
    /// - `ChainError::UnresolvableReference` for unknown model or decorator
    /// - `ChainError::ConstructionFailure` from [`build_chain`]
    /// - `ChainError::QualifiedNameMismatch` if the chain does not expose
    ///   the configured qualified name
    pub fn build_model(&self, spec: &ModelSpec) -> ChainResult<Box<dyn Model>> {
        let base = self.models.create(&spec.reference)?;
        let chain = self.build(base, &spec.decorators)?;

        let actual = chain.qualified_name();
        if actual != spec.qualified_name {
            return Err(ChainError::QualifiedNameMismatch {
                configured: spec.qualified_name.clone(),
                actual,
            });
        }

        tracing::info!(
            model = %spec.qualified_name,
            layers = spec.decorators.len(),
            "assembled model chain"
        );
        Ok(chain)
    }

    /// Build every configured model, failing on the first error
    ///
    /// # Errors
    /// - `ChainError::DuplicateModel` if two entries share a qualified name
    /// - anything [`ChainAssembler::build_model`] returns
    pub fn assemble(&self, config: &ServiceConfig) -> ChainResult<AssembledService> {
        let mut models = IndexMap::with_capacity(config.models.len());
        for spec in &config.models {
            if models.contains_key(&spec.qualified_name) {
                return Err(ChainError::DuplicateModel(spec.qualified_name.clone()));
            }
            let chain: Arc<dyn Model> = Arc::from(self.build_model(spec)?);
            models.insert(spec.qualified_name.clone(), chain);
        }

        Ok(AssembledService {
            title: config.service_title.clone(),
            models,
        })
    }
}

/// Fully assembled, read-only set of served chains
#[derive(Debug, Clone)]
pub struct AssembledService {
    title: Option<String>,
    models: IndexMap<String, Arc<dyn Model>>,
}

impl AssembledService {
    /// Service title
    #[inline]
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Look up a served chain
    #[inline]
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&Arc<dyn Model>> {
        self.models.get(qualified_name)
    }

    /// Served qualified names in configuration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Iterate served chains in configuration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Model>)> {
        self.models.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of served models
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if nothing is served
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
