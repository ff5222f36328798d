//! Base decorator
//!
//! [`Decorator<D>`] owns exactly one wrapped [`Model`] and implements
//! [`Model`] itself. Every surface member is routed through the
//! [`Decoration`] `D`, whose default methods forward to the wrapped model at
//! call time. A decoration overrides only what it changes; nothing is cached,
//! so overrides made further down the chain stay visible outward.
//!
//! ```text
//! client → Decorator<C> → Decorator<B> → Decorator<A> → base model
//!            (outermost)                                 (predicts)
//! ```

use crate::config::DecoratorConfig;
use crate::error::{DecoratorError, PredictResult};
use crate::surface::{check_surface, Model};
use mld_contract::{Contract, Record};
use std::fmt;
use std::sync::Arc;

/// View of a decorator's internals handed to every [`Decoration`] method
#[derive(Clone, Copy)]
pub struct Layer<'a> {
    wrapped: &'a dyn Model,
    config: &'a DecoratorConfig,
}

impl<'a> Layer<'a> {
    /// The wrapped component
    #[inline]
    #[must_use]
    pub fn wrapped(&self) -> &'a dyn Model {
        self.wrapped
    }

    /// The decorator's configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &'a DecoratorConfig {
        self.config
    }
}

impl fmt::Debug for Layer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("wrapped", &self.wrapped.qualified_name())
            .field("config", self.config)
            .finish()
    }
}

/// Cross-cutting behavior attached by a [`Decorator`]
///
/// Every method defaults to forwarding to the wrapped model. An override
/// that extends rather than replaces must call the wrapped member itself.
pub trait Decoration: Send + Sync + fmt::Debug + 'static {
    /// Build the decoration from its configuration
    ///
    /// # Errors
    /// `DecoratorError::InvalidConfiguration` if the configuration breaks an
    /// invariant of this decoration
    fn from_config(config: &DecoratorConfig) -> Result<Self, DecoratorError>
    where
        Self: Sized;

    /// Human-readable name
    fn display_name(&self, layer: Layer<'_>) -> String {
        layer.wrapped().display_name()
    }

    /// Stable identifier
    fn qualified_name(&self, layer: Layer<'_>) -> String {
        layer.wrapped().qualified_name()
    }

    /// Long description
    fn description(&self, layer: Layer<'_>) -> String {
        layer.wrapped().description()
    }

    /// Model version
    fn version(&self, layer: Layer<'_>) -> String {
        layer.wrapped().version()
    }

    /// Input contract
    fn input_contract(&self, layer: Layer<'_>) -> Arc<Contract> {
        layer.wrapped().input_contract()
    }

    /// Output contract
    fn output_contract(&self, layer: Layer<'_>) -> Arc<Contract> {
        layer.wrapped().output_contract()
    }

    /// Prediction
    ///
    /// # Errors
    /// Whatever the wrapped model returns, unchanged
    fn predict(&self, layer: Layer<'_>, input: &Record) -> PredictResult<Record> {
        layer.wrapped().predict(input)
    }
}

/// Decoration that changes nothing
///
/// `Decorator<Transparent>` is the plain base decorator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transparent;

impl Decoration for Transparent {
    fn from_config(_config: &DecoratorConfig) -> Result<Self, DecoratorError> {
        Ok(Self)
    }
}

/// Model wrapper owning exactly one wrapped component
#[derive(Debug)]
pub struct Decorator<D: Decoration = Transparent> {
    decoration: D,
    wrapped: Box<dyn Model>,
    config: DecoratorConfig,
}

impl<D: Decoration> Decorator<D> {
    /// Wrap with an empty configuration
    ///
    /// # Errors
    /// See [`Decorator::with_config`]
    pub fn new(wrapped: Box<dyn Model>) -> Result<Self, DecoratorError> {
        Self::with_config(wrapped, DecoratorConfig::new())
    }

    /// Wrap with a configuration
    ///
    /// # Errors
    /// - `DecoratorError::InvalidWrappedComponent` if `wrapped` fails the
    ///   surface conformance check
    /// - `DecoratorError::InvalidConfiguration` if the decoration rejects
    ///   `config`
    pub fn with_config(
        wrapped: Box<dyn Model>,
        config: DecoratorConfig,
    ) -> Result<Self, DecoratorError> {
        check_surface(wrapped.as_ref())?;
        let decoration = D::from_config(&config)?;
        Ok(Self {
            decoration,
            wrapped,
            config,
        })
    }

    /// Wrap with an already-built decoration
    ///
    /// # Errors
    /// `DecoratorError::InvalidWrappedComponent` if `wrapped` fails the
    /// surface conformance check
    pub fn with_decoration(
        decoration: D,
        wrapped: Box<dyn Model>,
        config: DecoratorConfig,
    ) -> Result<Self, DecoratorError> {
        check_surface(wrapped.as_ref())?;
        Ok(Self {
            decoration,
            wrapped,
            config,
        })
    }

    /// Start a deferred construction
    #[inline]
    #[must_use]
    pub fn builder() -> DecoratorBuilder<D> {
        DecoratorBuilder::new()
    }

    /// The decoration
    #[inline]
    #[must_use]
    pub fn decoration(&self) -> &D {
        &self.decoration
    }

    /// The wrapped component
    #[inline]
    #[must_use]
    pub fn wrapped(&self) -> &dyn Model {
        self.wrapped.as_ref()
    }

    /// The configuration this decorator was built with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DecoratorConfig {
        &self.config
    }

    /// Remove this layer, returning the wrapped component
    #[inline]
    #[must_use]
    pub fn into_wrapped(self) -> Box<dyn Model> {
        self.wrapped
    }

    #[inline]
    fn layer(&self) -> Layer<'_> {
        Layer {
            wrapped: self.wrapped.as_ref(),
            config: &self.config,
        }
    }
}

impl<D: Decoration> Model for Decorator<D> {
    fn display_name(&self) -> String {
        self.decoration.display_name(self.layer())
    }

    fn qualified_name(&self) -> String {
        self.decoration.qualified_name(self.layer())
    }

    fn description(&self) -> String {
        self.decoration.description(self.layer())
    }

    fn version(&self) -> String {
        self.decoration.version(self.layer())
    }

    fn input_contract(&self) -> Arc<Contract> {
        self.decoration.input_contract(self.layer())
    }

    fn output_contract(&self) -> Arc<Contract> {
        self.decoration.output_contract(self.layer())
    }

    fn predict(&self, input: &Record) -> PredictResult<Record> {
        self.decoration.predict(self.layer(), input)
    }
}

/// Two-phase construction of a [`Decorator`]
///
/// The builder does not implement [`Model`]; nothing can be called on a
/// decorator before its wrapped component is attached.
#[derive(Debug)]
pub struct DecoratorBuilder<D: Decoration = Transparent> {
    decoration: Option<D>,
    wrapped: Option<Box<dyn Model>>,
    config: DecoratorConfig,
}

impl<D: Decoration> Default for DecoratorBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Decoration> DecoratorBuilder<D> {
    /// Create unbound builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            decoration: None,
            wrapped: None,
            config: DecoratorConfig::new(),
        }
    }

    /// Set a configuration entry
    #[inline]
    #[must_use]
    pub fn config(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.config.insert(key, value);
        self
    }

    /// Replace the whole configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: DecoratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a prebuilt decoration instead of `D::from_config`
    #[inline]
    #[must_use]
    pub fn decoration(mut self, decoration: D) -> Self {
        self.decoration = Some(decoration);
        self
    }

    /// Attach the wrapped component
    #[inline]
    #[must_use]
    pub fn wrap(mut self, wrapped: Box<dyn Model>) -> Self {
        self.wrapped = Some(wrapped);
        self
    }

    /// Check if a wrapped component is attached
    #[inline]
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.wrapped.is_some()
    }

    /// Finish construction
    ///
    /// # Errors
    /// - `DecoratorError::UnboundDecorator` if no component was attached
    /// - anything [`Decorator::with_config`] returns
    pub fn build(self) -> Result<Decorator<D>, DecoratorError> {
        let wrapped = self.wrapped.ok_or(DecoratorError::UnboundDecorator)?;
        match self.decoration {
            Some(decoration) => Decorator::with_decoration(decoration, wrapped, self.config),
            None => Decorator::with_config(wrapped, self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use mld_contract::{FieldDescriptor, FieldType};
    use mockall::mock;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct Doubler {
        name: &'static str,
    }

    impl Model for Doubler {
        fn display_name(&self) -> String {
            "Doubler".into()
        }
        fn qualified_name(&self) -> String {
            self.name.into()
        }
        fn description(&self) -> String {
            "Doubles a".into()
        }
        fn version(&self) -> String {
            "1.0.0".into()
        }
        fn input_contract(&self) -> Arc<Contract> {
            Arc::new(Contract::new("In").field("a", FieldDescriptor::required(FieldType::Integer)))
        }
        fn output_contract(&self) -> Arc<Contract> {
            Arc::new(Contract::new("Out").field("b", FieldDescriptor::required(FieldType::Integer)))
        }
        fn predict(&self, input: &Record) -> PredictResult<Record> {
            let a = input
                .get_i64("a")
                .ok_or_else(|| ModelError::InvalidInput("a must be an integer".into()))?;
            Ok(Record::new().with("b", a * 2))
        }
    }

    fn doubler() -> Box<dyn Model> {
        Box::new(Doubler { name: "doubler" })
    }

    mock! {
        Inner {}
        impl Model for Inner {
            fn display_name(&self) -> String;
            fn qualified_name(&self) -> String;
            fn description(&self) -> String;
            fn version(&self) -> String;
            fn input_contract(&self) -> Arc<Contract>;
            fn output_contract(&self) -> Arc<Contract>;
            fn predict(&self, input: &Record) -> PredictResult<Record>;
        }
    }

    impl fmt::Debug for MockInner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("MockInner")
        }
    }

    fn mock_identity(mock: &mut MockInner) {
        mock.expect_display_name().returning(|| "Mock".into());
        mock.expect_qualified_name().returning(|| "mock".into());
        mock.expect_version().returning(|| "0.1.0".into());
        mock.expect_input_contract()
            .returning(|| Arc::new(Contract::new("In")));
        mock.expect_output_contract()
            .returning(|| Arc::new(Contract::new("Out")));
    }

    #[derive(Debug)]
    struct Shouting;

    impl Decoration for Shouting {
        fn from_config(_config: &DecoratorConfig) -> Result<Self, DecoratorError> {
            Ok(Self)
        }

        fn display_name(&self, layer: Layer<'_>) -> String {
            layer.wrapped().display_name().to_uppercase()
        }
    }

    #[test]
    fn transparent_forwards_everything() {
        let base = doubler();
        let decorated: Decorator = Decorator::new(doubler()).unwrap();

        assert_eq!(decorated.display_name(), base.display_name());
        assert_eq!(decorated.qualified_name(), base.qualified_name());
        assert_eq!(decorated.description(), base.description());
        assert_eq!(decorated.version(), base.version());
        assert_eq!(decorated.input_contract(), base.input_contract());
        assert_eq!(decorated.output_contract(), base.output_contract());

        let input = Record::new().with("a", 5);
        assert_eq!(decorated.predict(&input), base.predict(&input));
    }

    #[test]
    fn transparent_calls_wrapped_predict_once() {
        let mut inner = MockInner::new();
        mock_identity(&mut inner);
        inner
            .expect_predict()
            .withf(|input: &Record| input.get_i64("a") == Some(5))
            .times(1)
            .returning(|_| Ok(Record::new().with("b", 10)));

        let decorated: Decorator = Decorator::new(Box::new(inner)).unwrap();
        let out = decorated.predict(&Record::new().with("a", 5)).unwrap();
        assert_eq!(out, Record::new().with("b", 10));
    }

    #[test]
    fn wrapped_failure_propagates_unchanged() {
        let mut inner = MockInner::new();
        mock_identity(&mut inner);
        inner
            .expect_predict()
            .returning(|_| Err(ModelError::prediction("mock", "boom")));

        let decorated: Decorator = Decorator::new(Box::new(inner)).unwrap();
        let err = decorated.predict(&Record::new()).unwrap_err();
        assert_eq!(err, ModelError::prediction("mock", "boom"));
    }

    #[test]
    fn override_only_touches_its_member() {
        let decorated = Decorator::<Shouting>::new(doubler()).unwrap();
        assert_eq!(decorated.display_name(), "DOUBLER");
        assert_eq!(decorated.qualified_name(), "doubler");
        assert_eq!(
            decorated.predict(&Record::new().with("a", 2)).unwrap(),
            Record::new().with("b", 4)
        );
    }

    #[test]
    fn inner_overrides_visible_through_outer_layers() {
        let inner = Decorator::<Shouting>::new(doubler()).unwrap();
        let outer: Decorator = Decorator::new(Box::new(inner)).unwrap();
        assert_eq!(outer.display_name(), "DOUBLER");
    }

    #[test]
    fn rejects_invalid_wrapped_surface() {
        let err = Decorator::<Transparent>::new(Box::new(Doubler { name: "" })).unwrap_err();
        assert!(matches!(err, DecoratorError::InvalidWrappedComponent { .. }));

        let err =
            Decorator::<Transparent>::new(Box::new(Doubler { name: "has space" })).unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn debug_shows_wrapped_mock() {
        let mut inner = MockInner::new();
        mock_identity(&mut inner);
        let decorated = Decorator::<Transparent>::new(Box::new(inner)).unwrap();
        assert!(format!("{decorated:?}").contains("MockInner"));
    }

    #[test]
    fn builder_requires_binding() {
        let builder = Decorator::<Transparent>::builder().config("label", "x");
        assert!(!builder.is_bound());
        assert_eq!(builder.build().unwrap_err(), DecoratorError::UnboundDecorator);
    }

    #[test]
    fn builder_binds_later() {
        let decorator = DecoratorBuilder::<Shouting>::new()
            .config("label", "x")
            .wrap(doubler())
            .build()
            .unwrap();
        assert_eq!(decorator.config().get_str("label"), Some("x"));
        assert_eq!(decorator.display_name(), "DOUBLER");
    }

    #[test]
    fn into_wrapped_unwraps_one_layer() {
        let inner = Decorator::<Shouting>::new(doubler()).unwrap();
        let outer: Decorator = Decorator::new(Box::new(inner)).unwrap();
        let unwrapped = outer.into_wrapped();
        assert_eq!(unwrapped.display_name(), "DOUBLER");
    }

    #[test]
    fn shared_chain_is_usable_across_threads() {
        let chain: Arc<dyn Model> = Arc::new(Decorator::<Transparent>::new(doubler()).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let chain = Arc::clone(&chain);
                std::thread::spawn(move || chain.predict(&Record::new().with("a", i)).unwrap())
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let out = handle.join().unwrap();
            assert_eq!(out.get_i64("b"), Some(2 * i as i64));
        }
    }
}
