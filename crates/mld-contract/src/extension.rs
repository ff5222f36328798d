//! Contract derivation
//!
//! Decorators that widen a contract never touch the wrapped component's
//! value; they derive a fresh one from it every time the contract is read.
//!
//! # Rules
//! - Every base field is kept unchanged, in its original position.
//! - Additions are appended in the order given.
//! - An addition named like a base field replaces that field in place
//!   (override policy), unless the caller opted into
//!   [`OverridePolicy::Reject`].
//! - The derived contract keeps the base name unless explicitly renamed.

use crate::contract::Contract;
use crate::error::{ContractError, ContractResult};
use crate::field::FieldDescriptor;

/// What to do when an addition collides with an inherited field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverridePolicy {
    /// Replace the inherited descriptor (default)
    #[default]
    Override,

    /// Fail with `ContractError::SchemaConflict`
    Reject,
}

/// Builder deriving a new contract from a base one
#[derive(Debug, Clone)]
pub struct ContractExtension<'a> {
    base: &'a Contract,
    additions: Vec<(String, FieldDescriptor)>,
    rename: Option<String>,
    policy: OverridePolicy,
}

impl<'a> ContractExtension<'a> {
    /// Start a derivation from `base`
    #[inline]
    #[must_use]
    pub fn new(base: &'a Contract) -> Self {
        Self {
            base,
            additions: Vec::new(),
            rename: None,
            policy: OverridePolicy::Override,
        }
    }

    /// Add (or override) a field
    #[inline]
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.additions.push((name.into(), descriptor));
        self
    }

    /// Give the derived contract a different name
    #[inline]
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Fail instead of silently overriding inherited fields
    #[inline]
    #[must_use]
    pub fn reject_overrides(mut self) -> Self {
        self.policy = OverridePolicy::Reject;
        self
    }

    /// Set override policy explicitly
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: OverridePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Produce the derived contract
    ///
    /// # Errors
    /// `ContractError::SchemaConflict` if an addition collides with a base
    /// field under [`OverridePolicy::Reject`]
    pub fn derive(self) -> ContractResult<Contract> {
        let mut fields = self.base.field_map().clone();

        for (name, descriptor) in self.additions {
            if self.policy == OverridePolicy::Reject && self.base.contains(&name) {
                return Err(ContractError::schema_conflict(self.base.name(), name));
            }
            fields.insert(name, descriptor);
        }

        let name = self
            .rename
            .unwrap_or_else(|| self.base.name().to_string());

        tracing::trace!(
            base = self.base.name(),
            derived = %name,
            base_fields = self.base.len(),
            derived_fields = fields.len(),
            "derived contract"
        );

        Ok(Contract::from_parts(
            name,
            self.base.description().map(str::to_string),
            fields,
        ))
    }
}

impl Contract {
    /// Derive a contract with extra or overriding fields
    ///
    /// Never fails: collisions resolve in favor of `additions`.
    #[must_use]
    pub fn extend<I, K>(&self, additions: I) -> Contract
    where
        I: IntoIterator<Item = (K, FieldDescriptor)>,
        K: Into<String>,
    {
        let mut fields = self.field_map().clone();
        for (name, descriptor) in additions {
            fields.insert(name.into(), descriptor);
        }
        tracing::trace!(base = self.name(), derived_fields = fields.len(), "extended contract");
        Contract::from_parts(
            self.name().to_string(),
            self.description().map(str::to_string),
            fields,
        )
    }

    /// Start a configurable derivation
    #[inline]
    #[must_use]
    pub fn extension(&self) -> ContractExtension<'_> {
        ContractExtension::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn input() -> Contract {
        Contract::new("ModelInput")
            .field(
                "a",
                FieldDescriptor::required(FieldType::Integer).with_constraint("minimum", 0),
            )
            .field("b", FieldDescriptor::optional(FieldType::String))
    }

    #[test]
    fn extend_appends_new_fields() {
        let base = input();
        let derived = base.extend([("identifier", FieldDescriptor::optional(FieldType::String))]);

        assert_eq!(
            derived.field_names().collect::<Vec<_>>(),
            vec!["a", "b", "identifier"]
        );
        assert_eq!(derived.name(), "ModelInput");
        assert_eq!(derived.get("a"), base.get("a"));
    }

    #[test]
    fn extend_overrides_in_place() {
        let base = input();
        let derived = base.extend([("a", FieldDescriptor::optional(FieldType::Number))]);

        assert_eq!(derived.field_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(derived.get("a").unwrap().ty, FieldType::Number);
        // base untouched
        assert_eq!(base.get("a").unwrap().ty, FieldType::Integer);
        assert!(base.get("a").unwrap().required);
    }

    #[test]
    fn derive_with_rename() {
        let derived = input()
            .extension()
            .field("c", FieldDescriptor::required(FieldType::Boolean))
            .renamed("TaggedInput")
            .derive()
            .unwrap();
        assert_eq!(derived.name(), "TaggedInput");
        assert!(derived.contains("c"));
    }

    #[test]
    fn derive_rejecting_overrides() {
        let err = input()
            .extension()
            .field("a", FieldDescriptor::required(FieldType::String))
            .reject_overrides()
            .derive()
            .unwrap_err();
        assert_eq!(err, ContractError::schema_conflict("ModelInput", "a"));
    }

    #[test]
    fn derive_is_repeatable() {
        let base = input();
        let field = || ("identifier", FieldDescriptor::optional(FieldType::String));
        assert_eq!(base.extend([field()]), base.extend([field()]));
    }

    #[test]
    fn stacked_extensions_compose() {
        let once = input().extend([("x", FieldDescriptor::optional(FieldType::String))]);
        let twice = once.extend([("y", FieldDescriptor::required(FieldType::String))]);
        assert_eq!(
            twice.field_names().collect::<Vec<_>>(),
            vec!["a", "b", "x", "y"]
        );
    }

    fn field_type() -> impl Strategy<Value = FieldType> {
        prop_oneof![
            Just(FieldType::String),
            Just(FieldType::Integer),
            Just(FieldType::Number),
            Just(FieldType::Boolean),
        ]
    }

    fn descriptor() -> impl Strategy<Value = FieldDescriptor> {
        (field_type(), any::<bool>()).prop_map(|(ty, required)| {
            if required {
                FieldDescriptor::required(ty)
            } else {
                FieldDescriptor::optional(ty)
            }
        })
    }

    proptest! {
        #[test]
        fn derived_fields_are_superset(
            base in prop::collection::vec(("[a-e]", descriptor()), 0..6),
            additions in prop::collection::vec(("[c-h]", descriptor()), 0..6),
        ) {
            let base = base
                .into_iter()
                .fold(Contract::new("Base"), |c, (name, d)| c.field(name, d));
            let added: Vec<String> = additions.iter().map(|(n, _)| n.clone()).collect();
            let derived = base.extend(additions);

            for (name, descriptor) in base.fields() {
                prop_assert!(derived.contains(name));
                if !added.iter().any(|a| a == name) {
                    prop_assert_eq!(derived.get(name), Some(descriptor));
                }
            }
            for name in &added {
                prop_assert!(derived.contains(name));
            }
            prop_assert_eq!(derived.name(), base.name());
        }
    }
}
