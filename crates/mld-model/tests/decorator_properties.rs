//! Property tests for decorator stacking
//!
//! Transparency of the base decorator, identity stability and contract
//! superset across arbitrary stacks of built-in decorations.

use mld_model::prelude::*;
use mld_model::{LifecycleLogging, PredictionId, Transparent};
use mld_test_utils::{doubling_input, doubling_model, DoublingModel};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Transparent,
    Logging,
    PredictionId,
}

fn kind() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Transparent),
        Just(Kind::Logging),
        Just(Kind::PredictionId),
    ]
}

fn stack(kinds: &[Kind]) -> Box<dyn Model> {
    kinds
        .iter()
        .fold(doubling_model(), |current, kind| -> Box<dyn Model> {
            match kind {
                Kind::Transparent => Box::new(Decorator::<Transparent>::new(current).unwrap()),
                Kind::Logging => Box::new(Decorator::<LifecycleLogging>::new(current).unwrap()),
                Kind::PredictionId => Box::new(Decorator::<PredictionId>::new(current).unwrap()),
            }
        })
}

proptest! {
    #[test]
    fn transparent_decorator_is_invisible(a in -1_000_000i64..1_000_000) {
        let base = DoublingModel;
        let decorated: Decorator = Decorator::new(doubling_model()).unwrap();
        let input = doubling_input(a);

        prop_assert_eq!(decorated.predict(&input), base.predict(&input));
        prop_assert_eq!(decorated.display_name(), base.display_name());
        prop_assert_eq!(decorated.qualified_name(), base.qualified_name());
        prop_assert_eq!(decorated.description(), base.description());
        prop_assert_eq!(decorated.version(), base.version());
        prop_assert_eq!(decorated.input_contract(), base.input_contract());
        prop_assert_eq!(decorated.output_contract(), base.output_contract());
    }

    #[test]
    fn stacks_keep_identity_and_widen_contracts(kinds in prop::collection::vec(kind(), 0..6)) {
        let base = DoublingModel;
        let chain = stack(&kinds);

        prop_assert_eq!(chain.qualified_name(), base.qualified_name());
        prop_assert_eq!(chain.version(), base.version());

        for (contract, base_contract) in [
            (chain.input_contract(), base.input_contract()),
            (chain.output_contract(), base.output_contract()),
        ] {
            prop_assert_eq!(contract.name(), base_contract.name());
            for (name, descriptor) in base_contract.fields() {
                prop_assert_eq!(contract.get(name), Some(descriptor));
            }
        }

        let tagged = kinds.iter().any(|k| matches!(k, Kind::PredictionId));
        prop_assert_eq!(chain.output_contract().contains("identifier"), tagged);
    }

    #[test]
    fn stacks_preserve_prediction(kinds in prop::collection::vec(kind(), 0..6), a in -1000i64..1000) {
        let out = stack(&kinds).predict(&doubling_input(a)).unwrap();
        prop_assert_eq!(out.get_i64("b"), Some(a * 2));
    }
}
