use proptest::prelude::*;
use serde_json::{Value, json};
use vegalite_bridge::BridgeError;
use vegalite_bridge::api::validate_spec;

fn discrete_kind() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("single"), Just("multi")]
}

fn channel_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 1..4)
}

fn extra_keys() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(("[A-Za-z]{1,8}", any::<i64>()), 0..5)
}

fn with_extras(mut spec: Value, extras: &[(String, i64)]) -> Value {
    if let Value::Object(map) = &mut spec {
        for (key, value) in extras {
            if key != "selection" {
                map.insert(key.clone(), json!(value));
            }
        }
    }
    spec
}

proptest! {
    #[test]
    fn specs_without_selection_always_fail(extras in extra_keys()) {
        let spec = with_extras(json!({"mark": "point"}), &extras);
        prop_assert!(matches!(validate_spec(&spec), Err(BridgeError::MissingSelection)));
    }

    #[test]
    fn discrete_selections_without_projection_fail(
        kind in discrete_kind(),
        name in "[a-z]{1,10}",
        extras in extra_keys()
    ) {
        let spec = with_extras(json!({"selection": {name.clone(): {"type": kind}}}), &extras);
        match validate_spec(&spec) {
            Err(BridgeError::UnprojectedSelection { name: reported, .. }) => {
                prop_assert_eq!(reported, name);
            }
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    #[test]
    fn adding_a_projection_makes_discrete_selections_pass(
        kind in discrete_kind(),
        channels in channel_list(),
        use_fields in any::<bool>(),
        nested in any::<bool>()
    ) {
        let key = if use_fields { "fields" } else { "encodings" };
        let entry = if nested {
            json!({"type": kind, "projection": {key: channels}})
        } else {
            json!({"type": kind, key: channels})
        };
        let spec = json!({"selection": {"s": entry}});
        prop_assert!(validate_spec(&spec).is_ok());
    }

    #[test]
    fn interval_selections_never_fail_projection_check(
        channels in prop::option::of(prop::collection::vec("[a-z]{1,6}", 0..3))
    ) {
        let entry = match channels {
            Some(channels) => json!({"type": "interval", "encodings": channels}),
            None => json!({"type": "interval"}),
        };
        let spec = json!({"selection": {"brush": entry}});
        prop_assert!(validate_spec(&spec).is_ok());
    }
}
