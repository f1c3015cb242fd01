//! Property-based tests for the core engine guarantees: encode/decode
//! round-trips, tokenization determinism, and integer narrowing.

use proptest::prelude::*;
use pulljson::{from_json, to_json, to_json_pretty, JsonValue, Number, Token, Tokenizer};

fn tokens_of(input: &str) -> Vec<Token> {
    Tokenizer::from_str(input)
        .collect::<pulljson::Result<Vec<_>>>()
        .unwrap()
}

/// Strings whose characters survive escape passthrough unchanged: control
/// characters take non-identity escapes on encode, everything else (quotes,
/// backslashes, and slashes included) round-trips.
fn safe_string() -> impl Strategy<Value = String> {
    any::<String>().prop_map(|s| s.chars().filter(|c| (*c as u32) >= 0x20).collect())
}

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |f| f.is_finite())
}

fn json_value() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        any::<i64>().prop_map(|n| JsonValue::Number(Number::Int(n))),
        finite_f64().prop_map(|f| JsonValue::Number(Number::Float(f))),
        safe_string().prop_map(JsonValue::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(JsonValue::Array),
            prop::collection::vec((safe_string(), inner), 0..6)
                .prop_map(|members| JsonValue::Object(members.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_value_roundtrip(value in json_value()) {
        let text = to_json(&value).unwrap();
        let back: JsonValue = from_json(&text).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn prop_pretty_roundtrip(value in json_value()) {
        let pretty = to_json_pretty(&value).unwrap();
        let back: JsonValue = from_json(&pretty).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn prop_tokenization_deterministic(value in json_value()) {
        let text = to_json(&value).unwrap();
        prop_assert_eq!(tokens_of(&text), tokens_of(&text));
    }

    #[test]
    fn prop_i32_roundtrip(n in any::<i32>()) {
        prop_assert_eq!(from_json::<i32>(&to_json(&n).unwrap()).unwrap(), n);
    }

    #[test]
    fn prop_i64_roundtrip(n in any::<i64>()) {
        prop_assert_eq!(from_json::<i64>(&to_json(&n).unwrap()).unwrap(), n);
    }

    #[test]
    fn prop_bool_roundtrip(b in any::<bool>()) {
        prop_assert_eq!(from_json::<bool>(&to_json(&b).unwrap()).unwrap(), b);
    }

    #[test]
    fn prop_f64_roundtrip(f in finite_f64()) {
        prop_assert_eq!(from_json::<f64>(&to_json(&f).unwrap()).unwrap(), f);
    }

    #[test]
    fn prop_string_roundtrip(s in safe_string()) {
        prop_assert_eq!(from_json::<String>(&to_json(&s).unwrap()).unwrap(), s);
    }

    #[test]
    fn prop_integer_narrowing(n in any::<i64>()) {
        let tokens = tokens_of(&n.to_string());
        let expected = match i32::try_from(n) {
            Ok(narrow) => Token::I32(narrow),
            Err(_) => Token::I64(n),
        };
        prop_assert_eq!(tokens, vec![expected]);
    }
}
