use num_bigint::BigInt;
use pulljson::{
    from_json, to_json, to_json_pretty, BigNumber, JsonValue, Result, Token, Tokenizer,
};

fn tokens_of(input: &str) -> Vec<Token> {
    Tokenizer::from_str(input)
        .collect::<Result<Vec<_>>>()
        .unwrap()
}

#[test]
fn number_classification_boundaries() {
    assert_eq!(tokens_of("2147483647"), vec![Token::I32(2_147_483_647)]);
    assert_eq!(tokens_of("2147483648"), vec![Token::I64(2_147_483_648)]);
    let two_to_63: BigInt = "9223372036854775808".parse().unwrap();
    assert_eq!(
        tokens_of("9223372036854775808"),
        vec![Token::Big(BigNumber::Int(two_to_63))]
    );
}

#[test]
fn field_name_disambiguation() {
    assert_eq!(
        tokens_of("{\"a\":\"b\"}"),
        vec![
            Token::ObjectStart,
            Token::FieldName("a".to_string()),
            Token::Str("b".to_string()),
            Token::ObjectEnd,
        ]
    );
    assert_eq!(
        tokens_of("[\"a\",\"b\"]"),
        vec![
            Token::ArrayStart,
            Token::Str("a".to_string()),
            Token::Separator,
            Token::Str("b".to_string()),
            Token::ArrayEnd,
        ]
    );
}

#[test]
fn escaping_and_decode_asymmetry() {
    // encode: slash, newline, and quote take their escapes
    let text = to_json(&"/ \n \"".to_string()).unwrap();
    assert_eq!(text, r#""\/ \n \"""#);

    // decode: identity-preserving escapes reproduce the original
    let back: String = from_json(r#""\/ and \"""#).unwrap();
    assert_eq!(back, "/ and \"");
    let back: String = from_json(r#""\\""#).unwrap();
    assert_eq!(back, "\\");
    // a bare slash decodes without its escape
    let back: String = from_json("\"a/b\"").unwrap();
    assert_eq!(back, "a/b");

    // the passthrough asymmetry: \n decodes to the letter n
    let back: String = from_json(r#""a\nb""#).unwrap();
    assert_eq!(back, "anb");
}

#[test]
fn tokenization_is_deterministic() {
    let inputs = [
        "{\"a\": [1, 2.5, true, null], \"b\": {\"c\": \"text\"}}",
        "[\"x\", -3, 9223372036854775808, 1e999]",
        "  {  }  ",
    ];
    for input in inputs {
        assert_eq!(tokens_of(input), tokens_of(input), "input: {}", input);
    }
}

#[test]
fn whitespace_variants_tokenize_identically() {
    let compact = "{\"a\":[1,2]}";
    let spread = "{ \"a\" : [ 1 , 2 ] }";
    let multiline = "{\n  \"a\": [\n    1,\n    2\n  ]\n}";
    assert_eq!(tokens_of(compact), tokens_of(spread));
    assert_eq!(tokens_of(compact), tokens_of(multiline));
}

#[test]
fn pretty_printing_is_idempotent() {
    let source = "{\"a\":1,\"list\":[true,null,{\"inner\":[1.5,\"s\"]}],\"empty\":{}}";
    let value: JsonValue = from_json(source).unwrap();
    let pretty_once = to_json_pretty(&value).unwrap();

    let reparsed: JsonValue = from_json(&pretty_once).unwrap();
    let pretty_twice = to_json_pretty(&reparsed).unwrap();

    assert_eq!(tokens_of(&pretty_once), tokens_of(&pretty_twice));
    assert_eq!(tokens_of(source), tokens_of(&pretty_once));
}

#[test]
fn compact_and_pretty_tokens_agree() {
    let value: JsonValue = from_json("[{\"k\": [1, 2]}, \"v\"]").unwrap();
    let compact = to_json(&value).unwrap();
    let pretty = to_json_pretty(&value).unwrap();
    assert_eq!(tokens_of(&compact), tokens_of(&pretty));
}

#[test]
fn decimal_overflow_keeps_the_lexeme() {
    assert_eq!(
        tokens_of("-2.5E4096"),
        vec![Token::Big(BigNumber::Decimal("-2.5E4096".to_string()))]
    );
    // a parseable exponent stays an f64
    assert_eq!(tokens_of("2.5e2"), vec![Token::F64(250.0)]);
}
