use pulljson::config::{Customizations, IGNORE_UNKNOWN_FIELDS};
use pulljson::registry::{Deserializer, Serializer, TypeInfo};
use pulljson::sink::JsonSink;
use pulljson::{
    default_codecs, from_json, from_json_reader, to_json, to_json_pretty, Error, JsonEngine,
    JsonMap, JsonValue, Result, TokenStream,
};
use std::any::Any;
use std::io::Cursor;

#[derive(Debug, PartialEq, Clone)]
struct Point {
    x: i64,
    y: i64,
}

struct PointCodec {
    ignore_unknown: bool,
}

impl PointCodec {
    fn new(customizations: &Customizations) -> Self {
        PointCodec {
            ignore_unknown: customizations.is_true(&IGNORE_UNKNOWN_FIELDS),
        }
    }
}

impl Serializer for PointCodec {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        let point = value
            .downcast_ref::<Point>()
            .ok_or_else(|| Error::type_mismatch("Point", "a different runtime type"))?;
        sink.start_object()?;
        sink.start_field("x")?;
        sink.i64_value(point.x)?;
        sink.separator()?;
        sink.start_field("y")?;
        sink.i64_value(point.y)?;
        sink.end_object()
    }
}

impl Deserializer for PointCodec {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        stream.begin_object()?;
        let mut x = 0;
        let mut y = 0;
        while stream.has_more()? {
            stream.advance()?;
            match stream.field_name()?.to_string().as_str() {
                "x" => {
                    stream.advance()?;
                    x = stream.i64_value()?;
                }
                "y" => {
                    stream.advance()?;
                    y = stream.i64_value()?;
                }
                other => {
                    if self.ignore_unknown {
                        stream.skip_value()?;
                    } else {
                        return Err(Error::custom(format!("unknown field {}", other)));
                    }
                }
            }
        }
        Ok(Box::new(Point { x, y }))
    }
}

fn point_engine(customizations: Customizations) -> JsonEngine {
    let registry = default_codecs()
        .serializer_for::<Point>("Point", |_, c| Box::new(PointCodec::new(c)))
        .deserializer_for::<Point>("Point", |_, c| Box::new(PointCodec::new(c)))
        .customizations(customizations)
        .build();
    JsonEngine::with_registry(registry)
}

#[test]
fn primitive_round_trips() {
    assert_eq!(from_json::<bool>(&to_json(&true).unwrap()).unwrap(), true);
    assert_eq!(from_json::<i8>(&to_json(&-7i8).unwrap()).unwrap(), -7);
    assert_eq!(
        from_json::<i64>(&to_json(&i64::MIN).unwrap()).unwrap(),
        i64::MIN
    );
    assert_eq!(from_json::<u32>(&to_json(&7u32).unwrap()).unwrap(), 7);
    assert_eq!(
        from_json::<f64>(&to_json(&-12.25f64).unwrap()).unwrap(),
        -12.25
    );
    assert_eq!(
        from_json::<String>(&to_json(&"hello world".to_string()).unwrap()).unwrap(),
        "hello world"
    );
}

#[test]
fn whole_floats_stay_floats() {
    let text = to_json(&2.0f64).unwrap();
    assert_eq!(text, "2.0");
    let value: JsonValue = from_json(&text).unwrap();
    assert_eq!(value.as_f64(), Some(2.0));
    assert_eq!(value.as_i64(), None);
}

#[test]
fn custom_codec_round_trip() {
    let engine = point_engine(Customizations::empty());
    let point = Point { x: 3, y: -4 };
    let text = engine.to_json(&point).unwrap();
    assert_eq!(text, "{\"x\":3,\"y\":-4}");
    let back: Point = engine.from_json(&text).unwrap();
    assert_eq!(back, point);
}

#[test]
fn unknown_fields_fail_unless_configured() {
    let input = "{\"x\":1,\"extra\":{\"deep\":[1,2]},\"y\":2}";

    let strict = point_engine(Customizations::empty());
    assert!(strict.from_json::<Point>(input).is_err());

    let tolerant = point_engine(
        Customizations::builder()
            .set(&IGNORE_UNKNOWN_FIELDS, true)
            .build(),
    );
    let point: Point = tolerant.from_json(input).unwrap();
    assert_eq!(point, Point { x: 1, y: 2 });
}

#[test]
fn nested_lists_scenario() {
    let mut object = JsonMap::new();
    object.insert(
        "names".to_string(),
        JsonValue::Array(vec![
            JsonValue::Array(vec![JsonValue::from("a1.1"), JsonValue::from("a1.2")]),
            JsonValue::Array(vec![JsonValue::from("a2.1"), JsonValue::from("a2.2")]),
        ]),
    );
    let text = to_json(&JsonValue::Object(object)).unwrap();
    assert_eq!(
        text,
        "{\"names\":[[\"a1.1\",\"a1.2\"],[\"a2.1\",\"a2.2\"]]}"
    );

    // drive the cursor through both nesting levels by hand
    let mut stream = TokenStream::from_str(&text);
    stream.begin_object().unwrap();
    assert!(stream.has_more().unwrap());
    stream.advance().unwrap();
    assert_eq!(stream.field_name().unwrap(), "names");

    let mut outer = Vec::new();
    stream.begin_array().unwrap();
    while stream.has_more().unwrap() {
        stream.begin_array().unwrap();
        let mut inner = Vec::new();
        while stream.has_more().unwrap() {
            stream.advance().unwrap();
            inner.push(stream.str_value().unwrap().to_string());
        }
        outer.push(inner);
    }
    assert!(!stream.has_more().unwrap());

    assert_eq!(
        outer,
        vec![
            vec!["a1.1".to_string(), "a1.2".to_string()],
            vec!["a2.1".to_string(), "a2.2".to_string()],
        ]
    );
}

#[test]
fn decode_from_reader() {
    let bytes = "{\"a\": [true, null]}".as_bytes().to_vec();
    let value: JsonValue = from_json_reader(Cursor::new(bytes)).unwrap();
    let a = value.as_object().and_then(|o| o.get("a")).unwrap();
    assert_eq!(
        a,
        &JsonValue::Array(vec![JsonValue::Bool(true), JsonValue::Null])
    );
}

#[test]
fn pretty_output_decodes_to_the_same_value() {
    let value: JsonValue =
        from_json("{\"a\":1,\"b\":[true,{\"c\":\"s\"}],\"d\":null}").unwrap();
    let pretty = to_json_pretty(&value).unwrap();
    assert!(pretty.contains('\n'));
    let back: JsonValue = from_json(&pretty).unwrap();
    assert_eq!(back, value);
}

#[test]
fn explicit_type_encoding() {
    let engine = JsonEngine::new();
    let boxed: Box<dyn Any> = Box::new("dyn".to_string());
    let text = engine
        .to_json_as(boxed.as_ref(), &TypeInfo::of::<String>())
        .unwrap();
    assert_eq!(text, "\"dyn\"");
}

#[test]
fn exact_registration_beats_predicate() {
    struct Tagged(&'static str);
    impl Serializer for Tagged {
        fn encode(&self, _value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
            sink.string_value(Some(self.0))
        }
    }

    let registry = default_codecs()
        .serializer_matching(
            "CatchAll",
            |ty| ty.name().contains("Point"),
            |_, _| Box::new(Tagged("predicate")),
        )
        .serializer_for::<Point>("Point", |_, _| Box::new(Tagged("exact")))
        .build();
    let engine = JsonEngine::with_registry(registry);
    assert_eq!(
        engine.to_json(&Point { x: 0, y: 0 }).unwrap(),
        "\"exact\""
    );
}

#[test]
fn missing_codec_names_the_type() {
    struct Unregistered;
    let engine = JsonEngine::new();
    match engine.to_json(&Unregistered).unwrap_err() {
        Error::CodecNotFound { kind, type_name } => {
            assert_eq!(kind, "serializer");
            assert!(type_name.contains("Unregistered"));
        }
        other => panic!("expected CodecNotFound, got {:?}", other),
    }
}

#[test]
fn malformed_input_fails_the_whole_call() {
    assert!(from_json::<JsonValue>("{\"a\": tru}").is_err());
    assert!(from_json::<JsonValue>("{\"a\"").is_err());
    assert!(from_json::<bool>("\"not a bool\"").is_err());
}

#[test]
fn strict_and_lenient_string_modes() {
    let lenient = JsonEngine::new();
    let value: JsonValue = lenient.from_json("{'a': 'b'}").unwrap();
    assert_eq!(
        value.as_object().and_then(|o| o.get("a")).and_then(|v| v.as_str()),
        Some("b")
    );

    let strict = JsonEngine::new().with_strict_strings();
    assert!(strict.from_json::<JsonValue>("{'a': 'b'}").is_err());
    // double quotes still work in strict mode
    let value: JsonValue = strict.from_json("{\"a\": \"b\"}").unwrap();
    assert!(value.is_object());
}

#[test]
fn big_numbers_survive_round_trips() {
    let value: JsonValue = from_json("9223372036854775808").unwrap();
    let text = to_json(&value).unwrap();
    assert_eq!(text, "9223372036854775808");

    let value: JsonValue = from_json("1.5e999").unwrap();
    assert_eq!(to_json(&value).unwrap(), "1.5e999");
}
