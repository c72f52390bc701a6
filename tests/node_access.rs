//! Purpose: Behavioural coverage for lazy navigation and typed leaf reads.
//! Exports: Integration tests only.
//! Role: Exercise the public `Node` API against a document built by serde_json.
//! Invariants: Leaf values read back exactly as they were encoded.
//! Invariants: Error nodes stay terminal and classification memos are not disturbed.

use std::collections::BTreeMap;

use lazyjson::{ErrorKind, Node, Shape};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Sample {
    str: String,
    int: i64,
    uint: u64,
    float: f64,
    bool: bool,
    array: Vec<Value>,
    map: BTreeMap<String, Value>,
    obj: Option<Box<Sample>>,
    nil: Value,
}

fn sample_json() -> String {
    let shadow = Sample {
        str: "shadow".to_string(),
        ..Sample::default()
    };
    let mut map = BTreeMap::new();
    map.insert("key1".to_string(), json!(123));
    map.insert("key2".to_string(), json!("val2"));
    map.insert(
        "key3".to_string(),
        serde_json::to_value(&shadow).expect("shadow value"),
    );
    let sample = Sample {
        str: "hello".to_string(),
        int: i64::MAX,
        uint: u64::MAX,
        float: 9.125e30,
        bool: true,
        array: vec![json!(1), json!(true), json!("world"), Value::Null],
        map,
        obj: Some(Box::new(Sample {
            str: "simple".to_string(),
            ..Sample::default()
        })),
        nil: Value::Null,
    };
    serde_json::to_string(&sample).expect("encode sample")
}

fn sample() -> Node {
    let doc = Node::from_slice(sample_json().as_bytes());
    assert!(doc.err().is_none(), "decode failed: {:?}", doc.err());
    doc
}

#[test]
fn typed_reads_return_encoded_values() {
    let doc = sample();
    assert_eq!(doc.get("Str").value().expect("value"), json!("hello"));
    assert_eq!(doc.get("Str").string().expect("string"), "hello");
    assert!(doc.get("Bool").bool().expect("bool"));
    assert_eq!(doc.get("Int").int64().expect("int64"), i64::MAX);
    assert_eq!(doc.get("Uint").uint64().expect("uint64"), u64::MAX);
    assert_eq!(doc.get("Float").float64().expect("float"), 9.125e30);
}

#[test]
fn narrowing_reads_truncate_and_flag_overflow() {
    let doc = sample();
    let int = doc.get("Int");

    let err = int.int32().expect_err("int32 overflow");
    assert_eq!(err.kind(), ErrorKind::Overflow);
    assert_eq!(err.truncated(), Some(-1));
    assert_eq!(int.overflowing_int32().expect("int32"), (-1, true));

    let err = int.uint32().expect_err("uint32 overflow");
    assert_eq!(err.kind(), ErrorKind::Overflow);
    assert_eq!(err.truncated(), Some(i64::from(u32::MAX)));
    assert_eq!(int.overflowing_uint32().expect("uint32"), (u32::MAX, true));
}

#[test]
fn float_read_of_max_u64_is_nearest_double() {
    let doc = sample();
    assert_eq!(doc.get("Uint").float64().expect("float"), u64::MAX as f64);
}

#[test]
fn string_read_of_number_is_format_mismatch() {
    let doc = sample();
    let err = doc.get("Float").string().expect_err("not a string");
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.message().expect("message").contains("9.125e+30"));

    let literal = Node::from_slice(br#"{"f":9.125e30}"#);
    let err = literal.get("f").string().expect_err("literal exponent");
    assert_eq!(err.message(), Some("error parse string: 9.125e30"));
}

#[test]
fn arrays_read_whole_or_by_index() {
    let doc = sample();
    let items: Vec<Value> = doc.get("Array").read().expect("read").expect("present");
    assert_eq!(items.len(), 4);
    assert_eq!(items[2], json!("world"));
    assert_eq!(doc.get("Array").index(2).string().expect("index"), "world");
    assert_eq!(doc.get("Array").data().expect("data"), r#"[1,true,"world",null]"#);
}

#[test]
fn index_bounds_are_strict() {
    let array = sample().get("Array");
    assert!(array.index(3).is_null().expect("last is null"));
    assert_eq!(
        array.index(4).err().map(|err| err.kind()),
        Some(ErrorKind::NotFound)
    );
    assert_eq!(array.shape().expect("shape"), Shape::Array);
}

#[test]
fn objects_read_into_structs_and_maps() {
    let doc = sample();
    let elem: Sample = doc.get("Obj").read().expect("read").expect("present");
    assert_eq!(elem.str, "simple");
    let as_map: BTreeMap<String, Value> = doc.get("Obj").read().expect("read").expect("present");
    assert_eq!(as_map["Str"], json!("simple"));
}

#[test]
fn path_get_walks_nested_objects() {
    let doc = sample();
    assert_eq!(doc.get("Obj").get("Str").string().expect("nested"), "simple");

    let sub = doc.get("Map");
    assert!(sub.err().is_none());
    assert_eq!(sub.get("key2").string().expect("key2"), "val2");
    let shadow: Sample = sub.get("key3").read().expect("read").expect("present");
    assert_eq!(shadow.str, "shadow");
}

#[test]
fn null_is_tolerant_for_scalars_and_strict_for_navigation() {
    let doc = sample();
    let nil = doc.get("Nil");
    assert!(!nil.bool().expect("bool"));
    assert_eq!(nil.int64().expect("int64"), 0);
    assert_eq!(nil.float64().expect("float"), 0.0);
    assert_eq!(nil.string().expect("string"), "");
    assert_eq!(
        nil.get("2").err().map(|err| err.kind()),
        Some(ErrorKind::WrongShape)
    );
    assert_eq!(
        nil.index(0).err().map(|err| err.kind()),
        Some(ErrorKind::WrongShape)
    );
}

#[test]
fn wrong_shape_and_missing_keys_surface_through_leaf_reads() {
    let doc = sample();
    let err = doc.get("Array").get("Arr").string().expect_err("array as object");
    assert_eq!(err.kind(), ErrorKind::WrongShape);
    let err = doc.get("Ztr").get("Str").string().expect_err("missing key");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn failed_node_returns_the_same_error_every_time() {
    let missing = sample().get("Ztr");
    let first = missing.int64().expect_err("first");
    let second = missing.int64().expect_err("second");
    let via_data = missing.data().expect_err("data");
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.to_string(), via_data.to_string());
    assert_eq!(
        missing.get("a").err().map(|err| err.to_string()),
        Some(first.to_string())
    );
}

#[test]
fn get_as_object_builds_independent_sub_documents() {
    let doc = sample();
    let obj = doc.get_as_object("Obj");
    assert_eq!(obj.shape().expect("shape"), Shape::Object);
    drop(doc);
    assert_eq!(obj.get("Str").string().expect("str"), "simple");

    let nil = sample().get_as_object("Nil");
    assert!(nil.err().is_none());
    assert_eq!(
        nil.get("anything").err().map(|err| err.kind()),
        Some(ErrorKind::NotFound)
    );
}

#[test]
fn nested_round_trip_reproduces_every_leaf() {
    let source = json!({
        "outer": [
            {"id": 7, "name": "seven", "ok": true, "ratio": 0.25},
            {"id": -3, "name": "minus three", "ok": false, "ratio": -1.5e-7}
        ]
    });
    let doc = Node::from_slice(source.to_string().as_bytes());
    let outer = doc.get("outer");
    for (idx, expected) in source["outer"].as_array().expect("outer").iter().enumerate() {
        let item = outer.index(idx);
        assert_eq!(item.get("id").int64().expect("id"), expected["id"].as_i64().expect("i64"));
        assert_eq!(item.get("name").string().expect("name"), expected["name"]);
        assert_eq!(item.get("ok").bool().expect("ok"), expected["ok"]);
        assert_eq!(
            item.get("ratio").float64().expect("ratio"),
            expected["ratio"].as_f64().expect("f64")
        );
    }
}
