//! Eventdoc JSONC - a simple JSONC (JSON with comments) encoder
//!
//! Serializes example values formatted for humans: tab indentation, one
//! child per line, and optional trailing ` // comment` annotations. The
//! input is the closed [`Value`] union, so adding a value kind is a
//! compile-time exhaustiveness failure at the encoder, not a runtime
//! "unsupported type" surprise.
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

mod encoder;
mod value;

pub use encoder::Encoder;
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn encode(value: &Value) -> String {
        let mut out = Vec::new();
        Encoder::new(&mut out).encode(value).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn encodes_primitive_values() {
        let cases: Vec<(Value, &str)> = vec![
            (Value::Null, "null"),
            (Value::from(99962), "99962"),
            (Value::from(22.33), "22.33"),
            (Value::from(false), "false"),
            (Value::from("yes!"), r#""yes!""#),
        ];

        for (input, expected) in cases {
            assert_eq!(encode(&input), expected);
        }
    }

    #[test]
    fn encodes_maps_with_sorted_keys() {
        let mut inner = BTreeMap::new();
        inner.insert("subkey1".to_string(), Value::from(true));
        inner.insert("subkey2".to_string(), Value::from(33.22));

        let mut map = BTreeMap::new();
        map.insert("key2".to_string(), Value::from(10));
        map.insert("key1".to_string(), Value::from("a"));
        map.insert("key3".to_string(), Value::Map(inner));

        let expected = "{\n\t\"key1\": \"a\",\n\t\"key2\": 10,\n\t\"key3\": {\n\t\t\"subkey1\": true,\n\t\t\"subkey2\": 33.22\n\t}\n}";
        assert_eq!(encode(&Value::Map(map)), expected);
    }

    #[test]
    fn encodes_ordered_maps_in_declaration_order() {
        let ordered = Value::OrderedMap(vec![
            ("zulu".to_string(), Value::from(1)),
            ("alpha".to_string(), Value::from(2)),
        ]);

        assert_eq!(encode(&ordered), "{\n\t\"zulu\": 1,\n\t\"alpha\": 2\n}");
    }

    #[test]
    fn encodes_arrays() {
        let mut map = BTreeMap::new();
        map.insert(
            "array".to_string(),
            Value::Array(vec![Value::from(56), Value::from(85), Value::from(2)]),
        );

        let expected = "{\n\t\"array\": [\n\t\t56,\n\t\t85,\n\t\t2\n\t]\n}";
        assert_eq!(encode(&Value::Map(map)), expected);
    }

    #[test]
    fn appends_comment_after_the_value() {
        assert_eq!(
            encode(&Value::from(67).commented("This is a int")),
            "67 // This is a int"
        );
        assert_eq!(
            encode(&Value::from("yes!, comments").commented("This is a string")),
            r#""yes!, comments" // This is a string"#
        );
    }

    #[test]
    fn empty_comment_encodes_the_bare_value() {
        assert_eq!(encode(&Value::from(67).commented("")), "67");
    }

    #[test]
    fn comments_follow_values_at_every_nesting_level() {
        let mut inner = BTreeMap::new();
        inner.insert("hasComment".to_string(), Value::from(false));
        inner.insert(
            "triumph".to_string(),
            Value::from("I'm making a note here").commented("Huge Success"),
        );

        let mut map = BTreeMap::new();
        map.insert(
            "key1".to_string(),
            Value::from(867.123).commented("Comment in key1!"),
        );
        map.insert(
            "key2".to_string(),
            Value::Map(inner).commented("It's hard to overstate my satisfaction"),
        );
        map.insert("key3".to_string(), Value::from("Simple string"));
        map.insert(
            "key4".to_string(),
            Value::from(true).commented("We do what we must, because we can"),
        );

        let expected = "{\n\t\"key1\": 867.123, // Comment in key1!\n\t\"key2\": {\n\t\t\"hasComment\": false,\n\t\t\"triumph\": \"I'm making a note here\" // Huge Success\n\t}, // It's hard to overstate my satisfaction\n\t\"key3\": \"Simple string\",\n\t\"key4\": true // We do what we must, because we can\n}";
        assert_eq!(encode(&Value::Map(map)), expected);
    }

    #[test]
    fn converts_from_serde_json_values() {
        let json = serde_json::json!({
            "b": [1, 2],
            "a": "x",
        });

        let value = Value::from(json);
        assert_eq!(encode(&value), "{\n\t\"a\": \"x\",\n\t\"b\": [\n\t\t1,\n\t\t2\n\t]\n}");
    }
}
