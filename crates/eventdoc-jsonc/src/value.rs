//! Example values accepted by the encoder
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::collections::BTreeMap;

use serde_json::Number;

/// A value the encoder knows how to serialize.
///
/// Two association flavors exist on purpose: [`Value::Map`] is a plain
/// unordered association rendered with sorted keys, while
/// [`Value::OrderedMap`] keeps the caller's declaration order. Callers pick
/// one depending on whether order carries meaning.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    /// Unordered association, encoded with keys sorted ascending
    Map(BTreeMap<String, Value>),
    /// Ordered association, encoded in declaration order
    OrderedMap(Vec<(String, Value)>),
    /// Any value decorated with a trailing ` // comment` annotation
    Commented {
        comment: String,
        value: Box<Value>,
    },
}

impl Value {
    /// Wrap this value with a trailing comment annotation. An empty
    /// comment renders nothing.
    pub fn commented(self, comment: impl Into<String>) -> Self {
        Self::Commented {
            comment: comment.into(),
            value: Box::new(self),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(members) => {
                Self::Array(members.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}
