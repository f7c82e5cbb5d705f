//! Scalar type declarations
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::fmt;

use serde_json::Value;

use super::TypeMeta;
use crate::error::{SchemaError, SchemaResult};

/// Primitive kind of a scalar declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Integer,
    Number,
    String,
    Boolean,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }

    /// Parse a `type` keyword. Returns `None` for non-scalar keywords.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
            Self::Number => value.is_f64(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terminal scalar declaration with its example literal
#[derive(Debug, Clone)]
pub struct Scalar {
    meta: TypeMeta,
    kind: ScalarKind,
    format: Option<String>,
    enum_values: Vec<Value>,
    value: Value,
}

impl Scalar {
    /// Build a scalar, enforcing the shape invariants at ingestion time:
    /// the example value may be null only on nullable declarations, and
    /// every enum member must share the scalar's primitive kind.
    pub fn new(
        meta: TypeMeta,
        kind: ScalarKind,
        format: Option<String>,
        enum_values: Vec<Value>,
        value: Value,
    ) -> SchemaResult<Self> {
        if value.is_null() {
            if !meta.nullable() {
                return Err(SchemaError::definition(
                    format!("{}/value", meta.path()),
                    format!("is not of type '{kind}'"),
                ));
            }
        } else if !kind.matches(&value) {
            return Err(SchemaError::definition(
                format!("{}/value", meta.path()),
                format!("is not of type '{kind}'"),
            ));
        }

        for (position, member) in enum_values.iter().enumerate() {
            if member.is_null() && meta.nullable() {
                continue;
            }

            if !kind.matches(member) {
                return Err(SchemaError::definition(
                    format!("{}/enum", meta.path()),
                    format!("invalid enum type at {position} position"),
                ));
            }
        }

        Ok(Self {
            meta,
            kind,
            format,
            enum_values,
            value,
        })
    }

    pub(crate) fn meta(&self) -> &TypeMeta {
        &self.meta
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Free-text format hint, e.g. a units or regex note
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn has_format(&self) -> bool {
        self.format.as_deref().is_some_and(|f| !f.is_empty())
    }

    /// Allowed literal values in declaration order. Empty when unrestricted
    pub fn enum_values(&self) -> &[Value] {
        &self.enum_values
    }

    pub fn has_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }

    /// The example literal; null only on nullable declarations
    pub fn value(&self) -> &Value {
        &self.value
    }
}
