//! Object type declarations
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::collections::HashSet;
use std::sync::Arc;

use super::{TypeDescriber, TypeMeta};
use crate::error::{SchemaError, SchemaResult};

/// An object declaration. Properties are kept as a sequence, not a map,
/// so declaration order survives resolution and encoding.
#[derive(Debug, Clone)]
pub struct Object {
    meta: TypeMeta,
    properties: Vec<Arc<TypeDescriber>>,
}

impl Object {
    pub fn new(meta: TypeMeta, properties: Vec<Arc<TypeDescriber>>) -> SchemaResult<Self> {
        if properties.is_empty() {
            return Err(SchemaError::definition(
                meta.path(),
                "the properties is required",
            ));
        }

        let mut seen = HashSet::new();
        for property in &properties {
            if !seen.insert(property.name()) {
                return Err(SchemaError::definition(
                    meta.path(),
                    format!("property '{}' has been duplicated", property.name()),
                ));
            }
        }

        Ok(Self { meta, properties })
    }

    pub(crate) fn meta(&self) -> &TypeMeta {
        &self.meta
    }

    /// Properties in declaration order
    pub fn properties(&self) -> &[Arc<TypeDescriber>] {
        &self.properties
    }

    /// Copy of this declaration with resolved properties, order preserved.
    pub(crate) fn with_properties(&self, properties: Vec<Arc<TypeDescriber>>) -> Self {
        Self {
            meta: self.meta.clone(),
            properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Scalar, ScalarKind};
    use serde_json::json;

    fn scalar(name: &str, path: &str) -> Arc<TypeDescriber> {
        let meta = TypeMeta::new(name, path, "", false).unwrap();
        Arc::new(TypeDescriber::Scalar(
            Scalar::new(meta, ScalarKind::String, None, vec![], json!("x")).unwrap(),
        ))
    }

    #[test]
    fn rejects_empty_properties() {
        let meta = TypeMeta::new("Obj", "#/types/Obj", "", false).unwrap();
        assert!(matches!(
            Object::new(meta, vec![]),
            Err(SchemaError::Definition { reason, .. }) if reason == "the properties is required"
        ));
    }

    #[test]
    fn rejects_duplicate_property_names() {
        let meta = TypeMeta::new("Obj", "#/types/Obj", "", false).unwrap();
        let err = Object::new(
            meta,
            vec![
                scalar("id", "#/types/Obj/properties/id"),
                scalar("id", "#/types/Obj/properties/id2"),
            ],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SchemaError::Definition { reason, .. } if reason == "property 'id' has been duplicated"
        ));
    }
}
