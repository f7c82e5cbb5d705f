//! Reference type declarations
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use super::TypeMeta;
use crate::error::{SchemaError, SchemaResult};

/// A named pointer to another declared type. Carries its own identity,
/// which overrides the target's after resolution.
#[derive(Debug, Clone)]
pub struct Reference {
    meta: TypeMeta,
    reference: String,
}

impl Reference {
    pub fn new(meta: TypeMeta, reference: impl Into<String>) -> SchemaResult<Self> {
        let reference = reference.into();
        if reference.is_empty() {
            return Err(SchemaError::definition(
                meta.path(),
                "the reference cannot be empty",
            ));
        }

        Ok(Self { meta, reference })
    }

    pub(crate) fn meta(&self) -> &TypeMeta {
        &self.meta
    }

    /// Path of the declared type this reference points at
    pub fn reference(&self) -> &str {
        &self.reference
    }
}
