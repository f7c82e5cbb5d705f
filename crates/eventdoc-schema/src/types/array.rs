//! Array type declarations
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::sync::Arc;

use super::{TypeDescriber, TypeMeta};
use crate::error::SchemaResult;

/// An array declaration with exactly one element type
#[derive(Debug, Clone)]
pub struct Array {
    meta: TypeMeta,
    items: Arc<TypeDescriber>,
}

impl Array {
    pub fn new(meta: TypeMeta, items: Arc<TypeDescriber>) -> SchemaResult<Self> {
        Ok(Self { meta, items })
    }

    pub(crate) fn meta(&self) -> &TypeMeta {
        &self.meta
    }

    pub fn items(&self) -> &Arc<TypeDescriber> {
        &self.items
    }

    /// Copy of this declaration with resolved items. Resolution
    /// reconstructs nodes instead of mutating shared ones.
    pub(crate) fn with_items(&self, items: Arc<TypeDescriber>) -> Self {
        Self {
            meta: self.meta.clone(),
            items,
        }
    }
}
