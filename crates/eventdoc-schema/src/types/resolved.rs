//! Resolved reference wrapper
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::sync::Arc;

use super::{Reference, TypeDescriber, TypeMeta};

/// A reference after resolution: dual identity by construction.
///
/// Identity queries (name, path, nullability) answer with the referencing
/// declaration, while the structure comes from the resolved target. The
/// same target can be referenced from many paths, each wrapper keeping its
/// own identity over the shared target node.
#[derive(Debug, Clone)]
pub struct ResolvedReference {
    meta: TypeMeta,
    target: Arc<TypeDescriber>,
}

impl ResolvedReference {
    pub(crate) fn new(reference: &Reference, target: Arc<TypeDescriber>) -> Self {
        Self {
            meta: reference.meta().clone(),
            target,
        }
    }

    pub(crate) fn meta(&self) -> &TypeMeta {
        &self.meta
    }

    /// The resolved target node carrying the structural content
    pub fn target(&self) -> &Arc<TypeDescriber> {
        &self.target
    }

    /// Name of the referenced declaration, used as the comment identifier
    pub fn target_name(&self) -> &str {
        self.target.name()
    }

    /// Local description when non-empty, else the target's (first non-empty
    /// wins)
    pub fn description(&self) -> &str {
        if !self.meta.description().is_empty() {
            return self.meta.description();
        }

        self.target.description()
    }
}
