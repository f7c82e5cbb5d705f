//! In-memory type model for schema declarations
//!
//! A declaration is one of four surface variants (scalar, array, object,
//! reference) plus the post-resolution reference wrapper. Every variant
//! carries the shared identity attributes through [`TypeMeta`].
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

mod array;
mod events;
mod object;
mod project;
mod reference;
mod resolved;
mod scalar;

pub use array::Array;
pub use events::{ConsumedEvent, EventVisibility, PublishedEvent};
pub use object::Object;
pub use project::{Confluence, ConfluencePage, Project};
pub use reference::Reference;
pub use resolved::ResolvedReference;
pub use scalar::{Scalar, ScalarKind};

use crate::error::{SchemaError, SchemaResult};

/// Identity attributes shared by every type declaration.
///
/// `path` is a stable slash-delimited locator (`#/types/Foo/properties/bar`)
/// unique within one document; it doubles as the resolution cache key and
/// the coordinate carried by errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMeta {
    name: String,
    path: String,
    description: String,
    nullable: bool,
}

impl TypeMeta {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        description: impl Into<String>,
        nullable: bool,
    ) -> SchemaResult<Self> {
        let name = name.into();
        let path = path.into();

        if path.is_empty() {
            return Err(SchemaError::definition(&name, "the path cannot be empty"));
        }

        if name.is_empty() {
            return Err(SchemaError::definition(&path, "the name cannot be empty"));
        }

        Ok(Self {
            name,
            path,
            description: description.into(),
            nullable,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Description of the declaration. Empty when none was given.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }
}

/// One declared or resolved shape in the schema.
///
/// The enum is closed on purpose: resolution and encoding dispatch
/// exhaustively, so adding a variant fails to compile until every site
/// handles it.
#[derive(Debug, Clone)]
pub enum TypeDescriber {
    Scalar(Scalar),
    Array(Array),
    Object(Object),
    Reference(Reference),
    /// A reference after resolution: the target's shape behind the
    /// referencing declaration's identity.
    ResolvedRef(ResolvedReference),
}

impl TypeDescriber {
    fn meta(&self) -> &TypeMeta {
        match self {
            Self::Scalar(s) => s.meta(),
            Self::Array(a) => a.meta(),
            Self::Object(o) => o.meta(),
            Self::Reference(r) => r.meta(),
            Self::ResolvedRef(r) => r.meta(),
        }
    }

    /// Name of the declaration (the referencing side for resolved references)
    pub fn name(&self) -> &str {
        self.meta().name()
    }

    /// Unique locator of the declaration within the document
    pub fn path(&self) -> &str {
        self.meta().path()
    }

    /// Description, falling back to the target's for resolved references
    pub fn description(&self) -> &str {
        match self {
            Self::ResolvedRef(r) => r.description(),
            other => other.meta().description(),
        }
    }

    pub fn nullable(&self) -> bool {
        self.meta().nullable()
    }

    /// The `type` keyword of the underlying shape, e.g. `string` or `object`
    pub fn type_keyword(&self) -> &str {
        match self {
            Self::Scalar(s) => s.kind().as_str(),
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Reference(_) => "reference",
            Self::ResolvedRef(r) => r.target().type_keyword(),
        }
    }

    /// Name of the referenced declaration when this node is a resolved
    /// reference. Comments render this instead of the type keyword.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            Self::ResolvedRef(r) => Some(r.target_name()),
            _ => None,
        }
    }

    /// The terminal structural node, looking through resolved reference
    /// wrappers (a reference to a reference nests wrappers).
    pub fn shape(&self) -> &TypeDescriber {
        match self {
            Self::ResolvedRef(r) => r.target().shape(),
            other => other,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self.shape() {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self.shape() {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self.shape() {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_rejects_empty_name_and_path() {
        assert!(matches!(
            TypeMeta::new("", "#/types/A", "", false),
            Err(SchemaError::Definition { reason, .. }) if reason == "the name cannot be empty"
        ));
        assert!(matches!(
            TypeMeta::new("A", "", "", false),
            Err(SchemaError::Definition { reason, .. }) if reason == "the path cannot be empty"
        ));
    }

    #[test]
    fn reference_name_only_set_after_resolution() {
        let meta = TypeMeta::new("Ref", "#/types/Ref", "", false).unwrap();
        let reference =
            TypeDescriber::Reference(Reference::new(meta, "#/types/Target").unwrap());
        assert_eq!(reference.reference_name(), None);
        assert_eq!(reference.type_keyword(), "reference");
    }
}
