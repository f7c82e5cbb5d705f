//! Error types for schema registration and resolution
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors produced by the registry and the resolution engine
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Any accessor or mutator was called before `set_project`
    #[error("schema not configured, please specify required fields")]
    NotConfigured,

    /// `set_project` was called twice
    #[error("can't override current project")]
    ProjectAlreadySet,

    /// A type with the same path was registered twice
    #[error("type '{0}' has been duplicated")]
    DuplicateType(String),

    /// A published event with the same name was registered twice
    #[error("published event '{0}' has been duplicated")]
    DuplicatePublishedEvent(String),

    /// A consumed event with the same name was registered twice
    #[error("consumed event '{0}' has been duplicated")]
    DuplicateConsumedEvent(String),

    /// A reference points at a path that was never declared
    #[error("definition '{reference}' referenced in '{path}' not found in declared types")]
    ReferenceNotFound { reference: String, path: String },

    /// A reference chain loops back onto itself
    #[error("recursive reference detected for definition '{0}'")]
    RecursiveReference(String),

    /// Breadcrumb wrapper added as resolution errors bubble up
    #[error("can't resolve '{path}': {source}")]
    Resolution {
        path: String,
        #[source]
        source: Box<SchemaError>,
    },

    /// A node was constructed with missing or mismatched structural fields
    #[error("invalid definition at '{path}': {reason}")]
    Definition { path: String, reason: String },

    /// An event visibility keyword outside private/protected/public
    #[error("event visibility '{0}' is invalid")]
    InvalidVisibility(String),
}

impl SchemaError {
    /// Create a shape error with path context
    pub fn definition(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Definition {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a nested resolution failure with the path it bubbled through
    pub fn resolution(path: impl Into<String>, source: SchemaError) -> Self {
        Self::Resolution {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error of a `Resolution` breadcrumb chain
    pub fn root_cause(&self) -> &SchemaError {
        match self {
            Self::Resolution { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_breadcrumb_prefixes_path() {
        let err = SchemaError::resolution(
            "#/types/A",
            SchemaError::RecursiveReference("#/types/B".to_string()),
        );

        assert_eq!(
            err.to_string(),
            "can't resolve '#/types/A': recursive reference detected for definition '#/types/B'"
        );
        assert!(matches!(
            err.root_cause(),
            SchemaError::RecursiveReference(path) if path == "#/types/B"
        ));
    }
}
