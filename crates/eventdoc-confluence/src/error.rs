//! Error types for rendering and publishing
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

use eventdoc_schema::SchemaError;

/// Result type for rendering and publishing operations
pub type PublishResult<T> = Result<T, PublishError>;

/// Errors produced while rendering the documentation body or talking to
/// the Confluence REST API
#[derive(Error, Debug)]
pub enum PublishError {
    /// The registry refused a read while preparing the output
    #[error("can't prepare {section} to write: {source}")]
    Prepare {
        section: &'static str,
        #[source]
        source: SchemaError,
    },

    /// The registry has no project or pages configured
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The example encoder failed to write
    #[error("can't encode example: {0}")]
    Encode(#[from] std::io::Error),

    /// An HTTP request could not be built or sent
    #[error("{message}: {source}")]
    Request {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// Confluence answered with a non-success status
    #[error("confluence returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The page lookup before create-or-update failed
    #[error("can't search current documentation: {0}")]
    Search(#[source] Box<PublishError>),

    /// A page call did not finish within the per-request deadline
    #[error("request did not complete within {0} seconds")]
    Timeout(u64),

    /// Context wrapper naming the page a publication failure belongs to
    #[error("can't create or update page \"{title}\" in space \"{space_key}\" with ancestor \"{ancestor_id}\": {source}")]
    Page {
        title: String,
        space_key: String,
        ancestor_id: String,
        #[source]
        source: Box<PublishError>,
    },

    /// A publication task was aborted or panicked
    #[error("page publication task failed: {0}")]
    Worker(String),
}

impl PublishError {
    pub(crate) fn request(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            message: message.into(),
            source,
        }
    }
}
