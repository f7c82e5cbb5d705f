//! Eventdoc Confluence - documentation rendering and publishing
//!
//! Turns a resolved [`eventdoc_schema::SchemaRegistry`] into a Confluence
//! storage-format page and publishes it to every configured page target.
//! The pipeline is writer (registry to view model), template (view model
//! to page body), and generator (page body to the Confluence REST API).
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

pub mod client;
pub mod error;
pub mod generator;
pub mod output;
pub mod template;
pub mod writer;

pub use client::{Auth, Client, Content};
pub use error::{PublishError, PublishResult};
pub use generator::{Generator, PageResult};
pub use output::OutputData;
pub use writer::TemplateWriter;
