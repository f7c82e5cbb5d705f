//! Eventdoc Schema - lifecycle-event schema model and resolution engine
//!
//! This crate owns the in-memory model of a lifecycle document and the
//! machinery that makes it usable:
//!
//! - **Type model**: a closed [`types::TypeDescriber`] union over scalar,
//!   array, object, and reference declarations
//! - **Registry**: append-only ingestion with declaration-order reads
//!   ([`SchemaRegistry`])
//! - **Resolution**: lazy, memoized reference resolution with cycle
//!   rejection, triggered by the first read
//! - **YAML decoder**: the surface syntax adapter ([`parser::yaml`])
//!
//! ## Quick start
//!
//! ```rust
//! use eventdoc_schema::{parser::yaml::Decoder, SchemaRegistry};
//!
//! let document = r#"
//! version: "1.0"
//! name: checkout
//! types:
//!   OrderId:
//!     type: string
//!     value: "9f2c"
//! "#;
//!
//! let mut registry = SchemaRegistry::new();
//! Decoder::new()
//!     .decode(document.as_bytes(), &mut registry)
//!     .unwrap();
//!
//! let types = registry.types().unwrap();
//! assert_eq!(types[0].name(), "OrderId");
//! ```
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;
pub mod registry;
mod resolver;
pub mod types;

pub use error::{SchemaError, SchemaResult};
pub use registry::SchemaRegistry;
