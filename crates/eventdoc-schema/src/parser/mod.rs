//! Surface-syntax decoders feeding the registry's ingestion API
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

pub mod yaml;

pub use yaml::{DecodeError, Decoder};
