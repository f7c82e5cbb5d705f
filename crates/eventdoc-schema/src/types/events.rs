//! Published and consumed lifecycle events
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::TypeDescriber;
use crate::error::{SchemaError, SchemaResult};

/// Who is allowed to consume a published event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventVisibility {
    Private,
    Protected,
    Public,
}

impl EventVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for EventVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventVisibility {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Self::Private),
            "protected" => Ok(Self::Protected),
            "public" => Ok(Self::Public),
            other => Err(SchemaError::InvalidVisibility(other.to_string())),
        }
    }
}

/// An event this project emits, documented with example attribute and
/// entity payloads
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    name: String,
    visibility: EventVisibility,
    module: String,
    description: String,
    attributes: Arc<TypeDescriber>,
    entities: Arc<TypeDescriber>,
}

impl PublishedEvent {
    pub fn new(
        name: impl Into<String>,
        visibility: EventVisibility,
        module: impl Into<String>,
        description: impl Into<String>,
        attributes: Arc<TypeDescriber>,
        entities: Arc<TypeDescriber>,
    ) -> SchemaResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaError::definition(
                "#/events/published",
                "the name cannot be empty",
            ));
        }

        Ok(Self {
            name,
            visibility,
            module: module.into(),
            description: description.into(),
            attributes,
            entities,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> EventVisibility {
        self.visibility
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn attributes(&self) -> &Arc<TypeDescriber> {
        &self.attributes
    }

    pub fn entities(&self) -> &Arc<TypeDescriber> {
        &self.entities
    }

    /// Copy of this event with resolved payload types
    pub(crate) fn with_resolved(
        &self,
        attributes: Arc<TypeDescriber>,
        entities: Arc<TypeDescriber>,
    ) -> Self {
        Self {
            attributes,
            entities,
            ..self.clone()
        }
    }
}

/// An event this project consumes. Documentation only needs prose here,
/// so there is nothing to resolve.
#[derive(Debug, Clone)]
pub struct ConsumedEvent {
    name: String,
    description: String,
}

impl ConsumedEvent {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> SchemaResult<Self> {
        let name = name.into();
        let description = description.into();

        if name.is_empty() {
            return Err(SchemaError::definition(
                "#/events/consumed",
                "the name cannot be empty",
            ));
        }

        if description.is_empty() {
            return Err(SchemaError::definition(
                format!("#/events/consumed/{name}"),
                "the description cannot be empty",
            ));
        }

        Ok(Self { name, description })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
