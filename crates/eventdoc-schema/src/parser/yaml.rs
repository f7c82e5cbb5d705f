//! YAML surface-syntax decoder
//!
//! Turns a lifecycle document into calls against the registry's ingestion
//! API. Mappings are walked through `serde_yaml::Mapping`, which preserves
//! declaration order; the registry's order guarantees start here.
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::io;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use serde_yaml::{Mapping, Value as YamlValue};
use thiserror::Error;
use tracing::debug;

use crate::error::SchemaError;
use crate::registry::SchemaRegistry;
use crate::types::{
    Array, ConsumedEvent, EventVisibility, Object, PublishedEvent, Reference, Scalar,
    ScalarKind, TypeDescriber, TypeMeta,
};

/// Document version this decoder understands
const SUPPORTED_VERSION: &str = "1.0";

/// Errors produced while decoding a lifecycle document
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("can't decode yaml definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported '{0}' version")]
    UnsupportedVersion(String),

    #[error("{path}: unexpected structure")]
    UnexpectedStructure { path: String },

    #[error("{path}/type: invalid type identifier declaration")]
    InvalidTypeKeyword { path: String },

    #[error("{path}/type: '{keyword}' not supported")]
    UnsupportedTypeKeyword { path: String, keyword: String },

    #[error("#/confluence/pages: can't add page at '{index}' index: {source}")]
    Page {
        index: usize,
        #[source]
        source: SchemaError,
    },

    /// Breadcrumb wrapper carrying the document path of the failing node
    #[error("{path}: {source}")]
    Definition {
        path: String,
        #[source]
        source: SchemaError,
    },

    #[error("can't register {kind}: {source}")]
    Register {
        kind: &'static str,
        #[source]
        source: SchemaError,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Decoder for version 1.0 lifecycle documents
#[derive(Debug, Default)]
pub struct Decoder;

#[derive(Debug, Deserialize)]
struct ProjectDoc {
    #[serde(default)]
    version: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    confluence: ConfluenceDoc,
    #[serde(default)]
    events: EventsDoc,
    #[serde(default)]
    types: Mapping,
}

#[derive(Debug, Default, Deserialize)]
struct ConfluenceDoc {
    #[serde(default)]
    pages: Vec<PageDoc>,
}

#[derive(Debug, Deserialize)]
struct PageDoc {
    #[serde(default)]
    title: String,
    #[serde(default, rename = "spaceKey")]
    space_key: String,
    #[serde(default, rename = "ancestorId")]
    ancestor_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct EventsDoc {
    #[serde(default)]
    published: Mapping,
    #[serde(default)]
    consumed: Mapping,
}

impl Decoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode a lifecycle document and register everything it declares
    pub fn decode<R: io::Read>(
        &self,
        definition: R,
        registry: &mut SchemaRegistry,
    ) -> Result<(), DecodeError> {
        let doc: ProjectDoc = serde_yaml::from_reader(definition)?;

        if doc.version != SUPPORTED_VERSION {
            return Err(DecodeError::UnsupportedVersion(doc.version));
        }

        registry.set_project(&doc.name)?;
        debug!(project = %doc.name, "decoding lifecycle document");

        self.parse_confluence(&doc, registry)?;
        self.parse_types(&doc, registry)?;
        self.parse_published_events(&doc, registry)?;
        self.parse_consumed_events(&doc, registry)?;

        Ok(())
    }

    fn parse_confluence(
        &self,
        doc: &ProjectDoc,
        registry: &mut SchemaRegistry,
    ) -> Result<(), DecodeError> {
        for (index, page) in doc.confluence.pages.iter().enumerate() {
            registry
                .add_confluence_page(&page.title, &page.space_key, &page.ancestor_id)
                .map_err(|source| DecodeError::Page { index, source })?;
        }

        Ok(())
    }

    fn parse_types(
        &self,
        doc: &ProjectDoc,
        registry: &mut SchemaRegistry,
    ) -> Result<(), DecodeError> {
        for (key, value) in &doc.types {
            let name = key_to_string(key);
            let path = format!("#/types/{name}");
            let definition = as_mapping(&path, value)?;

            let type_definition = self.parse_type_definition(&name, &path, definition)?;
            registry
                .add_type(type_definition)
                .map_err(|source| DecodeError::Register {
                    kind: "type",
                    source,
                })?;
        }

        Ok(())
    }

    fn parse_published_events(
        &self,
        doc: &ProjectDoc,
        registry: &mut SchemaRegistry,
    ) -> Result<(), DecodeError> {
        for (key, value) in &doc.events.published {
            let name = key_to_string(key);
            let path = format!("#/events/published/{name}");
            let definition = as_mapping(&path, value)?;

            let visibility: EventVisibility = str_field(definition, "visibility")
                .parse()
                .map_err(|source| DecodeError::Definition {
                    path: path.clone(),
                    source,
                })?;

            let attributes = self.parse_event_payload(&path, "attributes", definition)?;
            let entities = self.parse_event_payload(&path, "entities", definition)?;

            let event = PublishedEvent::new(
                &name,
                visibility,
                str_field(definition, "module"),
                str_field(definition, "description"),
                Arc::new(attributes),
                Arc::new(entities),
            )?;

            registry
                .add_published_event(event)
                .map_err(|source| DecodeError::Register {
                    kind: "published event",
                    source,
                })?;
        }

        Ok(())
    }

    fn parse_consumed_events(
        &self,
        doc: &ProjectDoc,
        registry: &mut SchemaRegistry,
    ) -> Result<(), DecodeError> {
        for (key, value) in &doc.events.consumed {
            let name = key_to_string(key);
            let path = format!("#/events/consumed/{name}");
            let definition = as_mapping(&path, value)?;

            let event = ConsumedEvent::new(&name, str_field(definition, "description"))?;

            registry
                .add_consumed_event(event)
                .map_err(|source| DecodeError::Register {
                    kind: "consumed event",
                    source,
                })?;
        }

        Ok(())
    }

    fn parse_event_payload(
        &self,
        path: &str,
        key: &str,
        definition: &Mapping,
    ) -> Result<TypeDescriber, DecodeError> {
        let payload_path = format!("{path}/{key}");
        let payload = definition
            .get(key)
            .and_then(YamlValue::as_mapping)
            .ok_or_else(|| DecodeError::UnexpectedStructure {
                path: payload_path.clone(),
            })?;

        self.parse_type_definition(key, &payload_path, payload)
    }

    fn parse_type_definition(
        &self,
        name: &str,
        path: &str,
        definition: &Mapping,
    ) -> Result<TypeDescriber, DecodeError> {
        let description = str_field(definition, "description");
        let nullable = bool_field(definition, "nullable");

        if let Some(reference) = opt_str_field(definition, "$ref") {
            let meta = TypeMeta::new(name, path, description, nullable)?;
            return Ok(TypeDescriber::Reference(Reference::new(meta, reference)?));
        }

        let Some(keyword) = opt_str_field(definition, "type") else {
            return Err(DecodeError::InvalidTypeKeyword {
                path: path.to_string(),
            });
        };

        if let Some(kind) = ScalarKind::from_keyword(&keyword) {
            return self.parse_scalar(name, path, description, nullable, kind, definition);
        }

        match keyword.as_str() {
            "array" => {
                let items_path = format!("{path}/items");
                let items = definition
                    .get("items")
                    .and_then(YamlValue::as_mapping)
                    .ok_or_else(|| DecodeError::UnexpectedStructure {
                        path: items_path.clone(),
                    })?;

                let items = self.parse_type_definition("items", &items_path, items)?;

                let meta = TypeMeta::new(name, path, description, nullable)?;
                Ok(TypeDescriber::Array(Array::new(meta, Arc::new(items))?))
            }
            "object" => {
                let properties = definition
                    .get("properties")
                    .and_then(YamlValue::as_mapping)
                    .ok_or_else(|| DecodeError::UnexpectedStructure {
                        path: format!("{path}/properties"),
                    })?;

                let mut parsed = Vec::with_capacity(properties.len());
                for (key, value) in properties {
                    let property_name = key_to_string(key);
                    let property_path = format!("{path}/properties/{property_name}");
                    let property = as_mapping(&property_path, value)?;
                    parsed.push(Arc::new(self.parse_type_definition(
                        &property_name,
                        &property_path,
                        property,
                    )?));
                }

                let meta = TypeMeta::new(name, path, description, nullable)?;
                Ok(TypeDescriber::Object(Object::new(meta, parsed)?))
            }
            _ => Err(DecodeError::UnsupportedTypeKeyword {
                path: path.to_string(),
                keyword,
            }),
        }
    }

    fn parse_scalar(
        &self,
        name: &str,
        path: &str,
        description: String,
        nullable: bool,
        kind: ScalarKind,
        definition: &Mapping,
    ) -> Result<TypeDescriber, DecodeError> {
        let value = definition
            .get("value")
            .map(yaml_to_json)
            .unwrap_or(JsonValue::Null);

        let enum_values = definition
            .get("enum")
            .and_then(YamlValue::as_sequence)
            .map(|members| members.iter().map(yaml_to_json).collect())
            .unwrap_or_default();

        let format = opt_str_field(definition, "format");

        let meta = TypeMeta::new(name, path, description, nullable)?;
        Ok(TypeDescriber::Scalar(Scalar::new(
            meta,
            kind,
            format,
            enum_values,
            value,
        )?))
    }
}

fn as_mapping<'a>(path: &str, value: &'a YamlValue) -> Result<&'a Mapping, DecodeError> {
    value
        .as_mapping()
        .ok_or_else(|| DecodeError::UnexpectedStructure {
            path: path.to_string(),
        })
}

fn key_to_string(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn str_field(definition: &Mapping, key: &str) -> String {
    opt_str_field(definition, key).unwrap_or_default()
}

fn opt_str_field(definition: &Mapping, key: &str) -> Option<String> {
    definition
        .get(key)
        .and_then(YamlValue::as_str)
        .map(str::to_string)
}

fn bool_field(definition: &Mapping, key: &str) -> bool {
    definition
        .get(key)
        .and_then(YamlValue::as_bool)
        .unwrap_or(false)
}

fn yaml_to_json(value: &YamlValue) -> JsonValue {
    match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                JsonValue::from(i)
            } else if let Some(u) = n.as_u64() {
                JsonValue::from(u)
            } else {
                n.as_f64().map(JsonValue::from).unwrap_or(JsonValue::Null)
            }
        }
        YamlValue::String(s) => JsonValue::String(s.clone()),
        YamlValue::Sequence(members) => {
            JsonValue::Array(members.iter().map(yaml_to_json).collect())
        }
        YamlValue::Mapping(mapping) => JsonValue::Object(
            mapping
                .iter()
                .map(|(key, value)| (key_to_string(key), yaml_to_json(value)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}
