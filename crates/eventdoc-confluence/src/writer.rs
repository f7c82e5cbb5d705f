//! Builds the template view model from a resolved registry
//!
//! Composite types and event payloads are rendered as annotated JSONC
//! examples; the trailing comment of each nested value follows the
//! `<identifier><(format)><[enum]><|null><: description>` grammar. The
//! identifier is the referenced type name for resolved references and the
//! type keyword otherwise; format and enum modifiers are suppressed for
//! references, and top level values never carry a comment.
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use eventdoc_jsonc::{Encoder, Value};
use eventdoc_schema::types::{EventVisibility, PublishedEvent, Scalar, TypeDescriber};
use eventdoc_schema::SchemaRegistry;
use serde_json::Value as JsonValue;

use crate::error::{PublishError, PublishResult};
use crate::output::{ConsumedEventOutput, OutputData, PublishedEventOutput, TypeOutput};

/// Turns registry contents into [`OutputData`] ready for the page template
#[derive(Debug, Default)]
pub struct TemplateWriter;

impl TemplateWriter {
    pub fn new() -> Self {
        Self
    }

    /// Read every section of the registry, resolving lazily, and build the
    /// view model in declaration order
    pub fn prepare(&self, registry: &mut SchemaRegistry) -> PublishResult<OutputData> {
        let mut out = OutputData::default();

        let types = registry.types().map_err(|source| PublishError::Prepare {
            section: "types",
            source,
        })?;
        for type_definition in &types {
            out.types.push(self.prepare_type(type_definition)?);
        }

        let published = registry
            .published_events()
            .map_err(|source| PublishError::Prepare {
                section: "published events",
                source,
            })?;
        for event in &published {
            out.published_events.push(self.prepare_published(event)?);
        }

        let consumed = registry
            .consumed_events()
            .map_err(|source| PublishError::Prepare {
                section: "consumed events",
                source,
            })?;
        out.consumed_events = consumed
            .iter()
            .map(|event| ConsumedEventOutput {
                name: event.name().to_string(),
                description: event.description().to_string(),
            })
            .collect();

        Ok(out)
    }

    fn prepare_type(&self, type_definition: &TypeDescriber) -> PublishResult<TypeOutput> {
        let mut out = TypeOutput {
            name: type_definition.name().to_string(),
            type_keyword: type_definition.type_keyword().to_string(),
            description: type_definition.description().to_string(),
            nullable: type_definition.nullable(),
            format: String::new(),
            enum_values: Vec::new(),
            example: String::new(),
        };

        // Scalars render their bare literal plus format and enum columns;
        // composites get a full annotated example
        if let Some(scalar) = type_definition.as_scalar() {
            out.example = literal(scalar.value());
            out.format = scalar.format().unwrap_or_default().to_string();
            out.enum_values = scalar.enum_values().iter().map(literal).collect();
        } else {
            let example = self.type_to_example(true, type_definition);
            out.example = encode_example(&example)?;
        }

        Ok(out)
    }

    fn prepare_published(&self, event: &PublishedEvent) -> PublishResult<PublishedEventOutput> {
        let emoji = match event.visibility() {
            EventVisibility::Private => "🔒 ",
            EventVisibility::Protected => "🔐 ",
            EventVisibility::Public => "🔓 ",
        };

        let body = Value::OrderedMap(vec![
            (
                "attributes".to_string(),
                self.type_to_example(true, event.attributes()),
            ),
            (
                "entities".to_string(),
                self.type_to_example(true, event.entities()),
            ),
        ]);

        Ok(PublishedEventOutput {
            name: format!("{emoji}{}", event.name()),
            visibility: event.visibility().to_string(),
            module: event.module().to_string(),
            description: event.description().to_string(),
            example: encode_example(&body)?,
        })
    }

    /// Convert a resolved type tree into an example value, attaching
    /// comments below the root
    fn type_to_example(&self, in_root: bool, node: &TypeDescriber) -> Value {
        match node.shape() {
            TypeDescriber::Scalar(scalar) => {
                let value = Value::from(scalar.value().clone());
                if in_root {
                    return value;
                }

                match self.create_comment(node, &scalar_modifier(scalar)) {
                    Some(comment) => value.commented(comment),
                    None => value,
                }
            }
            TypeDescriber::Array(array) => {
                let items = self.type_to_example(false, array.items());
                self.commented_below_root(in_root, node, Value::Array(vec![items]))
            }
            TypeDescriber::Object(object) => {
                let entries = object
                    .properties()
                    .iter()
                    .map(|property| {
                        (
                            property.name().to_string(),
                            self.type_to_example(false, property),
                        )
                    })
                    .collect();

                self.commented_below_root(in_root, node, Value::OrderedMap(entries))
            }
            // Registry reads hand out resolved trees, so bare references
            // never reach the writer
            TypeDescriber::Reference(_) | TypeDescriber::ResolvedRef(_) => Value::Null,
        }
    }

    fn commented_below_root(&self, in_root: bool, node: &TypeDescriber, value: Value) -> Value {
        if in_root {
            return value;
        }

        match self.create_comment(node, "") {
            Some(comment) => value.commented(comment),
            None => value,
        }
    }

    /// Build the trailing comment for a nested value, `None` when nothing
    /// beyond the identifier would be said
    fn create_comment(&self, node: &TypeDescriber, type_modifier: &str) -> Option<String> {
        let (identifier, type_modifier) = match node.reference_name() {
            Some(reference) => (reference, ""),
            None => (node.type_keyword(), type_modifier),
        };

        let nullable = if node.nullable() { "|null" } else { "" };

        let description = node.description();
        let description = if description.is_empty() {
            String::new()
        } else {
            format!(": {description}")
        };

        let comment = format!("{type_modifier}{nullable}{description}");
        if comment.is_empty() {
            return None;
        }

        Some(format!("{identifier}{comment}"))
    }
}

fn scalar_modifier(scalar: &Scalar) -> String {
    let mut modifier = String::new();

    if let Some(format) = scalar.format() {
        if !format.is_empty() {
            modifier.push_str(&format!("({format})"));
        }
    }

    if scalar.has_enum() {
        let members: Vec<String> = scalar.enum_values().iter().map(literal).collect();
        modifier.push_str(&format!("[{}]", members.join(",")));
    }

    modifier
}

/// Render a JSON literal the way it appears in comments and scalar
/// examples: strings without quotes, everything else in JSON notation
fn literal(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn encode_example(value: &Value) -> PublishResult<String> {
    let mut out = Vec::new();
    Encoder::new(&mut out).encode(value)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
