//! Reference resolution engine
//!
//! Walks every declared type and event payload, replacing reference nodes
//! with resolved copies. Results are memoized by path within one pass,
//! cycles are rejected, and nothing is committed to the registry unless the
//! whole pass succeeds, so callers never observe a half-resolved graph.
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::trace;

use crate::error::{SchemaError, SchemaResult};
use crate::registry::SchemaRegistry;
use crate::types::{Reference, ResolvedReference, TypeDescriber};

/// State owned by a single resolution pass. Built fresh every pass, so a
/// registry mutation only has to clear the resolved flag to invalidate
/// everything.
struct ResolutionContext {
    /// Resolved nodes memoized by path
    resolved: HashMap<String, Arc<TypeDescriber>>,
    /// Paths currently being resolved, for cycle detection. Entries are
    /// removed on success only: a failed chain aborts the whole pass.
    resolving: HashSet<String>,
}

impl ResolutionContext {
    fn new() -> Self {
        Self {
            resolved: HashMap::new(),
            resolving: HashSet::new(),
        }
    }
}

impl SchemaRegistry {
    /// Resolve every declared type and published-event payload. Idempotent:
    /// a second call after a successful pass performs no work.
    pub(crate) fn resolve(&mut self) -> SchemaResult<()> {
        self.ensure_configured()?;

        if self.has_resolved {
            return Ok(());
        }

        let mut ctx = ResolutionContext::new();

        let mut resolved_types = HashMap::with_capacity(self.types.len());
        for path in &self.type_paths {
            let resolved = resolve_cached(&self.types, &mut ctx, &self.types[path])?;
            resolved_types.insert(path.clone(), resolved);
        }

        let mut resolved_events = HashMap::with_capacity(self.published.len());
        for name in &self.published_names {
            let event = &self.published[name];
            let attributes = resolve_cached(&self.types, &mut ctx, event.attributes())?;
            let entities = resolve_cached(&self.types, &mut ctx, event.entities())?;
            resolved_events.insert(name.clone(), event.with_resolved(attributes, entities));
        }

        // Commit only after the whole graph resolved
        self.types = resolved_types;
        self.published = resolved_events;
        self.has_resolved = true;
        Ok(())
    }
}

fn resolve_cached(
    declared: &HashMap<String, Arc<TypeDescriber>>,
    ctx: &mut ResolutionContext,
    node: &Arc<TypeDescriber>,
) -> SchemaResult<Arc<TypeDescriber>> {
    if let Some(hit) = ctx.resolved.get(node.path()) {
        return Ok(hit.clone());
    }

    let resolved = resolve_node(declared, ctx, node)?;
    ctx.resolved
        .insert(resolved.path().to_string(), resolved.clone());
    Ok(resolved)
}

fn resolve_node(
    declared: &HashMap<String, Arc<TypeDescriber>>,
    ctx: &mut ResolutionContext,
    node: &Arc<TypeDescriber>,
) -> SchemaResult<Arc<TypeDescriber>> {
    trace!(path = %node.path(), "resolving type");

    match node.as_ref() {
        // Terminal either way
        TypeDescriber::Scalar(_) | TypeDescriber::ResolvedRef(_) => Ok(node.clone()),
        TypeDescriber::Array(array) => {
            let items = resolve_cached(declared, ctx, array.items())
                .map_err(|err| SchemaError::resolution(array.meta().path(), err))?;

            Ok(Arc::new(TypeDescriber::Array(array.with_items(items))))
        }
        TypeDescriber::Object(object) => {
            let mut properties = Vec::with_capacity(object.properties().len());
            for property in object.properties() {
                properties.push(resolve_cached(declared, ctx, property)?);
            }

            Ok(Arc::new(TypeDescriber::Object(
                object.with_properties(properties),
            )))
        }
        TypeDescriber::Reference(reference) => resolve_reference(declared, ctx, reference),
    }
}

fn resolve_reference(
    declared: &HashMap<String, Arc<TypeDescriber>>,
    ctx: &mut ResolutionContext,
    reference: &Reference,
) -> SchemaResult<Arc<TypeDescriber>> {
    let target = declared
        .get(reference.reference())
        .ok_or_else(|| SchemaError::ReferenceNotFound {
            reference: reference.reference().to_string(),
            path: reference.meta().path().to_string(),
        })?;

    if !ctx.resolving.insert(reference.meta().path().to_string()) {
        return Err(SchemaError::RecursiveReference(
            reference.meta().path().to_string(),
        ));
    }

    let target = resolve_cached(declared, ctx, target)
        .map_err(|err| SchemaError::resolution(reference.meta().path(), err))?;

    ctx.resolving.remove(reference.meta().path());

    // Reconstruct rather than mutate: the same target may be referenced
    // from several paths, each needing its own identity.
    Ok(Arc::new(TypeDescriber::ResolvedRef(ResolvedReference::new(
        reference, target,
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Array, EventVisibility, Object, PublishedEvent, Scalar, ScalarKind, TypeMeta,
    };
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry.set_project("test").unwrap();
        registry
    }

    fn scalar(
        name: &str,
        path: &str,
        description: &str,
        enum_values: Vec<serde_json::Value>,
        value: serde_json::Value,
    ) -> TypeDescriber {
        let meta = TypeMeta::new(name, path, description, false).unwrap();
        TypeDescriber::Scalar(
            Scalar::new(meta, ScalarKind::String, None, enum_values, value).unwrap(),
        )
    }

    fn reference(name: &str, path: &str, description: &str, target: &str) -> TypeDescriber {
        let meta = TypeMeta::new(name, path, description, false).unwrap();
        TypeDescriber::Reference(Reference::new(meta, target).unwrap())
    }

    #[test]
    fn resolves_reference_with_identity_override_and_description_fallback() {
        let mut registry = registry();

        registry
            .add_type(scalar(
                "StringType",
                "#/types/StringType",
                "Description of string",
                vec![json!("option1"), json!("option2")],
                json!("option1"),
            ))
            .unwrap();
        registry
            .add_type(reference(
                "StringRef",
                "#/types/StringRef",
                "Description of string reference",
                "#/types/StringType",
            ))
            .unwrap();
        // Second reference site to the same target, no local description
        registry
            .add_type(reference(
                "OtherRef",
                "#/types/OtherRef",
                "",
                "#/types/StringType",
            ))
            .unwrap();

        let types = registry.types().unwrap();
        assert_eq!(types.len(), 3);

        let string_ref = &types[1];
        assert_eq!(string_ref.name(), "StringRef");
        assert_eq!(string_ref.path(), "#/types/StringRef");
        assert_eq!(string_ref.description(), "Description of string reference");
        assert_eq!(string_ref.reference_name(), Some("StringType"));
        assert_eq!(string_ref.as_scalar().unwrap().value(), &json!("option1"));

        // Distinct resolved node, own path, target description shines through
        let other_ref = &types[2];
        assert_eq!(other_ref.path(), "#/types/OtherRef");
        assert_eq!(other_ref.description(), "Description of string");
        assert_eq!(other_ref.as_scalar().unwrap().value(), &json!("option1"));
        assert!(!Arc::ptr_eq(string_ref, other_ref));
    }

    #[test]
    fn resolves_nested_reference_chains() {
        let mut registry = registry();

        registry
            .add_type(scalar(
                "StringType",
                "#/types/StringType",
                "Description of string",
                vec![json!("option1"), json!("option2")],
                json!("option1"),
            ))
            .unwrap();
        registry
            .add_type(reference(
                "StringRef",
                "#/types/StringRef",
                "Description of string reference",
                "#/types/StringType",
            ))
            .unwrap();

        let array_meta =
            TypeMeta::new("StringArray", "#/types/StringArray", "", true).unwrap();
        let array_items = Arc::new(reference(
            "items",
            "#/types/StringArray/items",
            "",
            "#/types/StringRef",
        ));
        registry
            .add_type(TypeDescriber::Array(
                Array::new(array_meta, array_items).unwrap(),
            ))
            .unwrap();

        let id_property = Arc::new(scalar(
            "id",
            "#/types/ObjectType/properties/id",
            "Description of ID type",
            vec![],
            json!("123456"),
        ));
        let strings_property = Arc::new(reference(
            "strings",
            "#/types/ObjectType/properties/strings",
            "Description of string array reference",
            "#/types/StringArray",
        ));
        let object_meta = TypeMeta::new("ObjectType", "#/types/ObjectType", "", false).unwrap();
        registry
            .add_type(TypeDescriber::Object(
                Object::new(object_meta, vec![id_property, strings_property]).unwrap(),
            ))
            .unwrap();

        let types = registry.types().unwrap();
        assert_eq!(types.len(), 4);

        let object = types[3].as_object().unwrap();
        let properties = object.properties();
        assert_eq!(properties[0].path(), "#/types/ObjectType/properties/id");
        assert_eq!(properties[0].description(), "Description of ID type");

        let strings = &properties[1];
        assert_eq!(strings.name(), "strings");
        assert_eq!(
            strings.description(),
            "Description of string array reference"
        );
        assert_eq!(strings.reference_name(), Some("StringArray"));

        // The array's items resolved through the inner reference: identity
        // of the items reference site, value of the target scalar
        let items = strings.as_array().unwrap().items();
        assert_eq!(items.name(), "items");
        assert_eq!(items.path(), "#/types/StringArray/items");
        assert_eq!(items.reference_name(), Some("StringRef"));
        assert_eq!(items.as_scalar().unwrap().value(), &json!("option1"));
    }

    #[test]
    fn resolves_published_event_payloads() {
        let mut registry = registry();

        let id = Arc::new(TypeDescriber::Scalar(
            Scalar::new(
                TypeMeta::new("id", "#/types/ObjectType/properties/id", "", false).unwrap(),
                ScalarKind::Integer,
                None,
                vec![],
                json!(10),
            )
            .unwrap(),
        ));
        let object_meta = TypeMeta::new("ObjectType", "#/types/ObjectType", "", false).unwrap();
        registry
            .add_type(TypeDescriber::Object(
                Object::new(object_meta, vec![id]).unwrap(),
            ))
            .unwrap();

        let attributes = Arc::new(reference(
            "attributes",
            "#/events/published/SIMPLE_EVENT/attributes",
            "",
            "#/types/ObjectType",
        ));
        let entity_id = Arc::new(scalar(
            "id",
            "#/events/published/SIMPLE_EVENT/entities/id",
            "",
            vec![],
            json!("banana"),
        ));
        let entities_meta = TypeMeta::new(
            "entities",
            "#/events/published/SIMPLE_EVENT/entities",
            "",
            false,
        )
        .unwrap();
        let entities = Arc::new(TypeDescriber::Object(
            Object::new(entities_meta, vec![entity_id]).unwrap(),
        ));

        registry
            .add_published_event(
                PublishedEvent::new(
                    "SIMPLE_EVENT",
                    EventVisibility::Public,
                    "",
                    "",
                    attributes,
                    entities,
                )
                .unwrap(),
            )
            .unwrap();

        let events = registry.published_events().unwrap();
        assert_eq!(events.len(), 1);

        let attributes = events[0].attributes();
        assert_eq!(attributes.name(), "attributes");
        assert_eq!(
            attributes.path(),
            "#/events/published/SIMPLE_EVENT/attributes"
        );
        let properties = attributes.as_object().unwrap().properties();
        assert_eq!(properties[0].path(), "#/types/ObjectType/properties/id");
        assert_eq!(properties[0].as_scalar().unwrap().value(), &json!(10));

        let entities = events[0].entities();
        assert_eq!(entities.path(), "#/events/published/SIMPLE_EVENT/entities");
    }

    #[test]
    fn second_resolution_pass_reuses_resolved_nodes() {
        let mut registry = registry();

        registry
            .add_type(scalar("A", "#/types/A", "", vec![], json!("a")))
            .unwrap();
        registry
            .add_type(reference("B", "#/types/B", "", "#/types/A"))
            .unwrap();

        let first = registry.types().unwrap();
        let second = registry.types().unwrap();

        // No recomputation: the same nodes come back
        for (a, b) in first.iter().zip(&second) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    #[test]
    fn adding_a_type_invalidates_resolved_state() {
        let mut registry = registry();

        registry
            .add_type(scalar("A", "#/types/A", "", vec![], json!("a")))
            .unwrap();
        registry.types().unwrap();

        // A reference added after the first read still resolves
        registry
            .add_type(reference("B", "#/types/B", "", "#/types/A"))
            .unwrap();

        let types = registry.types().unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[1].reference_name(), Some("A"));
    }

    #[test]
    fn missing_reference_target_fails_with_both_paths() {
        let mut registry = registry();

        registry
            .add_type(reference("B", "#/types/B", "", "#/types/Missing"))
            .unwrap();

        let err = registry.types().unwrap_err();
        assert!(matches!(
            err.root_cause(),
            SchemaError::ReferenceNotFound { reference, path }
                if reference == "#/types/Missing" && path == "#/types/B"
        ));
    }

    #[test]
    fn self_reference_fails_as_recursive() {
        let mut registry = registry();

        registry
            .add_type(reference("A", "#/types/A", "", "#/types/A"))
            .unwrap();

        let err = registry.types().unwrap_err();
        assert!(matches!(
            err.root_cause(),
            SchemaError::RecursiveReference(path) if path == "#/types/A"
        ));
    }

    #[test]
    fn reference_cycle_fails_naming_the_cyclic_path() {
        let mut registry = registry();

        registry
            .add_type(reference("A", "#/types/A", "", "#/types/B"))
            .unwrap();
        registry
            .add_type(reference("B", "#/types/B", "", "#/types/A"))
            .unwrap();

        let err = registry.types().unwrap_err();
        assert!(matches!(
            err.root_cause(),
            SchemaError::RecursiveReference(path) if path == "#/types/A"
        ));
        // The breadcrumb names the chain that led there
        assert!(err.to_string().contains("#/types/A"));
        assert!(err.to_string().contains("#/types/B"));
    }

    #[test]
    fn failed_array_items_wrap_the_array_path() {
        let mut registry = registry();

        let array_meta = TypeMeta::new("List", "#/types/List", "", false).unwrap();
        let items = Arc::new(reference(
            "items",
            "#/types/List/items",
            "",
            "#/types/Missing",
        ));
        registry
            .add_type(TypeDescriber::Array(Array::new(array_meta, items).unwrap()))
            .unwrap();

        let err = registry.types().unwrap_err();
        // The breadcrumb names the array, the root cause names the items
        // reference and its missing target
        assert!(err.to_string().starts_with("can't resolve '#/types/List'"));
        assert!(matches!(
            err.root_cause(),
            SchemaError::ReferenceNotFound { reference, path }
                if reference == "#/types/Missing" && path == "#/types/List/items"
        ));
    }

    #[test]
    fn failed_resolution_commits_nothing() {
        let mut registry = registry();

        registry
            .add_type(scalar("A", "#/types/A", "", vec![], json!("a")))
            .unwrap();
        registry
            .add_type(reference("B", "#/types/B", "", "#/types/Missing"))
            .unwrap();

        assert!(registry.types().is_err());

        // Fixing the input by adding the missing target makes the next
        // read succeed, with no half-resolved leftovers in between
        registry
            .add_type(scalar("Missing", "#/types/Missing", "", vec![], json!("m")))
            .unwrap();

        let types = registry.types().unwrap();
        assert_eq!(types.len(), 3);
        assert_eq!(types[1].reference_name(), Some("Missing"));
    }
}
