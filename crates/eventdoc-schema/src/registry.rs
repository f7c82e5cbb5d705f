//! Schema registry: ingestion API and order-preserving read API
//!
//! The registry holds the project identity, declared types, and events.
//! Ingestion is append-only; reads of types and published events force
//! resolution lazily, exactly once per mutation (see [`crate::resolver`]).
//!
//! The registry does not deal with concurrency: callers serialize all
//! ingestion before the first read.
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::types::{
    Confluence, ConfluencePage, ConsumedEvent, Project, PublishedEvent, TypeDescriber,
};

/// In-memory schema registry for a single document run.
///
/// Maps are keyed by path (types) or name (events); parallel key lists
/// record declaration order, since map iteration order is unspecified.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    page_title_prefix: Option<String>,

    project: Option<Project>,

    pub(crate) types: HashMap<String, Arc<TypeDescriber>>,
    pub(crate) type_paths: Vec<String>,

    pub(crate) published: HashMap<String, PublishedEvent>,
    pub(crate) published_names: Vec<String>,

    consumed: HashMap<String, ConsumedEvent>,
    consumed_names: Vec<String>,

    // set by a successful resolution pass, cleared by any add
    pub(crate) has_resolved: bool,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the project. Fails if a project already exists.
    pub fn set_project(&mut self, name: &str) -> SchemaResult<()> {
        if self.project.is_some() {
            return Err(SchemaError::ProjectAlreadySet);
        }

        self.project = Some(Project::new(name)?);
        Ok(())
    }

    /// Prefix prepended to every Confluence page title
    pub fn set_page_title_prefix(&mut self, prefix: impl Into<String>) {
        self.page_title_prefix = Some(prefix.into());
    }

    /// Append a Confluence page target. An empty title falls back to
    /// `Life Cycle Events: <project>`.
    pub fn add_confluence_page(
        &mut self,
        title: &str,
        space_key: &str,
        ancestor_id: &str,
    ) -> SchemaResult<()> {
        self.ensure_configured()?;
        let project = self.project.as_mut().ok_or(SchemaError::NotConfigured)?;

        let mut title = if title.is_empty() {
            format!("Life Cycle Events: {}", project.name())
        } else {
            title.to_string()
        };

        if let Some(prefix) = self.page_title_prefix.as_deref() {
            if !prefix.is_empty() {
                title = format!("{prefix} {title}");
            }
        }

        let page = ConfluencePage::new(title, space_key, ancestor_id)?;
        project.confluence_mut().add_page(page);
        Ok(())
    }

    pub fn project(&self) -> SchemaResult<&Project> {
        self.project.as_ref().ok_or(SchemaError::NotConfigured)
    }

    pub fn confluence(&self) -> SchemaResult<&Confluence> {
        Ok(self.project()?.confluence())
    }

    /// Append a type declaration keyed by its path
    pub fn add_type(&mut self, type_definition: TypeDescriber) -> SchemaResult<()> {
        self.ensure_configured()?;

        let path = type_definition.path().to_string();
        if self.types.contains_key(&path) {
            return Err(SchemaError::DuplicateType(path));
        }

        self.has_resolved = false;

        debug!(path = %path, "registering type");
        self.types.insert(path.clone(), Arc::new(type_definition));
        self.type_paths.push(path);
        Ok(())
    }

    /// All declared types, resolved, in declaration order
    pub fn types(&mut self) -> SchemaResult<Vec<Arc<TypeDescriber>>> {
        self.resolve()?;

        Ok(self
            .type_paths
            .iter()
            .map(|path| self.types[path].clone())
            .collect())
    }

    /// Append a published event keyed by its name
    pub fn add_published_event(&mut self, event: PublishedEvent) -> SchemaResult<()> {
        self.ensure_configured()?;

        let name = event.name().to_string();
        if self.published.contains_key(&name) {
            return Err(SchemaError::DuplicatePublishedEvent(name));
        }

        self.has_resolved = false;

        debug!(name = %name, "registering published event");
        self.published.insert(name.clone(), event);
        self.published_names.push(name);
        Ok(())
    }

    /// All published events, payload types resolved, in declaration order
    pub fn published_events(&mut self) -> SchemaResult<Vec<PublishedEvent>> {
        self.resolve()?;

        Ok(self
            .published_names
            .iter()
            .map(|name| self.published[name].clone())
            .collect())
    }

    /// Append a consumed event keyed by its name. Consumed events carry
    /// plain text only, so they never invalidate the resolved state.
    pub fn add_consumed_event(&mut self, event: ConsumedEvent) -> SchemaResult<()> {
        self.ensure_configured()?;

        let name = event.name().to_string();
        if self.consumed.contains_key(&name) {
            return Err(SchemaError::DuplicateConsumedEvent(name));
        }

        self.consumed.insert(name.clone(), event);
        self.consumed_names.push(name);
        Ok(())
    }

    /// All consumed events in declaration order
    pub fn consumed_events(&self) -> SchemaResult<Vec<ConsumedEvent>> {
        self.ensure_configured()?;

        Ok(self
            .consumed_names
            .iter()
            .map(|name| self.consumed[name].clone())
            .collect())
    }

    pub(crate) fn ensure_configured(&self) -> SchemaResult<()> {
        if self.project.is_none() {
            return Err(SchemaError::NotConfigured);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Scalar, ScalarKind, TypeMeta};
    use serde_json::json;

    fn string_type(name: &str, path: &str) -> TypeDescriber {
        let meta = TypeMeta::new(name, path, "", false).unwrap();
        TypeDescriber::Scalar(
            Scalar::new(meta, ScalarKind::String, None, vec![], json!("banana")).unwrap(),
        )
    }

    #[test]
    fn accessors_fail_before_project_is_set() {
        let mut registry = SchemaRegistry::new();

        assert!(matches!(
            registry.add_type(string_type("A", "#/types/A")),
            Err(SchemaError::NotConfigured)
        ));
        assert!(matches!(registry.types(), Err(SchemaError::NotConfigured)));
        assert!(matches!(
            registry.consumed_events(),
            Err(SchemaError::NotConfigured)
        ));
        assert!(matches!(
            registry.confluence(),
            Err(SchemaError::NotConfigured)
        ));
    }

    #[test]
    fn project_cannot_be_overridden() {
        let mut registry = SchemaRegistry::new();
        registry.set_project("first").unwrap();

        assert!(matches!(
            registry.set_project("second"),
            Err(SchemaError::ProjectAlreadySet)
        ));
        assert_eq!(registry.project().unwrap().name(), "first");
    }

    #[test]
    fn duplicate_type_path_is_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.set_project("test").unwrap();

        registry.add_type(string_type("A", "#/types/A")).unwrap();
        assert!(matches!(
            registry.add_type(string_type("A", "#/types/A")),
            Err(SchemaError::DuplicateType(path)) if path == "#/types/A"
        ));
    }

    #[test]
    fn declaration_order_is_preserved() {
        let mut registry = SchemaRegistry::new();
        registry.set_project("test").unwrap();

        // Names chosen so alphabetical order differs from declaration order
        for name in ["Zeta", "Alpha", "Mango"] {
            registry
                .add_type(string_type(name, &format!("#/types/{name}")))
                .unwrap();
        }

        let types = registry.types().unwrap();
        let names: Vec<_> = types.iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mango"]);

        // A second read returns the same order again
        let types = registry.types().unwrap();
        let names: Vec<_> = types.iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mango"]);
    }

    #[test]
    fn consumed_events_keep_declaration_order() {
        let mut registry = SchemaRegistry::new();
        registry.set_project("test").unwrap();

        for name in ["B_EVENT", "A_EVENT"] {
            registry
                .add_consumed_event(ConsumedEvent::new(name, "some description").unwrap())
                .unwrap();
        }

        assert!(matches!(
            registry.add_consumed_event(ConsumedEvent::new("A_EVENT", "again").unwrap()),
            Err(SchemaError::DuplicateConsumedEvent(name)) if name == "A_EVENT"
        ));

        let events = registry.consumed_events().unwrap();
        let names: Vec<_> = events.iter().map(|e| e.name().to_string()).collect();
        assert_eq!(names, ["B_EVENT", "A_EVENT"]);
    }

    #[test]
    fn page_title_defaults_and_prefix() {
        let mut registry = SchemaRegistry::new();
        registry.set_project("super-cool-service").unwrap();
        registry.set_page_title_prefix("[draft]");

        registry.add_confluence_page("", "SPACE", "123").unwrap();
        registry
            .add_confluence_page("Custom title", "SPACE", "456")
            .unwrap();

        let pages = registry.confluence().unwrap().pages().to_vec();
        assert_eq!(
            pages[0].title(),
            "[draft] Life Cycle Events: super-cool-service"
        );
        assert_eq!(pages[1].title(), "[draft] Custom title");
        assert_eq!(pages[1].space_key(), "SPACE");
        assert_eq!(pages[1].ancestor_id(), "456");
    }

    #[test]
    fn empty_page_fields_are_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.set_project("test").unwrap();

        assert!(registry.add_confluence_page("T", "", "123").is_err());
        assert!(registry.add_confluence_page("T", "SPACE", "").is_err());
    }
}
