//! Project identity and Confluence publishing target
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};

/// The documented project. Created once per document, never reassigned.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    confluence: Confluence,
}

impl Project {
    pub fn new(name: impl Into<String>) -> SchemaResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaError::definition(
                "#/name",
                "project name cannot be empty",
            ));
        }

        Ok(Self {
            name,
            confluence: Confluence::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn confluence(&self) -> &Confluence {
        &self.confluence
    }

    pub(crate) fn confluence_mut(&mut self) -> &mut Confluence {
        &mut self.confluence
    }
}

/// Ordered list of Confluence pages to publish the documentation to
#[derive(Debug, Clone, Default)]
pub struct Confluence {
    pages: Vec<ConfluencePage>,
}

impl Confluence {
    pub fn pages(&self) -> &[ConfluencePage] {
        &self.pages
    }

    pub(crate) fn add_page(&mut self, page: ConfluencePage) {
        self.pages.push(page);
    }
}

/// An immutable Confluence page target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfluencePage {
    title: String,
    space_key: String,
    // parent page ID
    ancestor_id: String,
}

impl ConfluencePage {
    pub fn new(
        title: impl Into<String>,
        space_key: impl Into<String>,
        ancestor_id: impl Into<String>,
    ) -> SchemaResult<Self> {
        let title = title.into();
        let space_key = space_key.into();
        let ancestor_id = ancestor_id.into();

        if title.is_empty() {
            return Err(SchemaError::definition(
                "#/confluence/pages",
                "title cannot be empty",
            ));
        }

        if space_key.is_empty() {
            return Err(SchemaError::definition(
                "#/confluence/pages",
                "space key cannot be empty",
            ));
        }

        if ancestor_id.is_empty() {
            return Err(SchemaError::definition(
                "#/confluence/pages",
                "ancestor id cannot be empty",
            ));
        }

        Ok(Self {
            title,
            space_key,
            ancestor_id,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn space_key(&self) -> &str {
        &self.space_key
    }

    pub fn ancestor_id(&self) -> &str {
        &self.ancestor_id
    }
}
