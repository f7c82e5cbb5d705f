//! Publishes the rendered documentation to every configured page
//!
//! The body is rendered once and reused for every page. Pages publish
//! concurrently with a small in-flight cap and a per-page deadline; one
//! page failing never stops the others, results are collected per page.
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info};

use eventdoc_schema::types::ConfluencePage;
use eventdoc_schema::SchemaRegistry;

use crate::client::{Ancestor, Body, Client, Content, FoundContent, Space, Storage, Version};
use crate::error::{PublishError, PublishResult};
use crate::template;
use crate::writer::TemplateWriter;

const MAX_IN_FLIGHT_REQUESTS: usize = 2;
const REQUEST_TIMEOUT_SECS: u64 = 60;
const VERSION_MESSAGE: &str = "Documentation generated by eventdoc";

/// Outcome of publishing one configured page
pub type PageResult = PublishResult<Content>;

/// Renders the documentation body and creates or updates the configured
/// Confluence pages
pub struct Generator {
    client: Arc<Client>,
    writer: TemplateWriter,
}

impl Generator {
    pub fn new(client: Client) -> Self {
        Self {
            client: Arc::new(client),
            writer: TemplateWriter::new(),
        }
    }

    /// Publish every page configured in the registry. The returned vector
    /// has one entry per page; order follows completion, not declaration.
    pub async fn generate(&self, registry: &mut SchemaRegistry) -> PublishResult<Vec<PageResult>> {
        let pages: Vec<ConfluencePage> = registry.confluence()?.pages().to_vec();

        let data = self.writer.prepare(registry)?;
        let body = Arc::new(template::render(&data));
        debug!(pages = pages.len(), body_bytes = body.len(), "rendered documentation body");

        let mut in_flight = JoinSet::new();
        let mut results = Vec::with_capacity(pages.len());

        for page in pages {
            while in_flight.len() >= MAX_IN_FLIGHT_REQUESTS {
                if let Some(joined) = in_flight.join_next().await {
                    results.push(flatten(joined));
                }
            }

            let client = self.client.clone();
            let body = body.clone();
            in_flight.spawn(async move { publish_page(client, page, body).await });
        }

        while let Some(joined) = in_flight.join_next().await {
            results.push(flatten(joined));
        }

        Ok(results)
    }
}

fn flatten(joined: Result<PageResult, tokio::task::JoinError>) -> PageResult {
    match joined {
        Ok(result) => result,
        Err(join_error) => Err(PublishError::Worker(join_error.to_string())),
    }
}

async fn publish_page(client: Arc<Client>, page: ConfluencePage, body: Arc<String>) -> PageResult {
    let deadline = Duration::from_secs(REQUEST_TIMEOUT_SECS);

    let outcome = match timeout(deadline, create_or_update(&client, &page, &body)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(PublishError::Timeout(REQUEST_TIMEOUT_SECS)),
    };

    outcome.map_err(|source| PublishError::Page {
        title: page.title().to_string(),
        space_key: page.space_key().to_string(),
        ancestor_id: page.ancestor_id().to_string(),
        source: Box::new(source),
    })
}

async fn create_or_update(
    client: &Client,
    page: &ConfluencePage,
    body: &str,
) -> PublishResult<Content> {
    let mut content = Content {
        id: String::new(),
        content_type: "page".to_string(),
        title: page.title().to_string(),
        space: Space {
            key: page.space_key().to_string(),
        },
        ancestors: vec![Ancestor {
            id: page.ancestor_id().to_string(),
        }],
        body: Body {
            storage: Storage {
                value: body.to_string(),
                representation: "storage".to_string(),
            },
        },
        version: Version {
            number: 1,
            message: VERSION_MESSAGE.to_string(),
        },
        links: Default::default(),
    };

    match find_existing(client, page).await? {
        Some(existing) => {
            content.id = existing.id;
            content.version.number = existing.version.number + 1;

            info!(title = %page.title(), version = content.version.number, "updating existing page");
            client.update_content(&content).await
        }
        None => {
            info!(title = %page.title(), "creating new page");
            client.create_content(&content).await
        }
    }
}

/// Look for a page with the same title under the same ancestor, paging
/// through the search results
async fn find_existing(
    client: &Client,
    page: &ConfluencePage,
) -> PublishResult<Option<FoundContent>> {
    let mut start = 0;

    loop {
        let search = client
            .find_content(page.title(), page.space_key(), start)
            .await
            .map_err(|source| PublishError::Search(Box::new(source)))?;

        for found in search.results {
            if found.title == page.title()
                && found
                    .ancestors
                    .iter()
                    .any(|ancestor| ancestor.id == page.ancestor_id())
            {
                return Ok(Some(found));
            }
        }

        if search.size > search.limit {
            start += search.limit;
        } else {
            return Ok(None);
        }
    }
}
