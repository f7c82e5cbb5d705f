//! Thin Confluence REST client
//!
//! Covers the three calls the publisher needs: paged content lookup by
//! title and space, content creation, and content update. Timeouts and
//! retries are the caller's concern.
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use reqwest::header;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PublishError, PublishResult};

/// How to authenticate against the Confluence API
#[derive(Debug, Clone)]
pub enum Auth {
    /// Atlassian account email plus API token
    Basic { email: String, api_key: String },
    /// Pre-built `Authorization` header value
    Header(String),
}

/// Confluence REST client bound to one host and credential set
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    host: String,
    auth: Auth,
}

impl Client {
    pub fn new(host: impl Into<String>, auth: Auth) -> PublishResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|source| PublishError::request("can't create HTTP client", source))?;

        Ok(Self {
            http,
            host: host.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Page through content matching `title` in `space_key`, expanding
    /// ancestors and version so the caller can detect an existing page
    pub async fn find_content(
        &self,
        title: &str,
        space_key: &str,
        start: u32,
    ) -> PublishResult<ContentSearch> {
        debug!(title, space_key, start, "searching confluence content");

        let response = self
            .request(Method::GET, format!("{}/rest/api/content", self.host))
            .query(&[
                ("title", title),
                ("spaceKey", space_key),
                ("type", "page"),
                ("expand", "ancestors,version"),
            ])
            .query(&[("start", start)])
            .send()
            .await
            .map_err(|source| PublishError::request("can't search confluence content", source))?;

        Self::parse(response).await
    }

    pub async fn create_content(&self, content: &Content) -> PublishResult<Content> {
        debug!(title = %content.title, "creating confluence content");

        let response = self
            .request(Method::POST, format!("{}/rest/api/content", self.host))
            .json(content)
            .send()
            .await
            .map_err(|source| PublishError::request("can't create confluence content", source))?;

        Self::parse(response).await
    }

    pub async fn update_content(&self, content: &Content) -> PublishResult<Content> {
        debug!(title = %content.title, id = %content.id, "updating confluence content");

        let response = self
            .request(
                Method::PUT,
                format!("{}/rest/api/content/{}", self.host, content.id),
            )
            .json(content)
            .send()
            .await
            .map_err(|source| PublishError::request("can't update confluence content", source))?;

        Self::parse(response).await
    }

    fn request(&self, method: Method, url: String) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);

        match &self.auth {
            Auth::Basic { email, api_key } => builder.basic_auth(email, Some(api_key)),
            Auth::Header(value) => builder.header(header::AUTHORIZATION, value),
        }
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> PublishResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|source| PublishError::request("can't decode confluence response", source))
    }
}

/// A page payload for create and update calls, and the API's answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: String,
    pub space: Space,
    #[serde(default)]
    pub ancestors: Vec<Ancestor>,
    pub body: Body,
    pub version: Version,
    #[serde(rename = "_links", default, skip_serializing)]
    pub links: Links,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ancestor {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub storage: Storage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storage {
    pub value: String,
    pub representation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub number: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Web links returned by the API, used to report the published page URL
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub base: String,
    #[serde(default, rename = "tinyui")]
    pub tiny_ui: String,
}

impl Links {
    /// Absolute short URL of the page
    pub fn page_url(&self) -> String {
        format!("{}{}", self.base, self.tiny_ui)
    }
}

/// One page of a content search
#[derive(Debug, Clone, Deserialize)]
pub struct ContentSearch {
    #[serde(default)]
    pub results: Vec<FoundContent>,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub size: u32,
}

/// Search result entry; only the fields the publisher matches on
#[derive(Debug, Clone, Deserialize)]
pub struct FoundContent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub ancestors: Vec<Ancestor>,
    pub version: Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_trailing_slash_is_normalized() {
        let client = Client::new(
            "https://example.atlassian.net/",
            Auth::Header("Basic abc".to_string()),
        )
        .unwrap();

        assert_eq!(client.host, "https://example.atlassian.net");
    }

    #[test]
    fn content_serializes_without_id_or_links_when_new() {
        let content = Content {
            id: String::new(),
            content_type: "page".to_string(),
            title: "Lifecycle".to_string(),
            space: Space {
                key: "SPACE".to_string(),
            },
            ancestors: vec![Ancestor {
                id: "123".to_string(),
            }],
            body: Body {
                storage: Storage {
                    value: "<p>hi</p>".to_string(),
                    representation: "storage".to_string(),
                },
            },
            version: Version {
                number: 1,
                message: "generated".to_string(),
            },
            links: Links::default(),
        };

        let json = serde_json::to_value(&content).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("_links").is_none());
        assert_eq!(json["type"], "page");
        assert_eq!(json["version"]["number"], 1);
    }

    #[test]
    fn search_results_tolerate_missing_fields() {
        let search: ContentSearch = serde_json::from_str(
            r#"{
                "results": [
                    {"id": "9", "title": "Lifecycle", "version": {"number": 3}}
                ],
                "start": 0,
                "limit": 25,
                "size": 1
            }"#,
        )
        .unwrap();

        assert_eq!(search.results.len(), 1);
        assert_eq!(search.results[0].version.number, 3);
        assert!(search.results[0].ancestors.is_empty());
    }
}
