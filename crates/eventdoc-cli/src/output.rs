//! Success reporting for the publish command
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use colored::Colorize;

use eventdoc_confluence::Content;

use crate::cli::OutputFormat;
use crate::error::Result;

/// Collects published page links and reports them in the selected format
#[derive(Debug)]
pub enum ResultWriter {
    /// Prints one line per page as results arrive
    Cli { use_color: bool },
    /// Buffers links and emits a GitHub Actions output parameter at the end
    GithubAction { links: Vec<String> },
}

impl ResultWriter {
    pub fn new(format: OutputFormat, use_color: bool) -> Self {
        match format {
            OutputFormat::Cli => Self::Cli { use_color },
            OutputFormat::GithubAction => Self::GithubAction { links: Vec::new() },
        }
    }

    pub fn add(&mut self, content: &Content) {
        let url = content.links.page_url();

        match self {
            Self::Cli { use_color } => {
                if *use_color {
                    println!("{} {url}", "documentation generated:".green());
                } else {
                    println!("documentation generated: {url}");
                }
            }
            Self::GithubAction { links } => links.push(url),
        }
    }

    /// Emit the buffered report, if the format has one
    pub fn finish(self) -> Result<()> {
        if let Self::GithubAction { links } = self {
            println!("links={}", serde_json::to_string(&links)?);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventdoc_confluence::client::{Body, Links, Space, Storage, Version};

    fn content(base: &str, tiny: &str) -> Content {
        Content {
            id: "1".to_string(),
            content_type: "page".to_string(),
            title: "Lifecycle".to_string(),
            space: Space {
                key: "SPACE".to_string(),
            },
            ancestors: vec![],
            body: Body {
                storage: Storage {
                    value: String::new(),
                    representation: "storage".to_string(),
                },
            },
            version: Version {
                number: 1,
                message: String::new(),
            },
            links: Links {
                base: base.to_string(),
                tiny_ui: tiny.to_string(),
            },
        }
    }

    #[test]
    fn github_writer_collects_absolute_links() {
        let mut writer = ResultWriter::new(OutputFormat::GithubAction, false);
        writer.add(&content("https://x.atlassian.net/wiki", "/x/AbCd"));

        let ResultWriter::GithubAction { links } = &writer else {
            panic!("expected github writer");
        };
        assert_eq!(links, &["https://x.atlassian.net/wiki/x/AbCd"]);
    }
}
