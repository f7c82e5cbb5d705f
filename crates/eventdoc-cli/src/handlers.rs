//! Subcommand handlers
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use colored::Colorize;
use tracing::info;

use eventdoc_confluence::{template, Client, Generator, TemplateWriter};
use eventdoc_schema::parser::Decoder;
use eventdoc_schema::SchemaRegistry;

use crate::cli::{CheckArgs, PublishArgs, RenderArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::ResultWriter;

/// Decode and resolve the document, reporting what it contains
pub fn handle_check(args: CheckArgs, use_color: bool) -> Result<()> {
    let mut registry = decode_file(&args.lifecycle_file, None)?;

    // Reads force resolution, so reference and cycle errors surface here
    let types = registry.types()?;
    let published = registry.published_events()?;
    let consumed = registry.consumed_events()?;

    let summary = format!(
        "{} types, {} published events, {} consumed events",
        types.len(),
        published.len(),
        consumed.len()
    );

    if use_color {
        println!("{} {summary}", "lifecycle document is valid:".green());
    } else {
        println!("lifecycle document is valid: {summary}");
    }

    Ok(())
}

/// Render the page body to stdout or a file
pub fn handle_render(args: RenderArgs, _config: &Config) -> Result<()> {
    let mut registry = decode_file(&args.lifecycle_file, None)?;

    let data = TemplateWriter::new().prepare(&mut registry)?;
    let body = template::render(&data);

    match args.output_file {
        Some(path) => {
            std::fs::write(&path, &body)?;
            info!(path = %path.display(), "documentation body written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

/// Full pipeline: decode, render, and publish to every configured page
pub async fn handle_publish(args: PublishArgs, config: &Config, use_color: bool) -> Result<()> {
    let mut registry = decode_file(&args.lifecycle_file, args.title_prefix.as_deref())?;

    let client = Client::new(&config.confluence.host, config.auth())?;
    let generator = Generator::new(client);

    let results = generator.generate(&mut registry).await?;

    let mut writer = ResultWriter::new(args.output_format, use_color);
    let mut failures = String::new();

    for result in results {
        match result {
            Ok(content) => writer.add(&content),
            Err(page_error) => {
                failures.push_str(&format!("\n\t - {page_error}"));
            }
        }
    }

    if !failures.is_empty() {
        return Err(Error::Pages(failures));
    }

    writer.finish()
}

/// Open and decode a lifecycle document into a fresh registry. The title
/// prefix must be in place before decoding, pages register during it.
fn decode_file(path: &Path, title_prefix: Option<&str>) -> Result<SchemaRegistry> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(source),
    })?;

    let mut registry = SchemaRegistry::new();
    if let Some(prefix) = title_prefix {
        registry.set_page_title_prefix(prefix);
    }

    Decoder::new().decode(BufReader::new(file), &mut registry)?;
    info!(path = %path.display(), "lifecycle document decoded");

    Ok(registry)
}
