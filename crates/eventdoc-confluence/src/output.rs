//! View model handed from the writer to the page template
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

/// Everything the page template needs, in declaration order
#[derive(Debug, Default)]
pub struct OutputData {
    pub types: Vec<TypeOutput>,
    pub published_events: Vec<PublishedEventOutput>,
    pub consumed_events: Vec<ConsumedEventOutput>,
}

/// One shared type ready for rendering. Scalars carry their bare example
/// literal; composites carry an annotated JSONC example.
#[derive(Debug)]
pub struct TypeOutput {
    pub name: String,
    pub type_keyword: String,
    pub description: String,
    pub nullable: bool,
    /// Format hint, empty when absent
    pub format: String,
    /// Enum literals in declaration order, empty when unrestricted
    pub enum_values: Vec<String>,
    pub example: String,
}

impl TypeOutput {
    /// Multiline examples render as code blocks, single-line ones inline
    pub fn example_is_multiline(&self) -> bool {
        self.example.contains('\n')
    }
}

/// One published event; the name already carries its visibility emoji
#[derive(Debug)]
pub struct PublishedEventOutput {
    pub name: String,
    pub visibility: String,
    pub module: String,
    pub description: String,
    pub example: String,
}

#[derive(Debug)]
pub struct ConsumedEventOutput {
    pub name: String,
    pub description: String,
}
