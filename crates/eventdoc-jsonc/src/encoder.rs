//! The formatted JSONC writer
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::io::{self, Write};

use crate::value::Value;

/// Writes [`Value`]s formatted for humans: tab indentation, one child per
/// line, trailing commas between siblings, and ` // comment` suffixes for
/// commented values.
#[derive(Debug)]
pub struct Encoder<W: Write> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Encode `value` to the underlying writer
    pub fn encode(&mut self, value: &Value) -> io::Result<()> {
        self.write_value(value, 1, false)
    }

    fn write_value(&mut self, value: &Value, level: usize, add_comma: bool) -> io::Result<()> {
        match value {
            Value::Null => self.write_literal("null", add_comma),
            Value::Bool(b) => self.write_literal(&b.to_string(), add_comma),
            Value::Number(n) => self.write_literal(&n.to_string(), add_comma),
            Value::String(s) => self.write_literal(&format!("\"{s}\""), add_comma),
            Value::Commented { comment, value } => {
                self.write_value(value, level, add_comma)?;

                if !comment.is_empty() {
                    write!(self.writer, " // {comment}")?;
                }

                Ok(())
            }
            Value::Map(entries) => {
                // BTreeMap already iterates keys in ascending order
                let entries: Vec<(&String, &Value)> = entries.iter().collect();
                self.write_entries(&entries, level, add_comma)
            }
            Value::OrderedMap(entries) => {
                let entries: Vec<(&String, &Value)> =
                    entries.iter().map(|(key, value)| (key, value)).collect();
                self.write_entries(&entries, level, add_comma)
            }
            Value::Array(members) => {
                write!(self.writer, "[")?;

                let last_index = members.len().saturating_sub(1);
                for (index, member) in members.iter().enumerate() {
                    self.write_new_line(level)?;
                    self.write_value(member, level + 1, index < last_index)?;
                }

                self.write_close_block("]", level, add_comma)
            }
        }
    }

    fn write_entries(
        &mut self,
        entries: &[(&String, &Value)],
        level: usize,
        add_comma: bool,
    ) -> io::Result<()> {
        write!(self.writer, "{{")?;

        let last_index = entries.len().saturating_sub(1);
        for (index, (key, value)) in entries.iter().enumerate() {
            self.write_new_line(level)?;
            write!(self.writer, "\"{key}\": ")?;
            self.write_value(value, level + 1, index < last_index)?;
        }

        self.write_close_block("}", level, add_comma)
    }

    fn write_literal(&mut self, literal: &str, add_comma: bool) -> io::Result<()> {
        write!(self.writer, "{literal}")?;
        self.write_comma(add_comma)
    }

    fn write_comma(&mut self, add_comma: bool) -> io::Result<()> {
        if add_comma {
            write!(self.writer, ",")?;
        }

        Ok(())
    }

    fn write_new_line(&mut self, level: usize) -> io::Result<()> {
        write!(self.writer, "\n{}", "\t".repeat(level))
    }

    fn write_close_block(
        &mut self,
        closing_sequence: &str,
        current_level: usize,
        add_comma: bool,
    ) -> io::Result<()> {
        write!(
            self.writer,
            "\n{}{closing_sequence}",
            "\t".repeat(current_level - 1)
        )?;
        self.write_comma(add_comma)
    }
}
