//! Confluence storage-format page body
//!
//! Renders [`OutputData`] as XHTML in the Confluence "storage"
//! representation. Annotated examples go through code-block macros so the
//! comments keep their alignment.
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use crate::output::{OutputData, PublishedEventOutput, TypeOutput};

/// Render the whole page body
pub fn render(data: &OutputData) -> String {
    let mut page = String::new();

    if !data.types.is_empty() {
        page.push_str("<h1>Shared types</h1>");
        for type_output in &data.types {
            render_type(&mut page, type_output);
        }
    }

    if !data.published_events.is_empty() {
        page.push_str("<h1>Published events</h1>");
        for event in &data.published_events {
            render_published_event(&mut page, event);
        }
    }

    if !data.consumed_events.is_empty() {
        page.push_str("<h1>Consumed events</h1><table><tbody>");
        page.push_str("<tr><th>Event</th><th>Description</th></tr>");
        for event in &data.consumed_events {
            page.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                escape(&event.name),
                escape(&event.description),
            ));
        }
        page.push_str("</tbody></table>");
    }

    page
}

fn render_type(page: &mut String, type_output: &TypeOutput) {
    page.push_str(&format!("<h2>{}</h2>", escape(&type_output.name)));
    page.push_str("<table><tbody>");

    if !type_output.description.is_empty() {
        attribute_row(page, "Description", &escape(&type_output.description));
    }

    attribute_row(page, "Type", &escape(&type_output.type_keyword));

    if type_output.nullable {
        attribute_row(page, "Nullable", "yes");
    }

    if !type_output.format.is_empty() {
        attribute_row(page, "Format", &escape(&type_output.format));
    }

    if !type_output.enum_values.is_empty() {
        let members: Vec<String> = type_output.enum_values.iter().map(|m| escape(m)).collect();
        attribute_row(page, "Enum", &members.join(", "));
    }

    if !type_output.example.is_empty() {
        if type_output.example_is_multiline() {
            attribute_row(page, "Example", &code_block(&type_output.example));
        } else {
            attribute_row(
                page,
                "Example",
                &format!("<code>{}</code>", escape(&type_output.example)),
            );
        }
    }

    page.push_str("</tbody></table>");
}

fn render_published_event(page: &mut String, event: &PublishedEventOutput) {
    page.push_str(&format!("<h2>{}</h2>", escape(&event.name)));
    page.push_str("<table><tbody>");

    attribute_row(page, "Visibility", &escape(&event.visibility));

    if !event.module.is_empty() {
        attribute_row(page, "Module", &escape(&event.module));
    }

    if !event.description.is_empty() {
        attribute_row(page, "Description", &escape(&event.description));
    }

    attribute_row(page, "Example", &code_block(&event.example));

    page.push_str("</tbody></table>");
}

fn attribute_row(page: &mut String, label: &str, value: &str) {
    page.push_str(&format!("<tr><th>{label}</th><td>{value}</td></tr>"));
}

/// Code-block macro; examples are JSONC so the js highlighter fits best
fn code_block(example: &str) -> String {
    format!(
        "<ac:structured-macro ac:name=\"code\">\
         <ac:parameter ac:name=\"language\">js</ac:parameter>\
         <ac:plain-text-body><![CDATA[{example}]]></ac:plain-text-body>\
         </ac:structured-macro>"
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ConsumedEventOutput;

    #[test]
    fn renders_sections_only_when_populated() {
        let page = render(&OutputData::default());
        assert_eq!(page, "");

        let data = OutputData {
            consumed_events: vec![ConsumedEventOutput {
                name: "ORDER_PLACED".to_string(),
                description: "Starts fulfilment".to_string(),
            }],
            ..OutputData::default()
        };

        let page = render(&data);
        assert!(page.contains("<h1>Consumed events</h1>"));
        assert!(page.contains("<td>ORDER_PLACED</td>"));
        assert!(!page.contains("<h1>Shared types</h1>"));
    }

    #[test]
    fn multiline_examples_render_as_code_macros() {
        let data = OutputData {
            types: vec![TypeOutput {
                name: "Cake".to_string(),
                type_keyword: "object".to_string(),
                description: String::new(),
                nullable: false,
                format: String::new(),
                enum_values: Vec::new(),
                example: "{\n\t\"id\": \"1\"\n}".to_string(),
            }],
            ..OutputData::default()
        };

        let page = render(&data);
        assert!(page.contains("<ac:structured-macro ac:name=\"code\">"));
        assert!(page.contains("<![CDATA[{\n\t\"id\": \"1\"\n}]]>"));
    }

    #[test]
    fn escapes_markup_in_text_fields() {
        let data = OutputData {
            types: vec![TypeOutput {
                name: "A<B>".to_string(),
                type_keyword: "string".to_string(),
                description: "uses & abuses".to_string(),
                nullable: false,
                format: String::new(),
                enum_values: Vec::new(),
                example: "x".to_string(),
            }],
            ..OutputData::default()
        };

        let page = render(&data);
        assert!(page.contains("<h2>A&lt;B&gt;</h2>"));
        assert!(page.contains("uses &amp; abuses"));
    }
}
