//! CLI-specific transforms
//!
//! This module defines the views `folio inspect` can print. Each one exposes a different stage
//! of the pipeline:
//!
//! 1. **Normalization** - Raw manuscript → canonical text
//!    - `normalized`: The canonical text, exactly as `folio normalize` would write it
//!
//! 2. **Compilation** - Canonical text → event stream → document model
//!    - `events`: One line per event, in emission order
//!    - `document-json`: The document model as JSON
//!
//! The compiling views expect canonical input. Run `normalized` first on a raw manuscript.

use folio_babel::ir::events::Event;
use folio_babel::ir::nodes::plain_text;
use folio_babel::transforms::{compile_to_events, document_to_json, normalize_to_string};

/// All available inspect views
pub const AVAILABLE_TRANSFORMS: &[&str] = &["document-json", "events", "normalized"];

pub const DEFAULT_TRANSFORM: &str = "document-json";

/// Execute a named transform on the source text of a manuscript
pub fn execute_transform(source: &str, transform_name: &str) -> Result<String, String> {
    match transform_name {
        "normalized" => normalize_to_string(source).map_err(|e| e.to_string()),
        "events" => {
            let (_, events) = compile_to_events(source).map_err(|e| e.to_string())?;
            let mut out = String::new();
            for event in &events {
                out.push_str(&describe_event(event));
                out.push('\n');
            }
            Ok(out)
        }
        "document-json" => {
            let (document, _) = compile_to_events(source).map_err(|e| e.to_string())?;
            let mut json = document_to_json(&document)
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            json.push('\n');
            Ok(json)
        }
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn describe_event(event: &Event) -> String {
    let name = event.name();
    match event {
        Event::FrontMatter { title, author } => {
            format!("{name} title={} author={}", plain_text(title), plain_text(author))
        }
        Event::Section(section) => format!(
            "{name} level={} ordinal={} {}",
            section.level,
            section.ordinal,
            plain_text(&section.title)
        ),
        Event::Paragraph(paragraph) => format!("{name} {}", plain_text(&paragraph.content)),
        Event::StartTable { columns } => format!("{name} columns={columns}"),
        Event::TableRow(fields) => format!("{name} {}", fields.join(" | ")),
        Event::StartDocument | Event::EndTable | Event::EndDocument => name.to_string(),
    }
}
