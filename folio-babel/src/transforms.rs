//! String-in, string-out helpers over the two stages
//!
//! These wrap the streaming APIs for callers that already hold the whole source in memory.

use crate::compile::compile_str;
use crate::emitter::EventLog;
use crate::error::FolioError;
use crate::formats::latex::{LatexEmitter, LatexOptions};
use crate::ir::events::Event;
use crate::ir::nodes::Document;
use crate::normalize::normalize_str;

/// Compiles canonical source to a complete LaTeX document.
pub fn compile_to_latex(source: &str, options: &LatexOptions) -> Result<String, FolioError> {
    let mut out = Vec::new();
    compile_str(source, LatexEmitter::new(&mut out, options.clone()))?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Compiles canonical source, returning the model and the events it produced.
pub fn compile_to_events(source: &str) -> Result<(Document, Vec<Event>), FolioError> {
    let mut log = EventLog::new();
    let document = compile_str(source, &mut log)?;
    Ok((document, log.events))
}

/// Normalizes raw source and returns the canonical text.
pub fn normalize_to_string(source: &str) -> Result<String, FolioError> {
    let lines = normalize_str(source)?;
    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

/// Pretty JSON dump of the document model.
pub fn document_to_json(document: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

/// Raw manuscript straight to LaTeX: normalize, then compile the canonical text.
pub fn manuscript_to_latex(source: &str, options: &LatexOptions) -> Result<String, FolioError> {
    let canonical = normalize_to_string(source)?;
    compile_to_latex(&canonical, options)
}
