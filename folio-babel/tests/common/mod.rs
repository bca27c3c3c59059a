//! Shared helpers for the integration tests.

use folio_babel::ir::events::Event;
use folio_babel::transforms::compile_to_events;

/// A canonical manuscript touching every block kind.
pub const ROUND_TRIP: &str = "T\nA\n++Ch1\nHello\n---\na|b\nc|d\n---\n";

/// Event names the compiler produced for `source`.
pub fn event_names(source: &str) -> Vec<&'static str> {
    let (_, events) = compile_to_events(source).expect("source should compile");
    events.iter().map(Event::name).collect()
}

/// Builds a manuscript from a title, an author and body lines.
pub fn manuscript(body: &[&str]) -> String {
    let mut source = String::from("书名\n作者\n");
    for line in body {
        source.push_str(line);
        source.push('\n');
    }
    source
}
