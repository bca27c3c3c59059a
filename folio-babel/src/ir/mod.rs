//! Intermediate Representation (IR) for folio documents.
//!
//! `nodes` is the document model the compiler builds; `events` is the flat stream it hands to
//! emitters while it parses.

pub mod events;
pub mod nodes;
