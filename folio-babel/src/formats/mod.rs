//! Output format implementations
//!
//! Each format is an [`Emitter`](crate::emitter::Emitter) that turns the compiler's event
//! stream into a concrete markup.

pub mod latex;
