//! Emitter trait definition
//!
//! The compiler never builds output text itself. It hands every [`Event`] to an [`Emitter`] as
//! soon as the event is known, so output is produced in the same single pass as parsing.

use crate::error::{FolioError, StructuralError};
use crate::ir::events::Event;

/// Consumer of the compiler's event stream.
///
/// # Examples
///
/// ```ignore
/// struct Counter(usize);
///
/// impl Emitter for Counter {
///     fn emit(&mut self, _event: &Event) -> Result<(), FolioError> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Emitter {
    /// Name of the output this emitter produces (e.g., "latex")
    fn name(&self) -> &str;

    fn emit(&mut self, event: &Event) -> Result<(), FolioError>;

    /// Called once when compilation stops on a structural error.
    ///
    /// Everything emitted so far stays in place. Emitters backed by a sink should flush it and
    /// may record the failure in their output.
    fn abort(&mut self, _error: &StructuralError) -> Result<(), FolioError> {
        Ok(())
    }
}

impl<E: Emitter + ?Sized> Emitter for &mut E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn emit(&mut self, event: &Event) -> Result<(), FolioError> {
        (**self).emit(event)
    }

    fn abort(&mut self, error: &StructuralError) -> Result<(), FolioError> {
        (**self).abort(error)
    }
}

/// Records events in memory.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(Event::name).collect()
    }
}

impl Emitter for EventLog {
    fn name(&self) -> &str {
        "events"
    }

    fn emit(&mut self, event: &Event) -> Result<(), FolioError> {
        self.events.push(event.clone());
        Ok(())
    }
}
