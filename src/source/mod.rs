//! Event sources.
//!
//! A source hands the deck assembler normalized, zone-resolved events. Malformed entries are
//! dropped inside the source and never reach the core.

mod json;

pub use json::JsonEventFiles;

use crate::foundation::error::SlideResult;
use crate::model::event::Event;

/// Produces the event list for one generation run.
pub trait EventSource {
    fn events(&self) -> SlideResult<Vec<Event>>;
}

impl EventSource for [Event] {
    fn events(&self) -> SlideResult<Vec<Event>> {
        Ok(self.to_vec())
    }
}

impl EventSource for Vec<Event> {
    fn events(&self) -> SlideResult<Vec<Event>> {
        Ok(self.clone())
    }
}
