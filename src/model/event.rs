use chrono::DateTime;
use chrono_tz::Tz;

/// Summary used when a source entry carries no title.
pub const DEFAULT_SUMMARY: &str = "Veranstaltung";

/// A normalized, zone-resolved calendar event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub summary: String,
    /// May be empty; the description region is skipped in that case.
    pub description: String,
    /// May be empty; the footer location line is skipped in that case.
    pub location: String,
    pub start: DateTime<Tz>,
    /// Not validated against `start`; see [`Event::effective_end`].
    pub end: Option<DateTime<Tz>>,
}

impl Event {
    pub fn new(summary: impl Into<String>, start: DateTime<Tz>) -> Self {
        Self {
            summary: summary.into(),
            description: String::new(),
            location: String::new(),
            start,
            end: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_end(mut self, end: DateTime<Tz>) -> Self {
        self.end = Some(end);
        self
    }

    /// End time worth displaying: absent when missing, equal to `start`, or earlier than `start`.
    pub fn effective_end(&self) -> Option<DateTime<Tz>> {
        self.end.filter(|end| *end > self.start)
    }
}
