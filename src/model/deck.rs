use std::path::PathBuf;

use crate::model::event::Event;

/// What a slide shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlideKind {
    Title,
    Event(Event),
    /// Static announcement image copied through from this source file.
    Info(PathBuf),
}

impl SlideKind {
    pub fn label(&self) -> &'static str {
        match self {
            SlideKind::Title => "title",
            SlideKind::Event(_) => "event",
            SlideKind::Info(_) => "info",
        }
    }
}

/// One planned output slide. Consumed exactly once by the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideDescriptor {
    /// 0-based position in the deck.
    pub index: usize,
    pub kind: SlideKind,
    /// File name (no directory) the rendered slide is written to.
    pub output_name: String,
}

/// Ordered slides for one generation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    pub slides: Vec<SlideDescriptor>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slide kind labels in deck order, e.g. `["title", "event", "info"]`.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.slides.iter().map(|s| s.kind.label()).collect()
    }

    pub fn output_names(&self) -> Vec<&str> {
        self.slides.iter().map(|s| s.output_name.as_str()).collect()
    }

    pub fn event_count(&self) -> usize {
        self.slides
            .iter()
            .filter(|s| matches!(s.kind, SlideKind::Event(_)))
            .count()
    }

    pub fn info_count(&self) -> usize {
        self.slides
            .iter()
            .filter(|s| matches!(s.kind, SlideKind::Info(_)))
            .count()
    }
}
