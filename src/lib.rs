#![forbid(unsafe_code)]
//! Event announcement slides for venue screens.
//!
//! A run loads upcoming events, plans a [`Deck`] (title, event slides, interleaved info
//! slides) and renders every slide to a 1920×1080 PNG. See [`DeckGenerator`] for the
//! end-to-end entry point.

pub mod assets;
pub mod config;
pub mod deck;
pub mod foundation;
pub mod model;
pub mod render;
pub mod source;
pub mod text;

pub use assets::fonts::{FontFace, FontHandle, FontLibrary, FontProvider};
pub use assets::provider::AssetLibrary;
pub use config::DeckConfig;
pub use deck::assemble::assemble;
pub use deck::pipeline::{DeckGenerator, GenerationReport};
pub use foundation::core::{Canvas, FontWeight, Region, Rgb8};
pub use foundation::error::{SlideError, SlideResult};
pub use model::deck::{Deck, SlideDescriptor, SlideKind};
pub use model::event::Event;
pub use render::slide::SlideRenderer;
pub use source::{EventSource, JsonEventFiles};
pub use text::metrics::{TextLayoutEngine, TextMeasure};
