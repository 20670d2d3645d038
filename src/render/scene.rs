use crate::assets::fonts::FontHandle;
use crate::foundation::core::{Canvas, Region, Rgb8};

/// Solid, optionally translucent rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilledRect {
    pub region: Region,
    pub color: Rgb8,
    pub alpha: u8,
}

/// One line of text anchored at its top-left corner.
#[derive(Clone, Debug)]
pub struct PlacedText {
    pub text: String,
    pub font: FontHandle,
    pub x: i32,
    pub y: i32,
    pub color: Rgb8,
    /// Measured extent of `text` in `font`.
    pub width: u32,
    pub height: u32,
}

impl PlacedText {
    pub fn region(&self) -> Region {
        Region::new(self.x, self.y, self.width, self.height)
    }
}

/// Named layout regions of an event slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventRegions {
    pub banner: Option<Region>,
    /// Area covered by description lines; `None` when there are none.
    pub body: Option<Region>,
    pub footer: Option<Region>,
    pub qr: Option<Region>,
}

/// Everything drawn on top of the background, in paint order.
#[derive(Clone, Debug)]
pub struct SlideScene {
    pub canvas: Canvas,
    pub rects: Vec<FilledRect>,
    pub texts: Vec<PlacedText>,
    pub regions: EventRegions,
}

impl SlideScene {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            rects: Vec::new(),
            texts: Vec::new(),
            regions: EventRegions::default(),
        }
    }

    /// Black overlay over the whole canvas.
    pub fn darken(&mut self, alpha: u8) {
        self.rects.push(FilledRect {
            region: Region::new(0, 0, self.canvas.width, self.canvas.height),
            color: Rgb8::BLACK,
            alpha,
        });
    }

    pub fn fill(&mut self, region: Region, color: Rgb8) {
        self.rects.push(FilledRect {
            region,
            color,
            alpha: 255,
        });
    }

    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(|t| t.text.as_str())
    }
}
