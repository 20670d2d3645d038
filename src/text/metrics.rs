use std::collections::HashMap;

use crate::assets::fonts::{FaceData, FontHandle};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{SlideError, SlideResult};

/// Approximate advance per character: 0.55 em, as an exact ratio.
const APPROX_ADVANCE: (u64, u64) = (11, 20);
/// Approximate line height: 1.2 em.
const APPROX_LINE_HEIGHT: (u64, u64) = (6, 5);

/// Tight pixel extent of a single rendered line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

impl TextExtent {
    /// Width rounded up to whole pixels.
    pub fn width_px(self) -> u32 {
        self.width.max(0.0).ceil() as u32
    }

    /// Height rounded up to whole pixels.
    pub fn height_px(self) -> u32 {
        self.height.max(0.0).ceil() as u32
    }
}

/// Measures single lines of text. Must be deterministic for a given `(text, font)`.
pub trait TextMeasure {
    fn measure(&mut self, text: &str, font: &FontHandle) -> TextExtent;
}

/// Approximate metrics used when a face has no outlines.
pub fn approximate_extent(text: &str, size_px: u32) -> TextExtent {
    let size = u64::from(size_px);
    let chars = text.chars().count() as u64;
    let scaled = |n: u64, (num, den): (u64, u64)| (n * num) as f32 / den as f32;
    TextExtent {
        width: scaled(chars * size, APPROX_ADVANCE),
        height: if text.is_empty() {
            0.0
        } else {
            scaled(size, APPROX_LINE_HEIGHT)
        },
    }
}

/// Brush carried through Parley layouts; the painter fills glyph runs with it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// A face registered into its own font context so family lookups cannot pick another face.
struct RegisteredFace {
    font_ctx: parley::FontContext,
    family: String,
}

/// Shapes text with Parley against the resolved font faces.
///
/// Each face is registered once, keyed by [`FontFace::key`](crate::FontFace::key). Faces that
/// Parley cannot use fall back to approximate metrics with a warning.
pub struct TextLayoutEngine {
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    faces: HashMap<String, Option<RegisteredFace>>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    fn register(key: &str, data: &FaceData) -> SlideResult<RegisteredFace> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(data.bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            SlideError::render(format!("no font families registered from '{key}'"))
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SlideError::render("registered font family has no name"))?
            .to_string();
        tracing::debug!(face = key, index = data.index, "registered font family '{family}'");
        Ok(RegisteredFace { font_ctx, family })
    }

    /// Shape one line. Returns `None` for the metrics-only face or a face Parley rejected.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &FontHandle,
        brush: TextBrushRgba8,
    ) -> Option<parley::Layout<TextBrushRgba8>> {
        let face = font.face();
        let data = face.data.as_ref()?;

        let entry = self
            .faces
            .entry(face.key().to_owned())
            .or_insert_with(|| match Self::register(face.key(), data) {
                Ok(reg) => Some(reg),
                Err(e) => {
                    tracing::warn!("{e}; using approximate metrics");
                    None
                }
            });
        let reg = entry.as_mut()?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut reg.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(reg.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(
            font.size_px() as f32,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Some(layout)
    }
}

impl TextMeasure for TextLayoutEngine {
    fn measure(&mut self, text: &str, font: &FontHandle) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        match self.layout_line(text, font, TextBrushRgba8::default()) {
            Some(layout) => TextExtent {
                width: layout.width(),
                height: layout.height(),
            },
            None => approximate_extent(text, font.size_px()),
        }
    }
}
