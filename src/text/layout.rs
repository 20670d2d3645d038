//! Pure layout helpers: font size fitting, word wrapping, truncation and centering.
//!
//! Everything here takes a [`TextMeasure`] so it can run against Parley in production and
//! against a fixed-width fake in tests.

use crate::assets::fonts::{FontHandle, FontProvider};
use crate::foundation::core::FontWeight;
use crate::text::metrics::TextMeasure;

/// Suffix appended by [`truncate`].
pub const ELLIPSIS: &str = "...";

/// Candidate sizes from `max` down to `min` in `step` decrements. `min` is always the last entry.
pub fn size_steps(max: u32, min: u32, step: u32) -> Vec<u32> {
    let step = step.max(1);
    let mut out = Vec::new();
    let mut s = max;
    while s > min {
        out.push(s);
        s = match s.checked_sub(step) {
            Some(next) => next,
            None => break,
        };
    }
    out.push(min);
    out
}

/// Largest candidate size at which `text` measures within `max_width`.
///
/// `candidates` are tried in order (descending). When none fits, the last one is returned.
pub fn fit_font_size<M, P>(
    measure: &mut M,
    fonts: &P,
    text: &str,
    max_width: f32,
    candidates: &[u32],
    weight: FontWeight,
) -> FontHandle
where
    M: TextMeasure + ?Sized,
    P: FontProvider + ?Sized,
{
    for &size in candidates {
        let font = fonts.font(weight, size);
        if measure.measure(text, &font).width <= max_width {
            return font;
        }
    }
    let smallest = candidates
        .last()
        .copied()
        .unwrap_or(crate::assets::fonts::MIN_FONT_PX);
    fonts.font(weight, smallest)
}

/// Turn literal `\n` escapes into real breaks, drop carriage returns and trim the result.
pub fn normalize_breaks(text: &str) -> String {
    text.replace("\\n", "\n")
        .replace("\\r", "")
        .replace('\r', "")
        .trim()
        .to_owned()
}

/// Greedy word wrap.
///
/// Paragraph breaks are forced line breaks; blank paragraphs are dropped. Words are split on
/// whitespace and never broken, so a single word wider than `max_width` gets a line to itself.
pub fn wrap<M>(measure: &mut M, text: &str, font: &FontHandle, max_width: f32) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let normalized = normalize_breaks(text);
    let mut lines = Vec::new();

    for paragraph in normalized.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure.measure(&candidate, font).width <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_owned()));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Shorten `text` to fit `max_width`, marking the cut with [`ELLIPSIS`].
///
/// Text that already fits is returned unchanged. Otherwise the longest character prefix whose
/// ellipsized form fits is used; if even the bare ellipsis is too wide it is returned anyway.
pub fn truncate<M>(measure: &mut M, text: &str, font: &FontHandle, max_width: f32) -> String
where
    M: TextMeasure + ?Sized,
{
    if measure.measure(text, font).width <= max_width {
        return text.to_owned();
    }

    let ends: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .chain(std::iter::once(text.len()))
        .collect();
    for &end in ends.iter().rev() {
        let candidate = format!("{}{ELLIPSIS}", &text[..end]);
        if measure.measure(&candidate, font).width <= max_width {
            return candidate;
        }
    }
    ELLIPSIS.to_owned()
}

/// Left x that horizontally centers a line of `text_width` on a canvas of `canvas_width`.
pub fn center_x(text_width: u32, canvas_width: u32) -> i32 {
    (i64::from(canvas_width) - i64::from(text_width)).div_euclid(2) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
