//! Slide layout: turns an event (or the title) into a [`SlideScene`].

use crate::assets::fonts::{FontHandle, FontProvider};
use crate::config::DeckConfig;
use crate::foundation::core::{Canvas, FontWeight, Region, Rgb8};
use crate::model::event::Event;
use crate::render::format::{long_date, time_range, weekday_name};
use crate::render::scene::{PlacedText, SlideScene};
use crate::text::layout::{center_x, fit_font_size, size_steps, truncate, wrap};
use crate::text::metrics::TextMeasure;

/// Lays out title and event slides for one configuration and font set.
pub struct SlideComposer<'a, P: FontProvider + ?Sized> {
    cfg: &'a DeckConfig,
    fonts: &'a P,
    canvas: Canvas,
}

impl<'a, P: FontProvider + ?Sized> SlideComposer<'a, P> {
    pub fn new(cfg: &'a DeckConfig, fonts: &'a P, canvas: Canvas) -> Self {
        Self { cfg, fonts, canvas }
    }

    fn place<M: TextMeasure + ?Sized>(
        measure: &mut M,
        text: String,
        font: FontHandle,
        x: impl FnOnce(u32) -> i32,
        y: i32,
        color: Rgb8,
    ) -> PlacedText {
        let extent = measure.measure(&text, &font);
        let width = extent.width_px();
        PlacedText {
            x: x(width),
            y,
            width,
            height: extent.height_px(),
            text,
            font,
            color,
        }
    }

    /// Opening slide: darkened background with heading, subtitle and caption centered.
    pub fn title<M: TextMeasure + ?Sized>(&self, measure: &mut M) -> SlideScene {
        let t = &self.cfg.title;
        let light = self.cfg.colors.light_text;
        let centered = |w: u32| center_x(w, self.canvas.width);

        let mut scene = SlideScene::new(self.canvas);
        scene.darken(t.overlay_alpha);

        let mut y = (self.canvas.height / 3) as i32;
        let heading = self.fonts.font(FontWeight::Bold, t.heading_size);
        scene
            .texts
            .push(Self::place(measure, t.heading.clone(), heading, centered, y, light));

        y += t.subtitle_gap as i32;
        let subtitle = self.fonts.font(FontWeight::Regular, t.subtitle_size);
        scene
            .texts
            .push(Self::place(measure, t.subtitle.clone(), subtitle, centered, y, light));

        y += t.caption_gap as i32;
        let caption = self.fonts.font(FontWeight::Regular, t.caption_size);
        scene.texts.push(Self::place(
            measure,
            self.cfg.title_caption(),
            caption,
            centered,
            y,
            light,
        ));

        scene
    }

    /// Event slide: banner with the upper-cased summary, wrapped description, and a footer with
    /// date, time, location and (when `with_qr`) the QR code.
    pub fn event<M: TextMeasure + ?Sized>(
        &self,
        measure: &mut M,
        event: &Event,
        with_qr: bool,
    ) -> SlideScene {
        let mut scene = SlideScene::new(self.canvas);
        scene.darken(self.cfg.banner.overlay_alpha);

        let banner = self.banner(measure, &mut scene, event);
        let footer_top = self.canvas.height.saturating_sub(self.cfg.footer.height) as i32;
        self.description(measure, &mut scene, event, banner.bottom(), footer_top);
        self.footer(measure, &mut scene, event, footer_top, with_qr);

        scene
    }

    fn banner<M: TextMeasure + ?Sized>(
        &self,
        measure: &mut M,
        scene: &mut SlideScene,
        event: &Event,
    ) -> Region {
        let b = &self.cfg.banner;
        let title = event.summary.to_uppercase();
        let max_width = self.canvas.width.saturating_sub(2 * b.padding) as f32;
        let candidates = size_steps(b.font_max, b.font_min, b.font_step);
        let font = fit_font_size(
            measure,
            self.fonts,
            &title,
            max_width,
            &candidates,
            FontWeight::Bold,
        );

        let text_height = measure.measure(&title, &font).height_px();
        let height = (text_height + 2 * b.padding).clamp(b.height_min, b.height_max);
        let region = Region::new(0, 0, self.canvas.width, height);
        scene.fill(region, self.cfg.colors.brand);
        scene.regions.banner = Some(region);

        let y = (height as i32 - text_height as i32).div_euclid(2);
        let canvas_width = self.canvas.width;
        scene.texts.push(Self::place(
            measure,
            title,
            font,
            |w: u32| center_x(w, canvas_width),
            y,
            self.cfg.colors.light_text,
        ));
        region
    }

    fn description<M: TextMeasure + ?Sized>(
        &self,
        measure: &mut M,
        scene: &mut SlideScene,
        event: &Event,
        banner_bottom: i32,
        footer_top: i32,
    ) {
        let d = &self.cfg.description;
        let font = self.fonts.font(FontWeight::Regular, d.font_size);
        let wrap_width = self.canvas.width.saturating_sub(2 * d.side_margin) as f32;
        let lines = wrap(measure, &event.description, &font, wrap_width);
        if lines.is_empty() {
            return;
        }

        let line_height = (d.font_size + d.line_spacing) as i32;
        let top = banner_bottom + d.top_gap as i32;
        let canvas_width = self.canvas.width;
        let mut y = top;
        for line in lines.into_iter().take(d.max_lines) {
            if y + line_height > footer_top {
                tracing::debug!("description clipped above footer for '{}'", event.summary);
                break;
            }
            scene.texts.push(Self::place(
                measure,
                line,
                font.clone(),
                |w: u32| center_x(w, canvas_width),
                y,
                self.cfg.colors.light_text,
            ));
            y += line_height;
        }

        if y > top {
            scene.regions.body = Some(Region::new(0, top, canvas_width, (y - top) as u32));
        }
    }

    fn footer<M: TextMeasure + ?Sized>(
        &self,
        measure: &mut M,
        scene: &mut SlideScene,
        event: &Event,
        footer_top: i32,
        with_qr: bool,
    ) {
        let f = &self.cfg.footer;
        let dark = self.cfg.colors.dark_text;
        let region = Region::new(0, footer_top, self.canvas.width, f.height);
        scene.fill(region, self.cfg.colors.footer);
        scene.regions.footer = Some(region);

        let x = f.padding as i32;
        let left = |_: u32| x;
        let mut y = footer_top + f.top_inset as i32;

        let weekday = self.fonts.font(FontWeight::Regular, f.weekday_size);
        scene.texts.push(Self::place(
            measure,
            weekday_name(&event.start).to_owned(),
            weekday,
            left,
            y,
            dark,
        ));

        y += f.weekday_advance as i32;
        let date = self.fonts.font(FontWeight::Bold, f.date_size);
        scene
            .texts
            .push(Self::place(measure, long_date(&event.start), date, left, y, dark));

        if event.end.is_some_and(|end| end < event.start) {
            tracing::warn!(
                "'{}' ends before it starts; showing start time only",
                event.summary
            );
        }
        y += f.date_advance as i32;
        let detail = self.fonts.font(FontWeight::Regular, f.detail_size);
        let time = time_range(event);
        scene
            .texts
            .push(Self::place(measure, time, detail.clone(), left, y, dark));

        let location = event.location.trim();
        if !location.is_empty() {
            y += f.time_advance as i32;
            let content_width = self
                .canvas
                .width
                .saturating_sub(f.qr_size + 3 * f.padding);
            let max_width = content_width.saturating_sub(f.padding) as f32;
            let shown = truncate(measure, location, &detail, max_width);
            scene
                .texts
                .push(Self::place(measure, shown, detail, left, y, dark));
        }

        if with_qr {
            let qr = Region::new(
                self.canvas.width as i32 - (f.qr_size + f.padding) as i32,
                footer_top + (f.height as i32 - f.qr_size as i32).div_euclid(2),
                f.qr_size,
                f.qr_size,
            );
            scene.regions.qr = Some(qr);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
