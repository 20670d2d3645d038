use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::decode::load_image;
use crate::assets::fonts::FontLibrary;
use crate::assets::provider::AssetLibrary;
use crate::config::DeckConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::SlideResult;
use crate::model::deck::{SlideDescriptor, SlideKind};
use crate::model::event::Event;
use crate::render::compose::SlideComposer;
use crate::render::cpu::{CpuPainter, SlideFrame};
use crate::text::metrics::TextLayoutEngine;

/// Renders slide descriptors to PNG files, one at a time.
pub struct SlideRenderer<'a> {
    cfg: &'a DeckConfig,
    fonts: &'a FontLibrary,
    canvas: Canvas,
    painter: CpuPainter,
    engine: TextLayoutEngine,
}

impl<'a> SlideRenderer<'a> {
    pub fn new(
        cfg: &'a DeckConfig,
        fonts: &'a FontLibrary,
        assets: &AssetLibrary,
        canvas: Canvas,
    ) -> SlideResult<Self> {
        Ok(Self {
            cfg,
            fonts,
            canvas,
            painter: CpuPainter::new(canvas, assets)?,
            engine: TextLayoutEngine::new(),
        })
    }

    fn composer(&self) -> SlideComposer<'a, FontLibrary> {
        SlideComposer::new(self.cfg, self.fonts, self.canvas)
    }

    pub fn render_title(&mut self) -> SlideResult<SlideFrame> {
        let scene = self.composer().title(&mut self.engine);
        self.painter.paint(&scene, &mut self.engine)
    }

    pub fn render_event(&mut self, event: &Event) -> SlideResult<SlideFrame> {
        let scene = self
            .composer()
            .event(&mut self.engine, event, self.painter.has_qr());
        self.painter.paint(&scene, &mut self.engine)
    }

    /// Stretch an info image to the canvas and write it as PNG.
    pub fn render_info(&self, source: &Path, out: &Path) -> SlideResult<()> {
        let img = load_image(source)?;
        let rgb = img
            .resize_exact(
                self.canvas.width,
                self.canvas.height,
                image::imageops::FilterType::Lanczos3,
            )
            .to_rgb8();
        rgb.save_with_format(out, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", out.display()))?;
        Ok(())
    }

    /// Render one planned slide into `out_dir`, returning the written path.
    pub fn render_to(&mut self, slide: &SlideDescriptor, out_dir: &Path) -> SlideResult<PathBuf> {
        let out = out_dir.join(&slide.output_name);
        match &slide.kind {
            SlideKind::Title => save_png(&self.render_title()?, &out)?,
            SlideKind::Event(event) => save_png(&self.render_event(event)?, &out)?,
            SlideKind::Info(source) => self.render_info(source, &out)?,
        }
        tracing::debug!(index = slide.index, kind = slide.kind.label(), "wrote {}", out.display());
        Ok(out)
    }
}

/// Write a frame as an 8-bit RGB PNG.
pub fn save_png(frame: &SlideFrame, path: &Path) -> SlideResult<()> {
    let rgb = frame.to_rgb8();
    image::save_buffer_with_format(
        path,
        &rgb,
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/slide.rs"]
mod tests;
