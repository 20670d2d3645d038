use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::assets::provider::AssetLibrary;
use crate::foundation::core::{Canvas, Region};
use crate::foundation::error::{SlideError, SlideResult};
use crate::foundation::math::premul_rgba8_to_rgb8;
use crate::render::scene::{PlacedText, SlideScene};
use crate::text::metrics::TextLayoutEngine;

/// Rendered slide pixels: premultiplied RGBA8, row-major, opaque after the background pass.
#[derive(Clone, Debug)]
pub struct SlideFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl SlideFrame {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn to_rgb8(&self) -> Vec<u8> {
        premul_rgba8_to_rgb8(&self.data)
    }
}

/// Paints [`SlideScene`]s onto the shared background with `vello_cpu`.
pub struct CpuPainter {
    width: u16,
    height: u16,
    background: vello_cpu::Image,
    background_size: (f64, f64),
    qr: Option<(vello_cpu::Image, f64)>,
}

impl CpuPainter {
    pub fn new(canvas: Canvas, assets: &AssetLibrary) -> SlideResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SlideError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SlideError::render("canvas height exceeds u16"))?;

        let background = image_paint(&assets.background)?;
        let background_size = (
            f64::from(assets.background.width),
            f64::from(assets.background.height),
        );
        let qr = match &assets.qr {
            Some(img) => Some((image_paint(img)?, f64::from(img.width))),
            None => None,
        };

        Ok(Self {
            width,
            height,
            background,
            background_size,
            qr,
        })
    }

    pub fn has_qr(&self) -> bool {
        self.qr.is_some()
    }

    pub fn paint(
        &self,
        scene: &SlideScene,
        engine: &mut TextLayoutEngine,
    ) -> SlideResult<SlideFrame> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let (bw, bh) = self.background_size;
        ctx.set_transform(vello_cpu::kurbo::Affine::scale_non_uniform(
            f64::from(self.width) / bw,
            f64::from(self.height) / bh,
        ));
        ctx.set_paint(self.background.clone());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, bw, bh));

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for rect in &scene.rects {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                rect.color.r,
                rect.color.g,
                rect.color.b,
                rect.alpha,
            ));
            ctx.fill_rect(&region_rect(rect.region));
        }

        for text in &scene.texts {
            draw_text(&mut ctx, text, engine);
        }

        if let (Some(region), Some((paint, size))) = (scene.regions.qr, &self.qr) {
            let scale = f64::from(region.width) / size;
            ctx.set_transform(
                vello_cpu::kurbo::Affine::translate((f64::from(region.x), f64::from(region.y)))
                    * vello_cpu::kurbo::Affine::scale(scale),
            );
            ctx.set_paint(paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, *size, *size));
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(SlideFrame {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

fn region_rect(r: Region) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(
        f64::from(r.x),
        f64::from(r.y),
        f64::from(r.right()),
        f64::from(r.bottom()),
    )
}

/// Metrics-only faces have no outlines; their lines only take part in layout.
fn draw_text(ctx: &mut vello_cpu::RenderContext, text: &PlacedText, engine: &mut TextLayoutEngine) {
    let Some(face) = text.font.face().data.as_ref() else {
        return;
    };
    let Some(layout) = engine.layout_line(&text.text, &text.font, text.color.into()) else {
        return;
    };

    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(text.x),
        f64::from(text.y),
    )));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            // Offset by the run start and the line baseline, relative to the text box top-left.
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&face.raster)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn image_paint(img: &PreparedImage) -> SlideResult<vello_cpu::Image> {
    let pixmap = premul_bytes_to_pixmap(img.rgba8_premul.as_slice(), img.width, img.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> SlideResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SlideError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SlideError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(SlideError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}
