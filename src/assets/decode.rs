use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Rgb8;
use crate::foundation::error::SlideResult;
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded raster ready for the painter: premultiplied RGBA8, row-major.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    fn from_rgba(rgba: image::RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        let mut rgba8_premul = rgba.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        }
    }

    /// Opaque single-color image.
    pub fn solid(color: Rgb8, width: u32, height: u32) -> Self {
        let px = [color.r, color.g, color.b, 255];
        let data = px.repeat((width as usize) * (height as usize));
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.rgba8_premul.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

pub fn load_image(path: &Path) -> SlideResult<image::DynamicImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img)
}

/// Stretch `img` to exactly `width × height` (Lanczos) and premultiply.
pub fn prepare_exact(img: &image::DynamicImage, width: u32, height: u32) -> PreparedImage {
    let resized = if img.width() == width && img.height() == height {
        img.to_rgba8()
    } else {
        img.resize_exact(width, height, image::imageops::FilterType::Lanczos3)
            .to_rgba8()
    };
    PreparedImage::from_rgba(resized)
}
