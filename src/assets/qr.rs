use std::path::Path;

use anyhow::Context as _;
use qrcode::{EcLevel, QrCode};

use crate::foundation::error::{SlideError, SlideResult};

/// Pixels per QR module before the final resize.
const MODULE_PX: u32 = 10;
/// White border around the code, in modules.
const BORDER_MODULES: u32 = 2;

/// Encode `url` as a black-on-white QR code with a two-module border (low error correction).
pub fn generate_qr(url: &str) -> SlideResult<image::DynamicImage> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::L)
        .map_err(|e| SlideError::asset(format!("encode QR code for '{url}': {e}")))?;
    // The renderer's own quiet zone is fixed at four modules.
    let modules = code
        .render::<image::Luma<u8>>()
        .module_dimensions(MODULE_PX, MODULE_PX)
        .quiet_zone(false)
        .build();

    let border = BORDER_MODULES * MODULE_PX;
    let mut framed = image::GrayImage::from_pixel(
        modules.width() + 2 * border,
        modules.height() + 2 * border,
        image::Luma([255]),
    );
    image::imageops::replace(&mut framed, &modules, i64::from(border), i64::from(border));
    Ok(image::DynamicImage::ImageLuma8(framed))
}

/// Persist a generated QR code so later runs can pick it up from disk.
pub fn save_qr(img: &image::DynamicImage, path: &Path) -> SlideResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory '{}'", parent.display()))?;
    }
    img.save(path)
        .with_context(|| format!("save QR code '{}'", path.display()))?;
    Ok(())
}
