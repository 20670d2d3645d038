use std::path::Path;

use crate::assets::decode::{PreparedImage, load_image, prepare_exact};
use crate::assets::qr::{generate_qr, save_qr};
use crate::config::DeckConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::SlideResult;

/// One way of obtaining an asset, labelled for logging.
pub(crate) type Attempt<'a, T> = (String, Box<dyn FnOnce() -> SlideResult<T> + 'a>);

pub(crate) fn attempt<'a, T>(
    label: impl Into<String>,
    f: impl FnOnce() -> SlideResult<T> + 'a,
) -> Attempt<'a, T> {
    (label.into(), Box::new(f))
}

/// Run `attempts` in order and keep the first success. Failures are logged, never returned.
pub(crate) fn first_success<T>(what: &str, attempts: Vec<Attempt<'_, T>>) -> Option<T> {
    for (label, run) in attempts {
        match run() {
            Ok(v) => {
                tracing::info!("{what}: using {label}");
                return Some(v);
            }
            Err(e) => tracing::warn!("{what}: {label} unavailable: {e}"),
        }
    }
    None
}

/// Background and QR rasters for a run, resolved once and shared by every slide.
#[derive(Clone, Debug)]
pub struct AssetLibrary {
    /// Canvas-sized background.
    pub background: PreparedImage,
    /// Square QR code at footer size; `None` when neither file nor generator worked.
    pub qr: Option<PreparedImage>,
}

impl AssetLibrary {
    /// Resolve assets through their fallback chains. Never fails.
    pub fn load(cfg: &DeckConfig, canvas: Canvas) -> Self {
        let background = Self::load_background(cfg, canvas);
        let qr = Self::load_qr(cfg);
        Self { background, qr }
    }

    /// Solid background and no QR code. Touches no files.
    pub fn fallback(cfg: &DeckConfig, canvas: Canvas) -> Self {
        Self {
            background: PreparedImage::solid(
                cfg.colors.fallback_background,
                canvas.width,
                canvas.height,
            ),
            qr: None,
        }
    }

    fn load_background(cfg: &DeckConfig, canvas: Canvas) -> PreparedImage {
        let attempts: Vec<Attempt<'_, PreparedImage>> = cfg
            .paths
            .background_files
            .iter()
            .map(|path| {
                attempt(path.display().to_string(), move || {
                    let img = load_image(path)?;
                    Ok(prepare_exact(&img, canvas.width, canvas.height))
                })
            })
            .collect();

        first_success("background", attempts).unwrap_or_else(|| {
            tracing::warn!("background: falling back to solid color");
            PreparedImage::solid(cfg.colors.fallback_background, canvas.width, canvas.height)
        })
    }

    fn load_qr(cfg: &DeckConfig) -> Option<PreparedImage> {
        let size = cfg.footer.qr_size;
        let qr_file: &Path = &cfg.paths.qr_file;
        let attempts = vec![
            attempt(qr_file.display().to_string(), move || {
                let img = load_image(qr_file)?;
                Ok(prepare_exact(&img, size, size))
            }),
            attempt(format!("generated code for {}", cfg.qr_url), move || {
                let img = generate_qr(&cfg.qr_url)?;
                if let Err(e) = save_qr(&img, qr_file) {
                    tracing::warn!("could not store generated QR code: {e}");
                }
                Ok(prepare_exact(&img, size, size))
            }),
        ];

        let qr = first_success("qr", attempts);
        if qr.is_none() {
            tracing::warn!("qr: no code available, event slides render without it");
        }
        qr
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/provider.rs"]
mod tests;
