use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::DateTime;
use chrono_tz::Tz;

use crate::assets::fonts::FontLibrary;
use crate::assets::provider::AssetLibrary;
use crate::config::DeckConfig;
use crate::deck::assemble::assemble;
use crate::foundation::core::Canvas;
use crate::foundation::error::SlideResult;
use crate::render::slide::SlideRenderer;
use crate::source::EventSource;

/// Outcome of one generation run.
#[derive(Clone, Debug, Default)]
pub struct GenerationReport {
    /// Slides written, in deck order.
    pub written: Vec<PathBuf>,
    pub events: usize,
    pub info_slides: usize,
    /// Output files from a previous run that were removed first.
    pub removed: usize,
}

impl GenerationReport {
    pub fn slides_written(&self) -> usize {
        self.written.len()
    }
}

/// Remove `slide_*.png` left over from an earlier run. Other files are kept.
pub fn clean_stale_slides(dir: &Path) -> SlideResult<usize> {
    let mut removed = 0;
    for entry in std::fs::read_dir(dir).with_context(|| format!("list '{}'", dir.display()))? {
        let entry = entry.with_context(|| format!("list '{}'", dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with("slide_") && name.ends_with(".png") && entry.path().is_file() {
            std::fs::remove_file(entry.path())
                .with_context(|| format!("remove stale slide '{name}'"))?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Static info images (`slide*.jpg`, `slide*.jpeg`) in `dir`, sorted by file name.
///
/// A missing directory yields an empty inventory.
pub fn discover_info_slides(dir: &Path) -> SlideResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        tracing::warn!("info slide directory not found: {}", dir.display());
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("list '{}'", dir.display()))? {
        let path = entry
            .with_context(|| format!("list '{}'", dir.display()))?
            .path();
        let is_info = path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("slide"))
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));
        if is_info {
            found.push(path);
        }
    }
    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(found)
}

/// Drives one run: clean, discover, assemble and render.
pub struct DeckGenerator<'a> {
    cfg: &'a DeckConfig,
    fonts: FontLibrary,
    assets: AssetLibrary,
    canvas: Canvas,
}

impl<'a> DeckGenerator<'a> {
    /// Resolve fonts and assets from the configuration.
    pub fn new(cfg: &'a DeckConfig) -> Self {
        let canvas = Canvas::FULL_HD;
        Self {
            cfg,
            fonts: FontLibrary::resolve(&cfg.fonts),
            assets: AssetLibrary::load(cfg, canvas),
            canvas,
        }
    }

    /// Use already resolved fonts and assets.
    pub fn with_resources(cfg: &'a DeckConfig, fonts: FontLibrary, assets: AssetLibrary) -> Self {
        Self {
            cfg,
            fonts,
            assets,
            canvas: Canvas::FULL_HD,
        }
    }

    pub fn run<S: EventSource + ?Sized>(
        &self,
        source: &S,
        now: DateTime<Tz>,
    ) -> SlideResult<GenerationReport> {
        let out_dir = &self.cfg.paths.output_dir;
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("create output directory '{}'", out_dir.display()))?;

        let removed = clean_stale_slides(out_dir)?;
        if removed > 0 {
            tracing::info!("removed {removed} old slides from {}", out_dir.display());
        }

        let info = discover_info_slides(&self.cfg.paths.info_dir)?;
        tracing::info!("found {} info slides", info.len());

        let events = source.events()?;
        let deck = assemble(events, &info, now, self.cfg);
        let report_events = deck.event_count();
        tracing::info!(
            "{report_events} events within {} days of {}",
            self.cfg.days_ahead,
            now.format("%Y-%m-%d %H:%M")
        );

        let mut renderer = SlideRenderer::new(self.cfg, &self.fonts, &self.assets, self.canvas)?;
        let mut written = Vec::with_capacity(deck.len());
        for slide in &deck.slides {
            written.push(renderer.render_to(slide, out_dir)?);
        }
        tracing::info!("{} slides written to {}", written.len(), out_dir.display());

        Ok(GenerationReport {
            written,
            events: report_events,
            info_slides: deck.info_count(),
            removed,
        })
    }
}
