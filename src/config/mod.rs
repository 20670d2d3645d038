//! Run configuration.
//!
//! A [`DeckConfig`] is built once at startup (defaults, optionally overridden by a JSON file) and
//! passed by reference into the layout engine, the slide renderer and the deck assembler. Nothing
//! in the crate reads configuration from globals.

mod color;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{SlideError, SlideResult};

/// Complete, immutable configuration for one generation run.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckConfig {
    /// Zone all event timestamps are resolved into.
    pub time_zone: Tz,
    /// Look-ahead window in days, inclusive at both ends.
    pub days_ahead: u32,
    /// Insert one info slide after every `info_every` event slides.
    pub info_every: usize,
    pub colors: ColorConfig,
    pub banner: BannerConfig,
    pub description: DescriptionConfig,
    pub footer: FooterConfig,
    pub title: TitleConfig,
    pub paths: PathConfig,
    pub fonts: FontConfig,
    /// Target encoded into a generated QR code when no QR image file is available.
    pub qr_url: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            time_zone: chrono_tz::Europe::Berlin,
            days_ahead: 14,
            info_every: 3,
            colors: ColorConfig::default(),
            banner: BannerConfig::default(),
            description: DescriptionConfig::default(),
            footer: FooterConfig::default(),
            title: TitleConfig::default(),
            paths: PathConfig::default(),
            fonts: FontConfig::default(),
            qr_url: "https://gemeinde-konkordia.de".to_owned(),
        }
    }
}

impl DeckConfig {
    /// Load a JSON config file; keys that are absent keep their defaults.
    pub fn from_path(path: &Path) -> SlideResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: DeckConfig = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| SlideError::config(format!("parse '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would make layout or assembly meaningless.
    pub fn validate(&self) -> SlideResult<()> {
        if self.info_every == 0 {
            return Err(SlideError::config("info_every must be > 0"));
        }
        if self.banner.height_min > self.banner.height_max {
            return Err(SlideError::config(
                "banner.height_min must be <= banner.height_max",
            ));
        }
        if self.banner.font_min > self.banner.font_max || self.banner.font_step == 0 {
            return Err(SlideError::config(
                "banner font range must satisfy font_min <= font_max and font_step > 0",
            ));
        }
        if self.footer.height >= crate::Canvas::FULL_HD.height {
            return Err(SlideError::config("footer.height must fit on the canvas"));
        }
        Ok(())
    }

    /// Caption shown on the title slide under the subtitle.
    pub fn title_caption(&self) -> String {
        match &self.title.caption {
            Some(c) => c.clone(),
            None => format!("Nächste {} Tage", self.days_ahead),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Banner fill.
    pub brand: Rgb8,
    /// Text drawn on the darkened background and on the banner.
    pub light_text: Rgb8,
    /// Text drawn on the footer band.
    pub dark_text: Rgb8,
    pub footer: Rgb8,
    /// Solid background used when no background image can be loaded.
    pub fallback_background: Rgb8,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            brand: Rgb8::new(187, 34, 50),
            light_text: Rgb8::WHITE,
            dark_text: Rgb8::BLACK,
            footer: Rgb8::new(240, 240, 240),
            fallback_background: Rgb8::new(40, 40, 50),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerConfig {
    pub height_min: u32,
    pub height_max: u32,
    pub padding: u32,
    pub font_max: u32,
    pub font_min: u32,
    pub font_step: u32,
    /// Alpha of the black overlay darkening the background on event slides.
    pub overlay_alpha: u8,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            height_min: 200,
            height_max: 350,
            padding: 40,
            font_max: 100,
            font_min: 60,
            font_step: 10,
            overlay_alpha: 80,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DescriptionConfig {
    pub font_size: u32,
    pub line_spacing: u32,
    /// Horizontal margin on each side of the wrap width.
    pub side_margin: u32,
    /// Gap between the banner and the first description line.
    pub top_gap: u32,
    pub max_lines: usize,
}

impl Default for DescriptionConfig {
    fn default() -> Self {
        Self {
            font_size: 42,
            line_spacing: 15,
            side_margin: 100,
            top_gap: 60,
            max_lines: 4,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FooterConfig {
    pub height: u32,
    pub padding: u32,
    pub qr_size: u32,
    pub weekday_size: u32,
    pub date_size: u32,
    pub detail_size: u32,
    /// Offset of the weekday line below the footer top.
    pub top_inset: u32,
    pub weekday_advance: u32,
    pub date_advance: u32,
    pub time_advance: u32,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            height: 280,
            padding: 40,
            qr_size: 150,
            weekday_size: 38,
            date_size: 85,
            detail_size: 36,
            top_inset: 30,
            weekday_advance: 50,
            date_advance: 95,
            time_advance: 48,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleConfig {
    pub heading: String,
    pub subtitle: String,
    /// Defaults to "Nächste <days_ahead> Tage".
    pub caption: Option<String>,
    pub heading_size: u32,
    pub subtitle_size: u32,
    pub caption_size: u32,
    pub subtitle_gap: u32,
    pub caption_gap: u32,
    pub overlay_alpha: u8,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            heading: "VERANSTALTUNGEN".to_owned(),
            subtitle: "Gemeinde in der Konkordia".to_owned(),
            caption: None,
            heading_size: 120,
            subtitle_size: 60,
            caption_size: 48,
            subtitle_gap: 150,
            caption_gap: 100,
            overlay_alpha: 100,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathConfig {
    pub output_dir: PathBuf,
    /// Directory scanned for `slide*.jpg` info slides. May equal `output_dir`.
    pub info_dir: PathBuf,
    pub event_files: Vec<PathBuf>,
    /// Background candidates, tried in order.
    pub background_files: Vec<PathBuf>,
    /// QR image tried first; a generated QR code is saved here when it is missing.
    pub qr_file: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("slides"),
            info_dir: PathBuf::from("slides"),
            event_files: ["gottesdienst", "kinder", "senioren", "jugend", "sonstige"]
                .iter()
                .map(|n| PathBuf::from(format!("{n}.json")))
                .collect(),
            background_files: vec![PathBuf::from("assets/hintergrund_Termine.jpg")],
            qr_file: PathBuf::from("assets/QR_news.png"),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub bold_files: Vec<PathBuf>,
    pub regular_files: Vec<PathBuf>,
    /// Family names queried in the system font database after the file lists.
    pub system_families: Vec<String>,
    pub use_system_fonts: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        let paths = |names: &[&str]| names.iter().map(PathBuf::from).collect::<Vec<_>>();
        Self {
            bold_files: paths(&[
                "DejaVuSans-Bold.ttf",
                "DejaVuSans.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "Arial.ttf",
                "Helvetica.ttf",
            ]),
            regular_files: paths(&[
                "DejaVuSans.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "Arial.ttf",
            ]),
            system_families: vec![
                "DejaVu Sans".to_owned(),
                "Liberation Sans".to_owned(),
                "Noto Sans".to_owned(),
                "Arial".to_owned(),
            ],
            use_system_fonts: true,
        }
    }
}
