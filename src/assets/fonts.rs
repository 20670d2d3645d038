use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::config::FontConfig;
use crate::foundation::core::FontWeight;
use crate::foundation::error::{SlideError, SlideResult};

/// Smallest pixel size the provider hands out.
pub const MIN_FONT_PX: u32 = 8;
/// Largest pixel size the provider hands out.
pub const MAX_FONT_PX: u32 = 400;

/// Raw bytes of one resolved font face.
pub(crate) struct FaceData {
    /// Font file bytes (may be a collection).
    pub(crate) bytes: Arc<Vec<u8>>,
    /// Face index within `bytes`.
    pub(crate) index: u32,
    /// Same bytes wrapped for the CPU rasterizer.
    pub(crate) raster: vello_cpu::peniko::FontData,
}

/// DejaVu Sans, compiled in as the last entry of the font chain.
const EMBEDDED_REGULAR: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/fonts/DejaVuSans.ttf"
));
const EMBEDDED_BOLD: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/fonts/DejaVuSans-Bold.ttf"
));

/// A font face resolved once at startup.
///
/// `data` is `None` only for the metrics-only face, which has approximate metrics and no glyphs.
pub struct FontFace {
    key: String,
    family: String,
    builtin: bool,
    pub(crate) data: Option<FaceData>,
}

impl FontFace {
    /// The compiled-in face for `weight`.
    fn builtin(weight: FontWeight) -> Self {
        let (name, bytes) = match weight {
            FontWeight::Regular => ("DejaVuSans", EMBEDDED_REGULAR),
            FontWeight::Bold => ("DejaVuSans-Bold", EMBEDDED_BOLD),
        };
        match Self::from_bytes(format!("builtin:{name}"), bytes.to_vec(), 0) {
            Ok(mut face) => {
                face.builtin = true;
                face
            }
            Err(e) => {
                tracing::warn!("embedded font {name} unusable: {e}");
                Self::metrics_only()
            }
        }
    }

    /// Face without outlines: lines are laid out with approximate metrics and not drawn.
    pub(crate) fn metrics_only() -> Self {
        Self {
            key: "metrics-only".to_owned(),
            family: "metrics-only".to_owned(),
            builtin: true,
            data: None,
        }
    }

    /// Stable identifier of where the face came from (file path, system family, or `builtin:*`).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Family name as declared by the font.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Whether the face is compiled into the binary rather than found on disk.
    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    /// Whether the face carries glyph outlines that can be painted.
    pub fn has_outlines(&self) -> bool {
        self.data.is_some()
    }

    fn from_bytes(key: String, bytes: Vec<u8>, index: u32) -> SlideResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes.clone());
        let family = db
            .faces()
            .find(|f| f.index == index)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| SlideError::asset(format!("'{key}' contains no usable font face")))?;

        let raster = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.clone()),
            index,
        );
        Ok(Self {
            key,
            family,
            builtin: false,
            data: Some(FaceData {
                bytes: Arc::new(bytes),
                index,
                raster,
            }),
        })
    }

    fn from_file(path: &Path) -> SlideResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(path.display().to_string(), bytes, 0)
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("key", &self.key)
            .field("family", &self.family)
            .finish()
    }
}

/// A renderable font: a resolved face at a pixel size.
#[derive(Clone, Debug)]
pub struct FontHandle {
    face: Arc<FontFace>,
    weight: FontWeight,
    size_px: u32,
}

impl FontHandle {
    /// Handle on the metrics-only face. Never touches the filesystem.
    pub fn metrics_only(weight: FontWeight, size_px: u32) -> Self {
        Self {
            face: Arc::new(FontFace::metrics_only()),
            weight,
            size_px: clamp_size(size_px),
        }
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn size_px(&self) -> u32 {
        self.size_px
    }
}

/// `(weight, pixel size) → font` lookup. Never fails.
pub trait FontProvider {
    fn font(&self, weight: FontWeight, size_px: u32) -> FontHandle;
}

/// Font provider backed by faces resolved once from files, the system database, or the
/// built-in fallback, in that order.
#[derive(Clone, Debug)]
pub struct FontLibrary {
    regular: Arc<FontFace>,
    bold: Arc<FontFace>,
}

impl FontLibrary {
    /// Resolve both weights. Failures are logged and fall through to the next candidate.
    pub fn resolve(cfg: &FontConfig) -> Self {
        let mut system: Option<usvg::fontdb::Database> = None;
        let mut resolve_weight = |weight: FontWeight, files: &[PathBuf]| -> Arc<FontFace> {
            for path in files {
                if !path.is_file() {
                    continue;
                }
                match FontFace::from_file(path) {
                    Ok(face) => {
                        tracing::debug!(
                            weight = weight.as_str(),
                            "font: {} ({})",
                            path.display(),
                            face.family()
                        );
                        return Arc::new(face);
                    }
                    Err(e) => tracing::warn!("font {} unusable: {e}", path.display()),
                }
            }

            if cfg.use_system_fonts {
                let db = system.get_or_insert_with(|| {
                    let mut db = usvg::fontdb::Database::new();
                    db.load_system_fonts();
                    db
                });
                match query_system(db, &cfg.system_families, weight) {
                    Ok(face) => {
                        tracing::debug!(
                            weight = weight.as_str(),
                            "font: {} ({})",
                            face.key,
                            face.family()
                        );
                        return Arc::new(face);
                    }
                    Err(e) => tracing::warn!("system font lookup failed: {e}"),
                }
            }

            tracing::warn!(
                weight = weight.as_str(),
                "no font found, using built-in DejaVu Sans"
            );
            Arc::new(FontFace::builtin(weight))
        };

        let regular = resolve_weight(FontWeight::Regular, &cfg.regular_files);
        let bold = resolve_weight(FontWeight::Bold, &cfg.bold_files);
        Self { regular, bold }
    }

    /// Library that only uses the compiled-in faces.
    pub fn builtin() -> Self {
        Self {
            regular: Arc::new(FontFace::builtin(FontWeight::Regular)),
            bold: Arc::new(FontFace::builtin(FontWeight::Bold)),
        }
    }

    /// Library whose text is laid out with approximate metrics and never drawn.
    pub fn metrics_only() -> Self {
        let face = Arc::new(FontFace::metrics_only());
        Self {
            regular: face.clone(),
            bold: face,
        }
    }

    pub fn face(&self, weight: FontWeight) -> &FontFace {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

impl FontProvider for FontLibrary {
    fn font(&self, weight: FontWeight, size_px: u32) -> FontHandle {
        let face = match weight {
            FontWeight::Regular => self.regular.clone(),
            FontWeight::Bold => self.bold.clone(),
        };
        FontHandle {
            face,
            weight,
            size_px: clamp_size(size_px),
        }
    }
}

/// Nearest size the provider supports.
fn clamp_size(size_px: u32) -> u32 {
    size_px.clamp(MIN_FONT_PX, MAX_FONT_PX)
}

fn query_system(
    db: &usvg::fontdb::Database,
    families: &[String],
    weight: FontWeight,
) -> SlideResult<FontFace> {
    use usvg::fontdb::{Family, Query, Stretch, Style, Weight};

    let mut stack: Vec<Family<'_>> = families.iter().map(|f| Family::Name(f)).collect();
    stack.push(Family::SansSerif);
    let query = Query {
        families: &stack,
        weight: match weight {
            FontWeight::Regular => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        },
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db
        .query(&query)
        .ok_or_else(|| SlideError::asset("no matching system font"))?;
    let (bytes, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| SlideError::asset("system font data unavailable"))?;
    let name = db
        .face(id)
        .map(|f| f.post_script_name.clone())
        .unwrap_or_else(|| "unknown".to_owned());
    FontFace::from_bytes(format!("system:{name}"), bytes, index)
}
