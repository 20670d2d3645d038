use std::path::PathBuf;

use super::*;
use crate::foundation::core::Rgb8;
use crate::foundation::error::SlideError;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "eventslides_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn small_canvas() -> Canvas {
    Canvas {
        width: 64,
        height: 36,
    }
}

#[test]
fn first_success_stops_at_first_ok() {
    let mut tried = Vec::new();
    let out = {
        let tried = &mut tried;
        let attempts: Vec<Attempt<'_, u32>> = vec![
            attempt("a", || Err(SlideError::asset("nope"))),
            attempt("b", move || {
                tried.push("b");
                Ok(2)
            }),
            attempt("c", || Ok(3)),
        ];
        first_success("test", attempts)
    };
    assert_eq!(out, Some(2));
    assert_eq!(tried, vec!["b"]);
}

#[test]
fn first_success_of_nothing_is_none() {
    let attempts: Vec<Attempt<'_, u32>> = vec![attempt("a", || Err(SlideError::asset("nope")))];
    assert_eq!(first_success("test", attempts), None);
}

#[test]
fn missing_background_uses_solid_fallback() {
    let tmp = temp_dir("assets_bg");
    let mut cfg = DeckConfig::default();
    cfg.paths.background_files = vec![tmp.join("missing.jpg")];
    cfg.paths.qr_file = tmp.join("qr.png");
    cfg.colors.fallback_background = Rgb8::new(1, 2, 3);

    let assets = AssetLibrary::load(&cfg, small_canvas());
    assert_eq!((assets.background.width, assets.background.height), (64, 36));
    assert_eq!(assets.background.pixel(10, 10), Some([1, 2, 3, 255]));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn background_file_is_stretched_to_canvas() {
    let tmp = temp_dir("assets_bg_file");
    std::fs::create_dir_all(&tmp).unwrap();
    let bg = tmp.join("bg.png");
    image::RgbImage::from_pixel(16, 16, image::Rgb([0, 128, 0]))
        .save(&bg)
        .unwrap();

    let mut cfg = DeckConfig::default();
    cfg.paths.background_files = vec![tmp.join("missing.jpg"), bg];
    cfg.paths.qr_file = tmp.join("qr.png");

    let assets = AssetLibrary::load(&cfg, small_canvas());
    assert_eq!((assets.background.width, assets.background.height), (64, 36));
    let px = assets.background.pixel(32, 18).unwrap();
    assert!(px[1].abs_diff(128) <= 1 && px[0] <= 1 && px[2] <= 1, "{px:?}");

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_qr_file_is_generated_and_saved() {
    let tmp = temp_dir("assets_qr");
    let mut cfg = DeckConfig::default();
    cfg.paths.background_files = vec![];
    cfg.paths.qr_file = tmp.join("assets").join("QR_news.png");

    let assets = AssetLibrary::load(&cfg, small_canvas());
    let qr = assets.qr.expect("generated QR");
    assert_eq!((qr.width, qr.height), (150, 150));
    assert!(cfg.paths.qr_file.is_file());

    // Second run picks up the stored file.
    let again = AssetLibrary::load(&cfg, small_canvas());
    assert!(again.qr.is_some());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn fallback_library_has_no_qr() {
    let cfg = DeckConfig::default();
    let assets = AssetLibrary::fallback(&cfg, small_canvas());
    assert!(assets.qr.is_none());
    assert_eq!(assets.background.pixel(0, 0), Some([40, 40, 50, 255]));
}
