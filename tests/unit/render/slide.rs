use chrono::TimeZone;
use chrono_tz::Europe::Berlin;

use super::*;
use crate::assets::decode::PreparedImage;
use crate::foundation::core::Rgb8;

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

fn close(px: [u8; 4], rgb: Rgb8) -> bool {
    px[0].abs_diff(rgb.r) <= 1 && px[1].abs_diff(rgb.g) <= 1 && px[2].abs_diff(rgb.b) <= 1
}

fn event() -> Event {
    Event::new(
        "Seniorenkreis",
        Berlin.with_ymd_and_hms(2026, 10, 21, 15, 0, 0).unwrap(),
    )
    .with_description("Kaffee und Kuchen")
    .with_location("Gemeindehaus")
}

#[test]
fn event_slide_has_banner_and_footer_colors() {
    let cfg = DeckConfig::default();
    let fonts = FontLibrary::builtin();
    let assets = AssetLibrary::fallback(&cfg, Canvas::FULL_HD);
    let mut renderer = SlideRenderer::new(&cfg, &fonts, &assets, Canvas::FULL_HD).unwrap();

    let frame = renderer.render_event(&event()).unwrap();
    assert_eq!((frame.width, frame.height), (1920, 1080));
    assert!(close(frame.pixel(5, 5).unwrap(), cfg.colors.brand));
    assert!(close(frame.pixel(5, 1075).unwrap(), cfg.colors.footer));

    // Darkened fallback background between banner and footer.
    let mid = frame.pixel(5, 700).unwrap();
    assert_eq!(mid[3], 255);
    assert!(mid[0] < 40 && mid[0] > 20, "{mid:?}");
}

#[test]
fn qr_is_painted_into_footer() {
    let cfg = DeckConfig::default();
    let fonts = FontLibrary::builtin();
    let mut assets = AssetLibrary::fallback(&cfg, Canvas::FULL_HD);
    assets.qr = Some(PreparedImage::solid(Rgb8::BLACK, 150, 150));
    let mut renderer = SlideRenderer::new(&cfg, &fonts, &assets, Canvas::FULL_HD).unwrap();

    let frame = renderer.render_event(&event()).unwrap();
    assert!(close(frame.pixel(1730 + 75, 865 + 75).unwrap(), Rgb8::BLACK));
    // Left of the QR code the footer stays light.
    assert!(close(frame.pixel(1700, 940).unwrap(), cfg.colors.footer));
}

#[test]
fn title_slide_darkens_whole_canvas() {
    let cfg = DeckConfig::default();
    let fonts = FontLibrary::builtin();
    let assets = AssetLibrary::fallback(&cfg, Canvas::FULL_HD);
    let mut renderer = SlideRenderer::new(&cfg, &fonts, &assets, Canvas::FULL_HD).unwrap();

    let frame = renderer.render_title().unwrap();
    for (x, y) in [(0, 0), (5, 540), (1919, 1079)] {
        let px = frame.pixel(x, y).unwrap();
        assert!(px[0] < 40 && px[2] < 50, "{px:?}");
    }
    let lit = (300..700)
        .flat_map(|y| (0..1920).map(move |x| (x, y)))
        .filter(|&(x, y)| is_white(frame.pixel(x, y).unwrap()))
        .count();
    assert!(lit > 1_000, "title text barely visible: {lit} white pixels");
}

fn is_white(px: [u8; 4]) -> bool {
    px[0] > 200 && px[1] > 200 && px[2] > 200
}

#[test]
fn banner_title_ink_spans_its_measured_width() {
    let cfg = DeckConfig::default();
    let fonts = FontLibrary::builtin();
    let assets = AssetLibrary::fallback(&cfg, Canvas::FULL_HD);
    let ev = Event::new(
        "Gemeindefest im Garten",
        Berlin.with_ymd_and_hms(2026, 10, 24, 14, 0, 0).unwrap(),
    );

    let scene = SlideComposer::new(&cfg, &fonts, Canvas::FULL_HD).event(
        &mut TextLayoutEngine::new(),
        &ev,
        false,
    );
    let title = &scene.texts[0];
    assert_eq!(title.text, "GEMEINDEFEST IM GARTEN");
    let banner = scene.regions.banner.unwrap();

    let mut renderer = SlideRenderer::new(&cfg, &fonts, &assets, Canvas::FULL_HD).unwrap();
    let frame = renderer.render_event(&ev).unwrap();

    let (mut min_x, mut max_x, mut min_y) = (u32::MAX, 0, u32::MAX);
    for y in 0..banner.height {
        for x in 0..frame.width {
            if is_white(frame.pixel(x, y).unwrap()) {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
            }
        }
    }
    assert!(min_x < max_x, "no title ink in the banner");

    let ink = max_x - min_x + 1;
    assert!(
        ink as f32 > 0.9 * title.width as f32 && ink <= title.width + 8,
        "ink {min_x}..={max_x} vs measured width {}",
        title.width
    );
    assert!(min_x + 2 >= title.x as u32, "ink starts left of the text box");
    assert!(min_y >= title.y as u32, "ink above the text box: row {min_y}");
    assert!(((min_x + max_x) / 2).abs_diff(960) <= 12);
}

#[test]
fn render_to_writes_full_hd_pngs() {
    let tmp = temp_dir("render_to");
    std::fs::create_dir_all(&tmp).unwrap();

    let info_src = tmp.join("slide_info_src.jpg");
    image::RgbImage::from_pixel(40, 30, image::Rgb([200, 10, 10]))
        .save(&info_src)
        .unwrap();

    let cfg = DeckConfig::default();
    let fonts = FontLibrary::builtin();
    let assets = AssetLibrary::fallback(&cfg, Canvas::FULL_HD);
    let mut renderer = SlideRenderer::new(&cfg, &fonts, &assets, Canvas::FULL_HD).unwrap();

    let slides = [
        SlideDescriptor {
            index: 0,
            kind: SlideKind::Title,
            output_name: "slide_00_titel.png".to_owned(),
        },
        SlideDescriptor {
            index: 1,
            kind: SlideKind::Event(event()),
            output_name: "slide_01_Seniorenkreis_21Oct.png".to_owned(),
        },
        SlideDescriptor {
            index: 2,
            kind: SlideKind::Info(info_src),
            output_name: "slide_02_info.png".to_owned(),
        },
    ];
    for slide in &slides {
        let out = renderer.render_to(slide, &tmp).unwrap();
        let img = image::open(&out).unwrap();
        assert_eq!((img.width(), img.height()), (1920, 1080), "{}", out.display());
    }

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn unreadable_info_source_is_an_error() {
    let tmp = temp_dir("render_info_err");
    std::fs::create_dir_all(&tmp).unwrap();

    let cfg = DeckConfig::default();
    let fonts = FontLibrary::builtin();
    let assets = AssetLibrary::fallback(&cfg, Canvas::FULL_HD);
    let renderer = SlideRenderer::new(&cfg, &fonts, &assets, Canvas::FULL_HD).unwrap();
    assert!(
        renderer
            .render_info(&tmp.join("missing.jpg"), &tmp.join("out.png"))
            .is_err()
    );

    std::fs::remove_dir_all(&tmp).ok();
}
