use chrono::TimeZone;
use chrono_tz::Europe::Berlin;

use super::*;
use crate::assets::fonts::FontLibrary;
use crate::text::metrics::TextLayoutEngine;

fn sunday_service() -> Event {
    Event::new(
        "Gottesdienst",
        Berlin.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap(),
    )
    .with_end(Berlin.with_ymd_and_hms(2026, 10, 18, 11, 30, 0).unwrap())
    .with_location("Konkordia, Großer Saal")
}

fn compose_event(event: &Event, with_qr: bool) -> SlideScene {
    let cfg = DeckConfig::default();
    let fonts = FontLibrary::metrics_only();
    let composer = SlideComposer::new(&cfg, &fonts, Canvas::FULL_HD);
    composer.event(&mut TextLayoutEngine::new(), event, with_qr)
}

fn text<'a>(scene: &'a SlideScene, needle: &str) -> &'a PlacedText {
    scene
        .texts
        .iter()
        .find(|t| t.text == needle)
        .unwrap_or_else(|| panic!("no text {needle:?} in {:?}", scene.text_lines().collect::<Vec<_>>()))
}

#[test]
fn banner_uses_largest_fitting_size_and_min_height() {
    let scene = compose_event(&sunday_service(), true);
    let title = text(&scene, "GOTTESDIENST");
    assert_eq!(title.font.size_px(), 100);
    assert_eq!(title.font.weight(), FontWeight::Bold);
    // Approximate metrics: 120px line height, so the banner hits its 200px floor.
    assert_eq!(scene.regions.banner, Some(Region::new(0, 0, 1920, 200)));
    assert_eq!(title.y, 40);
    assert_eq!(title.x, center_x(title.width, 1920));
}

#[test]
fn overlong_summary_falls_back_to_min_size() {
    let ev = Event::new("x".repeat(60), sunday_service().start);
    let scene = compose_event(&ev, true);
    let title = &scene.texts[0];
    assert_eq!(title.font.size_px(), 60);
    let banner = scene.regions.banner.unwrap();
    assert!(banner.height >= 200 && banner.height <= 350);
}

#[test]
fn banner_is_filled_with_brand_color_over_overlay() {
    let scene = compose_event(&sunday_service(), true);
    assert_eq!(scene.rects[0].alpha, 80);
    assert_eq!(scene.rects[0].color, Rgb8::BLACK);
    assert_eq!(scene.rects[1].color, Rgb8::new(187, 34, 50));
    assert_eq!(scene.rects[2].color, Rgb8::new(240, 240, 240));
}

#[test]
fn footer_lines_follow_fixed_advances() {
    let scene = compose_event(&sunday_service(), true);
    assert_eq!(scene.regions.footer, Some(Region::new(0, 800, 1920, 280)));

    let weekday = text(&scene, "Sonntag");
    assert_eq!((weekday.x, weekday.y), (40, 830));
    let date = text(&scene, "18. Oktober 2026");
    assert_eq!((date.y, date.font.size_px()), (880, 85));
    assert_eq!(date.font.weight(), FontWeight::Bold);
    assert_eq!(text(&scene, "10:00 - 11:30 Uhr").y, 975);
    assert_eq!(text(&scene, "Konkordia, Großer Saal").y, 1023);
}

#[test]
fn qr_sits_right_in_footer_only_when_available() {
    let scene = compose_event(&sunday_service(), true);
    let qr = scene.regions.qr.unwrap();
    assert_eq!(qr, Region::new(1730, 865, 150, 150));
    let footer = scene.regions.footer.unwrap();
    assert!(qr.y >= footer.y && qr.bottom() <= footer.bottom());

    let without = compose_event(&sunday_service(), false);
    assert_eq!(without.regions.qr, None);
}

#[test]
fn long_location_is_truncated_to_content_width() {
    let ev = sunday_service().with_location("Gemeindezentrum ".repeat(20));
    let scene = compose_event(&ev, true);
    let loc = scene.texts.last().unwrap();
    assert!(loc.text.ends_with("..."), "{}", loc.text);
    assert!(loc.width <= 1610);
    assert!(loc.region().right() <= 1730);
}

#[test]
fn missing_location_omits_the_line() {
    let ev = Event::new("Chorprobe", sunday_service().start);
    let scene = compose_event(&ev, true);
    let lines: Vec<_> = scene.text_lines().collect();
    assert_eq!(lines, vec!["CHORPROBE", "Sonntag", "18. Oktober 2026", "10:00 Uhr"]);
}

#[test]
fn description_is_wrapped_and_capped() {
    let ev = sunday_service().with_description("Wort ".repeat(400));
    let scene = compose_event(&ev, true);
    let body = scene.regions.body.unwrap();
    assert_eq!(body.y, 260);
    assert_eq!(body.height, 4 * 57);

    let desc: Vec<_> = scene.texts.iter().filter(|t| t.text.starts_with("Wort")).collect();
    assert_eq!(desc.len(), 4);
    for (i, line) in desc.iter().enumerate() {
        assert_eq!(line.y, 260 + 57 * i as i32);
        assert!(line.width <= 1720);
    }
}

#[test]
fn regions_never_overlap() {
    let ev = sunday_service().with_description("Wort ".repeat(400));
    let scene = compose_event(&ev, true);
    let r = scene.regions;
    let (banner, body, footer) = (r.banner.unwrap(), r.body.unwrap(), r.footer.unwrap());
    assert!(!banner.overlaps(body));
    assert!(!body.overlaps(footer));
    assert!(!banner.overlaps(footer));
}

#[test]
fn empty_description_has_no_body() {
    let scene = compose_event(&sunday_service().with_description(" \\n "), true);
    assert_eq!(scene.regions.body, None);
}

#[test]
fn title_slide_stacks_three_centered_lines() {
    let cfg = DeckConfig::default();
    let fonts = FontLibrary::metrics_only();
    let scene = SlideComposer::new(&cfg, &fonts, Canvas::FULL_HD).title(&mut TextLayoutEngine::new());

    assert_eq!(scene.rects.len(), 1);
    assert_eq!(scene.rects[0].alpha, 100);
    let lines: Vec<_> = scene.texts.iter().map(|t| (t.text.as_str(), t.y)).collect();
    assert_eq!(
        lines,
        vec![
            ("VERANSTALTUNGEN", 360),
            ("Gemeinde in der Konkordia", 510),
            ("Nächste 14 Tage", 610),
        ]
    );
    let heading = &scene.texts[0];
    assert_eq!(heading.font.size_px(), 120);
    assert_eq!(heading.x, center_x(heading.width, 1920));
}
