use chrono::{TimeZone, Timelike};
use chrono_tz::Europe::Berlin;
use serde_json::json;

use super::*;

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

#[test]
fn rfc3339_is_converted_into_zone() {
    let dt = parse_timestamp("2026-10-18T07:00:00Z", Berlin).unwrap();
    // CEST is UTC+2 on this date.
    assert_eq!(dt.hour(), 9);
    assert_eq!(dt, Berlin.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap());
}

#[test]
fn naive_times_are_local_to_zone() {
    let a = parse_timestamp("2026-10-18T09:30", Berlin).unwrap();
    let b = parse_timestamp("2026-10-18 09:30:00", Berlin).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, Berlin.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap());
}

#[test]
fn date_only_means_local_midnight() {
    let dt = parse_timestamp("2026-12-24", Berlin).unwrap();
    assert_eq!(dt, Berlin.with_ymd_and_hms(2026, 12, 24, 0, 0, 0).unwrap());
}

#[test]
fn garbage_and_dst_gaps_are_rejected() {
    assert!(matches!(
        parse_timestamp("next sunday", Berlin),
        Err(SlideError::Source(_))
    ));
    // 02:30 does not exist on the spring-forward night.
    assert!(parse_timestamp("2026-03-29T02:30", Berlin).is_err());
}

#[test]
fn entry_defaults_missing_fields() {
    let ev = parse_entry(json!({ "start": "2026-10-18T10:00" }), Berlin).unwrap();
    assert_eq!(ev.summary, DEFAULT_SUMMARY);
    assert!(ev.description.is_empty());
    assert!(ev.location.is_empty());
    assert!(ev.end.is_none());
}

#[test]
fn entry_without_valid_start_is_dropped() {
    let missing = parse_entry(json!({ "summary": "x" }), Berlin).unwrap_err();
    assert!(missing.to_string().contains("missing start"), "{missing}");
    assert!(parse_entry(json!({ "summary": "x", "start": 12 }), Berlin).is_err());
    assert!(
        parse_entry(
            json!({ "summary": "x", "start": "2026-10-18T10:00", "end": "soon" }),
            Berlin
        )
        .is_err()
    );
}

#[test]
fn files_are_read_in_order_and_bad_entries_skipped() {
    let tmp = temp_dir("json_source");
    std::fs::create_dir_all(&tmp).unwrap();

    let a = tmp.join("a.json");
    std::fs::write(
        &a,
        json!([
            { "summary": "Gottesdienst", "start": "2026-10-18T10:00", "end": "2026-10-18T11:30",
              "location": "Konkordia", "description": "Mit Abendmahl" },
            { "summary": "kaputt", "start": "gestern" }
        ])
        .to_string(),
    )
    .unwrap();
    let b = tmp.join("b.json");
    std::fs::write(
        &b,
        json!([{ "summary": "Jugend", "start": "2026-10-17" }]).to_string(),
    )
    .unwrap();
    let broken = tmp.join("broken.json");
    std::fs::write(&broken, "{").unwrap();

    let source = JsonEventFiles::new(
        vec![a, tmp.join("missing.json"), broken, b],
        Berlin,
    );
    let events = source.events().unwrap();
    let names: Vec<_> = events.iter().map(|e| e.summary.as_str()).collect();
    assert_eq!(names, vec!["Gottesdienst", "Jugend"]);
    assert_eq!(events[0].location, "Konkordia");
    assert!(events[0].end.is_some());

    std::fs::remove_dir_all(&tmp).ok();
}
