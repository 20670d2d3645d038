use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::config::DeckConfig;
use crate::foundation::error::{SlideError, SlideResult};
use crate::model::event::{DEFAULT_SUMMARY, Event};
use crate::source::EventSource;

/// Event files holding JSON arrays of `{summary, description, location, start, end}`.
///
/// Files are read in the configured order. A missing file is skipped with a warning, an
/// unreadable file is logged and skipped, and a single malformed entry is dropped without
/// affecting its neighbours.
#[derive(Clone, Debug)]
pub struct JsonEventFiles {
    files: Vec<PathBuf>,
    tz: Tz,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

impl JsonEventFiles {
    pub fn new(files: Vec<PathBuf>, tz: Tz) -> Self {
        Self { files, tz }
    }

    pub fn from_config(cfg: &DeckConfig) -> Self {
        Self::new(cfg.paths.event_files.clone(), cfg.time_zone)
    }

    fn read_file(&self, path: &Path) -> SlideResult<Vec<Event>> {
        let f = File::open(path).with_context(|| format!("open events '{}'", path.display()))?;
        let entries: Vec<serde_json::Value> = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse events '{}'", path.display()))?;

        let mut out = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            match parse_entry(entry, self.tz) {
                Ok(ev) => out.push(ev),
                Err(reason) => {
                    tracing::warn!(file = %path.display(), entry = i, "dropping event: {reason}");
                }
            }
        }
        Ok(out)
    }
}

impl EventSource for JsonEventFiles {
    fn events(&self) -> SlideResult<Vec<Event>> {
        let mut all = Vec::new();
        for path in &self.files {
            if !path.exists() {
                tracing::warn!("event file not found: {}", path.display());
                continue;
            }
            match self.read_file(path) {
                Ok(events) => {
                    tracing::info!("found {} events in {}", events.len(), path.display());
                    all.extend(events);
                }
                Err(e) => tracing::error!("skipping event file {}: {e:#}", path.display()),
            }
        }
        Ok(all)
    }
}

fn parse_entry(value: serde_json::Value, tz: Tz) -> SlideResult<Event> {
    let raw: RawEvent =
        serde_json::from_value(value).map_err(|e| SlideError::source(e.to_string()))?;
    let start_raw = raw.start.ok_or_else(|| SlideError::source("missing start"))?;
    let start = parse_timestamp(&start_raw, tz)?;
    let end = raw
        .end
        .as_deref()
        .map(|s| parse_timestamp(s, tz))
        .transpose()?;

    Ok(Event {
        summary: raw.summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_owned()),
        description: raw.description.unwrap_or_default(),
        location: raw.location.unwrap_or_default(),
        start,
        end,
    })
}

/// Resolve a timestamp into `tz`.
///
/// Accepts RFC 3339 (converted), naive date-times (interpreted as local time in `tz`) and plain
/// dates (local midnight). Local times that do not exist in `tz` are rejected.
pub(crate) fn parse_timestamp(raw: &str, tz: Tz) -> SlideResult<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&tz));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| SlideError::source(format!("unparsable timestamp \"{raw}\"")))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| {
            SlideError::source(format!("local time \"{raw}\" does not exist in {tz}"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/source/json.rs"]
mod tests;
