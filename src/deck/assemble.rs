use std::path::PathBuf;

use chrono::{DateTime, Days, TimeDelta, TimeZone};
use chrono_tz::Tz;

use crate::config::DeckConfig;
use crate::model::deck::{Deck, SlideDescriptor, SlideKind};
use crate::model::event::Event;

/// Characters of the summary kept in an event slide's file name.
const NAME_CHARS: usize = 20;

/// Events starting within `[now, now + days_ahead]`, both ends inclusive.
///
/// Days are calendar days: the window ends at the same wall-clock time, even across a DST change.
pub fn filter_window(events: Vec<Event>, now: DateTime<Tz>, days_ahead: u32) -> Vec<Event> {
    let end = window_end(now, days_ahead);
    events
        .into_iter()
        .filter(|e| e.start >= now && e.start <= end)
        .collect()
}

fn window_end(now: DateTime<Tz>, days_ahead: u32) -> DateTime<Tz> {
    now.naive_local()
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .and_then(|local| now.timezone().from_local_datetime(&local).latest())
        // Wall-clock end inside a DST gap: fall back to elapsed time.
        .unwrap_or_else(|| now + TimeDelta::days(i64::from(days_ahead)))
}

/// Filename-safe form of the first characters of a summary.
pub fn slug(summary: &str) -> String {
    summary
        .chars()
        .take(NAME_CHARS)
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() || c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

fn event_file_name(index: usize, event: &Event) -> String {
    format!(
        "slide_{index:02}_{}_{}.png",
        slug(&event.summary),
        event.start.format("%d%b")
    )
}

/// Build the ordered deck: title, events sorted by start, and one info slide after every
/// `info_every` events, cycling through `info` round-robin.
pub fn assemble(events: Vec<Event>, info: &[PathBuf], now: DateTime<Tz>, cfg: &DeckConfig) -> Deck {
    let mut upcoming = filter_window(events, now, cfg.days_ahead);
    upcoming.sort_by_key(|e| e.start);

    let mut slides = Vec::with_capacity(1 + upcoming.len() + upcoming.len() / cfg.info_every.max(1));
    slides.push(SlideDescriptor {
        index: 0,
        kind: SlideKind::Title,
        output_name: "slide_00_titel.png".to_owned(),
    });

    let mut next_info = 0usize;
    for (n, event) in upcoming.into_iter().enumerate() {
        let index = slides.len();
        slides.push(SlideDescriptor {
            index,
            output_name: event_file_name(index, &event),
            kind: SlideKind::Event(event),
        });

        if (n + 1) % cfg.info_every.max(1) == 0 && !info.is_empty() {
            let index = slides.len();
            slides.push(SlideDescriptor {
                index,
                kind: SlideKind::Info(info[next_info % info.len()].clone()),
                output_name: format!("slide_{index:02}_info.png"),
            });
            next_info += 1;
        }
    }

    Deck { slides }
}
