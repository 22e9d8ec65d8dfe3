use brewdoc_types::Note;
use chrono::{Local, TimeZone};
use std::fmt::Display;

/// Markdown bullet lines for brew-day notes, oldest first, dated in the local time zone.
pub fn note_lines_local(notes: &[Note]) -> Vec<String> {
    note_lines(notes, &Local)
}

/// Markdown bullet lines for brew-day notes, oldest first, dated in `tz`.
///
/// Notes are stored newest-first; the stored order is reversed and then sorted by timestamp, so
/// ties keep their chronological insertion order. Blank notes are dropped.
pub fn note_lines<Tz>(notes: &[Note], tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut ordered: Vec<&Note> = notes.iter().rev().collect();
    ordered.sort_by_key(|n| n.timestamp);

    ordered
        .into_iter()
        .filter_map(|note| {
            let text = note.text()?;
            let date = note
                .timestamp
                .and_then(|ms| tz.timestamp_millis_opt(ms).single())
                .map(|dt| dt.format("%Y-%m-%d").to_string());
            Some(match date {
                Some(date) => format!("* {text} ({date})"),
                None => format!("* {text}"),
            })
        })
        .collect()
}
