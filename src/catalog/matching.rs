//! Linking grey market quotes to catalog IPOs by name.
//!
//! Grey market sources spell issue names loosely ("Acme Infra" vs
//! "Acme Infrastructure Ltd"), so records are matched with successively
//! looser heuristics. Very short names can match the wrong issue; there is
//! no reliable key to do better with.

use chrono::{Datelike, NaiveDate};

use super::Ipo;

const NO_DATE: &str = "—";

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn prefix(s: &str, len: usize) -> &str {
    match s.char_indices().nth(len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Find the IPO a grey market record refers to.
///
/// Tries, in order: normalised substring either way, a shared 4-character
/// prefix (only when the record name normalises to 3+ characters), then a
/// raw case-insensitive substring either way.
pub fn match_ipo<'a>(record_name: &str, ipos: &'a [Ipo]) -> Option<&'a Ipo> {
    let wanted = normalize(record_name);

    let found = ipos.iter().find(|ipo| {
        let candidate = normalize(&ipo.name);
        candidate.contains(&wanted) || wanted.contains(&candidate)
    });
    if found.is_some() {
        return found;
    }

    if wanted.len() >= 3 {
        let head = prefix(&wanted, 4);
        let found = ipos.iter().find(|ipo| {
            let candidate = normalize(&ipo.name);
            candidate.contains(head) || head.contains(prefix(&candidate, 4))
        });
        if found.is_some() {
            return found;
        }
    }

    let raw = record_name.to_lowercase();
    ipos.iter().find(|ipo| {
        let candidate = ipo.name.to_lowercase();
        candidate.contains(&raw) || raw.contains(&candidate)
    })
}

fn day_month(date: NaiveDate) -> String {
    format!("{} {}", date.day(), date.format("%b"))
}

/// Render a bidding window compactly: `12-15 Dec`, `28 Nov - 2 Dec`, or a
/// single date when only one end is known.
pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(s), Some(e)) if s.year() == e.year() && s.month() == e.month() => {
            format!("{}-{} {}", s.day(), e.day(), s.format("%b"))
        }
        (Some(s), Some(e)) => format!("{} - {}", day_month(s), day_month(e)),
        (Some(only), None) | (None, Some(only)) => day_month(only),
        (None, None) => NO_DATE.to_string(),
    }
}

/// Date column for a grey market row: the bidding window when known,
/// otherwise the listing date.
pub fn date_display(ipo: Option<&Ipo>) -> String {
    let Some(ipo) = ipo else {
        return NO_DATE.to_string();
    };

    if ipo.open_date.is_some() || ipo.close_date.is_some() {
        format_date_range(ipo.open_date, ipo.close_date)
    } else if let Some(listed) = ipo.listing_date {
        day_month(listed)
    } else {
        NO_DATE.to_string()
    }
}
