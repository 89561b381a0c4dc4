//! Score / creation-time ordering.
//!
//! Sorting is stable: items with equal keys keep their incoming order.
//! Leads whose `created_at` is missing or unparseable always sort last,
//! whichever direction is requested.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lead_engine_filter_models::{SortConfig, SortDirection, SortKey};

use crate::Rankable;

/// Parses a stored `created_at` value.
///
/// Accepts RFC 3339 (what the store returns), Postgres-style
/// `YYYY-MM-DD HH:MM:SS[.f][+zz]`, naive ISO 8601 datetimes (taken as UTC),
/// and bare dates (midnight UTC).
#[must_use]
pub fn parse_created_at(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn created_at<R: Rankable>(item: &R) -> Option<DateTime<Utc>> {
    let lead = item.lead();
    let raw = lead.created_at.as_deref()?;
    let parsed = parse_created_at(raw);
    if parsed.is_none() {
        log::trace!("lead {}: unparseable created_at {raw:?}", lead.id);
    }
    parsed
}

/// Sorts by an optional key. `None` keys go last in both directions.
fn sort_by_optional_key<R, K, F>(items: &mut [R], direction: SortDirection, key: F)
where
    K: Ord,
    F: Fn(&R) -> Option<K>,
{
    match direction {
        SortDirection::Asc => items.sort_by_cached_key(|item| {
            let k = key(item);
            (k.is_none(), k)
        }),
        SortDirection::Desc => items.sort_by_cached_key(|item| {
            let k = key(item);
            (k.is_none(), k.map(Reverse))
        }),
    }
}

/// Sorts items in place according to `config`.
pub fn sort_leads<R: Rankable>(items: &mut [R], config: SortConfig) {
    log::debug!(
        "sort_leads: {} items by {} {}",
        items.len(),
        config.key,
        config.direction
    );

    match config.key {
        SortKey::Score => {
            sort_by_optional_key(items, config.direction, |item| Some(item.score_total()));
        }
        SortKey::CreatedAt => sort_by_optional_key(items, config.direction, created_at),
    }
}
