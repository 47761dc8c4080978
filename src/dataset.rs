// File: src/dataset.rs
//! Loading of the event catalog.
//!
//! The published calendar is compiled into the binary and parsed once at
//! startup. A JSON file with the same schema can replace it (`--data` or the
//! `data_file` config key). Irregular records are reported and kept: the
//! pipeline is total, so a strange date key only affects sort position.

use crate::model::Event;
use crate::store::EventStore;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

const EMBEDDED_EVENTS: &str = include_str!("../data/events.json");

/// Findings of `inspect`. None of these stop the catalog from loading.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DatasetReport {
    /// `(id, time)` of records whose date key is not `YYYY-MM-DD` or `YYYY-MM`.
    pub irregular_dates: Vec<(u32, String)>,
    /// Ids of records whose tier was not one of A, B, C.
    pub unknown_categories: Vec<u32>,
}

impl DatasetReport {
    pub fn is_clean(&self) -> bool {
        self.irregular_dates.is_empty() && self.unknown_categories.is_empty()
    }
}

pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    let events: Vec<Event> = serde_json::from_str(json)?;
    Ok(events)
}

/// The catalog shipped with the binary.
pub fn embedded() -> Result<EventStore> {
    let events = parse_events(EMBEDDED_EVENTS).context("Failed to parse embedded catalog")?;
    log::debug!("Loaded {} embedded events", events.len());
    finish(events)
}

pub fn load_from_path(path: &Path) -> Result<EventStore> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset '{}'", path.display()))?;
    let events = parse_events(&contents)
        .with_context(|| format!("Failed to parse dataset '{}'", path.display()))?;
    log::info!("Loaded {} events from {}", events.len(), path.display());
    finish(events).with_context(|| format!("Invalid dataset '{}'", path.display()))
}

/// Loads `path` when given, the embedded catalog otherwise.
pub fn load(path: Option<&Path>) -> Result<EventStore> {
    match path {
        Some(p) => load_from_path(p),
        None => embedded(),
    }
}

fn finish(events: Vec<Event>) -> Result<EventStore> {
    let report = inspect(&events);
    for (id, time) in &report.irregular_dates {
        log::warn!("Event {} has irregular date key '{}'", id, time);
    }
    for id in &report.unknown_categories {
        log::warn!("Event {} has an unknown category, shown under all tiers only", id);
    }
    EventStore::new(events)
}

pub fn inspect(events: &[Event]) -> DatasetReport {
    let mut report = DatasetReport::default();
    for event in events {
        if !is_regular_date_key(&event.time) {
            report.irregular_dates.push((event.id, event.time.clone()));
        }
        if event.category.is_none() {
            report.unknown_categories.push(event.id);
        }
    }
    report
}

/// True for keys whose string order matches calendar order: zero-padded
/// `YYYY-MM-DD`, or `YYYY-MM` for events announced without a day.
pub fn is_regular_date_key(key: &str) -> bool {
    match key.len() {
        10 => NaiveDate::parse_from_str(key, "%Y-%m-%d").is_ok(),
        7 => NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d").is_ok(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_date_keys() {
        assert!(is_regular_date_key("2026-04-12"));
        assert!(is_regular_date_key("2026-08"));
        assert!(!is_regular_date_key("2026-4-12"));
        assert!(!is_regular_date_key("2026-02-30"));
        assert!(!is_regular_date_key(""));
        assert!(!is_regular_date_key("待定"));
    }
}
