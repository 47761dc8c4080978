// File: src/pipeline.rs
//! Filter, group and order stages turning the flat catalog into date groups.
//!
//! Everything here is a pure function of `(events, search, category)`. Events
//! are only borrowed; the output holds references into the input slice.

use crate::model::{CategoryFilter, Event, Group};
use std::collections::HashMap;

/// Runs all three stages. An empty result means "no matches", never an error.
pub fn compute_groups<'a>(
    events: &'a [Event],
    search: &str,
    category: CategoryFilter,
) -> Vec<Group<'a>> {
    let filtered = filter_events(events, search, category);
    order_groups(group_by_date(&filtered))
}

/// Stable filter: survivors keep their relative input order.
pub fn filter_events<'a>(
    events: &'a [Event],
    search: &str,
    category: CategoryFilter,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| e.matches_filter(search, category))
        .collect()
}

/// Buckets events by their exact `time` string. No normalization is applied,
/// so `"2026-3-1"` and `"2026-03-01"` land in different buckets.
pub fn group_by_date<'a>(events: &[&'a Event]) -> HashMap<&'a str, Vec<&'a Event>> {
    let mut buckets: HashMap<&'a str, Vec<&'a Event>> = HashMap::new();
    for &event in events {
        buckets.entry(event.time.as_str()).or_default().push(event);
    }
    buckets
}

/// Sorts bucket keys ascending by plain string order and pairs each key with
/// its bucket. Zero-padded ISO-like dates make this chronological.
pub fn order_groups<'a>(buckets: HashMap<&'a str, Vec<&'a Event>>) -> Vec<Group<'a>> {
    let mut groups: Vec<Group<'a>> = buckets
        .into_iter()
        .map(|(date, events)| Group { date, events })
        .collect();
    groups.sort_by(|a, b| a.date.cmp(b.date));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn test_group_by_date_keeps_bucket_order() {
        let events = vec![
            Event::new(3, "c", "p", "2026-01-01", Category::A),
            Event::new(1, "a", "p", "2026-02-01", Category::A),
            Event::new(2, "b", "p", "2026-01-01", Category::A),
        ];
        let refs: Vec<&Event> = events.iter().collect();
        let buckets = group_by_date(&refs);

        assert_eq!(buckets.len(), 2);
        let ids: Vec<u32> = buckets["2026-01-01"].iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_order_groups_sorts_keys() {
        let events = vec![
            Event::new(1, "a", "p", "2026-03-15", Category::A),
            Event::new(2, "b", "p", "2026-01-10", Category::B),
            Event::new(3, "c", "p", "2026-02-20", Category::C),
        ];
        let refs: Vec<&Event> = events.iter().collect();
        let dates: Vec<&str> = order_groups(group_by_date(&refs))
            .iter()
            .map(|g| g.date)
            .collect();
        assert_eq!(dates, vec!["2026-01-10", "2026-02-20", "2026-03-15"]);
    }

    #[test]
    fn test_malformed_time_gets_own_bucket() {
        let events = vec![
            Event::new(1, "a", "p", "2026-05-01", Category::A),
            Event::new(2, "b", "p", "", Category::A),
            Event::new(3, "c", "p", "TBD", Category::A),
        ];
        let dates: Vec<&str> = compute_groups(&events, "", CategoryFilter::All)
            .iter()
            .map(|g| g.date)
            .collect();
        // Digits sort before latin letters; the empty key sorts first.
        assert_eq!(dates, vec!["", "2026-05-01", "TBD"]);
    }
}
