// File: src/store.rs
use crate::heatmap;
use crate::model::{CategoryFilter, Event, Group};
use crate::pipeline;
use anyhow::{Result, bail};
use std::collections::HashMap;

/// Caller-owned filter inputs. The pipeline is a pure function of
/// `(events, FilterState)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub category: CategoryFilter,
}

impl FilterState {
    pub fn new(search_term: &str, category: CategoryFilter) -> Self {
        Self {
            search_term: search_term.to_string(),
            category,
        }
    }

    /// Clears the search text and goes back to all categories.
    pub fn reset(&mut self) {
        self.search_term.clear();
        self.category = CategoryFilter::All;
    }

    pub fn is_default(&self) -> bool {
        self.search_term.is_empty() && self.category == CategoryFilter::All
    }
}

/// The immutable catalog, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
    index: HashMap<u32, usize>,
}

impl EventStore {
    /// Builds the store, rejecting catalogs where two records share an id.
    pub fn new(events: Vec<Event>) -> Result<Self> {
        let mut index = HashMap::with_capacity(events.len());
        for (pos, event) in events.iter().enumerate() {
            if let Some(prev) = index.insert(event.id, pos) {
                bail!(
                    "Duplicate event id {} ('{}' and '{}')",
                    event.id,
                    events[prev].name,
                    event.name
                );
            }
        }
        Ok(Self { events, index })
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Event> {
        self.index.get(&id).and_then(|&pos| self.events.get(pos))
    }

    pub fn groups(&self, state: &FilterState) -> Vec<Group<'_>> {
        pipeline::compute_groups(&self.events, &state.search_term, state.category)
    }

    /// Count per province over the whole catalog, most events first, ties by name.
    pub fn province_counts(&self) -> Vec<(String, usize)> {
        let mut result: Vec<_> = heatmap::tally(&self.events).into_iter().collect();
        result.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        result
    }
}
