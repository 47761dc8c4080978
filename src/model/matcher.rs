// Predicates deciding whether an event passes the current filter state.
//
// Search is a plain substring test, no tokenizing or ranking:
//   name     -> case-insensitive
//   province -> exact, case-sensitive
// Province names are Chinese so case folding would be a no-op for the real
// catalog; the asymmetry only shows with latin-script input.

use crate::model::event::{CategoryFilter, Event};

impl CategoryFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => event.category == Some(*c),
        }
    }
}

impl Event {
    pub fn matches_search_term(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query.to_lowercase()) || self.province.contains(query)
    }

    pub fn matches_filter(&self, search: &str, category: CategoryFilter) -> bool {
        category.matches(self) && self.matches_search_term(search)
    }
}
