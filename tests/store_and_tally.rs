use malasong::model::{Category, CategoryFilter, Event};
use malasong::store::{EventStore, FilterState};

fn sample() -> Vec<Event> {
    vec![
        Event::new(1, "Guangzhou Marathon", "广东", "2026-12-06", Category::A),
        Event::new(2, "Shenzhen Marathon", "广东", "2026-12-06", Category::B),
        Event::new(3, "Beijing Marathon", "北京", "2026-10-25", Category::A),
        Event::new(4, "Xiamen Marathon", "福建", "2026-01-04", Category::A),
        Event::new(5, "Shanghai Run", "上海", "2026-03-01", Category::C),
        Event::new(6, "Zhuhai Half", "广东", "2026-03-01", Category::C),
        Event::new(7, "Yanqing Trail", "北京", "2026-05-16", Category::B),
    ]
}

#[test]
fn test_duplicate_id_rejected() {
    let mut events = sample();
    events.push(Event::new(3, "Copy", "北京", "2026-10-25", Category::A));
    let err = EventStore::new(events).unwrap_err();
    assert!(err.to_string().contains("Duplicate event id 3"));
}

#[test]
fn test_lookup_by_id() {
    let store = EventStore::new(sample()).unwrap();
    assert_eq!(store.len(), 7);
    assert_eq!(store.get(4).map(|e| e.name.as_str()), Some("Xiamen Marathon"));
    assert!(store.get(99).is_none());
}

#[test]
fn test_store_groups_follow_filter_state() {
    let store = EventStore::new(sample()).unwrap();

    let all = store.groups(&FilterState::default());
    let dates: Vec<&str> = all.iter().map(|g| g.date).collect();
    assert_eq!(
        dates,
        vec!["2026-01-04", "2026-03-01", "2026-05-16", "2026-10-25", "2026-12-06"]
    );

    let guangdong = store.groups(&FilterState::new("广东", CategoryFilter::All));
    let ids: Vec<u32> = guangdong
        .iter()
        .flat_map(|g| g.events.iter().map(|e| e.id))
        .collect();
    assert_eq!(ids, vec![6, 1, 2]);

    let a_marathons = store.groups(&FilterState::new("MARATHON", CategoryFilter::Only(Category::A)));
    assert_eq!(a_marathons.len(), 3);
}

#[test]
fn test_filter_state_reset() {
    let mut state = FilterState::new("xiamen", CategoryFilter::Only(Category::B));
    assert!(!state.is_default());
    state.reset();
    assert!(state.is_default());
    assert_eq!(state, FilterState::default());
}

#[test]
fn test_province_counts_sorted() {
    let store = EventStore::new(sample()).unwrap();
    let counts = store.province_counts();
    assert_eq!(
        counts,
        vec![
            ("广东".to_string(), 3),
            ("北京".to_string(), 2),
            ("上海".to_string(), 1),
            ("福建".to_string(), 1),
        ]
    );
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    assert_eq!(total, store.len());
}

#[test]
fn test_province_counts_ignore_filter() {
    // The tally is a property of the catalog, so filtering the list never changes it.
    let store = EventStore::new(sample()).unwrap();
    let before = store.province_counts();
    let _ = store.groups(&FilterState::new("xyz", CategoryFilter::Only(Category::C)));
    assert_eq!(store.province_counts(), before);
}

#[test]
fn test_empty_store() {
    let store = EventStore::new(Vec::new()).unwrap();
    assert!(store.is_empty());
    assert!(store.groups(&FilterState::default()).is_empty());
    assert!(store.province_counts().is_empty());
}
