// Filter / group / order behaviour of the query pipeline.
use malasong::model::{Category, CategoryFilter, Event};
use malasong::pipeline::{compute_groups, filter_events};

fn scenario_events() -> Vec<Event> {
    vec![
        Event::new(1, "Beijing Marathon", "北京", "2026-04-12", Category::A),
        Event::new(2, "Shanghai Run", "上海", "2026-03-01", Category::B),
    ]
}

fn fixture() -> Vec<Event> {
    vec![
        Event::new(10, "Wuxi Marathon", "江苏", "2026-03-22", Category::A),
        Event::new(11, "Chongqing Marathon", "重庆", "2026-03-22", Category::A),
        Event::new(12, "Nanjing Half", "江苏", "2026-04-12", Category::B),
        Event::new(13, "Beijing Half", "北京", "2026-04-19", Category::A),
        Event::new(14, "Lhasa Half", "西藏", "2026-08", Category::C),
        Event::new(15, "Suzhou Night Run", "江苏", "2026-03-22", Category::C),
        Event::new(16, "Hangzhou Marathon", "浙江", "2026-11-01", Category::A),
        Event::new(17, "Shihezi Marathon", "新疆兵团", "2026-09-20", Category::B),
        Event::new(18, "Tianjin Marathon", "天津", "2026-04-12", Category::B),
    ]
}

fn ids(events: &[&Event]) -> Vec<u32> {
    events.iter().map(|e| e.id).collect()
}

const QUERIES: [&str; 9] = ["", "marathon", "MARATHON", "half", "江苏", "江", "su", "xyz", "Bei"];

fn all_filters() -> Vec<CategoryFilter> {
    CategoryFilter::CHOICES.to_vec()
}

// --- Scenarios ---

#[test]
fn test_scenario_no_filter_orders_by_date() {
    let events = scenario_events();
    let groups = compute_groups(&events, "", CategoryFilter::All);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].date, "2026-03-01");
    assert_eq!(ids(&groups[0].events), vec![2]);
    assert_eq!(groups[1].date, "2026-04-12");
    assert_eq!(ids(&groups[1].events), vec![1]);
}

#[test]
fn test_scenario_case_insensitive_name_search() {
    let events = scenario_events();
    let groups = compute_groups(&events, "beijing", CategoryFilter::All);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].date, "2026-04-12");
    assert_eq!(ids(&groups[0].events), vec![1]);
}

#[test]
fn test_scenario_category_filter() {
    let events = scenario_events();
    let groups = compute_groups(&events, "", CategoryFilter::Only(Category::B));

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].date, "2026-03-01");
    assert_eq!(ids(&groups[0].events), vec![2]);
}

#[test]
fn test_scenario_no_matches_is_empty() {
    let events = scenario_events();
    assert!(compute_groups(&events, "xyz", CategoryFilter::All).is_empty());
}

#[test]
fn test_province_search_matches() {
    let events = scenario_events();
    let groups = compute_groups(&events, "上海", CategoryFilter::All);
    assert_eq!(groups.len(), 1);
    assert_eq!(ids(&groups[0].events), vec![2]);
}

#[test]
fn test_province_search_is_case_sensitive() {
    let events = vec![
        Event::new(1, "City Run", "Hubei", "2026-05-01", Category::C),
        Event::new(2, "Wuhan Marathon", "湖北", "2026-03-29", Category::A),
    ];
    assert_eq!(compute_groups(&events, "Hubei", CategoryFilter::All).len(), 1);
    assert!(compute_groups(&events, "hubei", CategoryFilter::All).is_empty());
}

// --- Properties ---

#[test]
fn test_filter_correctness() {
    let events = fixture();
    for q in QUERIES {
        for cat in all_filters() {
            let groups = compute_groups(&events, q, cat);
            let shown: Vec<u32> = groups
                .iter()
                .flat_map(|g| g.events.iter().map(|e| e.id))
                .collect();
            for e in &events {
                let category_ok = match cat {
                    CategoryFilter::All => true,
                    CategoryFilter::Only(c) => e.category == Some(c),
                };
                let text_ok = q.is_empty()
                    || e.name.to_lowercase().contains(&q.to_lowercase())
                    || e.province.contains(q);
                assert_eq!(
                    shown.contains(&e.id),
                    category_ok && text_ok,
                    "event {} with query '{}' / {}",
                    e.id,
                    q,
                    cat
                );
            }
        }
    }
}

#[test]
fn test_order_preserved_within_groups() {
    let events = fixture();
    let position = |id: u32| events.iter().position(|e| e.id == id).unwrap();
    for q in QUERIES {
        for cat in all_filters() {
            for group in compute_groups(&events, q, cat) {
                let positions: Vec<usize> = group.events.iter().map(|e| position(e.id)).collect();
                let mut sorted = positions.clone();
                sorted.sort_unstable();
                assert_eq!(positions, sorted, "group {} for '{}'", group.date, q);
            }
        }
    }
}

#[test]
fn test_groups_cover_filtered_set_exactly_once() {
    let events = fixture();
    for q in QUERIES {
        for cat in all_filters() {
            let filtered = ids(&filter_events(&events, q, cat));
            let mut grouped: Vec<u32> = compute_groups(&events, q, cat)
                .iter()
                .flat_map(|g| g.events.iter().map(|e| e.id))
                .collect();
            let mut expected = filtered.clone();
            expected.sort_unstable();
            grouped.sort_unstable();
            assert_eq!(grouped, expected);

            // Every member of a group carries the group's key.
            for g in compute_groups(&events, q, cat) {
                assert!(!g.events.is_empty());
                assert!(g.events.iter().all(|e| e.time == g.date));
            }
        }
    }
}

#[test]
fn test_group_keys_ascending() {
    let events = fixture();
    for q in QUERIES {
        for cat in all_filters() {
            let dates: Vec<&str> = compute_groups(&events, q, cat).iter().map(|g| g.date).collect();
            assert!(dates.windows(2).all(|w| w[0] < w[1]), "{:?}", dates);
        }
    }
}

#[test]
fn test_sort_example_from_unordered_keys() {
    let events = vec![
        Event::new(1, "a", "p", "2026-03-15", Category::A),
        Event::new(2, "b", "p", "2026-01-10", Category::A),
        Event::new(3, "c", "p", "2026-02-20", Category::A),
    ];
    let dates: Vec<&str> = compute_groups(&events, "", CategoryFilter::All)
        .iter()
        .map(|g| g.date)
        .collect();
    assert_eq!(dates, vec!["2026-01-10", "2026-02-20", "2026-03-15"]);
}

#[test]
fn test_partial_date_sorts_between_full_dates() {
    let events = fixture();
    let dates: Vec<&str> = compute_groups(&events, "", CategoryFilter::All)
        .iter()
        .map(|g| g.date)
        .collect();
    let lhasa = dates.iter().position(|d| *d == "2026-08").unwrap();
    assert_eq!(dates[lhasa - 1], "2026-04-19");
    assert_eq!(dates[lhasa + 1], "2026-09-20");
}

#[test]
fn test_same_inputs_same_output() {
    let events = fixture();
    for q in QUERIES {
        for cat in all_filters() {
            assert_eq!(compute_groups(&events, q, cat), compute_groups(&events, q, cat));
        }
    }
}

#[test]
fn test_empty_input_yields_nothing() {
    let events: Vec<Event> = Vec::new();
    for q in QUERIES {
        for cat in all_filters() {
            assert!(compute_groups(&events, q, cat).is_empty());
        }
    }
}

#[test]
fn test_shared_date_keeps_catalog_order() {
    let events = fixture();
    let groups = compute_groups(&events, "", CategoryFilter::All);
    let march = groups.iter().find(|g| g.date == "2026-03-22").unwrap();
    assert_eq!(ids(&march.events), vec![10, 11, 15]);
}

#[test]
fn test_pipeline_does_not_touch_events() {
    let events = fixture();
    let before = events.clone();
    let _ = compute_groups(&events, "marathon", CategoryFilter::Only(Category::A));
    assert_eq!(events, before);
}

#[test]
fn test_json_shape_matches_grouped_events() {
    let events = scenario_events();
    let groups = compute_groups(&events, "", CategoryFilter::All);
    let value = serde_json::to_value(&groups).unwrap();

    assert_eq!(value[0]["date"], "2026-03-01");
    assert_eq!(value[0]["events"][0]["id"], 2);
    assert_eq!(value[0]["events"][0]["category"], "B");
    assert!(value[0]["events"][0].get("eventType").is_some());
}
