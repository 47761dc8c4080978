// File: ./src/model/event.rs
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

/// Certification tier of an event. Ordered by prestige: A < B < C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Category {
    A,
    B,
    C,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::A => "A",
            Category::B => "B",
            Category::C => "C",
        }
    }

    /// Exact tier code as stored in the catalog. Unlike `FromStr`, no
    /// trimming or case folding.
    pub fn from_code(code: &str) -> Option<Self> {
        Category::iter().find(|c| c.as_str() == code)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Category::A),
            "B" | "b" => Ok(Category::B),
            "C" | "c" => Ok(Category::C),
            other => Err(anyhow::anyhow!("Unknown event category '{}'", other)),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Category selector of the filter state. `All` disables category filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Selector order used by the UI: All, A, B, C.
    pub const CHOICES: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::A),
        CategoryFilter::Only(Category::B),
        CategoryFilter::Only(Category::C),
    ];

    pub fn next(self) -> Self {
        let idx = Self::CHOICES.iter().position(|c| *c == self).unwrap_or(0);
        Self::CHOICES[(idx + 1) % Self::CHOICES.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::CHOICES.iter().position(|c| *c == self).unwrap_or(0);
        Self::CHOICES[(idx + Self::CHOICES.len() - 1) % Self::CHOICES.len()]
    }

    /// Label shown in the category selector.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "全部级别",
            CategoryFilter::Only(Category::A) => "A类赛事",
            CategoryFilter::Only(Category::B) => "B类赛事",
            CategoryFilter::Only(Category::C) => "C类赛事",
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(c) => write!(f, "{}", c),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(c: Category) -> Self {
        CategoryFilter::Only(c)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One marathon occurrence in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: u32,
    pub province: String,
    pub name: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub event_type: String,
    /// `None` when the source record carried a tier outside {A, B, C}.
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<Category>,
}

// Anything but an exact "A", "B" or "C" is kept as `None`, so the record
// still shows up under "All".
fn lenient_category<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Category>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Category::from_code))
}

impl Event {
    pub fn new(id: u32, name: &str, province: &str, time: &str, category: Category) -> Self {
        Self {
            id,
            province: province.to_string(),
            name: name.to_string(),
            time: time.to_string(),
            organizer: String::new(),
            event_type: String::new(),
            category: Some(category),
        }
    }

    pub fn category_label(&self) -> String {
        match self.category {
            Some(c) => format!("{}类赛事", c),
            None => "未分级".to_string(),
        }
    }
}

/// Events sharing one date key, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group<'a> {
    pub date: &'a str,
    pub events: Vec<&'a Event>,
}

impl Group<'_> {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
