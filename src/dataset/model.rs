//! Typed dataset model: `Category` → `TermGroup` → `LinkEntry`.
//!
//! Every node remembers the key order of the mapping it was read from, the
//! keys it does not know about, which keys were explicitly `null` and the
//! original number or boolean behind a text field, so a load → save cycle
//! writes the same document back. Keys that were absent
//! and get a value during a run are appended after the existing ones.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use std::fmt;

use crate::core::types::EntryPath;

/// Errors raised when a YAML document does not have the dataset shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A node that must be a mapping is something else
    NotAMapping { location: String },
    /// A key that must hold a sequence holds something else
    NotASequence { location: String, key: String },
    /// A key that must hold text holds a nested structure
    NotText { location: String, key: String },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAMapping { location } => write!(f, "{location}: expected a mapping"),
            Self::NotASequence { location, key } => {
                write!(f, "{location}: expected a sequence for '{key}'")
            }
            Self::NotText { location, key } => {
                write!(f, "{location}: expected text for '{key}'")
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// Key order, unknown keys, explicit nulls and non-string scalars of one mapping
#[derive(Debug, Clone, Default, PartialEq)]
struct Layout {
    order: Vec<Value>,
    nulls: Vec<Value>,
    extra: Mapping,
    scalars: Mapping,
}

impl Layout {
    fn capture(map: &Mapping, known: &[&str]) -> Self {
        let mut layout = Self::default();
        for (key, value) in map {
            layout.order.push(key.clone());
            if value.is_null() {
                layout.nulls.push(key.clone());
            }
            let is_known = key.as_str().is_some_and(|k| known.contains(&k));
            if !is_known {
                layout.extra.insert(key.clone(), value.clone());
            } else if scalar_text(value).is_some() {
                layout.scalars.insert(key.clone(), value.clone());
            }
        }
        layout
    }

    fn has(&self, key: &str) -> bool {
        self.order.iter().any(|k| k.as_str() == Some(key))
    }

    fn was_null(&self, key: &str) -> bool {
        self.nulls.iter().any(|k| k.as_str() == Some(key))
    }

    /// Rebuild the mapping. `value_of(key, present)` returns the value of a
    /// known key, or `None` to leave it out.
    fn write<F>(&self, known: &[&str], mut value_of: F) -> Mapping
    where
        F: FnMut(&str, bool) -> Option<Value>,
    {
        let mut out = Mapping::new();
        for key in &self.order {
            match key.as_str().filter(|k| known.contains(k)) {
                Some(k) => {
                    if let Some(value) = value_of(k, true) {
                        out.insert(key.clone(), value);
                    }
                }
                None => {
                    if let Some(value) = self.extra.get(key) {
                        out.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        for k in known {
            if !self.has(k)
                && let Some(value) = value_of(k, false)
            {
                out.insert(Value::String((*k).to_string()), value);
            }
        }
        out
    }

    /// The number or boolean a field was read from, while its text is unchanged
    fn original(&self, key: &str, text: &str) -> Option<Value> {
        self.scalars
            .get(key)
            .filter(|value| scalar_text(value).as_deref() == Some(text))
            .cloned()
    }

    fn text(&self, key: &str, text: &str, present: bool) -> Option<Value> {
        if let Some(value) = self.original(key, text) {
            Some(value)
        } else if present && text.is_empty() && self.was_null(key) {
            Some(Value::Null)
        } else if present || !text.is_empty() {
            Some(Value::String(text.to_string()))
        } else {
            None
        }
    }

    fn optional(&self, key: &str, value: &Option<String>, present: bool) -> Option<Value> {
        match value {
            Some(text) => self
                .original(key, text)
                .or_else(|| Some(Value::String(text.clone()))),
            None if present => Some(Value::Null),
            None => None,
        }
    }

    fn sequence<T>(&self, key: &str, items: &[T], present: bool) -> Option<Value>
    where
        for<'a> &'a T: Into<Value>,
    {
        if items.is_empty() && present && self.was_null(key) {
            return Some(Value::Null);
        }
        if items.is_empty() && !present {
            return None;
        }
        Some(Value::Sequence(
            items.iter().map(|item| -> Value { item.into() }).collect(),
        ))
    }
}

fn as_mapping(value: Value, location: &str) -> Result<Mapping, ModelError> {
    match value {
        Value::Mapping(map) => Ok(map),
        Value::Tagged(tagged) => as_mapping(tagged.value, location),
        _ => Err(ModelError::NotAMapping {
            location: location.to_string(),
        }),
    }
}

/// Text form of a number or boolean
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Read a text field: absent → `None`, null → `Some(None)`.
/// Numbers and booleans are read as their text form.
fn read_text(map: &Mapping, key: &str, location: &str) -> Result<Option<Option<String>>, ModelError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(text)) => Ok(Some(Some(text.clone()))),
        Some(value) => match scalar_text(value) {
            Some(text) => Ok(Some(Some(text))),
            None => Err(ModelError::NotText {
                location: location.to_string(),
                key: key.to_string(),
            }),
        },
    }
}

fn read_sequence(map: &Mapping, key: &str, location: &str) -> Result<Vec<Value>, ModelError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(items)) => Ok(items.clone()),
        Some(_) => Err(ModelError::NotASequence {
            location: location.to_string(),
            key: key.to_string(),
        }),
    }
}

/// One link in the directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkEntry {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    layout: Layout,
}

impl LinkEntry {
    const KEYS: [&'static str; 4] = ["title", "url", "logo", "description"];

    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Trimmed url; entries with an empty url are never processed
    pub fn processable_url(&self) -> Option<&str> {
        let url = self.url.trim();
        (!url.is_empty()).then_some(url)
    }

    /// A logo that is null, absent or blank still needs fetching
    pub fn has_logo(&self) -> bool {
        self.logo.as_deref().is_some_and(|logo| !logo.trim().is_empty())
    }

    fn parse(value: Value, location: &str) -> Result<Self, ModelError> {
        let map = as_mapping(value, location)?;
        Ok(Self {
            title: read_text(&map, "title", location)?.flatten().unwrap_or_default(),
            url: read_text(&map, "url", location)?.flatten().unwrap_or_default(),
            description: read_text(&map, "description", location)?.flatten(),
            logo: read_text(&map, "logo", location)?.flatten(),
            layout: Layout::capture(&map, &Self::KEYS),
        })
    }
}

impl From<&LinkEntry> for Value {
    fn from(entry: &LinkEntry) -> Self {
        let layout = &entry.layout;
        Value::Mapping(layout.write(&LinkEntry::KEYS, |key, present| match key {
            "title" => layout.text(key, &entry.title, present),
            "url" => layout.text(key, &entry.url, present),
            "logo" => layout.optional(key, &entry.logo, present),
            _ => layout.optional(key, &entry.description, present),
        }))
    }
}

/// A named group of links inside a category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermGroup {
    pub term: String,
    pub links: Vec<LinkEntry>,
    layout: Layout,
}

impl TermGroup {
    const KEYS: [&'static str; 2] = ["term", "links"];

    pub fn new(term: impl Into<String>, links: Vec<LinkEntry>) -> Self {
        Self {
            term: term.into(),
            links,
            ..Default::default()
        }
    }

    fn parse(value: Value, location: &str) -> Result<Self, ModelError> {
        let map = as_mapping(value, location)?;
        let links = read_sequence(&map, "links", location)?
            .into_iter()
            .enumerate()
            .map(|(i, link)| LinkEntry::parse(link, &format!("{location}.links[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            term: read_text(&map, "term", location)?.flatten().unwrap_or_default(),
            links,
            layout: Layout::capture(&map, &Self::KEYS),
        })
    }
}

impl From<&TermGroup> for Value {
    fn from(group: &TermGroup) -> Self {
        let layout = &group.layout;
        Value::Mapping(layout.write(&TermGroup::KEYS, |key, present| match key {
            "term" => layout.text(key, &group.term, present),
            _ => layout.sequence(key, &group.links, present),
        }))
    }
}

/// Top-level node of the dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Category {
    pub taxonomy: String,
    pub list: Vec<TermGroup>,
    layout: Layout,
}

impl Category {
    const KEYS: [&'static str; 2] = ["taxonomy", "list"];

    pub fn new(taxonomy: impl Into<String>, list: Vec<TermGroup>) -> Self {
        Self {
            taxonomy: taxonomy.into(),
            list,
            ..Default::default()
        }
    }

    fn parse(value: Value, location: &str) -> Result<Self, ModelError> {
        let map = as_mapping(value, location)?;
        let list = read_sequence(&map, "list", location)?
            .into_iter()
            .enumerate()
            .map(|(i, group)| TermGroup::parse(group, &format!("{location}.list[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            taxonomy: read_text(&map, "taxonomy", location)?
                .flatten()
                .unwrap_or_default(),
            list,
            layout: Layout::capture(&map, &Self::KEYS),
        })
    }
}

impl From<&Category> for Value {
    fn from(category: &Category) -> Self {
        let layout = &category.layout;
        Value::Mapping(layout.write(&Category::KEYS, |key, present| match key {
            "taxonomy" => layout.text(key, &category.taxonomy, present),
            _ => layout.sequence(key, &category.list, present),
        }))
    }
}

/// The whole link directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub categories: Vec<Category>,
}

impl Dataset {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn entry(&self, path: EntryPath) -> Option<&LinkEntry> {
        self.categories
            .get(path.category)?
            .list
            .get(path.group)?
            .links
            .get(path.link)
    }

    pub fn entry_mut(&mut self, path: EntryPath) -> Option<&mut LinkEntry> {
        self.categories
            .get_mut(path.category)?
            .list
            .get_mut(path.group)?
            .links
            .get_mut(path.link)
    }

    /// All links in document order with their positions and owners
    pub fn links(&self) -> impl Iterator<Item = (EntryPath, &Category, &TermGroup, &LinkEntry)> {
        self.categories.iter().enumerate().flat_map(|(c, category)| {
            category.list.iter().enumerate().flat_map(move |(g, group)| {
                group
                    .links
                    .iter()
                    .enumerate()
                    .map(move |(l, link)| (EntryPath::new(c, g, l), category, group, link))
            })
        })
    }

    pub fn link_count(&self) -> usize {
        self.links().count()
    }
}

impl TryFrom<Value> for Dataset {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let categories = match value {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, category)| Category::parse(category, &format!("categories[{i}]")))
                .collect::<Result<Vec<_>, _>>()?,
            _ => {
                return Err(ModelError::NotASequence {
                    location: "document".to_string(),
                    key: "categories".to_string(),
                });
            }
        };
        Ok(Self { categories })
    }
}

impl From<&Dataset> for Value {
    fn from(dataset: &Dataset) -> Self {
        Value::Sequence(dataset.categories.iter().map(Value::from).collect())
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Dataset::try_from(value).map_err(de::Error::custom)
    }
}
