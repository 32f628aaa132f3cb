use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One listed character: a unique reference plus the name shown in the picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub url: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// Entries of the fixed listing page, in response order and keyed by url.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    /// Decodes a listing page. A missing or non-array `results` field yields an
    /// empty catalog; items without a string `url` and `name` are skipped.
    pub fn from_page(page: &Value) -> Self {
        let Some(results) = page.get("results").and_then(Value::as_array) else {
            return Self::default();
        };
        results
            .iter()
            .filter_map(|item| serde_json::from_value::<CatalogEntry>(item.clone()).ok())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, url: &str) -> Option<&CatalogEntry> {
        self.entries.get(url)
    }

    pub fn get_index(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get_index(index).map(|(_, entry)| entry)
    }

    pub fn position(&self, url: &str) -> Option<usize> {
        self.entries.get_index_of(url)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn names(&self) -> Vec<String> {
        self.iter().map(|entry| entry.name.clone()).collect()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        let mut entries = IndexMap::new();
        for entry in iter {
            entries.entry(entry.url.clone()).or_insert(entry);
        }
        Self { entries }
    }
}
