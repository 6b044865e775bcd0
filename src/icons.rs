//! Line-art icon geometry keyed by kebab-case name.
//!
//! The table uses the `icon-nodes.json` layout: each name maps to an array of
//! `[tag, {attribute: value}]` pairs in paint order. Malformed rows fail the
//! whole load.

use crate::cache::{CacheStats, Cached, ResolutionCache};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

const BUNDLED_ICONS: &str = include_str!("../assets/icon-nodes.json");

/// One vector primitive with its attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

/// Elements in paint order. Cloning shares the same allocation.
pub type IconDefinition = Arc<[IconElement]>;

#[derive(Deserialize)]
struct RawElement(String, serde_json::Map<String, serde_json::Value>);

/// Canonical kebab-case form of an icon name.
///
/// `CircleUser`, `circle_user`, `CIRCLE_USER` and `circle-user` all map to
/// `circle-user`. A hyphen is inserted at each lower-to-upper boundary and
/// before the last capital of an acronym run (`HTTPServer` → `http-server`).
pub fn normalize_icon_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);
    for (idx, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && idx > 0 {
            let prev = chars[idx - 1];
            let next_is_lower = chars.get(idx + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                out.push('-');
            }
        }
        if c == '_' {
            out.push('-');
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out.trim_start_matches('-').to_string()
}

#[derive(Debug, Default)]
pub struct IconTable {
    icons: HashMap<String, IconDefinition>,
}

impl IconTable {
    /// The icon set compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_ICONS)
    }

    /// Load an `icon-nodes.json` file, such as the full lucide set.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::IconIo {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_json(&json)?;
        debug!(path = %path.display(), icons = table.len(), "loaded icon table");
        Ok(table)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<RawElement>> = serde_json::from_str(json)?;
        let mut icons = HashMap::with_capacity(raw.len());
        for (name, elements) in raw {
            if normalize_icon_name(&name) != name {
                return Err(Error::IconData(format!(
                    "icon name {name:?} is not in canonical kebab-case"
                )));
            }
            if elements.is_empty() {
                return Err(Error::IconData(format!("icon {name:?} has no elements")));
            }
            let definition = elements
                .into_iter()
                .map(|element| convert_element(&name, element))
                .collect::<Result<Vec<_>>>()?;
            icons.insert(name, IconDefinition::from(definition));
        }
        debug!(icons = icons.len(), "loaded icon table");
        Ok(Self { icons })
    }

    /// Direct lookup by canonical key; no normalization or fuzzy matching.
    pub fn get(&self, key: &str) -> Option<IconDefinition> {
        self.icons.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.icons.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.icons.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn convert_element(icon: &str, RawElement(tag, attrs): RawElement) -> Result<IconElement> {
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::IconData(format!("icon {icon:?} has invalid tag {tag:?}")));
    }
    let attributes = attrs
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(value) => Ok((key, value)),
            other => Err(Error::IconData(format!(
                "icon {icon:?}: attribute {key:?} on <{tag}> is not a string: {other}"
            ))),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(IconElement { tag, attributes })
}

/// Cached icon lookups. Hits and misses are both remembered under the
/// normalized key, so an unknown name is reported once until the cache is
/// cleared.
pub struct IconLookup {
    table: Arc<IconTable>,
    cache: ResolutionCache<IconDefinition>,
}

impl IconLookup {
    pub fn new(table: Arc<IconTable>) -> Self {
        Self {
            table,
            cache: ResolutionCache::new(),
        }
    }

    pub fn table(&self) -> &IconTable {
        &self.table
    }

    pub fn lookup(&self, icon_ref: &str) -> Option<IconDefinition> {
        let key = normalize_icon_name(icon_ref);
        self.cache
            .get_or_insert_with(&key, || {
                let found = self.table.get(&key);
                if found.is_none() {
                    warn!(icon = icon_ref, normalized = %key, "icon not found");
                }
                Cached::from(found)
            })
            .into_option()
    }

    pub fn preload<'a>(&self, icon_refs: impl IntoIterator<Item = &'a str>) {
        for icon_ref in icon_refs {
            self.lookup(icon_ref);
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        debug!(entries = self.cache.len(), "clearing icon cache");
        self.cache.clear();
    }
}
