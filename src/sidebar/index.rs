//! Validated, read-only view of a sidebar index.
//!
//! The index is strict about what it accepts: duplicate categories or names,
//! empty sections, multi-line summaries and unknown item kinds are rejected at
//! construction so the rendering side never has to second-guess the data.
//! Lookups afterwards never fail; a missing category is just an empty section.

use crate::schema_loader::validate_shape;
use crate::sidebar::codec::{self, Format, RawSidebar};
use crate::sidebar::{Category, Entry, ItemKind};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Extra category keys to accept on top of the known item kinds.
pub const ENV_EXTRA_CATEGORIES: &str = "SIDEBAR_EXTRA_CATEGORIES";

const BUNDLED_OBJECT_WRITE: &str = include_str!("../../data/object_write.sidebar-items.js");

/// Knobs for turning raw sidebar data into a `SidebarIndex`.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Category keys accepted in addition to `ItemKind::ALL`.
    pub extra_categories: BTreeSet<String>,
}

impl LoadOptions {
    /// Defaults widened by `SIDEBAR_EXTRA_CATEGORIES` (comma or space separated).
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(raw) = std::env::var(ENV_EXTRA_CATEGORIES) {
            options.extra_categories.extend(crate::split_list(&raw));
        }
        options
    }

    pub fn with_extra_category(mut self, key: impl Into<String>) -> Self {
        self.extra_categories.insert(key.into());
        self
    }

    /// Every category key these options accept.
    pub fn allowed_categories(&self) -> BTreeSet<String> {
        let mut allowed: BTreeSet<String> = ItemKind::ALL
            .iter()
            .map(|kind| kind.key().to_string())
            .collect();
        allowed.extend(self.extra_categories.iter().cloned());
        allowed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSidebar")]
/// Category -> entries, each section sorted by entry name.
pub struct SidebarIndex {
    sections: BTreeMap<Category, Vec<Entry>>,
}

impl Serialize for SidebarIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.sections.serialize(serializer)
    }
}

impl TryFrom<RawSidebar> for SidebarIndex {
    type Error = anyhow::Error;

    fn try_from(raw: RawSidebar) -> Result<Self> {
        SidebarIndex::from_raw(raw, &LoadOptions::default())
    }
}

impl SidebarIndex {
    pub fn builder() -> SidebarIndexBuilder {
        SidebarIndexBuilder::default()
    }

    /// Load a sidebar file (JSON or script form) from disk.
    ///
    /// Accepted categories honour `SIDEBAR_EXTRA_CATEGORIES`.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, &LoadOptions::from_env())
    }

    pub fn load_with(path: &Path, options: &LoadOptions) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading sidebar file {}", path.display()))?;
        let index = Self::parse_with(&data, options)
            .with_context(|| format!("loading {}", path.display()))?;
        debug!(
            path = %path.display(),
            categories = index.sections.len(),
            entries = index.len(),
            "loaded sidebar index"
        );
        Ok(index)
    }

    /// Parse either serialized form, using options from the environment.
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, &LoadOptions::from_env())
    }

    /// Parse either serialized form.
    ///
    /// When the payload does not deserialize, it is checked against the shape
    /// schema so malformed files get a full list of violations rather than
    /// the first serde error.
    pub fn parse_with(input: &str, options: &LoadOptions) -> Result<Self> {
        let body = match Format::detect(input) {
            Format::Json => codec::trim_input(input),
            Format::Script => codec::unwrap_script(input)?,
        };
        let raw = match codec::parse_json(body) {
            Ok(raw) => raw,
            Err(err) => {
                if let Ok(value) = serde_json::from_str::<Value>(body) {
                    validate_shape(&value)?;
                }
                return Err(err);
            }
        };
        Self::from_raw(raw, options)
    }

    /// The `object::write` sidebar shipped with the crate.
    pub fn bundled_object_write() -> Result<Self> {
        Self::parse_with(BUNDLED_OBJECT_WRITE, &LoadOptions::default())
            .context("parsing bundled object::write sidebar")
    }

    /// Validate raw sections and sort each one by entry name.
    pub fn from_raw(raw: RawSidebar, options: &LoadOptions) -> Result<Self> {
        let allowed = options.allowed_categories();
        let mut sections: BTreeMap<Category, Vec<Entry>> = BTreeMap::new();

        for (category, mut entries) in raw.sections {
            validate_category(&category, &allowed)?;
            if sections.contains_key(&category) {
                bail!("duplicate category '{}'", category);
            }
            if entries.is_empty() {
                bail!("category '{}' has no entries", category);
            }

            let mut names: BTreeSet<&str> = BTreeSet::new();
            for entry in &entries {
                validate_entry(&category, entry)?;
                if !names.insert(entry.name.as_str()) {
                    bail!(
                        "duplicate entry '{}' in category '{}'",
                        entry.name,
                        category
                    );
                }
            }

            entries.sort_by(|a, b| a.name.cmp(&b.name));
            sections.insert(category, entries);
        }

        Ok(Self { sections })
    }

    /// Entries for `category`, empty when it is absent.
    pub fn get(&self, category: &str) -> &[Entry] {
        self.sections
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve a single entry.
    pub fn entry(&self, category: &str, name: &str) -> Option<&Entry> {
        self.get(category).iter().find(|entry| entry.name == name)
    }

    /// Category keys in stable (lexical) order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.sections.keys()
    }

    /// Categories in the order a sidebar shows them.
    pub fn sections(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.sections.keys().collect();
        categories.sort_by(|a, b| a.display_rank().cmp(&b.display_rank()));
        categories
    }

    /// Every entry paired with its category, categories in lexical order.
    pub fn all_entries(&self) -> Vec<(&Category, &Entry)> {
        self.sections
            .iter()
            .flat_map(|(category, entries)| entries.iter().map(move |entry| (category, entry)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Case-insensitive substring search: name matches first, then entries
    /// whose summary matches.
    pub fn search(&self, query: &str) -> Vec<(&Category, &Entry)> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let all = self.all_entries();
        let (by_name, rest): (Vec<_>, Vec<_>) = all
            .into_iter()
            .partition(|(_, entry)| entry.name.to_lowercase().contains(&needle));
        by_name
            .into_iter()
            .chain(
                rest.into_iter()
                    .filter(|(_, entry)| entry.summary.to_lowercase().contains(&needle)),
            )
            .collect()
    }

    /// Relative page path for an entry present in the index.
    pub fn href(&self, category: &str, name: &str) -> Option<String> {
        let (key, _) = self.sections.get_key_value(category)?;
        self.entry(category, name).map(|entry| key.page_for(&entry.name))
    }
}

/// Incremental construction for callers that produce entries themselves.
#[derive(Debug, Default)]
pub struct SidebarIndexBuilder {
    sections: Vec<(Category, Vec<Entry>)>,
    options: LoadOptions,
}

impl SidebarIndexBuilder {
    pub fn options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn entry(
        mut self,
        category: impl Into<Category>,
        name: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        let category = category.into();
        let entry = Entry::new(name, summary);
        match self.sections.iter_mut().find(|(key, _)| *key == category) {
            Some((_, entries)) => entries.push(entry),
            None => self.sections.push((category, vec![entry])),
        }
        self
    }

    pub fn build(self) -> Result<SidebarIndex> {
        SidebarIndex::from_raw(
            RawSidebar {
                sections: self.sections,
            },
            &self.options,
        )
    }
}

fn validate_category(category: &Category, allowed: &BTreeSet<String>) -> Result<()> {
    if category.0.trim().is_empty() {
        bail!("category key must not be empty");
    }
    if !allowed.contains(category.as_str()) {
        bail!(
            "category '{}' not in allowed set {:?}",
            category,
            allowed
        );
    }
    Ok(())
}

fn validate_entry(category: &Category, entry: &Entry) -> Result<()> {
    if entry.name.is_empty() {
        bail!("category '{}' contains an entry with no name", category);
    }
    if entry.name.chars().any(char::is_whitespace) {
        bail!(
            "entry name '{}' in category '{}' contains whitespace",
            entry.name,
            category
        );
    }
    if entry.summary.contains(['\n', '\r']) {
        bail!(
            "summary for '{}' in category '{}' spans multiple lines",
            entry.name,
            category
        );
    }
    Ok(())
}
