//! Types mirroring the sidebar-items payload.
//!
//! A sidebar file is an object keyed by item kind (`"struct"`, `"mod"`, ...)
//! whose values are `[name, summary]` pairs. `Category` keeps the raw key so
//! widened kinds survive a round trip; `ItemKind` is the known vocabulary.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Sidebar section key as it appears in the serialized index.
pub struct Category(pub String);

impl Category {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The known item kind for this key, if any.
    pub fn kind(&self) -> Option<ItemKind> {
        ItemKind::from_key(&self.0)
    }

    /// Section heading shown above the entries.
    pub fn heading(&self) -> String {
        match self.kind() {
            Some(kind) => kind.heading().to_string(),
            None => self.0.clone(),
        }
    }

    /// Relative page path for `name` within this category.
    pub fn page_for(&self, name: &str) -> String {
        match self.kind() {
            Some(ItemKind::Module) => format!("{name}/index.html"),
            _ => format!("{}.{name}.html", self.0),
        }
    }

    /// Sort key placing known kinds in sidebar order and everything else
    /// after them, alphabetically.
    pub(crate) fn display_rank(&self) -> (usize, &str) {
        let rank = self
            .kind()
            .map(|kind| kind as usize)
            .unwrap_or(ItemKind::ALL.len());
        (rank, self.0.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Category {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<ItemKind> for Category {
    fn from(kind: ItemKind) -> Self {
        Self(kind.key().to_string())
    }
}

/// Item kinds a documentation generator emits sidebar sections for.
///
/// Declaration order is the order sections appear in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKind {
    Module,
    Macro,
    Struct,
    Enum,
    Union,
    Primitive,
    Trait,
    TraitAlias,
    Function,
    TypeAlias,
    ForeignType,
    Static,
    Constant,
    Keyword,
    Attribute,
    Derive,
    ExternCrate,
    Import,
}

impl ItemKind {
    pub const ALL: [ItemKind; 18] = [
        ItemKind::Module,
        ItemKind::Macro,
        ItemKind::Struct,
        ItemKind::Enum,
        ItemKind::Union,
        ItemKind::Primitive,
        ItemKind::Trait,
        ItemKind::TraitAlias,
        ItemKind::Function,
        ItemKind::TypeAlias,
        ItemKind::ForeignType,
        ItemKind::Static,
        ItemKind::Constant,
        ItemKind::Keyword,
        ItemKind::Attribute,
        ItemKind::Derive,
        ItemKind::ExternCrate,
        ItemKind::Import,
    ];

    /// Key used in the serialized index.
    pub fn key(&self) -> &'static str {
        match self {
            ItemKind::Module => "mod",
            ItemKind::Macro => "macro",
            ItemKind::Struct => "struct",
            ItemKind::Enum => "enum",
            ItemKind::Union => "union",
            ItemKind::Primitive => "primitive",
            ItemKind::Trait => "trait",
            ItemKind::TraitAlias => "traitalias",
            ItemKind::Function => "fn",
            ItemKind::TypeAlias => "type",
            ItemKind::ForeignType => "foreigntype",
            ItemKind::Static => "static",
            ItemKind::Constant => "constant",
            ItemKind::Keyword => "keyword",
            ItemKind::Attribute => "attr",
            ItemKind::Derive => "derive",
            ItemKind::ExternCrate => "externcrate",
            ItemKind::Import => "import",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ItemKind::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn heading(&self) -> &'static str {
        match self {
            ItemKind::Module => "Modules",
            ItemKind::Macro => "Macros",
            ItemKind::Struct => "Structs",
            ItemKind::Enum => "Enums",
            ItemKind::Union => "Unions",
            ItemKind::Primitive => "Primitive Types",
            ItemKind::Trait => "Traits",
            ItemKind::TraitAlias => "Trait Aliases",
            ItemKind::Function => "Functions",
            ItemKind::TypeAlias => "Type Aliases",
            ItemKind::ForeignType => "Foreign Types",
            ItemKind::Static => "Statics",
            ItemKind::Constant => "Constants",
            ItemKind::Keyword => "Keywords",
            ItemKind::Attribute => "Attribute Macros",
            ItemKind::Derive => "Derive Macros",
            ItemKind::ExternCrate => "Crates",
            ItemKind::Import => "Re-exports",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
/// One documented symbol: its name and the first line of its docs.
pub struct Entry {
    pub name: String,
    pub summary: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
        }
    }
}

impl From<(String, String)> for Entry {
    fn from((name, summary): (String, String)) -> Self {
        Self { name, summary }
    }
}

impl From<Entry> for (String, String) {
    fn from(entry: Entry) -> Self {
        (entry.name, entry.summary)
    }
}
