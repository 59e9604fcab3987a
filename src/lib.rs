//! Immutable documentation sidebar indexes.
//!
//! A sidebar index maps item kinds to the `(name, summary)` pairs a
//! documentation page lists in its navigation sidebar. The crate loads the
//! generator's `sidebar-items` output (bare JSON or wrapped in its script
//! call), validates it once, and serves read-only lookups afterwards.

pub mod schema_loader;
pub mod sidebar;

pub use schema_loader::{SHAPE_SCHEMA_ID, validate_shape};
pub use sidebar::{
    Category, ENV_EXTRA_CATEGORIES, ENV_SIDEBAR_FILE, Entry, Format, ItemKind, LoadOptions,
    RawSidebar, SidebarIndex, SidebarIndexBuilder,
};
pub use sidebar::codec::{
    parse_auto, parse_json, parse_script, to_json, to_json_pretty, to_script, unwrap_script,
};

/// Split a comma/whitespace separated list, dropping empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
