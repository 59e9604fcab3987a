//! Sidebar index wiring.
//!
//! This module wraps the `sidebar-items` artifacts a documentation generator
//! writes for every module page. Types here mirror the payload; callers use
//! `SidebarIndex` for lookups and the `codec` functions to move between the
//! JSON and script forms.

pub mod codec;
pub mod index;
pub mod model;

pub use codec::{Format, RawSidebar};
pub use index::{ENV_EXTRA_CATEGORIES, LoadOptions, SidebarIndex, SidebarIndexBuilder};
pub use model::{Category, Entry, ItemKind};

/// Environment variable naming the sidebar file the CLI reads by default.
pub const ENV_SIDEBAR_FILE: &str = "SIDEBAR_INDEX_FILE";
