//! Reading and writing the serialized sidebar forms.
//!
//! Generators write the index either as a bare JSON object or wrapped in a
//! script call (`initSidebarItems({...});`, or the newer
//! `window.SIDEBAR_ITEMS = {...};`). Parsing keeps sections in file order and
//! keeps duplicate keys so the index can reject them instead of letting the
//! last one win.

use crate::sidebar::{Category, Entry, SidebarIndex};
use anyhow::{Context, Result, bail};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;

const INIT_CALL_PREFIX: &str = "initSidebarItems(";
const INIT_CALL_SUFFIX: &str = ")";
const WINDOW_ASSIGN_PREFIX: &str = "window.SIDEBAR_ITEMS";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Drop a leading byte order mark and surrounding whitespace.
pub(crate) fn trim_input(input: &str) -> &str {
    let trimmed = input.trim_start();
    trimmed
        .strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(trimmed)
        .trim()
}

/// Serialized form of a sidebar file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Bare JSON object.
    Json,
    /// JSON object wrapped in the generator's script call.
    Script,
}

impl Format {
    pub fn detect(input: &str) -> Self {
        if trim_input(input).starts_with('{') {
            Format::Json
        } else {
            Format::Script
        }
    }
}

/// Sections exactly as they appeared in the input, duplicates included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSidebar {
    pub sections: Vec<(Category, Vec<Entry>)>,
}

impl<'de> Deserialize<'de> for RawSidebar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SectionsVisitor;

        impl<'de> Visitor<'de> for SectionsVisitor {
            type Value = RawSidebar;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping categories to [name, summary] pairs")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut sections = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, entries)) = map.next_entry::<Category, Vec<Entry>>()? {
                    sections.push((key, entries));
                }
                Ok(RawSidebar { sections })
            }
        }

        deserializer.deserialize_map(SectionsVisitor)
    }
}

/// Parse the bare JSON object form.
pub fn parse_json(input: &str) -> Result<RawSidebar> {
    let trimmed = trim_input(input);
    if trimmed.is_empty() {
        bail!("sidebar input is empty");
    }
    serde_json::from_str(trimmed).context("parsing sidebar items JSON")
}

/// Strip the generator's script wrapper and return the JSON object inside it.
pub fn unwrap_script(input: &str) -> Result<&str> {
    let trimmed = trim_input(input);
    let body = if let Some(rest) = trimmed.strip_prefix(INIT_CALL_PREFIX) {
        let rest = rest.trim_end();
        let rest = rest.strip_suffix(';').unwrap_or(rest).trim_end();
        match rest.strip_suffix(INIT_CALL_SUFFIX) {
            Some(body) => body,
            None => bail!("unterminated {INIT_CALL_PREFIX} call in sidebar script"),
        }
    } else if let Some(rest) = trimmed.strip_prefix(WINDOW_ASSIGN_PREFIX) {
        let rest = rest.trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            bail!("expected '=' after {WINDOW_ASSIGN_PREFIX}");
        };
        let rest = rest.trim_end();
        rest.strip_suffix(';').unwrap_or(rest)
    } else {
        let preview: String = trimmed.chars().take(32).collect();
        bail!("unrecognized sidebar script wrapper starting with '{preview}'");
    };

    let body = body.trim();
    if !body.starts_with('{') || !body.ends_with('}') {
        bail!("sidebar script does not wrap a JSON object");
    }
    Ok(body)
}

/// Parse the script form.
pub fn parse_script(input: &str) -> Result<RawSidebar> {
    let body = unwrap_script(input)?;
    parse_json(body).context("parsing sidebar script payload")
}

/// Parse either form, picking by the first non-blank character.
pub fn parse_auto(input: &str) -> Result<RawSidebar> {
    match Format::detect(input) {
        Format::Json => parse_json(input),
        Format::Script => parse_script(input),
    }
}

pub fn to_json(index: &SidebarIndex) -> Result<String> {
    serde_json::to_string(index).context("serializing sidebar index")
}

pub fn to_json_pretty(index: &SidebarIndex) -> Result<String> {
    serde_json::to_string_pretty(index).context("serializing sidebar index")
}

/// Emit the `initSidebarItems(...)` script a generator would write.
pub fn to_script(index: &SidebarIndex) -> Result<String> {
    Ok(format!("{INIT_CALL_PREFIX}{}{INIT_CALL_SUFFIX};", to_json(index)?))
}
