//! Shape validation for sidebar payloads.
//!
//! The JSON Schema under `schema/` is embedded at build time and compiled once,
//! on first use. Shape checks only cover structure (object of `[name, summary]`
//! pairs); uniqueness and ordering are enforced by `SidebarIndex`.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Version marker the embedded schema declares in `schema_version`.
pub const SHAPE_SCHEMA_ID: &str = "sidebar_items_v1";

const SHAPE_SCHEMA: &str = include_str!("../schema/sidebar_items.schema.json");

static COMPILED_SHAPE: OnceLock<JSONSchema> = OnceLock::new();

/// Parsed copy of the embedded shape schema.
pub fn shape_schema() -> Result<Value> {
    let schema: Value =
        serde_json::from_str(SHAPE_SCHEMA).context("parsing embedded sidebar shape schema")?;
    let version = schema
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if version != SHAPE_SCHEMA_ID {
        bail!(
            "embedded sidebar shape schema has schema_version '{}', expected {}",
            version,
            SHAPE_SCHEMA_ID
        );
    }
    Ok(schema)
}

// Compiled once per process; a failed compile is retried on the next call.
fn compiled_shape() -> Result<&'static JSONSchema> {
    if let Some(compiled) = COMPILED_SHAPE.get() {
        return Ok(compiled);
    }
    let schema = shape_schema()?;
    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling sidebar shape schema: {err}"))?;
    Ok(COMPILED_SHAPE.get_or_init(|| compiled))
}

/// Check `instance` against the shape schema, reporting every violation.
pub fn validate_shape(instance: &Value) -> Result<()> {
    let compiled = compiled_shape()?;
    if let Err(errors) = compiled.validate(instance) {
        let details = errors
            .map(|err| {
                let path = err.instance_path.to_string();
                if path.is_empty() {
                    format!("/: {err}")
                } else {
                    format!("{path}: {err}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        bail!("sidebar items failed shape validation:\n{}", details);
    }
    debug!(schema = SHAPE_SCHEMA_ID, "sidebar payload matches shape schema");
    Ok(())
}
