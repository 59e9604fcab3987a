// Loading guard rails: both serialized forms, round trips, and rejected payloads.
mod support;

use anyhow::Result;
use serde_json::json;
use serde_json::Value;
use sidebar_index::{
    Format, LoadOptions, SidebarIndex, parse_auto, to_json, to_json_pretty, to_script,
    unwrap_script, validate_shape,
};
use support::{bundled_sidebar_path, write_fixture, write_json_fixture};

#[test]
fn loads_script_form_from_disk() -> Result<()> {
    let index = SidebarIndex::load_with(&bundled_sidebar_path(), &LoadOptions::default())?;
    assert_eq!(index, SidebarIndex::bundled_object_write()?);
    Ok(())
}

#[test]
fn loads_json_form_from_disk() -> Result<()> {
    let file = write_json_fixture(&json!({
        "enum": [["Mangling", "The symbol name mangling scheme."]],
        "mod": [["pe", "Helper for writing PE files."], ["elf", "Support for writing ELF files."]]
    }))?;
    let index = SidebarIndex::load_with(file.path(), &LoadOptions::default())?;
    let modules: Vec<&str> = index.get("mod").iter().map(|e| e.name.as_str()).collect();
    assert_eq!(modules, ["elf", "pe"]);
    Ok(())
}

#[test]
fn json_round_trip_preserves_index() -> Result<()> {
    let index = SidebarIndex::bundled_object_write()?;
    for rendered in [to_json(&index)?, to_json_pretty(&index)?, to_script(&index)?] {
        let reparsed = SidebarIndex::parse_with(&rendered, &LoadOptions::default())?;
        assert_eq!(reparsed, index);
        assert_eq!(
            reparsed.categories().collect::<Vec<_>>(),
            index.categories().collect::<Vec<_>>()
        );
    }
    Ok(())
}

#[test]
fn script_output_matches_generator_wrapper() -> Result<()> {
    let index = SidebarIndex::builder()
        .entry("trait", "WritableBuffer", "Trait for writable buffer.")
        .build()?;
    assert_eq!(
        to_script(&index)?,
        r#"initSidebarItems({"trait":[["WritableBuffer","Trait for writable buffer."]]});"#
    );
    Ok(())
}

#[test]
fn bundled_file_reemits_byte_for_byte() -> Result<()> {
    let original = std::fs::read_to_string(bundled_sidebar_path())?;
    let index = SidebarIndex::bundled_object_write()?;
    assert_eq!(to_script(&index)?, original.trim());
    Ok(())
}

#[test]
fn serde_deserialize_validates() -> Result<()> {
    let index: SidebarIndex =
        serde_json::from_str(r#"{"fn":[["run","Run it."]]}"#)?;
    assert_eq!(index.len(), 1);
    assert!(serde_json::from_str::<SidebarIndex>(r#"{"fn":[["a","x"],["a","y"]]}"#).is_err());
    Ok(())
}

#[test]
fn window_assignment_form_is_accepted() -> Result<()> {
    let input = r#"window.SIDEBAR_ITEMS = {"struct":[["Object","A writable object file."]]};"#;
    assert_eq!(parse_auto(input)?.sections.len(), 1);
    let index = SidebarIndex::parse_with(input, &LoadOptions::default())?;
    assert_eq!(index.get("struct").len(), 1);
    assert_eq!(Format::detect(input), Format::Script);
    Ok(())
}

#[test]
fn rejects_duplicate_categories() {
    let input = r#"{"enum":[["A","a"]],"enum":[["B","b"]]}"#;
    let err = SidebarIndex::parse_with(input, &LoadOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains("duplicate category 'enum'"));
}

#[test]
fn rejects_duplicate_names() {
    let input = r#"{"struct":[["Symbol","one"],["Symbol","two"]]}"#;
    let err = SidebarIndex::parse_with(input, &LoadOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains("duplicate entry 'Symbol'"));
}

#[test]
fn rejects_malformed_payloads() {
    let options = LoadOptions::default();
    for input in [
        "",
        "[]",
        r#"{"mod":[]}"#,
        r#"{"mod":[["elf"]]}"#,
        r#"{"mod":[["elf","Support",""]]}"#,
        r#"{"mod":[["","Support"]]}"#,
        r#"{"mod":[["two words","Support"]]}"#,
        r#"{"mod":[["elf","line one\nline two"]]}"#,
        r#"{"mod":[["elf","line one\rline two"]]}"#,
        r#"{"interface":[["Foo","bar"]]}"#,
        "initSidebarItems(",
    ] {
        assert!(
            SidebarIndex::parse_with(input, &options).is_err(),
            "expected rejection for {input:?}"
        );
    }
}

#[test]
fn shape_errors_name_the_location() {
    let input = r#"{"enum":[["Mangling", 7]]}"#;
    let err = SidebarIndex::parse_with(input, &LoadOptions::default()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("shape validation"), "{message}");
    assert!(message.contains("/enum/0/1"), "{message}");
}

#[test]
fn widened_categories_load() -> Result<()> {
    let file = write_fixture(r#"initSidebarItems({"interface":[["Foo","A foo."]]});"#)?;
    assert!(SidebarIndex::load_with(file.path(), &LoadOptions::default()).is_err());
    let options = LoadOptions::default().with_extra_category("interface");
    let index = SidebarIndex::load_with(file.path(), &options)?;
    assert_eq!(index.href("interface", "Foo").as_deref(), Some("interface.Foo.html"));
    Ok(())
}

#[test]
fn missing_file_reports_path() {
    let err = SidebarIndex::load_with(
        std::path::Path::new("/nonexistent/sidebar-items.js"),
        &LoadOptions::default(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/sidebar-items.js"));
}

#[test]
fn bundled_payload_matches_shape_schema() -> Result<()> {
    let script = std::fs::read_to_string(bundled_sidebar_path())?;
    let payload: Value = serde_json::from_str(unwrap_script(&script)?)?;
    validate_shape(&payload)?;
    validate_shape(&payload)?;
    Ok(())
}

#[test]
fn carriage_return_summary_names_the_entry() {
    let input = r#"{"struct":[["Object","A writable\robject file."]]}"#;
    let err = SidebarIndex::parse_with(input, &LoadOptions::default()).unwrap_err();
    let message = format!("{err:#}");
    assert!(
        message.contains("summary for 'Object' in category 'struct' spans multiple lines"),
        "{message}"
    );
}

#[test]
fn byte_order_mark_files_load() -> Result<()> {
    let json = write_fixture(
        "\u{feff}{\"trait\":[[\"WritableBuffer\",\"Trait for writable buffer.\"]]}",
    )?;
    let index = SidebarIndex::load_with(json.path(), &LoadOptions::default())?;
    assert_eq!(index.get("trait").len(), 1);

    let original = std::fs::read_to_string(bundled_sidebar_path())?;
    let script = write_fixture(&format!("\u{feff}{original}"))?;
    let index = SidebarIndex::load_with(script.path(), &LoadOptions::default())?;
    assert_eq!(index, SidebarIndex::bundled_object_write()?);
    Ok(())
}
