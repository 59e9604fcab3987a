//! Inspect, validate and convert documentation sidebar indexes.
//!
//! Usage:
//!   sidebar-index categories
//!   sidebar-index --file target/doc/object/write/sidebar-items.js show struct
//!   sidebar-index search section
//!   sidebar-index validate --file sidebar.json
//!   sidebar-index --file - entries < sidebar-items.js
//!   sidebar-index convert --to pretty --output sidebar.json
//!
//! `--file -` reads stdin. Without `--file` the path comes from
//! `SIDEBAR_INDEX_FILE`, falling back to the bundled `object::write` sidebar.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use sidebar_index::{
    Category, ENV_SIDEBAR_FILE, Entry, LoadOptions, SidebarIndex, to_json, to_json_pretty,
    to_script,
};
use std::env;
use std::io::{Read, Write, stdin};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sidebar-index")]
#[command(about = "Inspect and convert documentation sidebar indexes")]
struct Cli {
    /// Sidebar file (JSON or script form); `-` reads stdin.
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories in sidebar order.
    Categories,
    /// List the entries of one category.
    Show { category: String },
    /// List every entry.
    Entries {
        /// Emit one JSON object per line.
        #[arg(long)]
        json: bool,
    },
    /// Find entries by name or summary.
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the navigation tree.
    Tree,
    /// Check the file and report counts.
    Validate,
    /// Re-emit the index in another form.
    Convert {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        to: OutputFormat,
        /// Destination file; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
    Script,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let index = load_index(cli.file.as_deref())?;

    match cli.command {
        Command::Categories => {
            for category in index.sections() {
                println!("{category}");
            }
        }
        Command::Show { category } => {
            for entry in index.get(&category) {
                println!("{}\t{}", entry.name, entry.summary);
            }
        }
        Command::Entries { json } => print_entries(&index.all_entries(), json)?,
        Command::Search { query, json } => print_entries(&index.search(&query), json)?,
        Command::Tree => print_tree(&index),
        Command::Validate => {
            println!(
                "ok: {} categories, {} entries",
                index.categories().count(),
                index.len()
            );
        }
        Command::Convert { to, output } => {
            let rendered = match to {
                OutputFormat::Json => to_json(&index)?,
                OutputFormat::Pretty => to_json_pretty(&index)?,
                OutputFormat::Script => to_script(&index)?,
            };
            match output {
                Some(path) => write_atomic(&path, &rendered)?,
                None => println!("{rendered}"),
            }
        }
    }

    Ok(())
}

fn load_index(file: Option<&Path>) -> Result<SidebarIndex> {
    let from_env = env::var_os(ENV_SIDEBAR_FILE)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    match file.map(Path::to_path_buf).or(from_env) {
        Some(path) if path.as_os_str() == "-" => {
            let input = read_stdin()?;
            SidebarIndex::parse_with(&input, &LoadOptions::from_env())
                .context("loading sidebar from stdin")
        }
        Some(path) => SidebarIndex::load_with(&path, &LoadOptions::from_env()),
        None => {
            debug!("no sidebar file given; using bundled object::write sidebar");
            SidebarIndex::bundled_object_write()
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    stdin()
        .read_to_string(&mut buf)
        .context("reading stdin for sidebar input")?;
    Ok(buf)
}

fn print_entries(entries: &[(&Category, &Entry)], as_json: bool) -> Result<()> {
    for (category, entry) in entries {
        if as_json {
            let line = json!({
                "category": category.as_str(),
                "name": entry.name,
                "summary": entry.summary,
                "href": category.page_for(&entry.name),
            });
            println!("{}", serde_json::to_string(&line)?);
        } else {
            println!("{category}\t{}\t{}", entry.name, entry.summary);
        }
    }
    Ok(())
}

fn print_tree(index: &SidebarIndex) {
    for category in index.sections() {
        println!("{}", category.heading());
        for entry in index.get(category.as_str()) {
            println!("  {} ({})", entry.name, category.page_for(&entry.name));
        }
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut temp = NamedTempFile::new_in(&dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    temp.write_all(contents.as_bytes())
        .with_context(|| format!("writing temp file for {}", path.display()))?;
    temp.write_all(b"\n")?;
    temp.persist(path)
        .map_err(|err| anyhow!("replacing {}: {}", path.display(), err.error))?;
    info!(path = %path.display(), "wrote sidebar index");
    Ok(())
}
