//! `simclass` CLI — convert, reformat and query class definition files.
//!
//! ## Usage
//!
//! ```sh
//! # Class file → pretty-printed JSON (stdin → stdout)
//! simclass to-json -i server.cfg
//!
//! # JSON object → canonical class text
//! echo '{"var":[1,2,3]}' | simclass from-json
//!
//! # Reformat a file into canonical form, tabs instead of spaces
//! simclass fmt -i config.cpp --use-tabs -o config.formatted.cpp
//!
//! # Resolve $STR... references while parsing
//! simclass to-json -i mission.cfg --translations strings.json
//!
//! # Look up a nested value by `>>` path
//! simclass get "Missions>>TestMission01>>difficulty" -i server.cfg
//! ```

use std::collections::HashMap;
use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use simclass_core::{Document, GenerateOptions};

#[derive(Parser)]
#[command(
    name = "simclass",
    version,
    about = "Parse, generate and query Arma-style class definition files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a class file and emit pretty-printed JSON
    ToJson {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// JSON file with a string→string table for $STR... references
        #[arg(long)]
        translations: Option<String>,
    },
    /// Convert a JSON object into canonical class text
    FromJson {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Scalars of indent per nesting level
        #[arg(long, default_value_t = 4)]
        indent: usize,
        /// Indent with tabs instead of spaces
        #[arg(long)]
        use_tabs: bool,
    },
    /// Reformat a class file into canonical form
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// JSON file with a string→string table for $STR... references
        #[arg(long)]
        translations: Option<String>,
        /// Scalars of indent per nesting level
        #[arg(long, default_value_t = 4)]
        indent: usize,
        /// Indent with tabs instead of spaces
        #[arg(long)]
        use_tabs: bool,
    },
    /// Look up a `>>`-delimited path and print the value as JSON
    Get {
        /// Path like "Missions>>TestMission01>>difficulty"
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// JSON file with a string→string table for $STR... references
        #[arg(long)]
        translations: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ToJson {
            input,
            output,
            translations,
        } => {
            let text = read_input(input.as_deref())?;
            let doc = parse_input(&text, translations.as_deref())?;
            let json = serde_json::to_string_pretty(&simclass_core::to_json(&doc))?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::FromJson {
            input,
            output,
            indent,
            use_tabs,
        } => {
            let text = read_input(input.as_deref())?;
            let value: serde_json::Value =
                serde_json::from_str(&text).context("Input is not valid JSON")?;
            let doc = simclass_core::from_json(&value)
                .context("JSON has no class-file representation")?;
            let options = GenerateOptions {
                indent_width: indent,
                use_tabs,
            };
            write_output(
                output.as_deref(),
                &simclass_core::generate_with_options(&doc, &options),
            )?;
        }
        Commands::Fmt {
            input,
            output,
            translations,
            indent,
            use_tabs,
        } => {
            let text = read_input(input.as_deref())?;
            let doc = parse_input(&text, translations.as_deref())?;
            let options = GenerateOptions {
                indent_width: indent,
                use_tabs,
            };
            write_output(
                output.as_deref(),
                &simclass_core::generate_with_options(&doc, &options),
            )?;
        }
        Commands::Get {
            path,
            input,
            translations,
        } => {
            let text = read_input(input.as_deref())?;
            let doc = parse_input(&text, translations.as_deref())?;
            match simclass_core::search(&doc, &path) {
                Some(value) => {
                    let json = serde_json::to_string_pretty(value)?;
                    write_output(None, &json)?;
                }
                None => bail!("path not found: {path}"),
            }
        }
    }

    Ok(())
}

/// Parse class text, resolving translations if a table file was given.
fn parse_input(text: &str, translations: Option<&str>) -> Result<Document> {
    let doc = match translations {
        Some(path) => {
            let table = load_translations(path)?;
            simclass_core::parse_with_translations(text, &table)
        }
        None => simclass_core::parse(text),
    };
    doc.context("Failed to parse class definition input")
}

/// Load a flat string→string JSON object, e.g. `{"STR_TITLE": "Hello"}`.
fn load_translations(path: &str) -> Result<HashMap<String, String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read translations file: {path}"))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Translations file is not a flat JSON string map: {path}"))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => {
            println!("{content}");
        }
    }
    Ok(())
}
