//! # simclass-core
//!
//! Parser and generator for the class definition text format used by
//! Arma-style simulation engines (`config.cpp`, `server.cfg`, mission
//! configs): nested property bags of scalars, arrays and sub-classes.
//!
//! The two halves are designed to round-trip through each other: parsing the
//! generator's output yields an equal [`Document`]. The one deliberate
//! exception is numeric kind — an integral-valued float regenerates in
//! integer form.
//!
//! This is not a config-language interpreter. Arithmetic expressions are not
//! evaluated (only literal numeric text is recognized), preprocessor
//! directives and macros are out of scope, and inheritance markers
//! (`class Child : Parent`) are recognized syntactically and discarded.
//! `delete` and `import` statements are skipped without effect.
//!
//! ## Quick start
//!
//! ```rust
//! use simclass_core::{generate, parse, search, Value};
//!
//! let doc = parse(r#"
//!     class Missions {
//!         names[] = {"Alpha", "Bravo"};
//!         voteThreshold = 0.33;
//!     };
//! "#).unwrap();
//!
//! assert_eq!(search(&doc, "Missions>>voteThreshold"), Some(&Value::Float(0.33)));
//!
//! // Canonical text, reparses to an equal document.
//! let text = generate(&doc);
//! assert_eq!(parse(&text).unwrap(), doc);
//! ```
//!
//! ## Modules
//!
//! - [`parser`] — text → [`Document`], with optional `$STR...` translation
//! - [`generator`] — [`Document`] → canonical text
//! - [`search`] — `>>`-delimited path lookup
//! - [`json`] — [`Document`] ↔ `serde_json::Value` conversion
//! - [`error`] — the parse error type
//! - [`types`] — [`Value`] and [`Document`]

pub mod error;
pub mod generator;
pub mod json;
pub mod parser;
pub mod search;
pub mod types;

pub use error::{Result, SimclassError};
pub use generator::{generate, generate_with_options, GenerateOptions};
pub use json::{from_json, from_json_str, to_json};
pub use parser::{parse, parse_bytes, parse_bytes_with_translations, parse_with_translations};
pub use search::{search, PATH_DELIMITER};
pub use types::{Document, Value};
