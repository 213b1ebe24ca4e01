//! Canonical text generation for a [`Document`].
//!
//! The generator is the inverse of the parser's literal sniffing: numbers and
//! booleans render unquoted, strings render quoted with the format's doubling
//! and multi-segment line-break conventions, arrays and classes render in the
//! block shapes the engine emits itself. Output produced here parses back to
//! an equal `Document`, with one deliberate loss: an integral-valued float
//! renders with the integer rule, so `5.0` comes back as the integer `5`.
//!
//! Generation is total. It never fails for any `Document`, performs no I/O,
//! and treats its input as read-only.

use crate::types::{Document, Value};

/// Formatting options: indent width and indent character.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Scalars of indent per nesting level.
    pub indent_width: usize,
    /// Indent with tabs instead of spaces.
    pub use_tabs: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            use_tabs: false,
        }
    }
}

impl GenerateOptions {
    fn indent(&self, depth: usize) -> String {
        let ch = if self.use_tabs { '\t' } else { ' ' };
        std::iter::repeat(ch)
            .take(self.indent_width * depth)
            .collect()
    }
}

/// Render a document with the default 4-space indent.
///
/// # Examples
///
/// ```
/// use simclass_core::{generate, Document, Value};
///
/// let doc: Document = [("var", Value::Array(vec![
///     Value::Integer(1),
///     Value::Integer(2),
///     Value::Integer(3),
/// ]))]
/// .into_iter()
/// .collect();
/// assert_eq!(generate(&doc), "var[]=\n{\n    1, 2, 3\n};\n");
/// ```
pub fn generate(doc: &Document) -> String {
    generate_with_options(doc, &GenerateOptions::default())
}

/// Render a document with explicit formatting options.
///
/// Top-level properties are newline-separated; since every property rendering
/// is itself newline-terminated, a blank line separates top-level items.
pub fn generate_with_options(doc: &Document, options: &GenerateOptions) -> String {
    let mut items = Vec::with_capacity(doc.len());
    for (name, value) in doc {
        let mut out = String::new();
        render_property(name, value, 0, options, &mut out);
        items.push(out);
    }
    items.join("\n")
}

/// Emit one named property at the given depth, newline-terminated.
fn render_property(name: &str, value: &Value, depth: usize, options: &GenerateOptions, out: &mut String) {
    let prefix = options.indent(depth);
    match value {
        Value::Integer(n) => {
            out.push_str(&format!("{prefix}{name}={n};\n"));
        }
        Value::Float(f) => {
            out.push_str(&format!("{prefix}{name}={};\n", format_float(*f)));
        }
        Value::Boolean(b) => {
            out.push_str(&format!("{prefix}{name}={b};\n"));
        }
        Value::String(s) => {
            out.push_str(&format!("{prefix}{name}=\"{}\";\n", escape_string(s)));
        }
        Value::Array(items) => {
            out.push_str(&format!("{prefix}{name}[]=\n{prefix}{{\n"));
            if !items.is_empty() {
                out.push_str(&options.indent(depth + 1));
                out.push_str(&render_elements(items, options));
            }
            out.push_str(&format!("\n{prefix}}};\n"));
        }
        Value::Class(body) => {
            out.push_str(&format!("{prefix}class {name}\n{prefix}{{\n"));
            for (child_name, child_value) in body {
                render_property(child_name, child_value, depth + 1, options, out);
            }
            out.push_str(&format!("{prefix}}};\n"));
        }
    }
}

/// Comma-join bare element renderings on a single line.
fn render_elements(items: &[Value], options: &GenerateOptions) -> String {
    items
        .iter()
        .map(|item| render_bare(item, options))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Emit an array element: no name prefix, no trailing `;`. Nested arrays
/// render inline as `{e1, e2}`.
fn render_bare(value: &Value, options: &GenerateOptions) -> String {
    match value {
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => format_float(*f),
        Value::Boolean(b) => b.to_string(),
        Value::String(s) => format!("\"{}\"", escape_string(s)),
        Value::Array(items) => format!("{{{}}}", render_elements(items, options)),
        // Unreachable from parsed documents; arrays cannot hold classes.
        Value::Class(_) => "{}".to_string(),
    }
}

/// Integral-valued floats take the integer rule; everything else uses the
/// shortest round-trippable decimal form.
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() && f.abs() < i64::MAX as f64 {
        return (f as i64).to_string();
    }
    format!("{f}")
}

/// Quote doubling first, then newline re-encoding, so segment-boundary quotes
/// introduced for line breaks are not themselves doubled.
fn escape_string(s: &str) -> String {
    s.replace('"', "\"\"").replace('\n', "\" \\n \"")
}
