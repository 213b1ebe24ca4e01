//! Path lookup over a parsed [`Document`].
//!
//! Paths use the two-character `>>` delimiter between segments, the same
//! spelling the engine's config tooling uses: `"Missions>>TestMission01>>difficulty"`.

use crate::types::{Document, Value};

/// Segment delimiter for [`search`] paths.
pub const PATH_DELIMITER: &str = ">>";

/// Walk `path` through nested classes and return the value it names.
///
/// Returns `None` if any segment is absent or an intermediate segment is not
/// a class.
///
/// # Examples
///
/// ```
/// use simclass_core::{parse, search, Value};
///
/// let doc = parse("class Moo { value=1; };").unwrap();
/// assert_eq!(search(&doc, "Moo>>value"), Some(&Value::Integer(1)));
/// assert_eq!(search(&doc, "Moo>>bar"), None);
/// ```
pub fn search<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split(PATH_DELIMITER);

    let first = segments.next()?;
    let mut current = doc.get(first)?;

    for segment in segments {
        current = current.as_class()?.get(segment)?;
    }

    Some(current)
}
