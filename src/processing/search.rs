//! Substring search across dataset columns.

use crate::types::{DataSet, Value};

/// Returns rows where any targeted column's string rendering contains `term`,
/// case-insensitively.
///
/// - `columns: None` searches every column; names absent from the schema are
///   skipped.
/// - An empty `term` returns the dataset unchanged (no filtering).
/// - Null cells never match.
pub fn search(dataset: &DataSet, term: &str, columns: Option<&[&str]>) -> DataSet {
    if term.is_empty() {
        return dataset.clone();
    }

    let targets: Vec<usize> = match columns {
        Some(names) => names
            .iter()
            .filter_map(|name| dataset.schema.index_of(name))
            .collect(),
        None => (0..dataset.schema.fields.len()).collect(),
    };
    let needle = term.to_lowercase();

    dataset.filter_rows(|row| {
        targets.iter().any(|&idx| {
            row.get(idx)
                .and_then(Value::render)
                .is_some_and(|s| s.to_lowercase().contains(&needle))
        })
    })
}
