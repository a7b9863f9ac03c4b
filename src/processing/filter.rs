//! Constraint-based row filtering for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// A per-column row constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Cell must equal the given value.
    Equals(Value),
    /// Cell must equal one of the given values.
    OneOf(Vec<Value>),
}

impl Constraint {
    fn matches(&self, cell: &Value) -> bool {
        match self {
            Constraint::Equals(v) => cell == v,
            Constraint::OneOf(vs) => vs.contains(cell),
        }
    }
}

/// Returns a new [`DataSet`] containing only rows that satisfy every
/// constraint (AND-combined).
///
/// Constraints naming columns absent from the schema are ignored: dashboard
/// pages pass optional, schema-varying filter sets, and an unknown column
/// must not exclude every row. An empty constraint slice returns the dataset
/// unchanged.
pub fn filter(dataset: &DataSet, constraints: &[(&str, Constraint)]) -> DataSet {
    let resolved: Vec<(usize, &Constraint)> = constraints
        .iter()
        .filter_map(|(name, c)| dataset.schema.index_of(name).map(|idx| (idx, c)))
        .collect();

    dataset.filter_rows(|row| {
        resolved
            .iter()
            .all(|(idx, c)| row.get(*idx).is_some_and(|cell| c.matches(cell)))
    })
}
