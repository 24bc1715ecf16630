use crate::{
    error::FilterError,
    filter::row::ConstraintSet,
    schema::Schema,
    value::Value,
};

///
/// ConstraintSetBuilder
///
/// Declarative collection of constraint rows.
///
/// This builder:
/// - Collects rows and bindings in call order
/// - Is purely structural (no schema access until `finish`)
/// - Accepts anything convertible into a [`Value`]
///
/// Column names are resolved against the schema only at [`finish`]; invalid
/// names surface there as schema mismatches, keeping construction
/// lightweight and infallible.
///
/// [`finish`]: Self::finish
///

#[derive(Clone, Debug, Default)]
pub struct ConstraintSetBuilder {
    rows: Vec<Vec<(String, Value)>>,
}

impl ConstraintSetBuilder {
    /// Open a new (initially wildcard-everything) row.
    #[must_use]
    pub fn row(mut self) -> Self {
        self.rows.push(Vec::new());
        self
    }

    /// Bind a column in the most recently opened row; opens a first row if
    /// none exists yet.
    #[must_use]
    pub fn bind(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        if let Some(row) = self.rows.last_mut() {
            row.push((column.into(), value.into()));
        }
        self
    }

    /// Resolve the collected rows against the schema.
    pub fn finish(self, schema: &Schema) -> Result<ConstraintSet, FilterError> {
        ConstraintSet::from_rows(schema, self.rows)
    }
}

impl ConstraintSet {
    #[must_use]
    pub fn builder() -> ConstraintSetBuilder {
        ConstraintSetBuilder::default()
    }
}

///
/// TESTS
///
