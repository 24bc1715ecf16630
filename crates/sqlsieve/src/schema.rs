use crate::error::{FilterError, SchemaMismatch};
use derive_more::Deref;
use serde::{Deserialize, Serialize};

///
/// ColumnType
///
/// Host/SQL type tag attached to emitted parameters. Tags drive parameter
/// binding in the surrounding statement builders only; they never influence
/// grouping or reduction.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ColumnType {
    Bool,
    Float,
    Int,
    Text,
    Uint,
}

///
/// ColumnDef
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

///
/// Schema
///
/// Ordered, fixed sequence of filterable columns. Order carries no filter
/// semantics; it fixes the default discrimination order and tie-breaking,
/// so equal inputs always compile to identical SQL. Immutable for the
/// lifetime of one compilation.
///

#[derive(Clone, Debug, Deref, Eq, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<ColumnDef>,
}

impl Schema {
    /// Build a schema, rejecting duplicate column names; a schema that
    /// cannot address its columns unambiguously cannot type parameters.
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self, FilterError> {
        for (index, column) in columns.iter().enumerate() {
            if columns[..index].iter().any(|c| c.name == column.name) {
                return Err(SchemaMismatch::DuplicateColumn {
                    column: column.name.clone(),
                }
                .into());
            }
        }

        Ok(Self { columns })
    }

    /// Position of a column by name, if the schema declares it.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

///
/// TESTS
///
