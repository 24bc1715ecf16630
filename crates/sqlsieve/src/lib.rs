//! Compiles sparse column/value constraint matrices into compact,
//! parameterized SQL boolean fragments, plus the schema and value
//! vocabulary exported via the `prelude`.

// public exports are one module level down
pub mod error;
pub mod filter;
pub mod schema;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, internal pipeline stages, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        filter::{
            CompileOptions, ConstraintRow, ConstraintSet, SqlFilter, SqlParam, TrieKey, TrieNode,
            compile,
        },
        schema::{ColumnDef, ColumnType, Schema},
        value::Value,
    };
}
