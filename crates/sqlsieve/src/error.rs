use thiserror::Error as ThisError;

///
/// FilterError
///
/// Boundary error for filter compilation. Compilation is pure and
/// deterministic; errors are raised only while normalizing input and at the
/// unconstrained-filter interlock. No partial output accompanies an error,
/// and retrying with the same input can never succeed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FilterError {
    /// Input addressed the schema in a way the schema cannot satisfy.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(SchemaMismatch),

    /// A row (or an empty set) places no constraint on any column. With the
    /// trap enabled this is reported instead of silently matching every
    /// record.
    #[error("unconstrained filter would match every record")]
    UnconstrainedRow,
}

///
/// SchemaMismatch
///
/// Structured detail carried by [`FilterError::SchemaMismatch`].
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaMismatch {
    #[error("unknown column: {column}")]
    UnknownColumn { column: String },

    #[error("duplicate column in schema: {column}")]
    DuplicateColumn { column: String },

    #[error("duplicate binding for column: {column}")]
    DuplicateBinding { column: String },

    #[error("nesting depth {depth} exceeds schema width {width}")]
    DepthExceeded { depth: usize, width: usize },

    #[error("constraint row spans {found} columns, schema has {expected}")]
    WidthMismatch { expected: usize, found: usize },
}

impl From<SchemaMismatch> for FilterError {
    fn from(detail: SchemaMismatch) -> Self {
        Self::SchemaMismatch(detail)
    }
}
