use crate::{
    error::{FilterError, SchemaMismatch},
    filter::{
        emit::{self, SqlFilter},
        normalize::{self, Reduction},
        reduce::{self, PivotMode, ReducedNode},
        row::ConstraintSet,
    },
    schema::Schema,
};

///
/// CompileOptions
///
/// Explicit per-call switches; compilation carries no ambient or global
/// configuration.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompileOptions {
    /// Re-pick the discrimination column per level to shrink the output.
    pub optimize: bool,

    /// Treat a filter that matches every record as a caller bug. Enabled by
    /// default: an accidentally-unconstrained filter would otherwise
    /// silently select or affect the whole table.
    pub trap_unconstrained: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            optimize: false,
            trap_unconstrained: true,
        }
    }
}

/// Compile a constraint set into a parameterized WHERE fragment.
///
/// Pure and deterministic: equal inputs always produce identical fragments
/// and parameter lists, so concurrent calls need no coordination. Errors
/// abort compilation with no partial output; retrying an unchanged input
/// can never succeed.
pub fn compile(
    schema: &Schema,
    set: &ConstraintSet,
    options: CompileOptions,
) -> Result<SqlFilter, FilterError> {
    let tree = reduce_set(schema, set, options)?;

    Ok(emit::emit(schema, &tree))
}

/// Reduce a constraint set without emitting SQL; the input to
/// [`explain::render`](super::explain::render).
///
/// A bare [`ReducedNode::Leaf`] is the intentional match-everything result,
/// reachable only with the unconstrained trap disabled.
pub fn reduce_set(
    schema: &Schema,
    set: &ConstraintSet,
    options: CompileOptions,
) -> Result<ReducedNode, FilterError> {
    if let Some(row) = set.iter().find(|row| row.width() != schema.len()) {
        return Err(SchemaMismatch::WidthMismatch {
            expected: schema.len(),
            found: row.width(),
        }
        .into());
    }

    let rows = match normalize::reduce_rows(set) {
        Reduction::Unconstrained => {
            return if options.trap_unconstrained {
                Err(FilterError::UnconstrainedRow)
            } else {
                Ok(ReducedNode::Leaf)
            };
        }
        Reduction::Rows(rows) => rows,
    };

    let mode = if options.optimize {
        PivotMode::Optimized
    } else {
        PivotMode::SchemaOrder
    };
    let refs: Vec<&_> = rows.iter().collect();
    let columns: Vec<usize> = (0..schema.len()).collect();

    Ok(reduce::reduce(&refs, &columns, mode))
}
