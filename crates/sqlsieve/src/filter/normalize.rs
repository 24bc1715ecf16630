use crate::filter::row::{ConstraintRow, ConstraintSet};

///
/// Canonical reduction of a constraint set ahead of grouping.
///
/// Guarantees:
/// - Logical equivalence is preserved
/// - Exact-duplicate rows are removed (first occurrence wins)
/// - Rows wholly covered by a less-restrictive surviving row are removed
/// - Surviving rows keep their input order
///
/// The zero-constraint outcome (an empty set, or any row binding nothing)
/// is reported as [`Reduction::Unconstrained`]; the compile driver decides
/// between the safety interlock and the unconditional-true emission.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Reduction {
    /// At least one surviving row constrains at least one column.
    Rows(Vec<ConstraintRow>),
    /// The set matches every record.
    Unconstrained,
}

pub(crate) fn reduce_rows(set: &ConstraintSet) -> Reduction {
    if set.is_empty() || set.iter().any(ConstraintRow::is_unconstrained) {
        return Reduction::Unconstrained;
    }

    Reduction::Rows(drop_subsumed(&dedup(set)))
}

// Row count per call is small (tens); the pairwise scans below are O(n²·k)
// and deliberately favor determinism over asymptotics.
fn dedup(set: &ConstraintSet) -> Vec<ConstraintRow> {
    let mut out: Vec<ConstraintRow> = Vec::with_capacity(set.len());

    for row in set.iter() {
        if !out.contains(row) {
            out.push(row.clone());
        }
    }

    out
}

fn drop_subsumed(rows: &[ConstraintRow]) -> Vec<ConstraintRow> {
    rows.iter()
        .filter(|row| !rows.iter().any(|other| other.subsumes(row)))
        .cloned()
        .collect()
}

///
/// TESTS
///
