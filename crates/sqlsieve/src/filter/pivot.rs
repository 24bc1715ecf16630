use crate::filter::{
    reduce::{self, PivotMode, ReducedNode},
    row::ConstraintRow,
};

///
/// Greedy pivot selection.
///
/// Scores every column still carrying a binding by the clause count of a
/// schema-order reduction rooted at that column — one level of lookahead,
/// not a search. Ties fall back, in order, to: fewer alternatives at this
/// level, fewer wildcard pass-through rows (purer groups), then earliest
/// schema position. Value order inside groups always follows first
/// occurrence in the input.
///
/// The chosen order is never worse than schema order; it is not guaranteed
/// globally minimal, and equally-valid groupings are settled by the
/// tie-break chain so output stays deterministic and diffable.
///

pub(crate) fn choose(rows: &[&ConstraintRow], columns: &[usize]) -> usize {
    let mut best: Option<Candidate> = None;

    for &column in columns {
        if rows.iter().all(|row| row.get(column).is_none()) {
            continue;
        }

        let lookahead = reduce::reduce_at(rows, columns, column, PivotMode::SchemaOrder);
        let candidate = Candidate {
            column,
            clauses: lookahead.clause_count(),
            alternatives: level_width(&lookahead),
            wildcards: rows
                .iter()
                .filter(|row| row.get(column).is_none())
                .count(),
        };

        // Columns are visited in discrimination order, so a strict win is
        // required to displace an earlier candidate.
        let wins = best
            .as_ref()
            .is_none_or(|current| candidate.beats(current));
        if wins {
            best = Some(candidate);
        }
    }

    best.map_or_else(|| reduce::default_pivot(rows, columns), |c| c.column)
}

struct Candidate {
    column: usize,
    clauses: usize,
    alternatives: usize,
    wildcards: usize,
}

impl Candidate {
    fn beats(&self, other: &Self) -> bool {
        (self.clauses, self.alternatives, self.wildcards)
            < (other.clauses, other.alternatives, other.wildcards)
    }
}

fn level_width(tree: &ReducedNode) -> usize {
    match tree {
        ReducedNode::Branch(alternatives) => alternatives.len(),
        _ => 1,
    }
}

///
/// TESTS
///
