use crate::{
    filter::{pivot, row::ConstraintRow},
    value::Value,
};

///
/// ReducedNode
///
/// Compiled shape of a constraint set: a tree whose root-to-leaf paths are
/// exactly the surviving, non-subsumed constraint regions. `Equals` and
/// `InSet` test one column and continue into `child` (a conjunction);
/// `Branch` is an ordered disjunction of alternatives; `Leaf` ends a
/// satisfied path. A bare `Leaf` tree places no constraint at all.
///
/// Every surviving row contributes to exactly one alternative per branch
/// level, so sibling alternatives never share a constraint region.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReducedNode {
    Leaf,
    Equals {
        column: usize,
        value: Value,
        child: Box<ReducedNode>,
    },
    InSet {
        column: usize,
        values: Vec<Value>,
        child: Box<ReducedNode>,
    },
    Branch(Vec<ReducedNode>),
}

impl ReducedNode {
    /// Number of column tests the tree emits; the optimizer's minimization
    /// target.
    #[must_use]
    pub fn clause_count(&self) -> usize {
        match self {
            Self::Leaf => 0,
            Self::Equals { child, .. } | Self::InSet { child, .. } => 1 + child.clause_count(),
            Self::Branch(alternatives) => alternatives.iter().map(Self::clause_count).sum(),
        }
    }
}

///
/// PivotMode
///
/// Discrimination-column policy per recursion level: schema declaration
/// order, or the greedy clause-count heuristic.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PivotMode {
    SchemaOrder,
    Optimized,
}

/// Recursively partition rows into a reduced tree over the given columns.
///
/// CONTRACT: `rows` is non-empty, deduplicated, and subsumption-free.
pub(crate) fn reduce(rows: &[&ConstraintRow], columns: &[usize], mode: PivotMode) -> ReducedNode {
    // A row with no remaining bindings is already satisfied here; it clips
    // every deeper alternative in this region. Subsumption guarantees such
    // a row has no surviving siblings extending the same prefix.
    if rows
        .iter()
        .any(|row| columns.iter().all(|&column| row.get(column).is_none()))
    {
        return ReducedNode::Leaf;
    }

    let pivot = match mode {
        PivotMode::SchemaOrder => default_pivot(rows, columns),
        PivotMode::Optimized => pivot::choose(rows, columns),
    };

    reduce_at(rows, columns, pivot, mode)
}

/// First column, in discrimination order, bound by at least one row.
pub(crate) fn default_pivot(rows: &[&ConstraintRow], columns: &[usize]) -> usize {
    columns
        .iter()
        .copied()
        .find(|&column| rows.iter().any(|row| row.get(column).is_some()))
        .unwrap_or(columns[0])
}

struct Group<'a> {
    value: Value,
    rows: Vec<&'a ConstraintRow>,
    rank: usize,
}

struct Alternative {
    values: Vec<Value>,
    child: ReducedNode,
    rank: usize,
}

/// Reduce with a fixed pivot at this level; deeper levels follow `mode`.
pub(crate) fn reduce_at(
    rows: &[&ConstraintRow],
    columns: &[usize],
    pivot: usize,
    mode: PivotMode,
) -> ReducedNode {
    let rest: Vec<usize> = columns.iter().copied().filter(|&c| c != pivot).collect();

    // Partition into literal groups (first-seen value order) and wildcard
    // pass-through rows. Each row lands in exactly one bucket; pass-through
    // rows stay in play as their own alternative rather than being dropped.
    let mut groups: Vec<Group> = Vec::new();
    let mut pass: Vec<&ConstraintRow> = Vec::new();
    let mut pass_rank = usize::MAX;

    for (index, &row) in rows.iter().enumerate() {
        match row.get(pivot) {
            Some(value) => match groups.iter_mut().find(|group| group.value == *value) {
                Some(group) => group.rows.push(row),
                None => groups.push(Group {
                    value: value.clone(),
                    rows: vec![row],
                    rank: index,
                }),
            },
            None => {
                pass.push(row);
                pass_rank = pass_rank.min(index);
            }
        }
    }

    // Reduce each literal group, then merge groups whose continuations
    // reduced to the same tree into one IN(...) alternative. Merged values
    // keep first-seen order; a merged alternative keeps its earliest rank.
    let mut alternatives: Vec<Alternative> = Vec::new();
    for group in groups {
        let child = reduce(&group.rows, &rest, mode);
        match alternatives.iter_mut().find(|alt| alt.child == child) {
            Some(alt) => alt.values.push(group.value),
            None => alternatives.push(Alternative {
                values: vec![group.value],
                child,
                rank: group.rank,
            }),
        }
    }

    let mut nodes: Vec<(ReducedNode, usize)> = alternatives
        .into_iter()
        .map(|alt| {
            let child = Box::new(alt.child);
            let mut values = alt.values;
            let node = if values.len() == 1 {
                ReducedNode::Equals {
                    column: pivot,
                    value: values.swap_remove(0),
                    child,
                }
            } else {
                ReducedNode::InSet {
                    column: pivot,
                    values,
                    child,
                }
            };
            (node, alt.rank)
        })
        .collect();

    // Wildcard rows carry no test at this column; they reduce over the
    // remaining columns and join this level as further alternatives.
    if !pass.is_empty() {
        match reduce(&pass, &rest, mode) {
            ReducedNode::Branch(spliced) => {
                nodes.extend(spliced.into_iter().map(|node| (node, pass_rank)));
            }
            node => nodes.push((node, pass_rank)),
        }
    }

    nodes.sort_by_key(|(_, rank)| *rank);
    let mut nodes: Vec<ReducedNode> = nodes.into_iter().map(|(node, _)| node).collect();

    match nodes.len() {
        1 => nodes.swap_remove(0),
        _ => ReducedNode::Branch(nodes),
    }
}

///
/// TESTS
///
