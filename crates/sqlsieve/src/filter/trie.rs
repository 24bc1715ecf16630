use crate::{
    error::{FilterError, SchemaMismatch},
    filter::row::{ConstraintRow, ConstraintSet},
    schema::Schema,
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// TrieKey
///
/// Edge label in the nested constraint representation: a literal for the
/// column at this depth, or a wildcard skipping it.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TrieKey {
    Wildcard,
    Literal(Value),
}

///
/// TrieNode
///
/// Nested representation of a constraint set. Depth `i` addresses schema
/// column `i`; every root-to-terminal path is one row binding the
/// non-wildcard columns along the path. An empty branch is terminal.
///
/// Malformed markers are unrepresentable in this shape; the only remaining
/// structural error is a branch nested deeper than the schema is wide.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TrieNode {
    Terminal,
    Branch(Vec<(TrieKey, TrieNode)>),
}

impl TrieNode {
    /// Convenience constructor for a branch node.
    #[must_use]
    pub fn branch(edges: impl IntoIterator<Item = (TrieKey, TrieNode)>) -> Self {
        Self::Branch(edges.into_iter().collect())
    }
}

impl ConstraintSet {
    /// Normalize the nested representation by flattening every key path
    /// into a canonical row. Rows come out in path (depth-first) order;
    /// later stages do not rely on any particular order from this step.
    pub fn from_trie(schema: &Schema, root: &TrieNode) -> Result<Self, FilterError> {
        let mut rows = Vec::new();
        let mut path = Vec::with_capacity(schema.len());

        flatten(schema, root, &mut path, &mut rows)?;

        Ok(Self::from_normalized(rows))
    }
}

fn flatten(
    schema: &Schema,
    node: &TrieNode,
    path: &mut Vec<Option<Value>>,
    rows: &mut Vec<ConstraintRow>,
) -> Result<(), FilterError> {
    match node {
        TrieNode::Terminal => {
            push_row(schema, path, rows);
            Ok(())
        }
        TrieNode::Branch(edges) if edges.is_empty() => {
            push_row(schema, path, rows);
            Ok(())
        }
        TrieNode::Branch(edges) => {
            let depth = path.len();
            if depth >= schema.len() {
                return Err(SchemaMismatch::DepthExceeded {
                    depth: depth + 1,
                    width: schema.len(),
                }
                .into());
            }

            for (key, child) in edges {
                path.push(match key {
                    TrieKey::Wildcard => None,
                    TrieKey::Literal(value) => Some(value.clone()),
                });
                flatten(schema, child, path, rows)?;
                path.pop();
            }

            Ok(())
        }
    }
}

// Columns below the terminal stay wildcarded.
fn push_row(schema: &Schema, path: &[Option<Value>], rows: &mut Vec<ConstraintRow>) {
    let mut slots = path.to_vec();
    slots.resize(schema.len(), None);
    rows.push(ConstraintRow::from_slots(slots));
}

///
/// TESTS
///
