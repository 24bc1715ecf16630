use crate::{
    filter::reduce::ReducedNode,
    schema::{ColumnType, Schema},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// SqlParam
///
/// One positional parameter: the literal plus the declared type of its
/// column, in placeholder order.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SqlParam {
    pub value: Value,
    pub ty: ColumnType,
}

///
/// SqlFilter
///
/// Emitted WHERE fragment plus its positional parameters. The fragment is
/// prefixed with ` AND ` so it appends directly to an always-true base
/// predicate; parameter order exactly matches placeholder order. An
/// unconstrained compilation yields the literal `TRUE` and no parameters.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SqlFilter {
    pub fragment: String,
    pub params: Vec<SqlParam>,
}

impl SqlFilter {
    pub(crate) fn unconstrained() -> Self {
        Self {
            fragment: format!(" AND {UNCONSTRAINED_TOKEN}"),
            params: Vec::new(),
        }
    }
}

const UNCONSTRAINED_TOKEN: &str = "TRUE";

/// Serialize a reduced tree into a parameterized fragment, depth first.
///
/// Parenthesization: a lone column test stays bare; any other top level is
/// wrapped once. Disjunctions wrap each multi-test alternative and the
/// whole group; a single-test alternative stays bare inside its group.
pub(crate) fn emit(schema: &Schema, node: &ReducedNode) -> SqlFilter {
    let mut params = Vec::new();
    let pieces = conjunction(schema, node, &mut params);

    let fragment = match pieces.as_slice() {
        [] => return SqlFilter::unconstrained(),
        [piece] => format!(" AND {piece}"),
        _ => format!(" AND ({})", pieces.join(" AND ")),
    };

    SqlFilter { fragment, params }
}

// Flatten the AND-chain starting at `node` into rendered tests; a nested
// disjunction renders as one parenthesized piece.
fn conjunction(schema: &Schema, node: &ReducedNode, params: &mut Vec<SqlParam>) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut cursor = node;

    loop {
        match cursor {
            ReducedNode::Leaf => break,
            ReducedNode::Equals {
                column,
                value,
                child,
            } => {
                pieces.push(render_equals(schema, *column, value, params));
                cursor = child;
            }
            ReducedNode::InSet {
                column,
                values,
                child,
            } => {
                match values.as_slice() {
                    // A one-value set degenerates to plain equality.
                    [value] => pieces.push(render_equals(schema, *column, value, params)),
                    _ => {
                        let placeholders = vec!["?"; values.len()].join(",");
                        pieces.push(format!(
                            "{} IN({placeholders})",
                            schema[*column].name
                        ));
                        for value in values {
                            params.push(SqlParam {
                                value: value.clone(),
                                ty: schema[*column].ty,
                            });
                        }
                    }
                }
                cursor = child;
            }
            ReducedNode::Branch(alternatives) => {
                pieces.push(render_branch(schema, alternatives, params));
                break;
            }
        }
    }

    pieces
}

fn render_equals(
    schema: &Schema,
    column: usize,
    value: &Value,
    params: &mut Vec<SqlParam>,
) -> String {
    params.push(SqlParam {
        value: value.clone(),
        ty: schema[column].ty,
    });

    format!("{} = ?", schema[column].name)
}

fn render_branch(
    schema: &Schema,
    alternatives: &[ReducedNode],
    params: &mut Vec<SqlParam>,
) -> String {
    let rendered: Vec<String> = alternatives
        .iter()
        .map(|alternative| {
            let pieces = conjunction(schema, alternative, params);
            match pieces.as_slice() {
                [] => UNCONSTRAINED_TOKEN.to_string(),
                [piece] => piece.clone(),
                _ => format!("({})", pieces.join(" AND ")),
            }
        })
        .collect();

    format!("({})", rendered.join(" OR "))
}

///
/// TESTS
///
