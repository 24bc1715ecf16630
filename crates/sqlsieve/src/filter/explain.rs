//! Deterministic, read-only rendering of reduced trees; must not compile
//! or execute anything.

use crate::{filter::reduce::ReducedNode, schema::Schema};
use std::fmt::Write;

/// Render a reduced tree as stable, indented text for observability
/// surfaces and diff-based tests.
///
/// Conjunction steps share an indent level. `any` opens a disjunction with
/// one block per alternative; a multi-test alternative sits under its own
/// `all` header so block boundaries stay unambiguous. A tree that places no
/// constraint renders as `true`.
#[must_use]
pub fn render(schema: &Schema, node: &ReducedNode) -> String {
    let mut out = String::new();
    write_node(schema, node, 0, &mut out);

    if out.is_empty() {
        out.push_str("true\n");
    }

    out
}

fn write_node(schema: &Schema, node: &ReducedNode, indent: usize, out: &mut String) {
    match node {
        ReducedNode::Leaf => {}
        ReducedNode::Equals {
            column,
            value,
            child,
        } => {
            write_line(out, indent, &format!("{} = {value}", schema[*column].name));
            write_node(schema, child, indent, out);
        }
        ReducedNode::InSet {
            column,
            values,
            child,
        } => {
            let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
            write_line(
                out,
                indent,
                &format!("{} in ({})", schema[*column].name, rendered.join(", ")),
            );
            write_node(schema, child, indent, out);
        }
        ReducedNode::Branch(alternatives) => {
            write_line(out, indent, "any");
            for alternative in alternatives {
                if single_test(alternative) {
                    write_node(schema, alternative, indent + 1, out);
                } else {
                    write_line(out, indent + 1, "all");
                    write_node(schema, alternative, indent + 2, out);
                }
            }
        }
    }
}

// One rendered line exactly: a column test with no continuation.
fn single_test(node: &ReducedNode) -> bool {
    match node {
        ReducedNode::Equals { child, .. } | ReducedNode::InSet { child, .. } => {
            matches!(**child, ReducedNode::Leaf)
        }
        _ => false,
    }
}

fn write_line(out: &mut String, indent: usize, text: &str) {
    // Infallible for String; the trait signature still returns a Result.
    let _ = writeln!(out, "{:indent$}{text}", "", indent = indent * 2);
}

///
/// TESTS
///
