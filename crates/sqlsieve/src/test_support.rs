//! Crate-private test scaffolding: record fixtures, constraint-set helpers,
//! and a minimal interpreter for emitted fragments so tests can check the
//! SQL surface against reference evaluation without a database.

use crate::{
    filter::{ConstraintSet, Row, SqlFilter, SqlParam},
    schema::{ColumnDef, ColumnType, Schema},
    value::Value,
};
use std::collections::BTreeMap;

///
/// TestRow
///

pub(crate) struct TestRow {
    columns: BTreeMap<String, Value>,
}

impl TestRow {
    pub(crate) fn new<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<Value>,
    {
        Self {
            columns: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl Row for TestRow {
    fn column(&self, name: &str) -> Option<Value> {
        self.columns.get(name).cloned()
    }
}

/// Text-typed schema named C1..Cn.
pub(crate) fn text_schema(width: usize) -> Schema {
    Schema::new(
        (1..=width)
            .map(|i| ColumnDef::new(format!("C{i}"), ColumnType::Text))
            .collect(),
    )
    .expect("schema should build")
}

/// Constraint set from text bindings.
pub(crate) fn text_set(schema: &Schema, rows: &[&[(&str, &str)]]) -> ConstraintSet {
    ConstraintSet::from_rows(
        schema,
        rows.iter().map(|pairs| {
            pairs
                .iter()
                .map(|(name, value)| (*name, Value::from(*value)))
                .collect::<Vec<_>>()
        }),
    )
    .expect("rows should resolve")
}

///
/// FragmentPredicate
///
/// Parsed form of an emitted fragment with its parameters bound
/// positionally. Parsing asserts the fragment's grammar and that every
/// parameter is consumed exactly once, in placeholder order.
///

pub(crate) struct FragmentPredicate {
    pred: Pred,
}

#[derive(Debug)]
enum Pred {
    True,
    Equals { column: String, value: Value },
    InSet { column: String, values: Vec<Value> },
    All(Vec<Pred>),
    Any(Vec<Pred>),
}

impl FragmentPredicate {
    pub(crate) fn parse(filter: &SqlFilter) -> Self {
        let text = filter
            .fragment
            .strip_prefix(" AND ")
            .expect("fragment must compose with ' AND '");

        let mut parser = Parser {
            text,
            pos: 0,
            params: &filter.params,
            used: 0,
        };
        let pred = parser.disjunction();
        parser.skip_ws();

        assert!(
            parser.pos == parser.text.len(),
            "trailing input in fragment: {text:?}"
        );
        assert_eq!(
            parser.used,
            filter.params.len(),
            "placeholder count must match parameter count"
        );

        Self { pred }
    }

    pub(crate) fn accepts<R: Row + ?Sized>(&self, record: &R) -> bool {
        eval(&self.pred, record)
    }
}

fn eval<R: Row + ?Sized>(pred: &Pred, record: &R) -> bool {
    match pred {
        Pred::True => true,
        Pred::Equals { column, value } => record.column(column).as_ref() == Some(value),
        Pred::InSet { column, values } => record
            .column(column)
            .is_some_and(|actual| values.contains(&actual)),
        Pred::All(terms) => terms.iter().all(|term| eval(term, record)),
        Pred::Any(alternatives) => alternatives.iter().any(|alt| eval(alt, record)),
    }
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
    params: &'a [SqlParam],
    used: usize,
}

impl Parser<'_> {
    fn disjunction(&mut self) -> Pred {
        let mut alternatives = vec![self.conjunction()];
        while self.eat_word("OR") {
            alternatives.push(self.conjunction());
        }

        match alternatives.len() {
            1 => alternatives.swap_remove(0),
            _ => Pred::Any(alternatives),
        }
    }

    fn conjunction(&mut self) -> Pred {
        let mut terms = vec![self.atom()];
        while self.eat_word("AND") {
            terms.push(self.atom());
        }

        match terms.len() {
            1 => terms.swap_remove(0),
            _ => Pred::All(terms),
        }
    }

    fn atom(&mut self) -> Pred {
        self.skip_ws();

        if self.eat_str("(") {
            let inner = self.disjunction();
            self.skip_ws();
            assert!(self.eat_str(")"), "expected ')' at {}", self.pos);
            return inner;
        }

        let word = self.word();
        if word == "TRUE" {
            return Pred::True;
        }

        self.skip_ws();
        if self.eat_str("=") {
            self.skip_ws();
            assert!(self.eat_str("?"), "expected placeholder after '='");
            Pred::Equals {
                column: word,
                value: self.take_param(),
            }
        } else {
            assert!(
                self.eat_str("IN("),
                "expected '=' or 'IN(' after column {word:?}"
            );
            let mut values = Vec::new();
            loop {
                assert!(self.eat_str("?"), "expected placeholder in IN list");
                values.push(self.take_param());
                if self.eat_str(",") {
                    continue;
                }
                assert!(self.eat_str(")"), "expected ')' closing IN list");
                break;
            }
            Pred::InSet {
                column: word,
                values,
            }
        }
    }

    fn take_param(&mut self) -> Value {
        let param = self
            .params
            .get(self.used)
            .expect("fragment has more placeholders than parameters");
        self.used += 1;
        param.value.clone()
    }

    fn word(&mut self) -> String {
        self.skip_ws();
        let start = self.pos;
        while self
            .rest()
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        assert!(self.pos > start, "expected identifier at {}", start);

        self.text[start..self.pos].to_string()
    }

    // Consume `word` only at an identifier boundary.
    fn eat_word(&mut self, word: &str) -> bool {
        let checkpoint = self.pos;
        self.skip_ws();

        if self.rest().starts_with(word) {
            let after = self.rest()[word.len()..].chars().next();
            if !after.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                self.pos += word.len();
                return true;
            }
        }

        self.pos = checkpoint;
        false
    }

    fn eat_str(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.rest().starts_with(' ') {
            self.pos += 1;
        }
    }

    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }
}
