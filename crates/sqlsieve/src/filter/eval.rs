use crate::{filter::row::ConstraintSet, schema::Schema, value::Value};
use std::collections::BTreeMap;

///
/// Row
///
/// Abstraction over a record-like value that exposes columns by name. This
/// decouples reference evaluation from any concrete record type.
///

pub trait Row {
    fn column(&self, name: &str) -> Option<Value>;
}

impl Row for BTreeMap<String, Value> {
    fn column(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Evaluate a constraint set directly against a record: OR across rows, AND
/// across each row's bound columns, strict literal equality.
///
/// This is **pure reference evaluation** — no reduction, no planning — and
/// is the semantic oracle the compiled SQL must agree with. A record
/// missing a bound column never matches that row; an empty set (or a row
/// binding nothing) matches every record.
#[must_use]
pub fn matches<R: Row + ?Sized>(schema: &Schema, set: &ConstraintSet, record: &R) -> bool {
    if set.is_empty() {
        return true;
    }

    set.iter().any(|row| {
        (0..schema.len()).all(|position| match row.get(position) {
            Some(expected) => record.column(&schema[position].name).as_ref() == Some(expected),
            None => true,
        })
    })
}


///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnDef, ColumnType};

    fn schema() -> Schema {
        Schema::new(vec![
            ColumnDef::new("C1", ColumnType::Text),
            ColumnDef::new("C2", ColumnType::Text),
        ])
        .expect("schema should build")
    }

    fn record(pairs: &[(&str, &str)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), Value::from(*value)))
            .collect()
    }

    fn set(rows: &[&[(&str, &str)]]) -> ConstraintSet {
        ConstraintSet::from_rows(
            &schema(),
            rows.iter().map(|pairs| {
                pairs
                    .iter()
                    .map(|(name, value)| (*name, Value::from(*value)))
                    .collect::<Vec<_>>()
            }),
        )
        .expect("rows should resolve")
    }

    #[test]
    fn any_row_matching_accepts_the_record() {
        let filter = set(&[&[("C1", "A")], &[("C2", "X")]]);

        assert!(matches(&schema(), &filter, &record(&[("C2", "X")])));
        assert!(matches(&schema(), &filter, &record(&[("C1", "A")])));
        assert!(!matches(&schema(), &filter, &record(&[("C1", "B")])));
    }

    #[test]
    fn all_bindings_in_a_row_must_match() {
        let filter = set(&[&[("C1", "A"), ("C2", "X")]]);

        assert!(matches(
            &schema(),
            &filter,
            &record(&[("C1", "A"), ("C2", "X")])
        ));
        assert!(!matches(&schema(), &filter, &record(&[("C1", "A")])));
    }

    #[test]
    fn missing_columns_never_satisfy_a_binding() {
        let filter = set(&[&[("C1", "A")]]);

        assert!(!matches(&schema(), &filter, &record(&[])));
    }

    #[test]
    fn empty_set_matches_everything() {
        assert!(matches(
            &schema(),
            &ConstraintSet::default(),
            &record(&[("C1", "Q")])
        ));
    }
}
