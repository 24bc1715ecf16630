use crate::{
    error::{FilterError, SchemaMismatch},
    schema::Schema,
    value::Value,
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// ConstraintRow
///
/// One conjunctive partial assignment of column → literal. Slots align
/// positionally with the schema; `None` is a wildcard and places no
/// restriction. A row with zero bound slots matches every record.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRow {
    slots: Vec<Option<Value>>,
}

impl ConstraintRow {
    /// Build a row from (column, value) pairs resolved against the schema.
    ///
    /// Unknown columns and double-bound columns are schema mismatches; an
    /// empty pair list is a valid (universal) row, handled at reduction.
    pub fn from_pairs<I, N>(schema: &Schema, pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (N, Value)>,
        N: AsRef<str>,
    {
        let mut slots = vec![None; schema.len()];

        for (name, value) in pairs {
            let name = name.as_ref();
            let Some(position) = schema.position(name) else {
                return Err(SchemaMismatch::UnknownColumn {
                    column: name.to_string(),
                }
                .into());
            };
            if slots[position].is_some() {
                return Err(SchemaMismatch::DuplicateBinding {
                    column: name.to_string(),
                }
                .into());
            }
            slots[position] = Some(value);
        }

        Ok(Self { slots })
    }

    pub(crate) fn from_slots(slots: Vec<Option<Value>>) -> Self {
        Self { slots }
    }

    /// Bound value at a schema position, or `None` for a wildcard.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.slots.get(position).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// A row binding nothing matches everything.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub(crate) fn width(&self) -> usize {
        self.slots.len()
    }

    /// Whether this row absorbs `other`: every binding here appears in
    /// `other` with the same value, and the rows differ. The absorbed row's
    /// match region is wholly contained in this row's.
    pub(crate) fn subsumes(&self, other: &Self) -> bool {
        if self == other {
            return false;
        }

        self.slots
            .iter()
            .zip(&other.slots)
            .all(|(mine, theirs)| match mine {
                Some(value) => theirs.as_ref() == Some(value),
                None => true,
            })
    }
}

///
/// ConstraintSet
///
/// Ordered disjunction of constraint rows: OR across rows, AND across each
/// row's bound columns. Order and duplicates carry no logical meaning; they
/// only pin tie-breaking and emitted clause order.
///

#[derive(
    Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize, Deserialize,
)]
pub struct ConstraintSet {
    rows: Vec<ConstraintRow>,
}

impl ConstraintSet {
    /// Normalize the sparse-list representation: one partial map per row.
    pub fn from_rows<I, R, N>(schema: &Schema, rows: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (N, Value)>,
        N: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|pairs| ConstraintRow::from_pairs(schema, pairs))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rows })
    }

    pub(crate) const fn from_normalized(rows: Vec<ConstraintRow>) -> Self {
        Self { rows }
    }
}

///
/// TESTS
///
