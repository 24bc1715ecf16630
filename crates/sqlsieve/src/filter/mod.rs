//! Constraint-set compilation: normalization, reduction, and SQL emission.
//!
//! Pipeline, data flowing strictly downstream:
//! normalize (either input representation → canonical rows) → dedup →
//! subsumption → grouping/merge (optionally pivot-optimized) → emit.
//!
//! Every stage is a pure function over immutable input; nothing is cached
//! or shared between compilations, so concurrent calls need no coordination.

mod builder;
mod compile;
mod emit;
mod eval;
pub mod explain;
mod normalize;
mod pivot;
mod reduce;
mod row;
mod trie;

#[cfg(test)]
mod tests;

// re-exports
pub use builder::ConstraintSetBuilder;
pub use compile::{CompileOptions, compile, reduce_set};
pub use emit::{SqlFilter, SqlParam};
pub use eval::{Row, matches};
pub use reduce::ReducedNode;
pub use row::{ConstraintRow, ConstraintSet};
pub use trie::{TrieKey, TrieNode};
