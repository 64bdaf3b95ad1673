//! # skewset
//!
//! Adaptive set algebra for sorted integer-keyed sets whose sizes may differ
//! by orders of magnitude.
//!
//! A plain two-pointer merge costs O(n + m) no matter how lopsided the inputs
//! are. When one operand is tiny and cheap to iterate, probing the big one
//! with each of its keys costs O(small × log big) instead. [`algebra::SetAlgebra`]
//! chooses between the two per call, from cardinalities and representations
//! alone, and returns the same result either way.
//!
//! ## Modules
//!
//! - [`set`]: the ordered set contract and its representations
//!   ([`set::FlatSet`], [`set::TreeSet`], [`set::ScoreMap`]).
//! - [`algebra`]: the adaptive engine, its tuning policy and the sorted-merge
//!   baseline.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for the policy and set kinds
//! - `config` (default): load the policy from `skewset.toml` and `SKEWSET_*`
//!   environment variables
//!
//! ## Example
//!
//! ```rust
//! use skewset::prelude::*;
//!
//! let algebra = SetAlgebra::new();
//! let tags: FlatSet<i64> = [1, 2, 3].into_iter().collect();
//! let catalog: TreeSet<i64> = (2..=10_000).collect();
//!
//! let hits = algebra
//!     .intersection(Some(Operand::from(&tags)), Some(Operand::from(&catalog)))
//!     .unwrap();
//! assert_eq!(hits.to_sorted_vec(), vec![2, 3]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use skewset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algebra::{AlgebraPolicy, MergeAlgebra, PolicyError, SetAlgebra, SortedMerge};
    pub use crate::set::{
        Collection, FlatSet, Operand, OrderedSet, ScoreMap, SetKind, TreeSet, Weight,
    };
}

pub mod algebra;
pub mod set;
