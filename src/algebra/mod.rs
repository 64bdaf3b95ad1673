//! Adaptive intersection, difference and weighted intersection.
//!
//! A [`SetAlgebra`] picks, per call, between two ways of answering:
//!
//! - **Probe**: when one operand is a flat set with fewer keys than
//!   [`AlgebraPolicy::small_set_threshold`] and the other is not flat, walk
//!   the small one and test each key against the big one. For difference the
//!   big side must also outnumber the small side by more than
//!   [`AlgebraPolicy::big_small_ratio`].
//! - **Merge**: otherwise, delegate to the configured [`MergeAlgebra`]
//!   baseline ([`SortedMerge`] by default).
//!
//! Both paths produce the same result. The `plan_*` functions expose the
//! decision without executing it.
//!
//! # Examples
//!
//! ```rust
//! use skewset::algebra::{plan_difference, AlgebraPolicy, SetAlgebra, Side, Strategy};
//! use skewset::set::{FlatSet, Operand, TreeSet};
//!
//! let small: FlatSet<i64> = (1..=50).collect();
//! let big: TreeSet<i64> = (1..=100_000).collect();
//!
//! let plan = plan_difference(
//!     &AlgebraPolicy::default(),
//!     Some(Operand::from(&small)),
//!     Some(Operand::from(&big)),
//! );
//! assert_eq!(plan, Strategy::Probe(Side::Left));
//!
//! let algebra = SetAlgebra::new();
//! let result = algebra
//!     .difference(Some(Operand::from(&small)), Some(Operand::from(&big)))
//!     .unwrap();
//! assert!(result.is_empty());
//! ```

mod engine;
mod merge;
mod policy;
mod probe;

pub use engine::{
    SetAlgebra, Side, Strategy, plan_difference, plan_intersection, plan_weighted_intersection,
};
pub use merge::{MergeAlgebra, SortedMerge};
pub use policy::{
    AlgebraPolicy, DEFAULT_BIG_SMALL_RATIO, DEFAULT_SMALL_SET_THRESHOLD, MAX_SMALL_SET_THRESHOLD,
    PolicyError,
};
