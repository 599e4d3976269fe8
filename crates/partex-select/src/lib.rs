//! Partition-aware structural services for Partex.
//!
//! Built on the token stream of `partex-partition`, this crate provides the
//! pieces an editor composes for structural navigation and selection:
//!
//! - [`HeuristicScanner`]: search bounds clipped to the enclosing partition
//!   (unbounded inside plain markup) and common-word lookup;
//! - [`PairMatcher`]: matching brackets for `{}`, `()`, `[]`, honoring the
//!   `\` escape and partition boundaries;
//! - [`SelectionResolver`]: the double-click decision order (bracket
//!   interior, math or verbatim delimiter interior, or a word).
//!
//! All services operate on an immutable text snapshot plus a
//! [`PartitionMap`](partex_partition::PartitionMap); a structural search
//! never crosses out of a math, verbatim, or comment region into the
//! surrounding markup or vice versa.

pub mod double_click;
pub mod heuristic;
pub mod pair;

pub use double_click::SelectionResolver;
pub use heuristic::{HeuristicScanner, PartitionConstraint};
pub use pair::PairMatcher;
