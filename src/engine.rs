//! External-interface contract for the symbolic (decision-diagram) engine.
//!
//! The decision-diagram library backing the aggregate representation is out
//! of scope for this crate (see the top-level crate documentation): this
//! module only describes the operations the product construction needs from
//! it, mirroring the capability shape of the teacher crate's `Cudd`/`Bdd`
//! wrapper without depending on CUDD or any other concrete BDD crate.

use std::fmt::Debug;
use std::hash::Hash;

use crate::automaton::ApCondition;

/// The capability set required of the symbolic engine backing the system's
/// reachable state space. An `Aggregate` is a value-typed, cheaply-clonable
/// handle (reference-counted inside the engine) denoting a set of concrete
/// system states; a distinguished empty aggregate represents "no states".
pub trait SymbolicEngine {
    /// The atomic-proposition condition type shared with the automaton.
    type Cond: ApCondition;
    /// A decision-diagram handle denoting a set of system states.
    type Aggregate: Clone + Eq + Hash + Debug;

    /// The system's initial aggregate. Never empty.
    fn initial_state(&self) -> Self::Aggregate;
    /// `true` iff `aggregate` denotes the empty set of states.
    fn is_empty(&self, aggregate: &Self::Aggregate) -> bool;
    /// The empty aggregate.
    fn empty(&self) -> Self::Aggregate;
    /// Number of concrete states denoted by `aggregate` (for diagnostics).
    fn num_states(&self, aggregate: &Self::Aggregate) -> u64;
    /// `true` iff some concrete state in `aggregate` has a valuation
    /// satisfying `cond` (the engine's AP selector applied to `aggregate`
    /// is non-empty).
    fn selector_nonempty(&self, aggregate: &Self::Aggregate, cond: &Self::Cond) -> bool;
    /// One-step successors of `aggregate` under the full transition
    /// relation (`getNextRel`).
    fn next_rel_successors(&self, aggregate: &Self::Aggregate) -> Self::Aggregate;
    /// One-step successors of `aggregate` whose resulting valuation
    /// satisfies `cond`.
    fn succ_satisfying(&self, aggregate: &Self::Aggregate, cond: &Self::Cond) -> Self::Aggregate;
    /// Backward saturation: repeatedly apply any transition whose AP
    /// valuation satisfies `cond`, starting from `entry`, until no new
    /// states are added. Used by the SLOG engine.
    fn least_pre_test_fixpoint(&self, entry: &Self::Aggregate, cond: &Self::Cond) -> Self::Aggregate;
    /// Forward saturation: repeatedly apply any transition whose AP
    /// valuation satisfies `cond`, starting from `entry`, until no new
    /// states are added. Used by the DSOG engine.
    fn least_post_test_fixpoint(&self, entry: &Self::Aggregate, cond: &Self::Cond) -> Self::Aggregate;
    /// The subset of `aggregate` lying on an infinite silent cycle under
    /// `cond` (empty if `aggregate` contains no such divergence).
    fn get_divergent(&self, aggregate: &Self::Aggregate, cond: &Self::Cond) -> Self::Aggregate;
}
