//! Product state identity: hash, total order, and clone for both the
//! regular and divergence flavors.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::automaton::{ApCondition, BuchiAutomaton};
use crate::engine::SymbolicEngine;

/// Wang's integer hash, used to mix the automaton-state hash with the
/// aggregate hash the same way the reference implementation does
/// (`wang32_hash(left.hash()) ^ right.hash()`).
fn wang_hash(mut key: u64) -> u64 {
    key = (!key).wrapping_add(key << 21);
    key ^= key >> 24;
    key = key.wrapping_add(key << 3).wrapping_add(key << 8);
    key ^= key >> 14;
    key = key.wrapping_add(key << 2).wrapping_add(key << 4);
    key ^= key >> 28;
    key = key.wrapping_add(key << 31);
    key
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// One node of the on-the-fly product graph.
///
/// `Divergence` only ever appears when the product is built with the DSOG
/// engine; the SLOG engine constructs only `Regular` states with `div` fixed
/// to `false` and `succ` equal to `right`.
#[derive(Debug, Clone)]
pub enum ProductState<B: BuchiAutomaton, E: SymbolicEngine> {
    /// A pairing of an automaton state with a decision-diagram aggregate.
    Regular {
        /// The automaton-side component.
        left: B::State,
        /// The aggregate of system states reached at this product node.
        right: E::Aggregate,
        /// The AP valuation this node was reached under.
        cond: E::Cond,
        /// `true` iff `right` contains an internal silent divergence under
        /// `cond` (always `false` outside DSOG).
        div: bool,
        /// Precomputed one-step observable successor aggregate (DSOG only;
        /// equal to `right` under SLOG, where it is unused).
        succ: E::Aggregate,
    },
    /// The distinguished divergence meta-state, labelled by the AP
    /// condition under which the divergence was detected (DSOG only).
    Divergence {
        /// The AP condition labelling this divergence.
        cond: E::Cond,
    },
}

impl<B: BuchiAutomaton, E: SymbolicEngine> ProductState<B, E> {
    /// Construct a regular product state. Panics (via `debug_assert`) if
    /// `right` is the empty aggregate: regular states are never null on the
    /// right side (§3 invariant).
    pub fn regular(left: B::State, right: E::Aggregate, cond: E::Cond, div: bool, succ: E::Aggregate) -> Self {
        Self::Regular {
            left,
            right,
            cond,
            div,
            succ,
        }
    }

    /// Construct a divergence meta-state.
    pub fn divergence(cond: E::Cond) -> Self {
        Self::Divergence { cond }
    }

    /// `true` iff this is the divergence meta-state.
    pub fn is_divergence(&self) -> bool {
        matches!(self, Self::Divergence { .. })
    }

    /// Returns the `(left, right)` pair of a `Regular` state, or `None` for
    /// `Divergence`.
    pub fn as_regular(&self) -> Option<(&B::State, &E::Aggregate)> {
        match self {
            Self::Regular { left, right, .. } => Some((left, right)),
            Self::Divergence { .. } => None,
        }
    }
}

impl<B, E> PartialEq for ProductState<B, E>
where
    B: BuchiAutomaton,
    E: SymbolicEngine,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Regular { left: l1, right: r1, .. },
                Self::Regular { left: l2, right: r2, .. },
            ) => l1 == l2 && r1 == r2,
            (Self::Divergence { cond: c1 }, Self::Divergence { cond: c2 }) => c1 == c2,
            _ => false,
        }
    }
}

impl<B, E> Eq for ProductState<B, E>
where
    B: BuchiAutomaton,
    E: SymbolicEngine,
{
}

impl<B, E> Hash for ProductState<B, E>
where
    B: BuchiAutomaton,
    E: SymbolicEngine,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Regular { left, right, .. } => {
                let mixed = wang_hash(hash_of(left)) ^ hash_of(right);
                mixed.hash(state);
            }
            Self::Divergence { cond } => {
                hash_of(cond).hash(state);
            }
        }
    }
}

/// Divergence states sort strictly below all regular states; within a
/// variant, ties break on automaton state then aggregate (regular) or
/// condition (divergence). This fixes the convention resolved from the
/// reference's `dsog_div_state::compare`/`dsog_state::compare` (see
/// DESIGN.md).
impl<B, E> PartialOrd for ProductState<B, E>
where
    B: BuchiAutomaton,
    E: SymbolicEngine,
    E::Aggregate: Ord,
    E::Cond: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<B, E> Ord for ProductState<B, E>
where
    B: BuchiAutomaton,
    E: SymbolicEngine,
    E::Aggregate: Ord,
    E::Cond: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Divergence { .. }, Self::Regular { .. }) => Ordering::Less,
            (Self::Regular { .. }, Self::Divergence { .. }) => Ordering::Greater,
            (Self::Divergence { cond: c1 }, Self::Divergence { cond: c2 }) => c1.cmp(c2),
            (
                Self::Regular { left: l1, right: r1, .. },
                Self::Regular { left: l2, right: r2, .. },
            ) => l1.cmp(l2).then_with(|| r1.cmp(r2)),
        }
    }
}
