//! A minimal in-memory Büchi automaton and symbolic engine, used only by
//! this crate's own test suite to exercise scenarios S1-S6 end to end. The
//! real automaton-translation and decision-diagram libraries are external
//! collaborators out of scope for this crate (see the crate's top-level
//! documentation); this module is not exported outside `#[cfg(test)]`.

#![cfg(test)]

use std::hash::{Hash, Hasher};

use fixedbitset::FixedBitSet;

use crate::automaton::{AcceptanceSet, ApCondition, AutomatonEdge, BuchiAutomaton, ProjectionTarget};
use crate::engine::SymbolicEngine;

/// A set of system-state indices. Wraps `FixedBitSet` (which does not
/// itself implement `Hash`) so the mock aggregate can satisfy
/// `SymbolicEngine::Aggregate`'s `Hash` bound.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MockAggregate(FixedBitSet);

impl Hash for MockAggregate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for i in self.0.ones() {
            i.hash(state);
        }
    }
}

impl PartialOrd for MockAggregate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MockAggregate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.ones().collect::<Vec<_>>().cmp(&other.0.ones().collect::<Vec<_>>())
    }
}

/// Number of variables the truth-table representation below supports
/// (`2^MAX_VARS` valuations fit in a `u16`). Ample for every test scenario
/// in this crate, which never needs more than two atomic propositions.
const MAX_VARS: u32 = 4;
const UNIVERSE: u16 = 0xFFFF;

/// An atomic-proposition condition represented as the exact set of
/// satisfying valuations (a truth table), rather than a cube: this makes
/// `negate` exact, which the reference's `bdd_not` also guarantees and
/// which the SLOG weaker-self-loop disjunction (`disjoin`) relies on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MockCond(u16);

impl ApCondition for MockCond {
    fn and(&self, other: &Self) -> Self {
        MockCond(self.0 & other.0)
    }
    fn negate(&self) -> Self {
        MockCond((!self.0) & UNIVERSE)
    }
    fn implies(&self, other: &Self) -> bool {
        self.and(other) == *self
    }
    fn tt() -> Self {
        MockCond(UNIVERSE)
    }
    fn ff() -> Self {
        MockCond(0)
    }
    fn split_var(&self) -> Option<(u32, Self, Self)> {
        None
    }
    fn literal(var: u32, positive: bool) -> Self {
        debug_assert!(var < MAX_VARS, "MockCond only supports {} variables", MAX_VARS);
        let mut mask = 0u16;
        for i in 0u16..16 {
            let bit_set = (i >> var) & 1 == 1;
            if bit_set == positive {
                mask |= 1 << i;
            }
        }
        MockCond(mask)
    }
}

/// A single-bit acceptance-set mock: `full()` is the one generalized
/// acceptance condition, `empty()` carries none.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MockAcceptance(u8);

impl AcceptanceSet for MockAcceptance {
    fn subsumes(&self, other: &Self) -> bool {
        (self.0 & other.0) == other.0
    }
    fn full() -> Self {
        MockAcceptance(1)
    }
    fn empty() -> Self {
        MockAcceptance(0)
    }
    fn union(&self, other: &Self) -> Self {
        MockAcceptance(self.0 | other.0)
    }
}

type Edge = AutomatonEdge<u32, MockCond, MockAcceptance>;

/// A small explicit-graph Büchi automaton, states numbered from 0.
pub struct MockAutomaton {
    edges: Vec<Vec<Edge>>,
    support_vars: Vec<Vec<u32>>,
}

impl MockAutomaton {
    fn new(edges: Vec<Vec<Edge>>, support_vars: Vec<Vec<u32>>) -> Self {
        Self { edges, support_vars }
    }

    /// S1: two-state live automaton, both edges carry the full acceptance
    /// set, no atomic propositions.
    pub fn two_state_cycle() -> Self {
        let e01 = Edge { cond: MockCond::tt(), acceptance: MockAcceptance::full(), target: 1 };
        let e10 = Edge { cond: MockCond::tt(), acceptance: MockAcceptance::full(), target: 0 };
        Self::new(vec![vec![e01], vec![e10]], vec![vec![0], vec![0]])
    }

    /// A single state with no outgoing edges and no atomic propositions.
    pub fn single_state_no_ap() -> Self {
        Self::new(vec![Vec::new()], vec![Vec::new()])
    }

    /// S5: `q0 --tt/full--> q1`, `q1` self-loops on `p` with empty
    /// acceptance (weaker than `full`).
    pub fn weaker_selfloop_example() -> Self {
        let to_q1 = Edge { cond: MockCond::tt(), acceptance: MockAcceptance::full(), target: 1 };
        let self_loop = Edge { cond: MockCond::literal(0, true), acceptance: MockAcceptance::empty(), target: 1 };
        Self::new(vec![vec![to_q1], vec![self_loop]], vec![vec![0], vec![0]])
    }

    /// S2: one state, self-loop labelled `p` with empty acceptance (no
    /// divergence self-loop acceptance qualifies).
    pub fn divergence_no_acceptance() -> Self {
        let self_loop = Edge { cond: MockCond::literal(0, true), acceptance: MockAcceptance::empty(), target: 0 };
        Self::new(vec![vec![self_loop]], vec![Vec::new()])
    }

    /// S3: one state, self-loop carries the full acceptance set.
    pub fn divergence_with_full_acceptance() -> Self {
        let self_loop = Edge { cond: MockCond::tt(), acceptance: MockAcceptance::full(), target: 0 };
        Self::new(vec![vec![self_loop]], vec![Vec::new()])
    }
}

impl BuchiAutomaton for MockAutomaton {
    type State = u32;
    type Acceptance = MockAcceptance;
    type Cond = MockCond;
    type SuccIter = std::vec::IntoIter<Edge>;

    fn initial_state(&self) -> Self::State {
        0
    }

    fn successors(&self, state: &Self::State) -> Self::SuccIter {
        self.edges[*state as usize].clone().into_iter()
    }

    fn all_acceptance_conditions(&self) -> Self::Acceptance {
        MockAcceptance::full()
    }

    fn format_state(&self, state: &Self::State) -> String {
        format!("q{}", state)
    }

    fn project_state(&self, state: &Self::State, target: ProjectionTarget) -> Option<Self::State> {
        match target {
            ProjectionTarget::Product | ProjectionTarget::Automaton => Some(*state),
            ProjectionTarget::System => None,
        }
    }

    fn support_conditions(&self, state: &Self::State) -> Self::Cond {
        self.edges[*state as usize]
            .iter()
            .fold(MockCond::ff(), |acc, e| MockCond(acc.0 | e.cond.0))
    }

    fn support_variables(&self, state: &Self::State) -> Vec<u32> {
        self.support_vars[*state as usize].clone()
    }
}

/// A small explicit-graph symbolic engine: system states are plain indices,
/// aggregates are bitsets over them.
pub struct MockEngine {
    num_states: usize,
    initial: FixedBitSet,
    edges: Vec<(usize, usize)>,
    state_label: Vec<MockCond>,
    divergent_states: FixedBitSet,
}

impl MockEngine {
    /// Single state with a self-loop, initial aggregate `{0}`.
    pub fn single_self_loop_state() -> Self {
        let mut initial = FixedBitSet::with_capacity(1);
        initial.insert(0);
        Self {
            num_states: 1,
            initial,
            edges: vec![(0, 0)],
            state_label: vec![MockCond::tt()],
            divergent_states: FixedBitSet::with_capacity(1),
        }
    }

    /// A system whose initial aggregate is empty, for exercising
    /// empty-successor and no-consistent-valuation paths.
    pub fn empty_state() -> Self {
        Self {
            num_states: 1,
            initial: FixedBitSet::with_capacity(1),
            edges: Vec::new(),
            state_label: vec![MockCond::tt()],
            divergent_states: FixedBitSet::with_capacity(1),
        }
    }

    /// A 0 -> 1 -> 2 chain, with states 1 and 2 labelled by the positive
    /// literal of variable 0 (`p`), for exercising SLOG saturation.
    pub fn chain_state() -> Self {
        let mut initial = FixedBitSet::with_capacity(3);
        initial.insert(0);
        Self {
            num_states: 3,
            initial,
            edges: vec![(0, 1), (1, 2)],
            state_label: vec![MockCond::tt(), MockCond::literal(0, true), MockCond::literal(0, true)],
            divergent_states: FixedBitSet::with_capacity(3),
        }
    }

    /// Single state with a self-loop, flagged as an internal divergence.
    pub fn divergent_state() -> Self {
        let mut initial = FixedBitSet::with_capacity(1);
        initial.insert(0);
        let mut divergent_states = FixedBitSet::with_capacity(1);
        divergent_states.insert(0);
        Self {
            num_states: 1,
            initial,
            edges: vec![(0, 0)],
            state_label: vec![MockCond::tt()],
            divergent_states,
        }
    }

    /// Like [`Self::divergent_state`], but state 0 (labelled `p`, divergent)
    /// also has an edge to a non-divergent state 1 labelled `!p`, so
    /// `succ_satisfying` under `!p` is non-empty.
    pub fn divergent_state_with_escape() -> Self {
        let mut initial = FixedBitSet::with_capacity(2);
        initial.insert(0);
        let mut divergent_states = FixedBitSet::with_capacity(2);
        divergent_states.insert(0);
        Self {
            num_states: 2,
            initial,
            edges: vec![(0, 0), (0, 1)],
            state_label: vec![MockCond::literal(0, true), MockCond::literal(0, false)],
            divergent_states,
        }
    }

    fn saturate_forward(&self, entry: &MockAggregate, cond: &MockCond) -> MockAggregate {
        let mut current = entry.0.clone();
        loop {
            let MockAggregate(next) = self.succ_satisfying(&MockAggregate(current.clone()), cond);
            let before = current.count_ones(..);
            current.union_with(&next);
            if current.count_ones(..) == before {
                return MockAggregate(current);
            }
        }
    }
}

impl SymbolicEngine for MockEngine {
    type Cond = MockCond;
    type Aggregate = MockAggregate;

    fn initial_state(&self) -> Self::Aggregate {
        MockAggregate(self.initial.clone())
    }

    fn is_empty(&self, aggregate: &Self::Aggregate) -> bool {
        aggregate.0.count_ones(..) == 0
    }

    fn empty(&self) -> Self::Aggregate {
        MockAggregate(FixedBitSet::with_capacity(self.num_states))
    }

    fn num_states(&self, aggregate: &Self::Aggregate) -> u64 {
        aggregate.0.count_ones(..) as u64
    }

    fn selector_nonempty(&self, aggregate: &Self::Aggregate, cond: &Self::Cond) -> bool {
        aggregate.0.ones().any(|s| self.state_label[s].implies(cond))
    }

    fn next_rel_successors(&self, aggregate: &Self::Aggregate) -> Self::Aggregate {
        let mut out = FixedBitSet::with_capacity(self.num_states);
        for &(from, to) in &self.edges {
            if aggregate.0.contains(from) {
                out.insert(to);
            }
        }
        MockAggregate(out)
    }

    fn succ_satisfying(&self, aggregate: &Self::Aggregate, cond: &Self::Cond) -> Self::Aggregate {
        let mut out = FixedBitSet::with_capacity(self.num_states);
        for &(from, to) in &self.edges {
            if aggregate.0.contains(from) && self.state_label[to].implies(cond) {
                out.insert(to);
            }
        }
        MockAggregate(out)
    }

    fn least_pre_test_fixpoint(&self, entry: &Self::Aggregate, cond: &Self::Cond) -> Self::Aggregate {
        self.saturate_forward(entry, cond)
    }

    fn least_post_test_fixpoint(&self, entry: &Self::Aggregate, cond: &Self::Cond) -> Self::Aggregate {
        self.saturate_forward(entry, cond)
    }

    fn get_divergent(&self, aggregate: &Self::Aggregate, _cond: &Self::Cond) -> Self::Aggregate {
        let mut out = aggregate.0.clone();
        out.intersect_with(&self.divergent_states);
        MockAggregate(out)
    }
}
