//! The product facade: initial state, successor dispatch, and formatting
//! delegation (§4.5).

use log::debug;

use crate::ap_enum::ApEnumerator;
use crate::automaton::{ApCondition, BuchiAutomaton, ProjectionTarget};
use crate::dsog::{self, DivCursor, DsogCursor};
use crate::engine::SymbolicEngine;
use crate::error::ProductError;
use crate::options::{ProductOptions, ProductVariant};
use crate::scc::SccApMap;
use crate::slog::SlogCursor;
use crate::state::ProductState;

/// A lazily-enumerated successor cursor over one product state, dispatching
/// to the appropriate engine by variant.
pub enum SuccessorCursor<'a, B: BuchiAutomaton, E: SymbolicEngine<Cond = B::Cond>> {
    /// SLOG or plain-SOG successors.
    Slog(SlogCursor<'a, B, E>),
    /// DSOG successors of a regular state.
    Dsog(DsogCursor<'a, B, E>),
    /// The single self-loop of a divergence meta-state.
    Div(DivCursor<B, E>),
}

impl<'a, B: BuchiAutomaton, E: SymbolicEngine<Cond = B::Cond>> SuccessorCursor<'a, B, E> {
    /// `true` iff the cursor has no more positions.
    pub fn done(&self) -> bool {
        match self {
            Self::Slog(c) => c.done(),
            Self::Dsog(c) => c.done(),
            Self::Div(c) => c.done(),
        }
    }

    /// The destination state, edge condition, and acceptance set at the
    /// current cursor position.
    pub fn current(&self) -> Option<&(ProductState<B, E>, B::Cond, B::Acceptance)> {
        match self {
            Self::Slog(c) => c.current(),
            Self::Dsog(c) => c.current(),
            Self::Div(c) => c.current(),
        }
    }

    /// Advance the cursor to the next position.
    pub fn advance(&mut self) {
        match self {
            Self::Slog(c) => c.advance(),
            Self::Dsog(c) => c.advance(),
            Self::Div(c) => c.advance(),
        }
    }
}

/// The on-the-fly product of a Büchi automaton and a symbolic engine's
/// reachable state space.
pub struct ProductGraph<'a, B: BuchiAutomaton, E: SymbolicEngine<Cond = B::Cond>> {
    automaton: &'a B,
    engine: &'a E,
    scc_map: SccApMap<B>,
    options: ProductOptions,
}

impl<'a, B: BuchiAutomaton, E: SymbolicEngine<Cond = B::Cond>> ProductGraph<'a, B, E> {
    /// Build a product graph over `automaton` and `engine`, with `num_vars`
    /// atomic-proposition variables in the shared dictionary. The automaton
    /// and engine are borrowed for the graph's lifetime, matching §5's
    /// "holds by borrow, not ownership" resource model.
    pub fn new(automaton: &'a B, engine: &'a E, num_vars: usize, options: ProductOptions) -> Self {
        let scc_map = SccApMap::build(automaton, num_vars);
        Self {
            automaton,
            engine,
            scc_map,
            options,
        }
    }

    /// Construct the initial product state (§4.5).
    ///
    /// Enumerates AP valuations over the SCC-AP set of the automaton's
    /// initial state, returning the first whose selector on the model's
    /// initial aggregate is non-empty. Returns
    /// `Err(ProductError::NoConsistentInitialValuation)` if none matches: an
    /// AP-inconsistent initial state is a composition defect (§7), not a
    /// runtime condition, so callers are expected to treat this as fatal.
    pub fn initial_state(&self) -> Result<ProductState<B, E>, ProductError> {
        let q0 = self.automaton.initial_state();
        let m0 = self.engine.initial_state();
        let vars = self.scc_map.variables_of(&q0);

        if vars.is_empty() {
            debug!("product: constructing initial state with no AP split");
            return self.try_initial_valuation(q0, m0, B::Cond::tt());
        }

        let mut ap_enum: ApEnumerator<B::Cond> = ApEnumerator::new(vars);
        loop {
            let v = ap_enum.current();
            if self.engine.selector_nonempty(&m0, &v) {
                debug!("product: constructing initial state under consistent AP valuation");
                return self.try_initial_valuation(q0, m0, v);
            }
            if ap_enum.done() {
                return Err(ProductError::NoConsistentInitialValuation);
            }
            ap_enum.next();
        }
    }

    fn try_initial_valuation(&self, q0: B::State, m0: E::Aggregate, v: B::Cond) -> Result<ProductState<B, E>, ProductError> {
        match self.options.variant {
            ProductVariant::Dsog => dsog::close_regular_state::<B, E>(self.engine, q0, m0, v),
            ProductVariant::Slog | ProductVariant::PlainSog => {
                if self.engine.is_empty(&m0) {
                    Err(ProductError::NullAggregate)
                } else {
                    Ok(ProductState::regular(q0, m0.clone(), v, false, m0))
                }
            }
        }
    }

    /// The successor cursor of `state`, dispatching on variant and on
    /// whether `state` is `Regular` or `Divergence`.
    pub fn successors<'b>(&'b self, state: &ProductState<B, E>) -> SuccessorCursor<'b, B, E>
    where
        'a: 'b,
    {
        match (self.options.variant, state) {
            (ProductVariant::Dsog, ProductState::Divergence { cond }) => {
                SuccessorCursor::Div(DivCursor::new(cond.clone()))
            }
            (ProductVariant::Dsog, ProductState::Regular { .. }) => {
                SuccessorCursor::Dsog(DsogCursor::new(self.automaton, self.engine, &self.scc_map, state))
            }
            (ProductVariant::Slog | ProductVariant::PlainSog, ProductState::Regular { left, right, .. }) => {
                let weaker = self.options.variant == ProductVariant::Slog && self.options.slog_weaker_selfloop;
                SuccessorCursor::Slog(SlogCursor::new(self.automaton, self.engine, left.clone(), right.clone(), weaker))
            }
            (ProductVariant::Slog | ProductVariant::PlainSog, ProductState::Divergence { .. }) => {
                debug_assert!(false, "{}", ProductError::WrongVariant);
                panic!("{}", ProductError::WrongVariant);
            }
        }
    }

    /// Human-readable rendering of a product state, delegating to the
    /// automaton and tagging divergence states with `" (div)"` (matching
    /// the reference's `format_state`).
    pub fn format_state(&self, state: &ProductState<B, E>) -> String {
        match state {
            ProductState::Regular { left, right, .. } => format!(
                "{} [{} states, hash={:?}]",
                self.automaton.format_state(left),
                self.engine.num_states(right),
                state_hash(state)
            ),
            ProductState::Divergence { .. } => {
                format!("{} (div)", self.automaton.format_state(&self.automaton.initial_state()))
            }
        }
    }

    /// Project `state` onto `target`: identity for `Product`, the left
    /// automaton component for `Automaton`, unsupported (`None`) for
    /// `System`.
    pub fn project_state(&self, state: &ProductState<B, E>, target: ProjectionTarget) -> Option<ProductState<B, E>> {
        match target {
            ProjectionTarget::Product => Some(state.clone()),
            ProjectionTarget::Automaton => match state {
                ProductState::Regular { left, .. } => {
                    self.automaton.project_state(left, ProjectionTarget::Automaton)?;
                    Some(state.clone())
                }
                ProductState::Divergence { .. } => None,
            },
            ProjectionTarget::System => None,
        }
    }

    /// The disjunction of AP conditions observable from `state`, delegating
    /// to the underlying automaton.
    pub fn support_conditions(&self, state: &ProductState<B, E>) -> Option<B::Cond> {
        match state {
            ProductState::Regular { left, .. } => Some(self.automaton.support_conditions(left)),
            ProductState::Divergence { .. } => None,
        }
    }

    /// The BDD variable indices `state` depends on, delegating to the
    /// underlying automaton.
    pub fn support_variables(&self, state: &ProductState<B, E>) -> Vec<u32> {
        match state {
            ProductState::Regular { left, .. } => self.automaton.support_variables(left),
            ProductState::Divergence { .. } => Vec::new(),
        }
    }
}

fn state_hash<B: BuchiAutomaton, E: SymbolicEngine<Cond = B::Cond>>(state: &ProductState<B, E>) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    state.hash(&mut hasher);
    hasher.finish()
}
