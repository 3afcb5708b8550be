//! The DSOG successor engine: divergence detection, a distinguished
//! divergence meta-state, and per-SCC AP splitting.
//!
//! Grounded directly on `dsog_state`/`dsog_succ_iterator`/
//! `dsog_div_succ_iterator` in the reference C++ implementation
//! (`dsog.cpp`).

use log::trace;

use crate::ap_enum::ApEnumerator;
use crate::automaton::{AcceptanceSet, ApCondition, BuchiAutomaton};
use crate::engine::SymbolicEngine;
use crate::error::ProductError;
use crate::scc::SccApMap;
use crate::state::ProductState;

/// Construct the precomputed fields of a regular DSOG product state from
/// `(left, right_in, cond)` (§4.4.1). Returns `Err(ProductError::NullAggregate)`
/// if the closed aggregate is empty: regular states are never emitted with
/// an empty right-hand side.
pub fn close_regular_state<B, E>(
    engine: &E,
    left: B::State,
    right_in: E::Aggregate,
    cond: B::Cond,
) -> Result<ProductState<B, E>, ProductError>
where
    B: BuchiAutomaton,
    E: SymbolicEngine<Cond = B::Cond>,
{
    let right = engine.least_post_test_fixpoint(&right_in, &cond);
    if engine.is_empty(&right) {
        return Err(ProductError::NullAggregate);
    }
    let divergent = engine.get_divergent(&right, &cond);
    let div = !engine.is_empty(&divergent);
    let succ = engine.succ_satisfying(&right, &cond.negate());
    trace!("dsog: closed regular state, div={}", div);
    Ok(ProductState::regular(left, right, cond, div, succ))
}

/// A single-pass, lazy cursor over the DSOG successors of one regular
/// product state.
pub struct DsogCursor<'a, B: BuchiAutomaton, E: SymbolicEngine<Cond = B::Cond>> {
    automaton: &'a B,
    engine: &'a E,
    scc_map: &'a SccApMap<B>,
    left: B::State,
    model_succ: E::Aggregate,
    cond: B::Cond,
    div_pending: bool,
    left_iter: B::SuccIter,
    ap_enum: Option<ApEnumerator<B::Cond>>,
    current_edge: Option<(B::State, B::Cond, B::Acceptance)>,
    current: Option<(ProductState<B, E>, B::Cond, B::Acceptance)>,
}

impl<'a, B: BuchiAutomaton, E: SymbolicEngine<Cond = B::Cond>> DsogCursor<'a, B, E> {
    /// Start a cursor at `state`, which must be a `Regular` product state.
    /// Panics if `state` is a `Divergence` state (use
    /// [`DivCursor`] for that).
    pub fn new(
        automaton: &'a B,
        engine: &'a E,
        scc_map: &'a SccApMap<B>,
        state: &ProductState<B, E>,
    ) -> Self {
        let (left, model_succ, cond, div) = match state {
            ProductState::Regular { left, succ, cond, div, .. } => {
                (left.clone(), succ.clone(), cond.clone(), *div)
            }
            ProductState::Divergence { .. } => {
                debug_assert!(false, "{}", ProductError::WrongVariant);
                panic!("{}", ProductError::WrongVariant);
            }
        };
        let left_iter = automaton.successors(&left);
        let mut cursor = Self {
            automaton,
            engine,
            scc_map,
            left,
            model_succ,
            cond,
            div_pending: div,
            left_iter,
            ap_enum: None,
            current_edge: None,
            current: None,
        };
        cursor.first();
        cursor
    }

    /// `true` iff the cursor has no more positions.
    pub fn done(&self) -> bool {
        self.current.is_none()
    }

    /// The destination state, edge condition, and acceptance set at the
    /// current cursor position. `None` once `done()`.
    pub fn current(&self) -> Option<&(ProductState<B, E>, B::Cond, B::Acceptance)> {
        self.current.as_ref()
    }

    fn first(&mut self) {
        if self.div_pending {
            self.div_pending = false;
            if let Some(acc) = self.divergence_selfloop_acceptance() {
                trace!("dsog: emitting divergence meta-state");
                self.current = Some((
                    ProductState::divergence(B::Cond::tt()),
                    B::Cond::tt(),
                    acc,
                ));
                return;
            }
        }
        self.advance_normal();
    }

    /// Scan outgoing edges of `left` for a self-loop whose acceptance is
    /// full and whose condition subsumes `self.cond`. Returns as soon as a
    /// qualifying self-loop is found, without draining the rest of the
    /// automaton's successor iterator (see DESIGN.md on the resolved
    /// iterator-draining open question).
    fn divergence_selfloop_acceptance(&self) -> Option<B::Acceptance> {
        for edge in self.automaton.successors(&self.left) {
            if edge.target == self.left && edge.acceptance.is_full() && self.cond.implies(&edge.cond) {
                return Some(edge.acceptance);
            }
        }
        None
    }

    /// Advance the cursor to the next position.
    pub fn advance(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.advance_normal();
    }

    fn advance_normal(&mut self) {
        self.current = None;
        loop {
            if self.ap_enum.is_some() {
                if self.try_current_enumerator_value() {
                    return;
                }
                // exhausted (or rejected) this candidate; advance the
                // enumerator, or drop it once it runs out.
                let ap_enum = self.ap_enum.as_mut().unwrap();
                if ap_enum.done() {
                    self.ap_enum = None;
                    self.current_edge = None;
                } else {
                    ap_enum.next();
                }
                continue;
            }

            let edge = match self.left_iter.next() {
                Some(edge) => edge,
                None => return,
            };
            if !edge.cond.implies(&self.cond) {
                trace!("dsog: skipping edge whose condition does not subsume source cond");
                continue;
            }
            let vars = self.scc_map.variables_of(&edge.target);
            self.current_edge = Some((edge.target, edge.cond.clone(), edge.acceptance.clone()));
            if vars.is_empty() {
                let (target, _, acceptance) = self.current_edge.take().unwrap();
                match close_regular_state::<B, E>(self.engine, target, self.model_succ.clone(), B::Cond::tt()) {
                    Ok(state) => {
                        self.current = Some((state, B::Cond::tt(), acceptance));
                        return;
                    }
                    Err(_) => continue,
                }
            } else {
                self.ap_enum = Some(ApEnumerator::new(vars));
                if self.try_current_enumerator_value() {
                    return;
                }
            }
        }
    }

    /// Try the AP enumerator's current position as a successor candidate.
    /// On success, sets `self.current` and returns `true`. On failure
    /// (empty closure), leaves the enumerator position untouched and
    /// returns `false`; the caller is responsible for advancing it.
    fn try_current_enumerator_value(&mut self) -> bool {
        let ap_enum = self.ap_enum.as_ref().unwrap();
        let v = ap_enum.current();
        let (target, _, acceptance) = self.current_edge.as_ref().unwrap().clone();
        match close_regular_state::<B, E>(self.engine, target, self.model_succ.clone(), v.clone()) {
            Ok(state) => {
                self.current = Some((state, v, acceptance));
                true
            }
            Err(_) => {
                trace!("dsog: skipping empty AP-split candidate");
                false
            }
        }
    }
}

/// A successor cursor from the distinguished divergence meta-state `DIV(c)`.
/// Produces exactly one transition: a self-edge back to `DIV(c)` labeled by
/// `c` with the full acceptance set (§4.4.3).
pub struct DivCursor<B: BuchiAutomaton, E: SymbolicEngine<Cond = B::Cond>> {
    emitted: bool,
    current: Option<(ProductState<B, E>, B::Cond, B::Acceptance)>,
}

impl<B: BuchiAutomaton, E: SymbolicEngine<Cond = B::Cond>> DivCursor<B, E> {
    /// Start a cursor over the single self-loop of `DIV(cond)`.
    pub fn new(cond: B::Cond) -> Self {
        let acc = B::Acceptance::full();
        Self {
            emitted: false,
            current: Some((ProductState::divergence(cond.clone()), cond, acc)),
        }
    }

    /// `true` once the single self-loop has been emitted.
    pub fn done(&self) -> bool {
        self.current.is_none()
    }

    /// The single transition of this cursor. `None` once `done()`.
    pub fn current(&self) -> Option<&(ProductState<B, E>, B::Cond, B::Acceptance)> {
        self.current.as_ref()
    }

    /// Consume the single transition.
    pub fn advance(&mut self) {
        self.current = None;
        self.emitted = true;
    }
}
