//! The SLOG successor engine: saturation-based successor aggregates.
//!
//! Grounded directly on `slog_succ_iterator`/`slog_state` in the reference
//! C++ implementation (`slog.cpp`): `step_` computes `succSatisfying` then
//! saturates with `leastPreTestFixpoint`; `compute_weaker_selfloop_ap`
//! collects the self-loop condition disjunction `F`.

use log::trace;

use crate::automaton::{AcceptanceSet, ApCondition, BuchiAutomaton};
use crate::engine::SymbolicEngine;
use crate::state::ProductState;

/// A single-pass, lazy cursor over the SLOG successors of one regular
/// product state.
pub struct SlogCursor<'a, B: BuchiAutomaton, E: SymbolicEngine<Cond = B::Cond>> {
    automaton: &'a B,
    engine: &'a E,
    left: B::State,
    right: E::Aggregate,
    left_iter: B::SuccIter,
    weaker_selfloop: bool,
    current: Option<(ProductState<B, E>, B::Cond, B::Acceptance)>,
}

impl<'a, B: BuchiAutomaton, E: SymbolicEngine<Cond = B::Cond>> SlogCursor<'a, B, E> {
    /// Start a cursor over the successors of `(left, right)`.
    pub fn new(automaton: &'a B, engine: &'a E, left: B::State, right: E::Aggregate, weaker_selfloop: bool) -> Self {
        let left_iter = automaton.successors(&left);
        let mut cursor = Self {
            automaton,
            engine,
            left,
            right,
            left_iter,
            weaker_selfloop,
            current: None,
        };
        cursor.advance();
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

    /// Advance the cursor to the next position.
    pub fn advance(&mut self) {
        self.current = None;
        while let Some(edge) = self.left_iter.next() {
            let entry = self.engine.succ_satisfying(&self.right, &edge.cond);
            if self.engine.is_empty(&entry) {
                trace!("slog: skipping edge with empty succSatisfying");
                continue;
            }
            let f = if self.weaker_selfloop {
                self.weaker_selfloop_ap(&edge.target, &edge.acceptance)
            } else {
                B::Cond::ff()
            };
            let saturated = self.engine.least_pre_test_fixpoint(&entry, &f);
            trace!("slog: emitting successor under saturated aggregate");
            self.current = Some((
                ProductState::regular(edge.target.clone(), saturated.clone(), edge.cond.clone(), false, saturated),
                edge.cond,
                edge.acceptance,
            ));
            break;
        }
    }

    /// Compute the weaker-self-loop AP set `F` for automaton state `q2`
    /// reached via an edge with acceptance `ac`: the disjunction of
    /// self-loop conditions at `q2` whose acceptance is subsumed by `ac`
    /// (`ac ⇒ ac'`, i.e. `ac ∧ ac' = ac'`).
    fn weaker_selfloop_ap(&self, q2: &B::State, ac: &B::Acceptance) -> B::Cond {
        let mut f = B::Cond::ff();
        for edge in self.automaton.successors(q2) {
            if &edge.target == q2 && ac.subsumes(&edge.acceptance) {
                f = disjoin(&f, &edge.cond);
            }
        }
        f
    }
}

/// `a ∨ b`, expressed through De Morgan's law since `ApCondition` only
/// exposes conjunction and negation directly (matching the reference, which
/// builds disjunctions the same way over BDDs: `!(!a & !b)`).
fn disjoin<C: ApCondition>(a: &C, b: &C) -> C {
    a.negate().and(&b.negate()).negate()
}
