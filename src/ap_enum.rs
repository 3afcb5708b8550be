//! Enumerates all conjunctions (AP valuations) over a finite set of BDD
//! variable indices.
//!
//! Realized as a bit counter over `variables`, per the design note "AP
//! enumeration as a bit counter" (§9): no recursion, just a counter modulo
//! `2^|variables|` combined with positive/negative literal emission.

use tinyvec::TinyVec;

use crate::automaton::ApCondition;

/// A lazy, finite, single-pass, restartable enumerator of all `2^|V|`
/// conjunctions over an ordered variable set `V`. Enumerating the empty
/// variable set yields exactly one conjunction: `true`.
pub struct ApEnumerator<C> {
    variables: TinyVec<[u32; 8]>,
    counter: u64,
    total: u64,
    _marker: std::marker::PhantomData<C>,
}

impl<C: ApCondition> ApEnumerator<C> {
    /// Create an enumerator over `variables` and position it at the first
    /// conjunction.
    pub fn new(variables: impl IntoIterator<Item = u32>) -> Self {
        let variables: TinyVec<[u32; 8]> = variables.into_iter().collect();
        let total = 1u64
            .checked_shl(variables.len() as u32)
            .expect("AP variable set too large to enumerate");
        Self {
            variables,
            counter: 0,
            total,
            _marker: std::marker::PhantomData,
        }
    }

    /// Restart the enumeration at the first conjunction.
    pub fn first(&mut self) {
        self.counter = 0;
    }

    /// Advance to the next conjunction, if any. A no-op once `done()`.
    pub fn next(&mut self) {
        if self.done() {
            return;
        }
        self.counter += 1;
    }

    /// `true` iff the current position is the last valid conjunction, i.e.
    /// no further `next()` call would move to a new one.
    pub fn done(&self) -> bool {
        self.counter + 1 >= self.total
    }

    /// The conjunction at the current position.
    pub fn current(&self) -> C {
        debug_assert!(self.counter < self.total, "ApEnumerator::current called past the end");
        let mut cond = C::tt();
        for (i, &var) in self.variables.iter().enumerate() {
            let positive = (self.counter >> i) & 1 == 1;
            cond = cond.and(&C::literal(var, positive));
        }
        cond
    }
}
