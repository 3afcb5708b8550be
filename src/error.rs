//! Typed contract-violation errors for the product construction.
//!
//! These are not recoverable runtime errors: every one of them indicates a
//! defect in how the product graph was composed with its automaton and
//! symbolic engine, not a condition that arises from well-formed input. Only
//! [`ProductGraph::initial_state`](crate::product::ProductGraph::initial_state)
//! propagates one of these through a `Result`; everywhere else a violation is
//! raised with `debug_assert!`/`panic!` carrying the same message.

use std::error::Error;
use std::fmt::{self, Display};

/// A contract violation detected while constructing or traversing the
/// product graph.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ProductError {
    /// A cursor or state operation expected the other [`ProductState`](crate::state::ProductState)
    /// variant.
    WrongVariant,
    /// A `Regular` state was about to be constructed with an empty (null)
    /// aggregate on its right-hand side.
    NullAggregate,
    /// No conjunction of atomic propositions over the initial automaton
    /// state's SCC-AP set has a non-empty selector on the model's initial
    /// aggregate.
    NoConsistentInitialValuation,
}

impl Display for ProductError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongVariant => write!(f, "product state has the wrong variant for this operation"),
            Self::NullAggregate => write!(f, "attempted to construct a regular state with a null aggregate"),
            Self::NoConsistentInitialValuation => write!(
                f,
                "no AP valuation reachable from the initial automaton state is consistent with the initial aggregate"
            ),
        }
    }
}

impl Error for ProductError {}
