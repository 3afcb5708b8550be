//! Core on-the-fly product construction for symbolic LTL model checking.
//!
//! Composes a Büchi automaton (derived externally from a negated LTL
//! formula) with a symbolic, decision-diagram-backed state space, producing
//! an on-the-fly generalized Büchi transition graph whose emptiness decides
//! the verification question.
//!
//! Two product variants are implemented:
//!
//! - [`slog`]: the Symbolic Linear-time Observation Graph, a
//!   saturation-based successor engine.
//! - [`dsog`]: the Divergence-aware SOG, which adds explicit divergence
//!   detection and per-SCC splitting of the atomic-proposition alphabet.
//!
//! Both are driven through the [`product::ProductGraph`] facade and share
//! [`state::ProductState`] identity.
//!
//! LTL parsing, translation to a Büchi automaton, the decision-diagram
//! engine backing the aggregate representation, the Petri net / ITS loader
//! and the emptiness-check algorithms themselves are external collaborators:
//! this crate only specifies the capability surface it needs from them,
//! through the [`automaton`] and [`engine`] traits.

pub mod ap_enum;
pub mod automaton;
pub mod dsog;
pub mod engine;
pub mod error;
pub mod options;
pub mod product;
pub mod scc;
pub mod slog;
pub mod state;

#[cfg(test)]
mod testutil;

pub use automaton::{AcceptanceSet, ApCondition, BuchiAutomaton, ProjectionTarget};
pub use engine::SymbolicEngine;
pub use error::ProductError;
pub use options::{ProductOptions, ProductVariant};
pub use product::{ProductGraph, SuccessorCursor};
pub use state::ProductState;
