//! Incremental, budget-bounded GOAP state-space solver.
//!
//! [`Solver`] searches the states reachable from an agent for a
//! minimal-cost sequence of operations satisfying a [`goap_core::Goal`].
//! The search runs in caller-controlled slices: [`Solver::next`] seeds a
//! session, [`Solver::iterate_for`] spends more budget on demand, so one
//! search can be spread across real-time ticks.
//!
//! Two frontier disciplines are supported, fixed per session: best-first
//! ordered by cost plus heuristic estimate (the default), and a plain
//! stack (`brfs`) for agent models with zero-cost transitions.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod frontier;
pub mod node;
pub mod solver;

pub use node::Node;
pub use solver::{PlanningState, Solution, Solver, SolverConfig};

use thiserror::Error;

/// Errors raised by the solver API. Normal search outcomes (stalled,
/// failed, succeeded) are not errors; they are reported through
/// [`Solver::state`] and the call's return value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// `next` was called with a configuration that cannot admit a session.
    #[error("invalid solver configuration: {0}")]
    InvalidArgument(&'static str),

    /// `iterate` was called with no active session.
    #[error("iterate called with no active planning session")]
    InvalidState,

    /// An expansion produced a zero-cost transition while the frontier is
    /// cost-ordered. This signals a misconfigured agent model, not a normal
    /// search outcome, and fails the whole search.
    #[error("operation `{op}` produced a zero-cost transition in heuristic mode")]
    InvalidAction { op: &'static str },
}

pub type Result<T> = std::result::Result<T, SolverError>;
