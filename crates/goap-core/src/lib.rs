//! Engine-agnostic GOAP planning primitives.
//!
//! This crate defines the contracts the solver plans against: the [`Agent`]
//! capability (cost counter plus executable operations), the optional
//! [`Parametric`] capability (parameterized action families), goal
//! evaluation, and the explicit cycle-aware [`DeepClone`] facility used to
//! produce independent state copies during expansion.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod clone;
pub mod goal;
pub mod plan;

pub use agent::{Agent, AgentOp, OpDescriptor, ParamOp, Parametric, PlanStep};
pub use clone::{CloneMap, DeepClone};
pub use goal::Goal;
pub use plan::PlanSpec;
