use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::clone::DeepClone;

/// Planner-visible capability set of a plannable entity: a mutable
/// accumulated path cost plus the operations executable from the current
/// state. Operations mutate the agent they run on, so the solver only ever
/// runs them against deep clones.
pub trait Agent: DeepClone + Sized + 'static {
    /// Accumulated path cost. Starts at 0 for a planning root.
    fn cost(&self) -> f32;

    fn set_cost(&mut self, cost: f32);

    /// Operations applicable from the current state. Empty is a valid dead
    /// end, not an error.
    fn actions(&self) -> Vec<AgentOp<Self>>;

    /// Runtime query for the optional [`Parametric`] capability.
    ///
    /// Agents exposing parameterized action families override this to
    /// return `Some(self)`.
    fn parametric(&self) -> Option<&dyn Parametric<Agent = Self>> {
        None
    }
}

/// Optional secondary capability: parameterized action families.
///
/// Where [`Agent::actions`] enumerates fixed operations, `methods`
/// enumerates (operation, numeric argument) pairs, e.g. one `set_heat`
/// entry per admissible temperature.
pub trait Parametric {
    type Agent: Agent;

    fn methods(&self) -> Vec<ParamOp<Self::Agent>>;
}

/// A named zero-argument operation exposed by an agent.
///
/// `run` returns `false` when the operation does not apply in the given
/// state (the child is discarded), `true` after mutating state and cost.
pub struct AgentOp<A> {
    pub name: &'static str,
    pub run: fn(&mut A) -> bool,
}

impl<A> Copy for AgentOp<A> {}

impl<A> Clone for AgentOp<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> fmt::Debug for AgentOp<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentOp").field("name", &self.name).finish()
    }
}

/// One member of a parameterized action family: a named operation plus the
/// single numeric argument it is invoked with.
pub struct ParamOp<A> {
    pub name: &'static str,
    pub arg: f64,
    pub run: fn(&mut A, f64) -> bool,
}

impl<A> Copy for ParamOp<A> {}

impl<A> Clone for ParamOp<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> fmt::Debug for ParamOp<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamOp")
            .field("name", &self.name)
            .field("arg", &self.arg)
            .finish()
    }
}

/// Serializable identity of an operation: its name and, for parametric
/// methods, the argument it was invoked with.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OpDescriptor {
    pub name: &'static str,
    pub arg: Option<f64>,
}

impl OpDescriptor {
    pub fn simple(name: &'static str) -> Self {
        Self { name, arg: None }
    }

    pub fn with_arg(name: &'static str, arg: f64) -> Self {
        Self {
            name,
            arg: Some(arg),
        }
    }
}

impl fmt::Display for OpDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arg {
            Some(arg) => write!(f, "{}({})", self.name, arg),
            None => write!(f, "{}", self.name),
        }
    }
}

enum StepOp<A> {
    Simple(fn(&mut A) -> bool),
    Param(fn(&mut A, f64) -> bool, f64),
}

impl<A> Copy for StepOp<A> {}

impl<A> Clone for StepOp<A> {
    fn clone(&self) -> Self {
        *self
    }
}

/// One step of a produced plan: the operation that was applied during the
/// search, paired with its descriptor so callers can replay or inspect it.
pub struct PlanStep<A> {
    descriptor: OpDescriptor,
    op: StepOp<A>,
}

impl<A> Copy for PlanStep<A> {}

impl<A> Clone for PlanStep<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> fmt::Debug for PlanStep<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanStep")
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

impl<A> PlanStep<A> {
    pub fn simple(name: &'static str, run: fn(&mut A) -> bool) -> Self {
        Self {
            descriptor: OpDescriptor::simple(name),
            op: StepOp::Simple(run),
        }
    }

    pub fn parametric(name: &'static str, arg: f64, run: fn(&mut A, f64) -> bool) -> Self {
        Self {
            descriptor: OpDescriptor::with_arg(name, arg),
            op: StepOp::Param(run, arg),
        }
    }

    pub fn descriptor(&self) -> OpDescriptor {
        self.descriptor
    }

    /// Re-run this step against an agent, e.g. when replaying a plan on a
    /// fresh clone of the initial state.
    pub fn apply(&self, agent: &mut A) -> bool {
        match self.op {
            StepOp::Simple(run) => run(agent),
            StepOp::Param(run, arg) => run(agent, arg),
        }
    }
}

impl<A> From<AgentOp<A>> for PlanStep<A> {
    fn from(op: AgentOp<A>) -> Self {
        Self::simple(op.name, op.run)
    }
}

impl<A> From<ParamOp<A>> for PlanStep<A> {
    fn from(op: ParamOp<A>) -> Self {
        Self::parametric(op.name, op.arg, op.run)
    }
}
