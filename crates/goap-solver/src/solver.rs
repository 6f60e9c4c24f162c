use core::fmt;
use std::rc::Rc;

use goap_core::{Agent, Goal, PlanSpec, PlanStep};

use crate::frontier::Frontier;
use crate::node::{assemble_plan, Node};
use crate::{Result, SolverError};

/// Lifecycle of a planning session.
///
/// Advances monotonically from `NotStarted` through `Running` to exactly
/// one resting value, reset only by a fresh [`Solver::next`] call.
/// `Stalled` means a budget ceiling was hit or the search space ran out
/// without a definitive outcome; `Failed` means the node budget was
/// provably exhausted with no solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanningState {
    NotStarted,
    Running,
    Succeeded,
    Stalled,
    Failed,
}

/// Per-instance solver configuration, snapshotted by each session at
/// [`Solver::next`] time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Cumulative iteration ceiling for one session. Reaching it stalls
    /// the session.
    pub max_iter: usize,
    /// Total node budget for one session, the root included. Reaching it
    /// fails the session.
    pub max_nodes: usize,
    /// Plain stack mode: depth-first pops, no heuristic evaluation,
    /// zero-cost transitions tolerated.
    pub brfs: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            max_nodes: 1000,
            brfs: false,
        }
    }
}

/// A successful planning outcome.
///
/// `AlreadySatisfied` is a sentinel for a goal the initial state already
/// meets, distinct from a zero-length plan.
pub enum Solution<A: Agent> {
    AlreadySatisfied,
    Plan(PlanSpec<PlanStep<A>>),
}

impl<A: Agent> Clone for Solution<A> {
    fn clone(&self) -> Self {
        match self {
            Solution::AlreadySatisfied => Solution::AlreadySatisfied,
            Solution::Plan(plan) => Solution::Plan(plan.clone()),
        }
    }
}

impl<A: Agent> fmt::Debug for Solution<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solution::AlreadySatisfied => f.write_str("AlreadySatisfied"),
            Solution::Plan(plan) => f.debug_tuple("Plan").field(plan).finish(),
        }
    }
}

impl<A: Agent> Solution<A> {
    pub fn is_already_satisfied(&self) -> bool {
        matches!(self, Solution::AlreadySatisfied)
    }

    pub fn plan(&self) -> Option<&PlanSpec<PlanStep<A>>> {
        match self {
            Solution::AlreadySatisfied => None,
            Solution::Plan(plan) => Some(plan),
        }
    }
}

struct Session<A: Agent> {
    goal: Goal<A>,
    frontier: Frontier<A>,
    /// Iterations spent so far, cumulative across `next` and every
    /// `iterate` call of this session.
    iters: usize,
    /// Nodes created so far, the root included.
    nodes_created: usize,
    /// Monotone push counter used as the frontier tie-break.
    ticket: u64,
    max_iter: usize,
    max_nodes: usize,
    brfs: bool,
}

enum StepOutcome<A: Agent> {
    Solved(PlanSpec<PlanStep<A>>),
    /// Frontier empty: the reachable space is exhausted.
    Exhausted,
    /// Node budget reached during expansion.
    NodeBudget,
    /// Zero-cost transition under cost ordering; carries the operation name.
    ZeroCost(&'static str),
    Expanded,
}

enum ExpandEnd {
    ZeroCost(&'static str),
    NodeBudget,
}

impl<A: Agent> Session<A> {
    /// One search step: pop, test the goal, expand and push children.
    fn step(&mut self) -> StepOutcome<A> {
        let Some(current) = self.frontier.pop() else {
            return StepOutcome::Exhausted;
        };

        if self.goal.is_satisfied(&current.state) {
            return StepOutcome::Solved(assemble_plan(&current));
        }

        match self.expand(&current) {
            Err(ExpandEnd::ZeroCost(op)) => StepOutcome::ZeroCost(op),
            Err(ExpandEnd::NodeBudget) => StepOutcome::NodeBudget,
            // A dead end that empties the frontier stalls this call
            // rather than waiting for the next pop attempt.
            Ok(()) if self.frontier.is_empty() => StepOutcome::Exhausted,
            Ok(()) => StepOutcome::Expanded,
        }
    }

    /// Run every available operation against its own clone of the popped
    /// state. Operations returning `false` leave no child.
    fn expand(&mut self, parent: &Rc<Node<A>>) -> std::result::Result<(), ExpandEnd> {
        for op in parent.state.actions() {
            let mut state = parent.state.deep_clone();
            if !(op.run)(&mut state) {
                continue;
            }
            self.admit(parent, state, op.name, PlanStep::from(op))?;
        }

        if let Some(parametric) = parent.state.parametric() {
            for op in parametric.methods() {
                let mut state = parent.state.deep_clone();
                if !(op.run)(&mut state, op.arg) {
                    continue;
                }
                self.admit(parent, state, op.name, PlanStep::from(op))?;
            }
        }

        Ok(())
    }

    fn admit(
        &mut self,
        parent: &Rc<Node<A>>,
        state: A,
        op_name: &'static str,
        step: PlanStep<A>,
    ) -> std::result::Result<(), ExpandEnd> {
        // A transition that does not move cost cannot be ordered against
        // its peers; under cost ordering it poisons the whole search.
        let delta = state.cost() - parent.cost;
        if !self.brfs && delta == 0.0 {
            return Err(ExpandEnd::ZeroCost(op_name));
        }

        let node = Rc::new(Node::child(parent, state, step));
        let f = if self.brfs {
            0.0
        } else {
            node.cost + self.goal.estimate(&node.state)
        };
        self.ticket += 1;
        self.frontier.push(node, f, self.ticket);

        self.nodes_created += 1;
        if self.nodes_created >= self.max_nodes {
            return Err(ExpandEnd::NodeBudget);
        }
        Ok(())
    }
}

/// Iterative, budget-bounded GOAP solver.
///
/// Owns at most one planning session at a time. [`Solver::next`] seeds a
/// session from a deep clone of the agent and optionally spends an initial
/// iteration budget; [`Solver::iterate_for`] spends more on demand. Calling
/// `next` again discards any prior session.
pub struct Solver<A: Agent> {
    config: SolverConfig,
    state: PlanningState,
    session: Option<Session<A>>,
    solution: Option<Solution<A>>,
}

impl<A: Agent> Default for Solver<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Agent> Solver<A> {
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
            state: PlanningState::NotStarted,
            session: None,
            solution: None,
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the configuration. Takes effect at the next [`Solver::next`]
    /// call; the active session keeps the limits it was started with.
    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    pub fn config(&self) -> SolverConfig {
        self.config
    }

    pub fn state(&self) -> PlanningState {
        self.state
    }

    /// True exactly while `state() == Running`, including the zero-budget
    /// window right after `next`.
    pub fn is_running(&self) -> bool {
        self.state == PlanningState::Running
    }

    /// The last session's successful outcome, for callers polling between
    /// iterate slices.
    pub fn solution(&self) -> Option<&Solution<A>> {
        self.solution.as_ref()
    }

    /// Start a session and drive it with the default iteration budget
    /// (`max_iter`, i.e. run until a resting state).
    pub fn next(&mut self, agent: &A, goal: Goal<A>) -> Result<Option<Solution<A>>> {
        let budget = self.config.max_iter;
        self.next_budgeted(agent, goal, budget)
    }

    /// Start a session, spending at most `iter_budget` iterations before
    /// returning. A zero budget leaves the session `Running` with no work
    /// done; the caller then drives it via [`Solver::iterate_for`].
    pub fn next_budgeted(
        &mut self,
        agent: &A,
        goal: Goal<A>,
        iter_budget: usize,
    ) -> Result<Option<Solution<A>>> {
        if self.config.max_iter == 0 {
            return Err(SolverError::InvalidArgument("max_iter must be positive"));
        }
        if self.config.max_nodes == 0 {
            return Err(SolverError::InvalidArgument("max_nodes must be positive"));
        }

        // A new session discards any prior one wholesale.
        self.session = None;
        self.solution = None;
        self.state = PlanningState::NotStarted;

        let mut root = agent.deep_clone();
        root.set_cost(0.0);

        if goal.is_satisfied(&root) {
            tracing::debug!("goal already satisfied by the initial state");
            self.state = PlanningState::Succeeded;
            self.solution = Some(Solution::AlreadySatisfied);
            return Ok(Some(Solution::AlreadySatisfied));
        }

        let config = self.config;
        tracing::debug!(
            max_iter = config.max_iter,
            max_nodes = config.max_nodes,
            brfs = config.brfs,
            iter_budget,
            "starting planning session"
        );

        let root_f = if config.brfs { 0.0 } else { goal.estimate(&root) };
        let mut session = Session {
            goal,
            frontier: if config.brfs {
                Frontier::stack()
            } else {
                Frontier::best_first()
            },
            iters: 0,
            nodes_created: 1,
            ticket: 0,
            max_iter: config.max_iter,
            max_nodes: config.max_nodes,
            brfs: config.brfs,
        };
        session.frontier.push(Rc::new(Node::root(root)), root_f, 0);
        self.session = Some(session);
        self.state = PlanningState::Running;

        if iter_budget == 0 {
            return Ok(None);
        }
        Ok(self.iterate_for(iter_budget)?.map(Solution::Plan))
    }

    /// Spend one iteration. See [`Solver::iterate_for`].
    pub fn iterate(&mut self) -> Result<Option<PlanSpec<PlanStep<A>>>> {
        self.iterate_for(1)
    }

    /// Spend up to `step_budget` iterations on the active session.
    ///
    /// Returns the plan on success, `Ok(None)` otherwise; inspect
    /// [`Solver::state`] to distinguish a still-running session from a
    /// stalled or failed one. Iterating a stalled session is legal and
    /// returns `Ok(None)` without further work; a succeeded or failed
    /// session is gone and yields [`SolverError::InvalidState`].
    pub fn iterate_for(&mut self, step_budget: usize) -> Result<Option<PlanSpec<PlanStep<A>>>> {
        if self.session.is_none() {
            return Err(SolverError::InvalidState);
        }

        let mut steps = 0;
        loop {
            let ceiling_hit = {
                let session = self.session.as_ref().ok_or(SolverError::InvalidState)?;
                session.iters >= session.max_iter
            };
            if ceiling_hit {
                tracing::debug!("iteration ceiling reached; session stalled");
                self.state = PlanningState::Stalled;
                return Ok(None);
            }
            if steps >= step_budget {
                self.state = PlanningState::Running;
                return Ok(None);
            }
            steps += 1;

            let outcome = {
                let session = self.session.as_mut().ok_or(SolverError::InvalidState)?;
                session.iters += 1;
                session.step()
            };

            match outcome {
                StepOutcome::Solved(plan) => {
                    tracing::debug!(steps = plan.len(), "planning succeeded");
                    self.state = PlanningState::Succeeded;
                    self.session = None;
                    self.solution = Some(Solution::Plan(plan.clone()));
                    return Ok(Some(plan));
                }
                StepOutcome::Exhausted => {
                    tracing::debug!("frontier exhausted; session stalled");
                    self.state = PlanningState::Stalled;
                    return Ok(None);
                }
                StepOutcome::NodeBudget => {
                    tracing::debug!("node budget exhausted; planning failed");
                    self.state = PlanningState::Failed;
                    self.session = None;
                    return Ok(None);
                }
                StepOutcome::ZeroCost(op) => {
                    self.state = PlanningState::Failed;
                    self.session = None;
                    return Err(SolverError::InvalidAction { op });
                }
                StepOutcome::Expanded => {}
            }
        }
    }
}
