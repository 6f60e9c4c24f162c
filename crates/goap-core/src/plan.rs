#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Serializable plan data: an ordered sequence of steps from the initial
/// state to a goal-satisfying state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanSpec<S> {
    pub steps: Vec<S>,
}

impl<S> PlanSpec<S> {
    pub fn new(steps: Vec<S>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
