/// A planning target: a predicate over agent state plus an optional
/// cost-to-go heuristic.
///
/// Without a heuristic the estimate is constant 0 and a heuristic-mode
/// search degrades to uniform-cost ordering. Both closures must be pure and
/// deterministic per state.
pub struct Goal<A> {
    predicate: Box<dyn Fn(&A) -> bool>,
    heuristic: Option<Box<dyn Fn(&A) -> f32>>,
}

impl<A> Goal<A> {
    pub fn new(predicate: impl Fn(&A) -> bool + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
            heuristic: None,
        }
    }

    pub fn with_heuristic(mut self, heuristic: impl Fn(&A) -> f32 + 'static) -> Self {
        self.heuristic = Some(Box::new(heuristic));
        self
    }

    pub fn is_satisfied(&self, agent: &A) -> bool {
        (self.predicate)(agent)
    }

    /// Estimated remaining cost from `agent` to the goal. 0 when no
    /// heuristic was supplied.
    pub fn estimate(&self, agent: &A) -> f32 {
        match &self.heuristic {
            Some(h) => h(agent),
            None => 0.0,
        }
    }

    pub fn has_heuristic(&self) -> bool {
        self.heuristic.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_defaults_to_zero() {
        let goal = Goal::<u32>::new(|n| *n >= 3);
        assert!(!goal.has_heuristic());
        assert_eq!(goal.estimate(&0), 0.0);
        assert!(goal.is_satisfied(&3));
    }

    #[test]
    fn heuristic_overrides_estimate() {
        let goal = Goal::<u32>::new(|n| *n >= 3).with_heuristic(|n| (3 - *n.min(&3)) as f32);
        assert!(goal.has_heuristic());
        assert_eq!(goal.estimate(&1), 2.0);
        assert_eq!(goal.estimate(&3), 0.0);
    }
}
