use std::rc::Rc;

use goap_core::{Agent, PlanSpec, PlanStep};

/// One explored point in the search tree.
///
/// `state` is an exclusively-owned deep clone, never aliased with a
/// sibling's state or the caller's original agent. The parent link exists
/// only for path reconstruction.
pub struct Node<A: Agent> {
    pub state: A,
    pub cost: f32,
    pub depth: u32,
    pub parent: Option<Rc<Node<A>>>,
    /// The operation that produced this node. `None` only for the root.
    pub step: Option<PlanStep<A>>,
}

impl<A: Agent> Node<A> {
    pub fn root(state: A) -> Self {
        Self {
            cost: state.cost(),
            state,
            depth: 0,
            parent: None,
            step: None,
        }
    }

    pub fn child(parent: &Rc<Node<A>>, state: A, step: PlanStep<A>) -> Self {
        Self {
            cost: state.cost(),
            state,
            depth: parent.depth + 1,
            parent: Some(Rc::clone(parent)),
            step: Some(step),
        }
    }
}

/// Walk parent links from a goal-satisfying node back to the root and
/// reverse, yielding the plan in execution order.
pub(crate) fn assemble_plan<A: Agent>(goal_node: &Node<A>) -> PlanSpec<PlanStep<A>> {
    let mut steps = Vec::with_capacity(goal_node.depth as usize);
    let mut step = goal_node.step;
    let mut parent = goal_node.parent.as_ref();

    while let Some(taken) = step {
        steps.push(taken);
        match parent {
            Some(node) => {
                step = node.step;
                parent = node.parent.as_ref();
            }
            None => step = None,
        }
    }

    steps.reverse();
    PlanSpec::new(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use goap_core::{AgentOp, CloneMap, DeepClone};

    #[derive(Clone, Default)]
    struct Counter {
        cost: f32,
        n: u32,
    }

    impl DeepClone for Counter {
        fn deep_clone_with(&self, _map: &mut CloneMap) -> Self {
            self.clone()
        }
    }

    impl Agent for Counter {
        fn cost(&self) -> f32 {
            self.cost
        }

        fn set_cost(&mut self, cost: f32) {
            self.cost = cost;
        }

        fn actions(&self) -> Vec<AgentOp<Self>> {
            vec![AgentOp {
                name: "inc",
                run: |a| {
                    a.cost += 1.0;
                    a.n += 1;
                    true
                },
            }]
        }
    }

    #[test]
    fn plan_lists_steps_in_execution_order() {
        let root = Rc::new(Node::root(Counter::default()));

        let mut mid_state = root.state.deep_clone();
        let op = root.state.actions()[0];
        assert!((op.run)(&mut mid_state));
        let mid = Rc::new(Node::child(&root, mid_state, op.into()));

        let mut leaf_state = mid.state.deep_clone();
        assert!((op.run)(&mut leaf_state));
        let leaf = Node::child(&mid, leaf_state, op.into());

        let plan = assemble_plan(&leaf);
        assert_eq!(plan.len(), 2);
        assert!(plan.steps.iter().all(|s| s.descriptor().name == "inc"));
        assert_eq!(leaf.depth, 2);
        assert_eq!(leaf.cost, 2.0);
    }

    #[test]
    fn root_assembles_to_empty_plan() {
        let root = Node::root(Counter::default());
        assert!(assemble_plan(&root).is_empty());
    }
}
