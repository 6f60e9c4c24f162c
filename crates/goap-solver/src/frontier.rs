use core::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use goap_core::Agent;

use crate::node::Node;

/// Not-yet-expanded nodes of one planning session.
///
/// The discipline is fixed for the session's lifetime: a plain LIFO stack
/// in `brfs` mode, a best-first structure ordered by accumulated cost plus
/// heuristic estimate otherwise. Ties in best-first order break toward the
/// most recently pushed node.
pub(crate) enum Frontier<A: Agent> {
    Stack(Vec<Rc<Node<A>>>),
    Best(BinaryHeap<OpenEntry<A>>),
}

pub(crate) struct OpenEntry<A: Agent> {
    /// Accumulated cost plus heuristic estimate, computed at push time.
    f: f32,
    /// Monotone push counter; larger wins ties so the newest entry pops
    /// first among equals.
    tie: u64,
    node: Rc<Node<A>>,
}

impl<A: Agent> PartialEq for OpenEntry<A> {
    fn eq(&self, other: &Self) -> bool {
        self.f.to_bits() == other.f.to_bits() && self.tie == other.tie
    }
}

impl<A: Agent> Eq for OpenEntry<A> {}

impl<A: Agent> Ord for OpenEntry<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse the cost comparison to make BinaryHeap behave like a
        // min-heap; keep the tie counter forward so newer entries win.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.tie.cmp(&other.tie))
    }
}

impl<A: Agent> PartialOrd for OpenEntry<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: Agent> Frontier<A> {
    pub fn stack() -> Self {
        Frontier::Stack(Vec::new())
    }

    pub fn best_first() -> Self {
        Frontier::Best(BinaryHeap::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Frontier::Stack(nodes) => nodes.is_empty(),
            Frontier::Best(heap) => heap.is_empty(),
        }
    }

    /// Push a node; `f` is ignored in stack mode.
    pub fn push(&mut self, node: Rc<Node<A>>, f: f32, tie: u64) {
        match self {
            Frontier::Stack(nodes) => nodes.push(node),
            Frontier::Best(heap) => heap.push(OpenEntry { f, tie, node }),
        }
    }

    pub fn pop(&mut self) -> Option<Rc<Node<A>>> {
        match self {
            Frontier::Stack(nodes) => nodes.pop(),
            Frontier::Best(heap) => heap.pop().map(|entry| entry.node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goap_core::{AgentOp, CloneMap, DeepClone};

    #[derive(Clone, Default)]
    struct Blank {
        cost: f32,
    }

    impl DeepClone for Blank {
        fn deep_clone_with(&self, _map: &mut CloneMap) -> Self {
            self.clone()
        }
    }

    impl Agent for Blank {
        fn cost(&self) -> f32 {
            self.cost
        }

        fn set_cost(&mut self, cost: f32) {
            self.cost = cost;
        }

        fn actions(&self) -> Vec<AgentOp<Self>> {
            Vec::new()
        }
    }

    fn node(cost: f32) -> Rc<Node<Blank>> {
        Rc::new(Node::root(Blank { cost }))
    }

    #[test]
    fn stack_pops_newest_first() {
        let mut frontier = Frontier::stack();
        frontier.push(node(1.0), 1.0, 0);
        frontier.push(node(2.0), 2.0, 1);
        assert_eq!(frontier.pop().unwrap().cost, 2.0);
        assert_eq!(frontier.pop().unwrap().cost, 1.0);
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn best_first_pops_minimum_f() {
        let mut frontier = Frontier::best_first();
        frontier.push(node(3.0), 3.0, 0);
        frontier.push(node(1.0), 1.0, 1);
        frontier.push(node(2.0), 2.0, 2);
        assert_eq!(frontier.pop().unwrap().cost, 1.0);
        assert_eq!(frontier.pop().unwrap().cost, 2.0);
        assert_eq!(frontier.pop().unwrap().cost, 3.0);
    }

    #[test]
    fn best_first_ties_break_toward_newest() {
        let mut frontier = Frontier::best_first();
        frontier.push(node(1.0), 5.0, 0);
        frontier.push(node(2.0), 5.0, 1);
        assert_eq!(frontier.pop().unwrap().cost, 2.0);
        assert_eq!(frontier.pop().unwrap().cost, 1.0);
    }
}
