use criterion::{black_box, criterion_group, criterion_main, Criterion};
use goap_core::{Agent, AgentOp, CloneMap, DeepClone, Goal};
use goap_solver::{Solver, SolverConfig};

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

const TARGET: u32 = 16;

fn bench_solver(c: &mut Criterion) {
    c.bench_function("goap-solver/next(counter=16, heuristic)", |b| {
        b.iter(|| {
            let mut x = Solver::new().with_config(SolverConfig {
                max_iter: 1000,
                max_nodes: 1000,
                brfs: false,
            });
            let goal = Goal::new(|a: &Counter| a.n == TARGET)
                .with_heuristic(|a| TARGET.saturating_sub(a.n) as f32);
            let solution = x.next(&Counter::default(), goal).unwrap().expect("plan");
            black_box(solution.plan().map(|p| p.len()));
        })
    });

    c.bench_function("goap-solver/next(counter=16, brfs)", |b| {
        b.iter(|| {
            let mut x = Solver::new().with_config(SolverConfig {
                max_iter: 1000,
                max_nodes: 1000,
                brfs: true,
            });
            let goal = Goal::new(|a: &Counter| a.n == TARGET);
            let solution = x.next(&Counter::default(), goal).unwrap().expect("plan");
            black_box(solution.plan().map(|p| p.len()));
        })
    });
}

criterion_group!(benches, bench_solver);
criterion_main!(benches);
