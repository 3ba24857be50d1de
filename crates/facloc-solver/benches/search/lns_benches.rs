// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{Criterion, criterion_group, criterion_main};
use facloc_core::prelude::Location;
use facloc_model::prelude::{FacilityIndex, Problem, ProblemBuilder};
use facloc_solver::{
    lns::{neighborhood::NeighborhoodSelector, subproblem::Subproblem},
    model::instance::InstanceModel,
    opening::greedy::GreedyOpening,
    optimizer::{EnumerationOptimizer, Optimizer},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{hint::black_box, time::Duration};

fn build_problem(facilities: usize, customers: usize, seed: u64) -> Problem {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut b = ProblemBuilder::with_capacities(facilities, customers);
    for _ in 0..facilities {
        b.add_facility(
            rng.random_range(50.0..200.0),
            25.0,
            Location::new(rng.random_range(0.0..500.0), rng.random_range(0.0..500.0)),
        );
    }
    for _ in 0..customers {
        b.add_customer(
            rng.random_range(1.0..5.0),
            Location::new(rng.random_range(0.0..500.0), rng.random_range(0.0..500.0)),
        );
    }
    b.build().expect("valid instance")
}

fn bench_neighborhood(c: &mut Criterion) {
    let problem = build_problem(500, 3000, 3);
    let model = InstanceModel::from_problem(&problem).expect("model");
    let state = GreedyOpening::new().build(&model).expect("opening");
    let selector = NeighborhoodSelector::new(50);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    c.bench_function("NeighborhoodSelector::select + formulate (K=50)", |b| {
        b.iter(|| {
            let nb = selector.select(&model, &state, &mut rng);
            let sub = Subproblem::formulate(&model, &nb);
            black_box(sub.program().variables_len());
        })
    });
}

fn bench_small_subproblem(c: &mut Criterion) {
    let problem = build_problem(12, 30, 5);
    let model = InstanceModel::from_problem(&problem).expect("model");
    let state = GreedyOpening::new().build(&model).expect("opening");
    let nb = NeighborhoodSelector::new(3).around(&model, &state, FacilityIndex::new(0));
    let sub = Subproblem::formulate(&model, &nb);

    c.bench_function("EnumerationOptimizer::solve (K=3)", |b| {
        b.iter(|| {
            let out = EnumerationOptimizer::new()
                .solve(black_box(sub.program()), Duration::from_secs(5));
            black_box(out.status());
        })
    });
}

criterion_group!(benches, bench_neighborhood, bench_small_subproblem);
criterion_main!(benches);
