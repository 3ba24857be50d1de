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
use facloc_model::prelude::{Problem, ProblemBuilder};
use facloc_solver::{model::instance::InstanceModel, opening::greedy::GreedyOpening};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

/// Uniform random instance on a 1000 x 1000 square with ample capacity.
fn build_problem(facilities: usize, customers: usize, seed: u64) -> Problem {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut b = ProblemBuilder::with_capacities(facilities, customers);
    let capacity = (customers as f64 * 10.0) / facilities as f64 * 2.0;
    for _ in 0..facilities {
        b.add_facility(
            rng.random_range(100.0..1000.0),
            capacity,
            Location::new(rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)),
        );
    }
    for _ in 0..customers {
        b.add_customer(
            rng.random_range(1.0..10.0),
            Location::new(rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)),
        );
    }
    b.build().expect("valid instance")
}

fn bench_model_and_opening(c: &mut Criterion) {
    let problem = build_problem(200, 2000, 7);

    c.bench_function("InstanceModel::from_problem (200 x 2000)", |b| {
        b.iter(|| {
            let model = InstanceModel::from_problem(black_box(&problem)).expect("model");
            black_box(model.facilities_len());
        })
    });

    let model = InstanceModel::from_problem(&problem).expect("model");
    c.bench_function("GreedyOpening::build (200 x 2000)", |b| {
        b.iter(|| {
            let state = GreedyOpening::new().build(black_box(&model)).expect("opening");
            black_box(state.value());
        })
    });
}

criterion_group!(benches, bench_model_and_opening);
criterion_main!(benches);
