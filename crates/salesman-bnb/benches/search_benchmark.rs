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


use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use salesman_bnb::engine::SearchEngine;
use salesman_model::{
    index::CityIndex,
    matrix::{CostMatrix, CostMatrixBuilder},
};
use std::hint::black_box;

/// Builds an asymmetric instance with costs in `1..1000` and a zero diagonal.
fn random_instance(num_cities: usize, seed: u64) -> CostMatrix<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut builder = CostMatrixBuilder::new(num_cities);
    for from in (0..num_cities).map(CityIndex::new) {
        for to in (0..num_cities).map(CityIndex::new) {
            if from != to {
                builder.set_cost(from, to, rng.gen_range(1..1000));
            }
        }
    }

    builder
        .build()
        .unwrap_or_else(|e| panic!("Failed to build benchmark instance: {}", e))
}

fn bench_search_engine(c: &mut Criterion) {
    let max_workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let mut group = c.benchmark_group("search_benchmark");
    group.sample_size(10);

    for num_cities in [8, 10, 11] {
        let matrix = random_instance(num_cities, 0x5eed + num_cities as u64);
        group.throughput(Throughput::Elements(num_cities as u64));

        let mut worker_counts: Vec<usize> = [1, 2, 4, max_workers]
            .into_iter()
            .filter(|&w| w <= max_workers)
            .collect();
        worker_counts.dedup();

        for workers in worker_counts {
            let engine = SearchEngine::new(workers);
            group.bench_with_input(
                BenchmarkId::new(format!("n{}", num_cities), workers),
                &matrix,
                |b, matrix| {
                    b.iter(|| {
                        let outcome = engine.solve(black_box(matrix));
                        if outcome.tour().is_none() {
                            panic!("Benchmark configuration error: no tour found on a feasible instance.");
                        }
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_search_engine);
criterion_main!(benches);
