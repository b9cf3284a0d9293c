// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Benchmarks for the heavykeeper sketches.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use heavykeeper::common::RandomSource;
use heavykeeper::common::XorShift64;
use heavykeeper::sliding::SlidingTopKSketch;
use heavykeeper::topk::TopKSketch;

fn generate_items(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("item{i}")).collect()
}

fn bench_topk_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("topk_add");
    let items = generate_items(2048);

    group.bench_function("k1000_w3000_d3", |b| {
        let mut sketch = TopKSketch::builder(1000)
            .width(3000)
            .depth(3)
            .decay_lut_size(1024)
            .build();
        let mut i = 0usize;
        b.iter(|| {
            let position = i % items.len();
            sketch.add(black_box(&items[position]), position as u32);
            i += 1;
        });
    });

    group.finish();
}

fn bench_sliding(c: &mut Criterion) {
    let mut group = c.benchmark_group("sliding");
    let items = generate_items(100_000);
    let mut random = XorShift64::seeded(1);

    for (width, history) in [(1024, 50), (1024, 100), (8192, 100)] {
        let mut sketch = SlidingTopKSketch::builder(100, 100)
            .depth(3)
            .width(width)
            .bucket_history_length(history)
            .build();

        group.bench_function(format!("add_w{width}_hist{history}"), |b| {
            b.iter(|| {
                let item = &items[(random.next_u64() as usize) % items.len()];
                let increment = (random.next_u64() % 10) as u32;
                sketch.add(black_box(item), increment);
            });
        });

        group.bench_function(format!("count_w{width}_hist{history}"), |b| {
            b.iter(|| {
                let item = &items[(random.next_u64() as usize) % items.len()];
                black_box(sketch.count(black_box(item)));
            });
        });

        group.bench_function(format!("tick_w{width}_hist{history}"), |b| {
            b.iter(|| sketch.tick());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_topk_add, bench_sliding);
criterion_main!(benches);
