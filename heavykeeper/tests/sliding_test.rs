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

use std::collections::HashMap;
use std::mem::size_of;

use googletest::assert_that;
use googletest::prelude::eq;
use googletest::prelude::unordered_elements_are;
use heavykeeper::common::RandomSource;
use heavykeeper::common::XorShift64;
use heavykeeper::sliding::SlidingTopKSketch;

fn assert_top(sketch: &SlidingTopKSketch, expected: &[(&str, u32)]) {
    let top = sketch.sorted_slice();
    let actual: Vec<(&str, u32)> = top.iter().map(|e| (e.item(), e.count())).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_default_parameters() {
    let sketch = SlidingTopKSketch::new(10, 3);

    assert_eq!(sketch.k(), 10);
    assert_eq!(sketch.window_size(), 3);
    assert_eq!(sketch.bucket_history_length(), 3);
    assert_eq!(sketch.depth(), 3);
    assert_eq!(sketch.width(), 256);
    assert_eq!(sketch.decay(), 0.9);
    assert_eq!(sketch.decay_lut_len(), 256);
}

#[test]
fn test_with_options() {
    let sketch = SlidingTopKSketch::builder(10, 3)
        .depth(5)
        .width(300)
        .decay(0.8)
        .decay_lut_size(1024)
        .bucket_history_length(3)
        .build();

    assert_eq!(sketch.window_size(), 3);
    assert_eq!(sketch.depth(), 5);
    assert_eq!(sketch.width(), 300);
    assert_eq!(sketch.decay(), 0.8);
    assert_eq!(sketch.decay_lut_len(), 1024);
    assert_eq!(sketch.bucket_history_length(), 3);
}

#[test]
fn test_bucket_history_length_is_clamped() {
    let long = SlidingTopKSketch::builder(10, 3)
        .bucket_history_length(10)
        .build();
    assert_eq!(long.bucket_history_length(), 3);

    let short = SlidingTopKSketch::builder(10, 3)
        .bucket_history_length(0)
        .build();
    assert_eq!(short.bucket_history_length(), 1);
}

#[test]
#[should_panic(expected = "window size must be at least 1")]
fn test_zero_window_panics() {
    let _ = SlidingTopKSketch::new(10, 0);
}

#[test]
fn test_top_k_simple() {
    let mut sketch = SlidingTopKSketch::new(3, 10);

    sketch.add("X", 5);
    sketch.add("Y", 3);
    sketch.add("Z", 2);
    sketch.incr("Y");

    assert_top(&sketch, &[("X", 5), ("Y", 4), ("Z", 2)]);
    for (item, count) in [("X", 5), ("Y", 4), ("Z", 2)] {
        assert!(sketch.query(item), "expected {item} in the top-K set");
        assert_eq!(sketch.count(item), count);
    }
}

#[test]
fn test_window_decay() {
    let mut sketch = SlidingTopKSketch::new(2, 2);

    sketch.add("X", 3);
    sketch.add("Y", 2);
    sketch.add("Z", 1);
    assert_top(&sketch, &[("X", 3), ("Y", 2)]);

    // A full window passes; everything above ages out.
    sketch.tick();
    sketch.tick();

    sketch.add("Y", 2);
    sketch.add("Z", 3);
    assert_top(&sketch, &[("Z", 3), ("Y", 2)]);
}

#[test]
fn test_top_k_sliding_trace() {
    let mut sketch = SlidingTopKSketch::builder(2, 2)
        .width(10)
        .depth(2)
        .bucket_history_length(2)
        .build();

    //t  0
    //
    //X  3
    //Y  2
    //Z  1
    // [ _ _ ] {x:3,y:2}
    sketch.add("X", 3);
    sketch.add("Y", 2);
    sketch.add("Z", 1);
    assert_top(&sketch, &[("X", 3), ("Y", 2)]);
    sketch.tick();

    //t  0 1
    //
    //X  3 2
    //Y  2 2
    //Z  1 1
    // [ _ _ ]   {x:5,y:4}
    sketch.add("X", 2);
    sketch.add("Y", 2);
    sketch.add("Z", 1);
    assert_top(&sketch, &[("X", 5), ("Y", 4)]);
    sketch.tick();

    //t  0 1 2
    //
    //X  3 2 0
    //Y  2 2 1
    //Z  1 1 3
    //   [ _ _ ] {z:4,y:3}
    sketch.add("Y", 1);
    sketch.add("Z", 3);
    assert_top(&sketch, &[("Z", 4), ("Y", 3)]);
    sketch.tick();

    //t  0 1 2 3
    //
    //X  3 2 0 0
    //Y  2 2 1 1
    //Z  1 1 3 3
    //     [ _ _ ] {z:6,y:2}
    sketch.add("Y", 1);
    sketch.add("Z", 3);
    assert_top(&sketch, &[("Z", 6), ("Y", 2)]);
    sketch.tick();

    //t  0 1 2 3 4
    //
    //X  3 2 0 0 0
    //Y  2 2 1 1 0
    //Z  1 1 3 3 0
    //       [ _ _ ] {z:3,y:1}
    assert_top(&sketch, &[("Z", 3), ("Y", 1)]);
    sketch.tick();

    //t  0 1 2 3 4 5
    //
    //X  3 2 0 0 0 1
    //Y  2 2 1 1 0 0
    //Z  1 1 3 3 0 0
    //         [ _ _ ] {x:1}
    sketch.add("X", 1);
    assert_top(&sketch, &[("X", 1)]);
}

#[test]
fn test_heap_refresh_drops_aged_out_items() {
    let mut sketch = SlidingTopKSketch::new(3, 4);
    sketch.add("X", 7);
    sketch.add("Y", 2);
    assert!(sketch.query("X"));

    // A full window of ticks in one call ages every bucket d times,
    // expiring all stored mass.
    sketch.ticks(4);

    assert!(sketch.sorted_slice().is_empty());
    assert!(!sketch.query("X"));
    assert!(!sketch.query("Y"));
    assert_eq!(sketch.count("X"), 0);
    assert_eq!(sketch.count("Y"), 0);
}

#[test]
fn test_aging_cursor_completes_the_grid() {
    let mut sketch = SlidingTopKSketch::builder(2, 4)
        .width(10)
        .depth(2)
        .bucket_history_length(2)
        .build();
    let grid = sketch.width() * sketch.depth();

    assert_eq!(sketch.aging_cursor(), 0);

    // One full window advances the cursor by d·m positions: a whole number
    // of laps, aging every bucket exactly d times.
    sketch.ticks(sketch.window_size());
    assert_eq!(sketch.aging_cursor() % grid, 0);

    // A single tick walks d·m/N buckets, half a lap here.
    sketch.tick();
    assert_eq!(sketch.aging_cursor(), grid / 2);
}

#[test]
fn test_ticks_zero_is_a_no_op() {
    let mut sketch = SlidingTopKSketch::new(2, 3);
    sketch.add("X", 2);

    sketch.ticks(0);

    assert_eq!(sketch.aging_cursor(), 0);
    assert_top(&sketch, &[("X", 2)]);
}

#[test]
fn test_small_tick_still_ages_one_bucket() {
    // d·m = 2 is far below the window size, so the floor would be zero;
    // one bucket must age anyway to guarantee progress.
    let mut sketch = SlidingTopKSketch::builder(1, 10)
        .width(2)
        .depth(1)
        .bucket_history_length(1)
        .build();

    sketch.tick();
    assert_eq!(sketch.aging_cursor(), 1);
}

#[test]
fn test_iter() {
    let sketch = SlidingTopKSketch::new(3, 3);
    assert_eq!(sketch.iter().count(), 0);

    let mut sketch = SlidingTopKSketch::new(3, 3);
    for (i, item) in ["item1", "item2", "item3", "item4"].iter().enumerate() {
        sketch.add(item, i as u32);
    }

    let iterated: Vec<String> = sketch.iter().map(|entry| entry.item().to_string()).collect();
    assert_that!(
        iterated,
        unordered_elements_are![eq("item2"), eq("item3"), eq("item4")]
    );
    assert_eq!(sketch.iter().take(1).count(), 1);
}

#[test]
fn test_reset() {
    let mut sketch = SlidingTopKSketch::new(3, 3);
    sketch.incr("item1");
    sketch.incr("item2");
    sketch.tick();

    sketch.reset();

    assert_eq!(sketch.aging_cursor(), 0);
    assert_eq!(sketch.count("item1"), 0);
    assert!(sketch.sorted_slice().is_empty());

    sketch.add("item3", 2);
    assert_eq!(sketch.count("item3"), 2);
}

#[test]
fn test_size_bytes() {
    let sketch = SlidingTopKSketch::new(10, 10);

    let size = sketch.size_bytes();
    assert!(size > 0);
    let counters = sketch.width()
        * sketch.depth()
        * (1 + sketch.bucket_history_length())
        * size_of::<u32>();
    assert!(
        size > counters,
        "size should cover at least the counter rings and fingerprints, got {size}"
    );
}

#[test]
fn test_never_overestimates_within_window() {
    let window = 3;
    let mut sketch = SlidingTopKSketch::builder(10, window)
        .width(256)
        .depth(1)
        .random_source(XorShift64::seeded(7))
        .build();

    let tracked = [
        ("high_freq", [500u32, 500, 500, 0, 0, 0]),
        ("medium_freq", [100, 200, 300, 0, 0, 0]),
        ("low_freq", [50, 50, 100, 0, 0, 0]),
    ];

    let mut noise = XorShift64::seeded(13);
    let mut history: Vec<HashMap<&str, u32>> = Vec::new();

    for step in 0..6 {
        sketch.tick();
        let mut truth_this_step: HashMap<&str, u32> = HashMap::new();

        for &(item, increments) in &tracked {
            sketch.add(item, increments[step]);
            *truth_this_step.entry(item).or_default() += increments[step];
        }

        // Noise items decay the tracked items' counters on collisions.
        let noise_budget = if step < 3 { 2000 } else { 0 };
        for _ in 0..noise_budget {
            let item = format!("noise_item_{}", noise.next_u64() % 1000);
            sketch.incr(&item);
        }

        history.push(truth_this_step);

        // Only under-estimation errors may occur: the estimate never
        // exceeds the item's true mass within the current window.
        let window_start = (step + 1).saturating_sub(window);
        for (item, _) in &tracked {
            let window_truth: u32 = history[window_start..]
                .iter()
                .map(|step_truth| step_truth.get(item).copied().unwrap_or(0))
                .sum();
            assert!(
                sketch.count(item) <= window_truth,
                "step {step}: count({item}) = {} exceeds window total {window_truth}",
                sketch.count(item)
            );
        }
    }
}
