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

use std::mem::size_of;

use crate::common::RandomSource;
use crate::common::XorShift64;
use crate::common::decay::DecayTable;
use crate::hash;
use crate::heap::Entry;
use crate::heap::MinHeap;
use crate::sliding::SlidingTopKSketchBuilder;
use crate::sliding::bucket::Bucket;

/// Sliding-window HeavyKeeper top-K sketch.
///
/// See the [module docs](crate::sliding) for the algorithm outline and usage.
/// The type is generic over the [`RandomSource`] driving collision decay;
/// the default is the process-seeded [`XorShift64`].
#[derive(Debug, Clone)]
pub struct SlidingTopKSketch<R = XorShift64> {
    k: usize,
    width: usize,
    depth: usize,
    window_size: usize,
    bucket_history_length: usize,
    decay_table: DecayTable,
    next_bucket_to_expire: usize,
    buckets: Vec<Bucket>,
    heap: MinHeap,
    random: R,
}

impl SlidingTopKSketch {
    /// Creates a sketch tracking the top `k` items over a window of
    /// `window_size` ticks, with default parameters: depth `max(3, ⌈ln k⌉)`,
    /// width `max(256, ⌊k·ln k⌋)`, decay 0.9, a 256-entry decay look-up
    /// table, and one aged counter per tick in the window.
    ///
    /// # Panics
    ///
    /// Panics if `k` or `window_size` is 0.
    pub fn new(k: usize, window_size: usize) -> SlidingTopKSketch {
        SlidingTopKSketchBuilder::new(k, window_size).build()
    }

    /// Returns a builder for a sketch tracking the top `k` items over a
    /// window of `window_size` ticks.
    ///
    /// # Panics
    ///
    /// Panics if `k` or `window_size` is 0.
    pub fn builder(k: usize, window_size: usize) -> SlidingTopKSketchBuilder {
        SlidingTopKSketchBuilder::new(k, window_size)
    }
}

impl<R: RandomSource> SlidingTopKSketch<R> {
    pub(crate) fn from_parts(
        k: usize,
        width: usize,
        depth: usize,
        window_size: usize,
        bucket_history_length: usize,
        decay_table: DecayTable,
        random: R,
    ) -> Self {
        Self {
            k,
            width,
            depth,
            window_size,
            bucket_history_length,
            decay_table,
            next_bucket_to_expire: 0,
            buckets: (0..width * depth)
                .map(|_| Bucket::new(bucket_history_length))
                .collect(),
            heap: MinHeap::new(k),
            random,
        }
    }

    /// Returns the number of top items tracked.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the number of buckets per hash function.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of hash functions.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the window length in ticks.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the number of aged counters kept per bucket.
    pub fn bucket_history_length(&self) -> usize {
        self.bucket_history_length
    }

    /// Returns the collision-decay probability base.
    pub fn decay(&self) -> f32 {
        self.decay_table.decay()
    }

    /// Returns the size of the decay look-up table.
    pub fn decay_lut_len(&self) -> usize {
        self.decay_table.len()
    }

    /// Returns the grid index of the next bucket the aging walk will visit.
    /// The cursor wraps monotonically and is part of the sketch state.
    pub fn aging_cursor(&self) -> usize {
        self.next_bucket_to_expire
    }

    /// Counts a single instance of the given item.
    ///
    /// Returns whether the item is in the top K afterwards.
    pub fn incr(&mut self, item: &str) -> bool {
        self.add(item, 1)
    }

    /// Increments the given item's count by `increment`.
    ///
    /// Fresh mass lands in the current head slot of each touched bucket ring
    /// and expires once the aging walk has rotated the full ring past it.
    /// An increment of 0 leaves the sketch untouched and reports the item's
    /// current top-K membership.
    ///
    /// Returns whether the item is in the top K afterwards.
    pub fn add(&mut self, item: &str, increment: u32) -> bool {
        if increment == 0 {
            return self.heap.contains(item);
        }

        let item_bytes = item.as_bytes();
        let fingerprint = hash::fingerprint(item_bytes);
        let mut max_sum = 0u32;

        for row in 0..self.depth {
            let position = hash::bucket_index(item_bytes, row, self.width);
            let bucket = &mut self.buckets[position];

            if bucket.is_empty() {
                // empty bucket: claim it outright
                bucket.fill(fingerprint, increment);
                max_sum = max_sum.max(increment);
            } else if bucket.fingerprint() == fingerprint {
                // this item's bucket
                bucket.accumulate(increment);
                max_sum = max_sum.max(bucket.sum());
            } else {
                // another item's bucket: decay it, one Bernoulli trial per
                // increment, and claim it if the ring drains to zero
                let mut remaining = increment;
                while remaining > 0 {
                    let decay = self.decay_table.probability(bucket.sum());
                    if self.random.next_f32() < decay {
                        bucket.decay_one();
                        if bucket.is_empty() {
                            bucket.fill(fingerprint, remaining);
                            max_sum = max_sum.max(remaining);
                            break;
                        }
                    }
                    remaining -= 1;
                }
            }
        }

        self.heap.update(item, fingerprint, max_sum)
    }

    /// Advances time by one tick (of the `window_size` ticks in a window).
    pub fn tick(&mut self) {
        self.ticks(1);
    }

    /// Advances time by `n` ticks (of the `window_size` ticks in a window).
    ///
    /// The aging walk visits `⌊n·d·m/N⌋` buckets (at least one for `n > 0`),
    /// where `d` is the bucket history length, `m` the grid size, and `N` the
    /// window size, so that a full window's worth of ticks ages every bucket
    /// exactly `d` times. Heap counts are refreshed afterwards; items whose
    /// counts aged to zero drop out of the top-K set. `ticks(0)` is a no-op.
    pub fn ticks(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let m = self.buckets.len();
        let d = self.bucket_history_length;
        let buckets_to_age =
            (((n as u64 * d as u64 * m as u64) / self.window_size as u64).max(1)) as usize;

        let mut cursor = self.next_bucket_to_expire;
        for _ in 0..buckets_to_age {
            self.buckets[cursor].age();
            cursor += 1;
            if cursor == m {
                cursor = 0;
            }
        }
        self.next_bucket_to_expire = cursor;
        self.recount_heap_entries();
    }

    /// Returns the estimated count of the given item within the current
    /// window.
    pub fn count(&self, item: &str) -> u32 {
        if let Some(entry) = self.heap.get(item) {
            return entry.count();
        }

        let item_bytes = item.as_bytes();
        let fingerprint = hash::fingerprint(item_bytes);
        let mut max_sum = 0u32;
        for row in 0..self.depth {
            let bucket = &self.buckets[hash::bucket_index(item_bytes, row, self.width)];
            if bucket.fingerprint() == fingerprint {
                max_sum = max_sum.max(bucket.sum());
            }
        }
        max_sum
    }

    /// Returns whether the given item is in the top K items by count.
    pub fn query(&self, item: &str) -> bool {
        self.heap.contains(item)
    }

    /// Iterates over the top-K entries in their stored heap order, skipping
    /// vacant (zero-count) slots.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.heap.entries().iter().filter(|entry| entry.count() > 0)
    }

    /// Returns the top-K entries sorted by count descending, ties broken by
    /// item ascending.
    pub fn sorted_slice(&self) -> Vec<Entry> {
        self.heap.sorted_entries()
    }

    /// Resets the sketch to an empty state without deallocating.
    pub fn reset(&mut self) {
        self.next_bucket_to_expire = 0;
        for bucket in &mut self.buckets {
            bucket.reset();
        }
        self.heap.reset();
    }

    /// Returns a conservative estimate of the sketch's memory footprint.
    pub fn size_bytes(&self) -> usize {
        let bucket_size = size_of::<Bucket>() + self.bucket_history_length * size_of::<u32>();
        size_of::<Self>()
            + self.buckets.len() * bucket_size
            + self.decay_table.size_bytes()
            + self.heap.size_bytes()
    }

    /// Recomputes each heap entry's count from its buckets, then rebuilds the
    /// heap, dropping entries whose counts aged away entirely.
    fn recount_heap_entries(&mut self) {
        let Self {
            heap,
            buckets,
            depth,
            width,
            ..
        } = self;

        // O(k * depth)
        for entry in heap.entries_mut() {
            if entry.count() == 0 {
                continue;
            }
            let fingerprint = entry.fingerprint();
            let item_bytes = entry.item().as_bytes();
            let mut max_sum = 0u32;
            for row in 0..*depth {
                let bucket = &buckets[hash::bucket_index(item_bytes, row, *width)];
                if bucket.fingerprint() == fingerprint {
                    max_sum = max_sum.max(bucket.sum());
                }
            }
            entry.set_count(max_sum);
        }

        // O(k)
        heap.reinit();
    }
}
