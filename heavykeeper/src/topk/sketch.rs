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
use crate::topk::TopKSketchBuilder;

/// One cell of the counter grid: the resident item's fingerprint and its
/// counter. A zero count marks the cell empty; the fingerprint value alone
/// never does.
#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    fingerprint: u32,
    count: u32,
}

/// HeavyKeeper top-K sketch over the full observation history.
///
/// See the [module docs](crate::topk) for the algorithm outline and usage.
/// The type is generic over the [`RandomSource`] driving collision decay;
/// the default is the process-seeded [`XorShift64`].
#[derive(Debug, Clone)]
pub struct TopKSketch<R = XorShift64> {
    k: usize,
    width: usize,
    depth: usize,
    decay_table: DecayTable,
    buckets: Vec<Bucket>,
    heap: MinHeap,
    random: R,
}

impl TopKSketch {
    /// Creates a sketch tracking the top `k` items with default parameters:
    /// depth `max(3, ⌈ln k⌉)`, width `max(256, ⌊k·ln k⌋)`, decay 0.9, and a
    /// 256-entry decay look-up table.
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0.
    pub fn new(k: usize) -> TopKSketch {
        TopKSketchBuilder::new(k).build()
    }

    /// Returns a builder for a sketch tracking the top `k` items.
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0.
    pub fn builder(k: usize) -> TopKSketchBuilder {
        TopKSketchBuilder::new(k)
    }
}

impl<R: RandomSource> TopKSketch<R> {
    pub(crate) fn from_parts(
        k: usize,
        width: usize,
        depth: usize,
        decay_table: DecayTable,
        random: R,
    ) -> Self {
        Self {
            k,
            width,
            depth,
            decay_table,
            buckets: vec![Bucket::default(); width * depth],
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

    /// Returns the collision-decay probability base.
    pub fn decay(&self) -> f32 {
        self.decay_table.decay()
    }

    /// Returns the size of the decay look-up table.
    pub fn decay_lut_len(&self) -> usize {
        self.decay_table.len()
    }

    /// Counts a single instance of the given item.
    ///
    /// Returns whether the item is in the top K afterwards.
    pub fn incr(&mut self, item: &str) -> bool {
        self.add(item, 1)
    }

    /// Increments the given item's count by `increment`.
    ///
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
        let mut max_count = 0u32;

        for row in 0..self.depth {
            let position = hash::bucket_index(item_bytes, row, self.width);
            let bucket = &mut self.buckets[position];

            if bucket.count == 0 {
                // empty bucket: claim it outright
                bucket.fingerprint = fingerprint;
                bucket.count = increment;
                max_count = max_count.max(increment);
            } else if bucket.fingerprint == fingerprint {
                // this item's bucket
                bucket.count = bucket.count.wrapping_add(increment);
                max_count = max_count.max(bucket.count);
            } else {
                // another item's bucket: decay it, one Bernoulli trial per
                // increment, and claim it if the counter reaches zero
                let mut count = bucket.count;
                let mut remaining = increment;
                while remaining > 0 {
                    let decay = self.decay_table.probability(count);
                    if self.random.next_f32() < decay {
                        count -= 1;
                        if count == 0 {
                            bucket.fingerprint = fingerprint;
                            count = remaining;
                            max_count = max_count.max(count);
                            break;
                        }
                    }
                    remaining -= 1;
                }
                bucket.count = count;
            }
        }

        self.heap.update(item, fingerprint, max_count)
    }

    /// Returns the estimated count of the given item.
    pub fn count(&self, item: &str) -> u32 {
        if let Some(entry) = self.heap.get(item) {
            return entry.count();
        }

        let item_bytes = item.as_bytes();
        let fingerprint = hash::fingerprint(item_bytes);
        let mut max_count = 0u32;
        for row in 0..self.depth {
            let bucket = &self.buckets[hash::bucket_index(item_bytes, row, self.width)];
            if bucket.fingerprint == fingerprint {
                max_count = max_count.max(bucket.count);
            }
        }
        max_count
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
        self.buckets.fill(Bucket::default());
        self.heap.reset();
    }

    /// Returns a conservative estimate of the sketch's memory footprint.
    pub fn size_bytes(&self) -> usize {
        size_of::<Self>()
            + self.buckets.len() * size_of::<Bucket>()
            + self.decay_table.size_bytes()
            + self.heap.size_bytes()
    }
}
