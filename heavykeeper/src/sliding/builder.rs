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

use crate::common::RandomSource;
use crate::common::XorShift64;
use crate::common::decay::DecayTable;
use crate::sliding::SlidingTopKSketch;
use crate::topk::DEFAULT_DECAY;
use crate::topk::DEFAULT_DECAY_LUT_SIZE;
use crate::topk::default_depth;
use crate::topk::default_width;

/// Builder for [`SlidingTopKSketch`] instances.
///
/// Unset dimensions default to depth `max(3, ⌈ln k⌉)` and width
/// `max(256, ⌊k·ln k⌋)`; the bucket history length defaults to the window
/// size and is silently clamped to `[1, window_size]`.
#[derive(Debug)]
pub struct SlidingTopKSketchBuilder<R = XorShift64> {
    k: usize,
    window_size: usize,
    depth: Option<usize>,
    width: Option<usize>,
    bucket_history_length: Option<usize>,
    decay: f32,
    decay_lut_size: usize,
    random: R,
}

impl SlidingTopKSketchBuilder {
    /// Creates a builder for a sketch tracking the top `k` items over a
    /// window of `window_size` ticks.
    ///
    /// # Panics
    ///
    /// Panics if `k` or `window_size` is 0.
    pub fn new(k: usize, window_size: usize) -> SlidingTopKSketchBuilder {
        assert!(k >= 1, "k must be at least 1");
        assert!(window_size >= 1, "window size must be at least 1");
        SlidingTopKSketchBuilder {
            k,
            window_size,
            depth: None,
            width: None,
            bucket_history_length: None,
            decay: DEFAULT_DECAY,
            decay_lut_size: DEFAULT_DECAY_LUT_SIZE,
            random: XorShift64::default(),
        }
    }
}

impl<R: RandomSource> SlidingTopKSketchBuilder<R> {
    /// Sets the depth (number of hash functions).
    ///
    /// # Panics
    ///
    /// Panics if `depth` is 0.
    pub fn depth(mut self, depth: usize) -> Self {
        assert!(depth >= 1, "depth must be at least 1");
        self.depth = Some(depth);
        self
    }

    /// Sets the width (number of buckets per hash function).
    ///
    /// # Panics
    ///
    /// Panics if `width` is 0.
    pub fn width(mut self, width: usize) -> Self {
        assert!(width >= 1, "width must be at least 1");
        self.width = Some(width);
        self
    }

    /// Sets the number of aged counters kept per bucket. The value is
    /// clamped to `[1, window_size]` when the sketch is built.
    ///
    /// The window estimate is accurate (modulo counter error) with one aged
    /// counter per tick in the window; fewer counters collect the mass of
    /// several ticks in one slot, making aging coarser.
    pub fn bucket_history_length(mut self, length: usize) -> Self {
        self.bucket_history_length = Some(length);
        self
    }

    /// Sets the counter decay probability base applied on collisions.
    ///
    /// # Panics
    ///
    /// Panics if `decay` is not in (0.0, 1.0).
    pub fn decay(mut self, decay: f32) -> Self {
        assert!(
            decay > 0.0 && decay < 1.0,
            "decay must be between 0.0 and 1.0 (exclusive)"
        );
        self.decay = decay;
        self
    }

    /// Sets the decay look-up table size.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    pub fn decay_lut_size(mut self, size: usize) -> Self {
        assert!(size >= 1, "decay LUT size must be at least 1");
        self.decay_lut_size = size;
        self
    }

    /// Replaces the random source driving the collision-decay Bernoulli
    /// trials. Mainly useful to make tests deterministic.
    pub fn random_source<S: RandomSource>(self, random: S) -> SlidingTopKSketchBuilder<S> {
        SlidingTopKSketchBuilder {
            k: self.k,
            window_size: self.window_size,
            depth: self.depth,
            width: self.width,
            bucket_history_length: self.bucket_history_length,
            decay: self.decay,
            decay_lut_size: self.decay_lut_size,
            random,
        }
    }

    /// Builds the sketch.
    pub fn build(self) -> SlidingTopKSketch<R> {
        let depth = self.depth.unwrap_or_else(|| default_depth(self.k).max(3));
        let width = self.width.unwrap_or_else(|| default_width(self.k).max(256));
        let bucket_history_length = self
            .bucket_history_length
            .unwrap_or(self.window_size)
            .clamp(1, self.window_size);
        SlidingTopKSketch::from_parts(
            self.k,
            width,
            depth,
            self.window_size,
            bucket_history_length,
            DecayTable::new(self.decay, self.decay_lut_size),
            self.random,
        )
    }
}
