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
use crate::topk::TopKSketch;

pub(crate) const DEFAULT_DECAY: f32 = 0.9;
pub(crate) const DEFAULT_DECAY_LUT_SIZE: usize = 256;

pub(crate) fn default_depth(k: usize) -> usize {
    (k as f64).ln().ceil().max(0.0) as usize
}

pub(crate) fn default_width(k: usize) -> usize {
    (k as f64 * (k as f64).ln()).floor().max(0.0) as usize
}

/// Builder for [`TopKSketch`] instances.
///
/// Unset dimensions default to depth `max(3, ⌈ln k⌉)` and width
/// `max(256, ⌊k·ln k⌋)`.
#[derive(Debug)]
pub struct TopKSketchBuilder<R = XorShift64> {
    k: usize,
    depth: Option<usize>,
    width: Option<usize>,
    decay: f32,
    decay_lut_size: usize,
    random: R,
}

impl TopKSketchBuilder {
    /// Creates a builder for a sketch tracking the top `k` items.
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0.
    pub fn new(k: usize) -> TopKSketchBuilder {
        assert!(k >= 1, "k must be at least 1");
        TopKSketchBuilder {
            k,
            depth: None,
            width: None,
            decay: DEFAULT_DECAY,
            decay_lut_size: DEFAULT_DECAY_LUT_SIZE,
            random: XorShift64::default(),
        }
    }
}

impl<R: RandomSource> TopKSketchBuilder<R> {
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
    pub fn random_source<S: RandomSource>(self, random: S) -> TopKSketchBuilder<S> {
        TopKSketchBuilder {
            k: self.k,
            depth: self.depth,
            width: self.width,
            decay: self.decay,
            decay_lut_size: self.decay_lut_size,
            random,
        }
    }

    /// Builds the sketch.
    pub fn build(self) -> TopKSketch<R> {
        let depth = self.depth.unwrap_or_else(|| default_depth(self.k).max(3));
        let width = self.width.unwrap_or_else(|| default_width(self.k).max(256));
        TopKSketch::from_parts(
            self.k,
            width,
            depth,
            DecayTable::new(self.decay, self.decay_lut_size),
            self.random,
        )
    }
}
