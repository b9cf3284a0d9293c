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

//! Precomputed powers of the collision-decay base.

/// Look-up table for `decay^i`, the probability that a counter at value `i`
/// is decremented when a colliding item arrives.
#[derive(Debug, Clone)]
pub(crate) struct DecayTable {
    decay: f32,
    table: Vec<f32>,
}

impl DecayTable {
    /// Precomputes `decay^i` for `i` in `[0, size)`.
    pub(crate) fn new(decay: f32, size: usize) -> Self {
        let table = (0..size).map(|i| decay.powi(i as i32)).collect();
        Self { decay, table }
    }

    pub(crate) fn decay(&self) -> f32 {
        self.decay
    }

    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `decay^count`.
    ///
    /// Counts below the table length are a direct lookup. Larger counts use
    /// `table[L-1]^(count / (L-1)) * table[count % (L-1)]`, which equals the
    /// direct power up to floating rounding.
    pub(crate) fn probability(&self, count: u32) -> f32 {
        let size = self.table.len() as u32;
        if count < size {
            return self.table[count as usize];
        }
        if size == 1 {
            // A single-entry table leaves no spread for the split; fall back
            // to the direct power.
            return self.decay.powi(count as i32);
        }
        let last = self.table[(size - 1) as usize];
        last.powi((count / (size - 1)) as i32) * self.table[(count % (size - 1)) as usize]
    }

    pub(crate) fn size_bytes(&self) -> usize {
        self.table.len() * std::mem::size_of::<f32>()
    }
}
