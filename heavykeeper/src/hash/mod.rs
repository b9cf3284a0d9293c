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

//! Item hashing for bucket placement and fingerprints.

mod xxhash;

use self::xxhash::xxhash32;

/// The fingerprint hash seed. An arbitrary non-zero constant, fixed so that
/// fingerprints are stable across sketch instances. A sketch cell is marked
/// empty by a zero *count*, never by a zero fingerprint, so the (rare) item
/// whose fingerprint hashes to zero is still disambiguated correctly.
pub(crate) const FINGERPRINT_SEED: u32 = 4848280;

/// Returns the 32-bit fingerprint of an item.
///
/// The fingerprint disambiguates items that share a counter bucket. It is a
/// plain xxHash32 of the item bytes under a fixed seed, so callers may
/// precompute it for items they expect to look up repeatedly.
pub fn fingerprint(item: &[u8]) -> u32 {
    xxhash32(item, FINGERPRINT_SEED)
}

/// Returns the flat counter-grid index for an item in the given row.
///
/// Each row uses its own hash function, obtained by seeding xxHash32 with the
/// row number. The returned index is row-major into a `depth * width` grid.
pub(crate) fn bucket_index(item: &[u8], row: usize, width: usize) -> usize {
    let column = xxhash32(item, row as u32) as usize % width;
    row * width + column
}
