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

//! A min-heap that keeps track of the top-K items in a sketch.
//!
//! The root of the heap is the smallest tracked count, which doubles as the
//! admission threshold: an item whose estimated count falls below it cannot
//! enter a full heap. An auxiliary map from item to heap position gives O(1)
//! membership checks and O(log K) updates.
//!
//! # Usage
//!
//! ```rust
//! use heavykeeper::heap::MinHeap;
//!
//! let mut heap = MinHeap::new(2);
//! heap.update("a", 1, 10);
//! heap.update("b", 2, 5);
//! heap.update("c", 3, 8); // evicts "b", the minimum
//!
//! assert!(heap.contains("a"));
//! assert!(heap.contains("c"));
//! assert!(!heap.contains("b"));
//! assert!(!heap.update("d", 4, 1)); // below the admission threshold
//! ```

mod min_heap;

pub use self::min_heap::Entry;
pub use self::min_heap::MinHeap;
