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

//! HeavyKeeper top-K sketch over the full observation history.
//!
//! The sketch tracks the approximate K most frequent items in a stream of
//! string-keyed events using a depth × width grid of (fingerprint, counter)
//! buckets. On a bucket collision the resident counter is decremented with
//! probability `decay^count`, so small flows decay away while heavy hitters
//! keep their counters. Estimates only ever under-count: for every item,
//! `count(item)` is at most the item's true frequency.
//!
//! # Usage
//!
//! ```rust
//! use heavykeeper::topk::TopKSketch;
//!
//! let mut sketch = TopKSketch::new(3);
//! sketch.add("apple", 5);
//! sketch.add("banana", 3);
//! sketch.incr("banana");
//!
//! assert!(sketch.query("apple"));
//! assert_eq!(sketch.count("banana"), 4);
//!
//! let top = sketch.sorted_slice();
//! assert_eq!(top[0].item(), "apple");
//! ```
//!
//! # Configuration
//!
//! ```rust
//! use heavykeeper::topk::TopKSketch;
//!
//! let sketch = TopKSketch::builder(10)
//!     .width(2048)
//!     .depth(5)
//!     .decay(0.8)
//!     .build();
//!
//! assert_eq!(sketch.width(), 2048);
//! assert_eq!(sketch.depth(), 5);
//! ```

mod builder;
mod sketch;

pub use self::builder::TopKSketchBuilder;
pub use self::sketch::TopKSketch;

pub(crate) use self::builder::DEFAULT_DECAY;
pub(crate) use self::builder::DEFAULT_DECAY_LUT_SIZE;
pub(crate) use self::builder::default_depth;
pub(crate) use self::builder::default_width;
