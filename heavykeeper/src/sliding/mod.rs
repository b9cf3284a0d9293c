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

//! Sliding-window HeavyKeeper top-K sketch.
//!
//! This variant forgets counts older than a window of N logical time units
//! ("ticks"). Each bucket counter is replaced by a short ring of aged
//! counters, per the Sliding Sketch framework described in "A Sketch
//! Framework for Approximate Data Stream Processing in Sliding Windows"
//! (<https://yangtonghome.github.io/uploads/SlidingSketch_TKDE2022_final.pdf>):
//! fresh mass accumulates in the ring's head slot, and [`tick`] ages a fixed
//! share of buckets so a full window of ticks expires the oldest slot of
//! every ring exactly once per rotation.
//!
//! [`tick`]: SlidingTopKSketch::tick
//!
//! # Usage
//!
//! ```rust
//! use heavykeeper::sliding::SlidingTopKSketch;
//!
//! // Track the top 3 items over a window of 10 ticks.
//! let mut sketch = SlidingTopKSketch::new(3, 10);
//! sketch.add("X", 5);
//! sketch.add("Y", 3);
//! sketch.incr("Y");
//!
//! assert!(sketch.query("X"));
//! assert_eq!(sketch.count("X"), 5);
//! assert_eq!(sketch.count("Y"), 4);
//!
//! // Advance time; counts survive until they rotate out of the window.
//! sketch.tick();
//! let top = sketch.sorted_slice();
//! assert_eq!(top[0].item(), "X");
//! ```

mod bucket;
mod builder;
mod sketch;

pub use self::builder::SlidingTopKSketchBuilder;
pub use self::sketch::SlidingTopKSketch;
