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

//! # HeavyKeeper top-K sketches
//!
//! Probabilistic data-stream engines that maintain, in sublinear space, an
//! approximate set of the K most frequent items observed in a stream of
//! string-keyed events:
//!
//! - [`topk`]: a plain top-K sketch over the full observation history.
//! - [`sliding`]: a sliding-window variant that forgets counts older than a
//!   window of N logical time units.
//!
//! Both are instantiations of the HeavyKeeper family: instead of incrementing
//! a counter on every hash hit, a colliding item decrements the resident
//! counter with probability `decay^count`, which starves mouse flows while
//! elephant flows keep their counters. Estimates therefore never exceed the
//! true frequency. The tracked top-K set lives in a count-keyed min-heap
//! ([`heap`]) whose root is the admission threshold.
//!
//! Sketches are single-owner and not internally synchronized; wrap a sketch
//! in your own lock if it must be shared across threads.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod common;
pub mod hash;
pub mod heap;
pub mod sliding;
pub mod topk;
