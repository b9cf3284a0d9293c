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

use std::collections::HashMap;
use std::mem::size_of;

/// An entry in the top-K heap: an item, its fingerprint, and its count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    fingerprint: u32,
    item: String,
    count: u32,
}

impl Entry {
    pub(crate) fn new(fingerprint: u32, item: String, count: u32) -> Self {
        Self {
            fingerprint,
            item,
            count,
        }
    }

    /// Returns the item's fingerprint.
    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }

    /// Returns the item string.
    pub fn item(&self) -> &str {
        &self.item
    }

    /// Returns the item's estimated count.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub(crate) fn set_count(&mut self, count: u32) {
        self.count = count;
    }
}

/// A min-heap of up to K entries ordered by count, with lexicographic
/// tie-breaking on the item string.
///
/// Entries are stored in a flat array; `index` mirrors it, mapping each item
/// string to its current heap position, and is kept in sync across every
/// swap, push, and pop.
#[derive(Debug, Clone)]
pub struct MinHeap {
    k: usize,
    items: Vec<Entry>,
    index: HashMap<String, usize>,
    stored_keys_bytes: usize,
}

impl MinHeap {
    /// Creates a heap with capacity for up to `k` items.
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0.
    pub fn new(k: usize) -> Self {
        assert!(k >= 1, "k must be at least 1");
        Self {
            k,
            items: Vec::with_capacity(k),
            index: HashMap::with_capacity(k),
            stored_keys_bytes: 0,
        }
    }

    /// Returns the heap's capacity K.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the number of items currently in the heap.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the heap holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if the heap holds K items.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.k
    }

    /// Returns the minimum count in the heap, or 0 if the heap is empty.
    pub fn min(&self) -> u32 {
        self.items.first().map_or(0, Entry::count)
    }

    /// Returns true if the given item is in the heap.
    pub fn contains(&self, item: &str) -> bool {
        self.index.contains_key(item)
    }

    /// Returns the entry for the given item, if present.
    pub fn get(&self, item: &str) -> Option<&Entry> {
        self.index.get(item).map(|&position| &self.items[position])
    }

    /// Returns the entries in heap-array order.
    pub fn entries(&self) -> &[Entry] {
        &self.items
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.items
    }

    /// Inserts or updates an item.
    ///
    /// A full heap ignores counts below the current minimum. Otherwise the
    /// item's count is overwritten in place if it is already tracked, appended
    /// if there is room, or written over the evicted minimum entry.
    ///
    /// Returns whether the item is in the heap afterwards.
    pub fn update(&mut self, item: &str, fingerprint: u32, count: u32) -> bool {
        if count < self.min() && self.is_full() {
            return false;
        }

        if let Some(&position) = self.index.get(item) {
            self.items[position].count = count;
            self.fix(position);
            return true;
        }

        self.stored_keys_bytes += item.len();

        if !self.is_full() {
            let position = self.items.len();
            self.items
                .push(Entry::new(fingerprint, item.to_owned(), count));
            self.index.insert(item.to_owned(), position);
            self.sift_up(position);
            return true;
        }

        // replace the minimum entry at the root
        let evicted = std::mem::replace(
            &mut self.items[0],
            Entry::new(fingerprint, item.to_owned(), count),
        );
        self.stored_keys_bytes -= evicted.item.len();
        self.index.remove(&evicted.item);
        self.index.insert(item.to_owned(), 0);
        self.sift_down(0);
        true
    }

    /// Restores heap order over the whole array, then drops zero-count
    /// entries from the root. Used after bulk count refreshes, where every
    /// stored count may have changed at once.
    pub(crate) fn reinit(&mut self) {
        for position in (0..self.items.len() / 2).rev() {
            self.sift_down(position);
        }
        while self.items.first().is_some_and(|entry| entry.count == 0) {
            self.pop_root();
        }
    }

    /// Resets the heap to the empty state, keeping its capacity.
    pub fn reset(&mut self) {
        self.items.clear();
        self.index.clear();
        self.stored_keys_bytes = 0;
    }

    /// Returns the entries sorted by count descending (ties broken by item
    /// ascending) with the zero-count tail dropped.
    pub(crate) fn sorted_entries(&self) -> Vec<Entry> {
        let mut out = self.items.clone();
        out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.item.cmp(&b.item)));
        while out.last().is_some_and(|entry| entry.count == 0) {
            out.pop();
        }
        out
    }

    /// Returns a conservative estimate of the heap's memory footprint.
    pub fn size_bytes(&self) -> usize {
        let struct_size = size_of::<Self>();
        let entries_size = self.items.capacity() * size_of::<Entry>() + self.stored_keys_bytes;
        let index_size =
            self.index.len() * (size_of::<String>() + size_of::<usize>()) + self.stored_keys_bytes;
        struct_size + entries_size + index_size
    }

    fn pop_root(&mut self) {
        let last = self.items.len() - 1;
        self.swap_entries(0, last);
        if let Some(entry) = self.items.pop() {
            self.stored_keys_bytes -= entry.item.len();
            self.index.remove(&entry.item);
        }
        if !self.items.is_empty() {
            self.sift_down(0);
        }
    }

    fn less(&self, i: usize, j: usize) -> bool {
        let a = &self.items[i];
        let b = &self.items[j];
        if a.count == b.count {
            a.item < b.item
        } else {
            a.count < b.count
        }
    }

    fn swap_entries(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.items.swap(i, j);
        self.index.insert(self.items[i].item.clone(), i);
        self.index.insert(self.items[j].item.clone(), j);
    }

    fn fix(&mut self, position: usize) {
        self.sift_down(position);
        self.sift_up(position);
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.less(position, parent) {
                break;
            }
            self.swap_entries(position, parent);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        loop {
            let mut smallest = position;
            let left = 2 * position + 1;
            let right = 2 * position + 2;
            if left < self.items.len() && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.items.len() && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == position {
                return;
            }
            self.swap_entries(position, smallest);
            position = smallest;
        }
    }
}
