// Copyright (c) 2026 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Binary heap implementation

use crate::collections::ItemPriQueue;

/// Heap item information.
struct BinHeapItem<K, V> {
    /// The key associated with this item.
    key: K,
    /// The value (priority) of the item.
    value: V,
    /// Position of this element on the heap, `None` if it has been removed.
    pos: Option<usize>,
}

/// Simple binary heap data structure.
///
/// Handles are indices into the item list, an item is never moved within
/// that list. Removed items stay in the list until the heap is cleared.
pub struct BinHeap<K, V> {
    /// The heap elements.
    heap: Vec<usize>,
    /// The key and heap-index for each element.
    data: Vec<BinHeapItem<K, V>>,
}

impl<K, V> BinHeap<K, V> {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<K, V> Default for BinHeap<K, V> {
    fn default() -> Self {
        BinHeap {
            heap: vec![],
            data: vec![],
        }
    }
}

impl<K, V> ItemPriQueue<K, V> for BinHeap<K, V>
where
    K: Clone,
    V: PartialOrd + Clone,
{
    type Item = usize;

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.data.clear();
    }

    fn value(&self, item: &usize) -> &V {
        &self.data[*item].value
    }

    fn push(&mut self, key: K, value: V) -> usize {
        let item = self.data.len();
        self.data.push(BinHeapItem {
            key,
            value,
            pos: Some(self.heap.len()),
        });
        self.heap.push(item);
        self.upheap(item);
        item
    }

    fn decrease_key(&mut self, item: &mut usize, value: V) -> bool {
        let data = &mut self.data[*item];
        if data.pos.is_some() && data.value > value {
            data.value = value;
            self.upheap(*item);
            true
        } else {
            false
        }
    }

    fn pop_min(&mut self) -> Option<(K, V)> {
        if self.heap.is_empty() {
            return None;
        }

        let min_item = self.heap.swap_remove(0);
        self.data[min_item].pos = None;
        if let Some(&item) = self.heap.first() {
            self.data[item].pos = Some(0);
            self.downheap(item);
        }

        let data = &self.data[min_item];
        Some((data.key.clone(), data.value.clone()))
    }
}

impl<K, V> BinHeap<K, V>
where
    V: PartialOrd + Clone,
{
    fn pos(&self, item: usize) -> usize {
        self.data[item].pos.unwrap_or(0)
    }

    /// Move the element `item` up in the heap until its parent does not have a
    /// larger value or the root node is reached.
    fn upheap(&mut self, item: usize) {
        let value = self.data[item].value.clone();
        let mut cur_pos = self.pos(item);
        while cur_pos > 0 {
            let parent_pos = (cur_pos - 1) / 2;
            let parent = self.heap[parent_pos];
            // Using > instead of >= moves the item as far up as possible,
            // so the item touched last is preferred among equal values.
            if value > self.data[parent].value {
                break;
            }
            self.heap[cur_pos] = parent;
            self.data[parent].pos = Some(cur_pos);
            cur_pos = parent_pos;
        }
        self.heap[cur_pos] = item;
        self.data[item].pos = Some(cur_pos);
    }

    /// Move the element `item` down in the heap until none of its children
    /// has a smaller value.
    fn downheap(&mut self, item: usize) {
        let n = self.heap.len();
        let value = self.data[item].value.clone();
        let mut cur_pos = self.pos(item);
        loop {
            let left_pos = 2 * cur_pos + 1;
            let right_pos = left_pos + 1;
            let next_pos = if left_pos >= n {
                break;
            } else if right_pos < n && self.data[self.heap[right_pos]].value < self.data[self.heap[left_pos]].value {
                right_pos
            } else {
                left_pos
            };
            let next = self.heap[next_pos];
            if value <= self.data[next].value {
                break;
            }
            self.heap[cur_pos] = next;
            self.data[next].pos = Some(cur_pos);
            cur_pos = next_pos;
        }
        self.heap[cur_pos] = item;
        self.data[item].pos = Some(cur_pos);
    }
}
