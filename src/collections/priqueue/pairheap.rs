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

//! Pairing heap implementation

use crate::collections::ItemPriQueue;

/// A node of the pairing heap.
///
/// The children of a node form a doubly linked list. `prev` points to the
/// left sibling or, for the leftmost child, to the parent.
struct PairNode<K, V> {
    key: K,
    value: V,
    child: Option<usize>,
    next: Option<usize>,
    prev: Option<usize>,
    /// Whether the node is still contained in the heap.
    active: bool,
}

/// Pairing heap with addressable items.
///
/// Insertion, melding and `decrease_key` take amortized constant time,
/// `pop_min` amortized logarithmic time. Handles are indices into the node
/// list; removed nodes stay in the list until the heap is cleared.
pub struct PairingHeap<K, V> {
    nodes: Vec<PairNode<K, V>>,
    root: Option<usize>,
    len: usize,
}

impl<K, V> PairingHeap<K, V> {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<K, V> Default for PairingHeap<K, V> {
    fn default() -> Self {
        PairingHeap {
            nodes: vec![],
            root: None,
            len: 0,
        }
    }
}

impl<K, V> PairingHeap<K, V>
where
    V: PartialOrd,
{
    /// Link two roots, the one with the larger value becomes the leftmost
    /// child of the other. Returns the new root.
    fn meld(&mut self, a: usize, b: usize) -> usize {
        let (a, b) = if self.nodes[b].value < self.nodes[a].value {
            (b, a)
        } else {
            (a, b)
        };
        let first = self.nodes[a].child;
        if let Some(c) = first {
            self.nodes[c].prev = Some(b);
        }
        self.nodes[b].next = first;
        self.nodes[b].prev = Some(a);
        self.nodes[a].child = Some(b);
        a
    }

    /// Remove `u` from the child list it belongs to.
    fn cut(&mut self, u: usize) {
        let next = self.nodes[u].next.take();
        let prev = self.nodes[u].prev.take();
        if let Some(p) = prev {
            if self.nodes[p].child == Some(u) {
                self.nodes[p].child = next;
            } else {
                self.nodes[p].next = next;
            }
        }
        if let Some(n) = next {
            self.nodes[n].prev = prev;
        }
    }

    fn meld_root(&mut self, u: usize) {
        self.root = Some(match self.root {
            Some(r) => self.meld(r, u),
            None => u,
        });
    }
}

impl<K, V> ItemPriQueue<K, V> for PairingHeap<K, V>
where
    K: Clone,
    V: PartialOrd + Clone,
{
    type Item = usize;

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    fn value(&self, item: &usize) -> &V {
        &self.nodes[*item].value
    }

    fn push(&mut self, key: K, value: V) -> usize {
        let u = self.nodes.len();
        self.nodes.push(PairNode {
            key,
            value,
            child: None,
            next: None,
            prev: None,
            active: true,
        });
        self.meld_root(u);
        self.len += 1;
        u
    }

    fn decrease_key(&mut self, item: &mut usize, value: V) -> bool {
        let u = *item;
        if !self.nodes[u].active || !(value < self.nodes[u].value) {
            return false;
        }
        self.nodes[u].value = value;
        if self.root != Some(u) {
            self.cut(u);
            self.meld_root(u);
        }
        true
    }

    fn pop_min(&mut self) -> Option<(K, V)> {
        let r = self.root.take()?;
        self.nodes[r].active = false;
        self.len -= 1;

        // first pass: meld pairs of children from left to right
        let mut roots = vec![];
        let mut cur = self.nodes[r].child.take();
        while let Some(a) = cur {
            let b = self.nodes[a].next;
            cur = b.and_then(|b| self.nodes[b].next);
            self.nodes[a].prev = None;
            self.nodes[a].next = None;
            match b {
                Some(b) => {
                    self.nodes[b].prev = None;
                    self.nodes[b].next = None;
                    roots.push(self.meld(a, b));
                }
                None => roots.push(a),
            }
        }

        // second pass: meld the results from right to left
        while let Some(a) = roots.pop() {
            self.root = Some(match self.root {
                Some(r) => self.meld(a, r),
                None => a,
            });
        }

        let node = &self.nodes[r];
        Some((node.key.clone(), node.value.clone()))
    }
}
