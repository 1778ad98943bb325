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

//! Residual and level graphs.
//!
//! Each phase of the MPM algorithm works on the *level graph* of the
//! *residual graph* of the current flow. Both are fresh [`Network`]s on the
//! index space of the network they are derived from.

use crate::network::Network;
use crate::num::traits::NumAssign;

use std::collections::VecDeque;
use std::fmt::{Debug, Display};
use std::hash::Hash;

impl<V, F> Network<V, F>
where
    V: Copy + Eq + Hash + Debug,
    F: NumAssign + Ord + Copy + Display,
{
    /// Return the residual graph of the current flow.
    ///
    /// An edge `(u,v)` with capacity `c` and flow `f` contributes a forward
    /// edge `(u,v)` with capacity `c - f` if `f < c` and a backward edge
    /// `(v,u)` with capacity `f` if `f > 0`. Contributions to the same pair
    /// are added. The residual graph carries no flow and contains all
    /// vertices of this network.
    pub fn residual_graph(&self) -> Network<V, F> {
        let mut g = self.derive(true);
        for (u, v, label) in self.arcs() {
            if label.cap > label.flow {
                g.merge_arc(u, v, label.cap - label.flow);
            }
            if label.flow > F::zero() {
                g.merge_arc(v, u, label.flow);
            }
        }
        g
    }

    /// Return the level graph w.r.t. the source.
    ///
    /// The capacities of this network are used as they are, its flow is
    /// ignored (so this is usually called on a residual graph). The level
    /// of a vertex is its BFS distance from the source. The level graph
    /// contains all vertices reachable from the source and exactly those
    /// edges `(u,v)` with `level(v) = level(u) + 1`.
    pub fn level_graph(&self) -> Network<V, F> {
        self.level_graph_with_levels().0
    }

    /// Return the level graph and the level of each index.
    ///
    /// Unreachable indices have level `usize::max_value()`.
    pub(crate) fn level_graph_with_levels(&self) -> (Network<V, F>, Vec<usize>) {
        let n = self.ids.len();
        let mut g = self.derive(false);
        let mut levels = vec![usize::max_value(); n];

        let src = match self.node_id(self.source()) {
            Ok(src) => src,
            Err(_) => return (g, levels),
        };

        let mut queue = VecDeque::with_capacity(n);
        levels[src] = 0;
        g.restore_node(src);
        queue.push_back(src);

        while let Some(u) = queue.pop_front() {
            let d = levels[u];
            for (&v, label) in &self.outs[u] {
                if levels[v] == usize::max_value() {
                    levels[v] = d + 1;
                    g.restore_node(v);
                    queue.push_back(v);
                } else if levels[v] != d + 1 {
                    continue;
                }
                g.merge_arc(u, v, label.cap);
            }
        }

        (g, levels)
    }
}
