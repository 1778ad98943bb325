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

//! This module implements the max flow algorithm of Malhotra, Kumar and
//! Maheshwari (MPM).
//!
//! The algorithm works in phases. Each phase computes a blocking flow in
//! the level graph of the current residual graph. To this end the vertex
//! with the smallest capacity (the minimum of its total incoming and total
//! outgoing edge capacity) is selected, its whole capacity is pushed
//! towards the sink and pulled from the source, and the vertex is removed
//! from the level graph. The algorithm stops as soon as the sink is not
//! reachable in the residual graph anymore.
//!
//! # Example
//!
//! ```
//! use rs_mpm::maxflow::mpm;
//! use rs_mpm::Network;
//!
//! let mut g = Network::new('s', 't');
//! for &(u, v, c) in &[
//!     ('s', 'a', 10),
//!     ('s', 'b', 10),
//!     ('a', 'b', 2),
//!     ('a', 'c', 4),
//!     ('a', 'd', 8),
//!     ('b', 'd', 9),
//!     ('c', 't', 10),
//!     ('d', 'c', 6),
//!     ('d', 't', 10),
//! ] {
//!     g.add_edge(u, v, c).unwrap();
//! }
//!
//! let (value, flow, mut mincut) = mpm(&mut g).unwrap();
//!
//! assert_eq!(value, 19);
//! assert!(g.is_flow_valid());
//! assert_eq!(flow.value('s'), Some(19));
//! assert!(g.edges().all(|(u, v, c, _)| flow.get(u, v).unwrap() <= c));
//!
//! mincut.sort();
//! assert_eq!(mincut, vec!['b', 's']);
//! ```

use crate::collections::{ItemPriQueue, PairingHeap};
use crate::distribute::Dir;
use crate::error::{Error, Result};
use crate::flow::FlowMap;
use crate::network::Network;
use crate::num::traits::NumAssign;

use log::{debug, trace, warn};

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// The MPM max-flow algorithm.
///
/// The flow is computed on the network itself, i.e. after `solve` the
/// network carries a maximum flow. A network that already carries a
/// feasible flow is used as starting point.
pub struct Mpm<'a, V, F>
where
    V: Eq + Hash,
{
    g: &'a mut Network<V, F>,
    value: F,
    phases: usize,
    mincut: Vec<V>,

    /// Check capacity bounds and flow conservation after each phase.
    ///
    /// Enabled by default in debug builds.
    pub verify: bool,

    /// Maximal number of phases.
    ///
    /// If the limit is reached `solve` returns the flow found so far, which
    /// is feasible but not necessarily maximal.
    pub max_phases: Option<usize>,
}

impl<'a, V, F> Mpm<'a, V, F>
where
    V: Copy + Eq + Hash + Debug,
    F: NumAssign + Ord + Copy + Display,
{
    /// Create a new MPM algorithm instance for a network.
    pub fn new(g: &'a mut Network<V, F>) -> Self {
        Mpm {
            g,
            value: F::zero(),
            phases: 0,
            mincut: vec![],
            verify: cfg!(debug_assertions),
            max_phases: None,
        }
    }

    /// Return the underlying network.
    pub fn as_network(&self) -> &Network<V, F> {
        &*self.g
    }

    /// Return the value of the latest computed maximum flow.
    pub fn value(&self) -> F {
        self.value
    }

    /// Number of phases of the latest run.
    pub fn num_phases(&self) -> usize {
        self.phases
    }

    /// Return the current flow on each edge.
    pub fn flow(&self) -> FlowMap<V, F> {
        self.g.flow()
    }

    /// Return the source side of a minimal cut associated with the last
    /// maximum flow.
    ///
    /// This is empty if the last run has been stopped by `max_phases`.
    pub fn mincut(&self) -> Vec<V> {
        self.mincut.clone()
    }

    /// Solve the maxflow problem.
    pub fn solve(&mut self) -> Result<F, V> {
        self.solve_with::<PairingHeap<usize, F>>()
    }

    /// Solve the maxflow problem using the priority queue `P`.
    pub fn solve_with<P>(&mut self) -> Result<F, V>
    where
        P: ItemPriQueue<usize, F> + Default,
    {
        if self.verify {
            self.g.check_flow()?;
        }

        self.phases = 0;
        self.mincut.clear();
        let snk = self.g.sink();

        loop {
            let mut level = self.g.residual_graph().level_graph();
            if !level.contains(snk) {
                self.mincut = level.vertices().collect();
                break;
            }
            if self.max_phases.map(|max| self.phases >= max).unwrap_or(false) {
                warn!("stopped after {} phases, the flow might not be maximal", self.phases);
                break;
            }

            let nnodes = level.num_nodes();
            let nedges = level.num_edges();
            let mut phase = Phase::new(&mut level, P::default());
            phase.run();
            let flow = phase.into_flow();
            let delta = flow.in_flow(snk);

            self.g.add_flow(&flow)?;
            self.phases += 1;
            if self.verify {
                self.g.check_flow()?;
            }

            debug!(
                "phase {}: level graph with {} vertices and {} edges, sent {} units",
                self.phases, nnodes, nedges, delta
            );

            if delta <= F::zero() {
                return Err(Error::InvariantViolation(format!(
                    "phase {} did not increase the flow",
                    self.phases
                )));
            }
        }

        self.value = self.g.count_flow();
        Ok(self.value)
    }
}

/// One phase of the algorithm: the computation of a blocking flow.
pub(crate) struct Phase<'g, V, F, P>
where
    V: Eq + Hash,
    P: ItemPriQueue<usize, F>,
{
    /// The level graph, vertices and edge capacities are consumed.
    level: &'g mut Network<V, F>,
    /// The flow sent so far.
    flow: FlowMap<V, F>,
    /// The inner vertices not saturated yet, by capacity.
    heap: P,
    /// Heap item of each vertex still in the heap.
    items: Vec<Option<P::Item>>,
}

impl<'g, V, F, P> Phase<'g, V, F, P>
where
    V: Copy + Eq + Hash + Debug,
    F: NumAssign + Ord + Copy + Display,
    P: ItemPriQueue<usize, F>,
{
    pub(crate) fn new(level: &'g mut Network<V, F>, mut heap: P) -> Self {
        heap.clear();
        let flow = level.empty_flow();
        let mut items: Vec<Option<P::Item>> = (0..level.ids.len()).map(|_| None).collect();
        let inner: Vec<usize> = level.nodes().filter(|&u| !level.is_terminal(u)).collect();
        for u in inner {
            items[u] = Some(heap.push(u, level.node_capacity(u)));
        }
        Phase {
            level,
            flow,
            heap,
            items,
        }
    }

    /// Compute the blocking flow.
    pub(crate) fn run(&mut self) {
        self.saturate_direct_edge();
        while self.saturate_next().is_some() {}
    }

    pub(crate) fn into_flow(self) -> FlowMap<V, F> {
        self.flow
    }

    /// Send the whole capacity of an edge from the source to the sink.
    fn saturate_direct_edge(&mut self) {
        let src = self.level.node_id(self.level.source());
        let snk = self.level.node_id(self.level.sink());
        if let (Ok(src), Ok(snk)) = (src, snk) {
            let cap = self.level.outs[src].get(&snk).map(|l| l.cap).unwrap_or_else(F::zero);
            if cap > F::zero() {
                self.level.commit(src, snk, cap, Dir::Push, &mut self.flow);
            }
        }
    }

    /// Saturate the vertex with the smallest capacity and remove it.
    ///
    /// Returns the saturated vertex or `None` if no vertex is left.
    pub(crate) fn saturate_next(&mut self) -> Option<usize> {
        let (u, cap) = self.heap.pop_min()?;
        self.items[u] = None;

        let mut touched = vec![];
        self.level.distribute(u, cap, Dir::Push, &mut self.flow, &mut touched);
        self.level.distribute(u, cap, Dir::Pull, &mut self.flow, &mut touched);
        trace!(
            "saturated vertex {:?} with {} units, {} vertices touched",
            self.level.ids[u],
            cap,
            touched.len()
        );

        let neighs: Vec<usize> = self.level.outs[u]
            .keys()
            .chain(self.level.ins[u].keys())
            .copied()
            .collect();
        self.level.remove_node_id(u);

        for v in neighs.into_iter().chain(touched) {
            if let Some(item) = self.items[v].as_mut() {
                self.heap.decrease_key(item, self.level.node_capacity(v));
            }
        }

        Some(u)
    }

    /// The current key of vertex `u` if it is still in the heap.
    #[cfg(test)]
    fn key(&self, u: V) -> Option<F> {
        let u = self.level.node_id(u).ok()?;
        self.items[u].as_ref().map(|item| *self.heap.value(item))
    }
}

/// Solve the maxflow problem using the MPM algorithm.
///
/// The function computes a maximum flow from the source to the sink of
/// `g`, which carries the flow afterwards. It returns the flow value, the
/// flow on each edge and the source side of a minimal cut.
pub fn mpm<V, F>(g: &mut Network<V, F>) -> Result<(F, FlowMap<V, F>, Vec<V>), V>
where
    V: Copy + Eq + Hash + Debug,
    F: NumAssign + Ord + Copy + Display,
{
    let mut maxflow = Mpm::new(g);
    maxflow.solve()?;
    Ok((maxflow.value(), maxflow.flow(), maxflow.mincut()))
}

/// Return the value of a maximum flow in `g`.
///
/// See [`mpm`].
pub fn max_flow<V, F>(g: &mut Network<V, F>) -> Result<F, V>
where
    V: Copy + Eq + Hash + Debug,
    F: NumAssign + Ord + Copy + Display,
{
    Mpm::new(g).solve()
}
