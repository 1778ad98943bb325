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

//! Capacitated directed networks.
//!
//! A [`Network`] stores for each edge `(u,v)` its capacity and the flow
//! currently carried. Both are recorded twice, once in the outgoing
//! adjacency of `u` and once in the incoming adjacency of `v`, and all
//! mutating operations keep these records equal.
//!
//! Vertices are identified by arbitrary copyable identifiers `V`. Two of
//! them are the designated source and sink, which are passed to
//! [`Network::new`]. Internally each vertex is assigned a dense index in
//! order of insertion. Networks derived from another network (residual and
//! level graphs) share the index space of their parent.
//!
//! # Example
//!
//! ```
//! use rs_mpm::Network;
//!
//! let mut g = Network::<char, u32>::new('s', 't');
//! g.add_edge('s', 'a', 4).unwrap();
//! g.add_edge('a', 't', 3).unwrap();
//!
//! assert_eq!(g.out_degree('s').unwrap(), 1);
//! assert_eq!(g.capacity('a').unwrap(), 3);
//! assert!(g.has_edge('a', 't', 3, 0));
//! ```

use crate::error::{Error, Result};
use crate::flow::FlowMap;
use crate::num::traits::NumAssign;

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// What to do when an edge is inserted a second time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Duplicate {
    /// Replace capacity and flow of the existing edge.
    Overwrite,
    /// Add capacity and flow to the existing edge.
    Merge,
    /// Fail with [`Error::DuplicateEdge`].
    Reject,
}

impl Default for Duplicate {
    fn default() -> Self {
        Duplicate::Overwrite
    }
}

/// Capacity and flow of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Label<F> {
    pub(crate) cap: F,
    pub(crate) flow: F,
}

/// A directed network with capacities and flows on the edges.
#[derive(Clone, Debug)]
pub struct Network<V, F>
where
    V: Eq + Hash,
{
    /// The source node.
    src: V,
    /// The sink node.
    snk: V,
    /// Identifier of each index.
    pub(crate) ids: Vec<V>,
    /// Whether the vertex with some index is contained in the network.
    pub(crate) present: Vec<bool>,
    /// Index of each contained vertex.
    index: HashMap<V, usize>,
    /// Outgoing edges of each vertex.
    pub(crate) outs: Vec<BTreeMap<usize, Label<F>>>,
    /// Incoming edges of each vertex.
    pub(crate) ins: Vec<BTreeMap<usize, Label<F>>>,
    /// Policy of `add_edge` for edges that already exist.
    pub duplicates: Duplicate,
}

impl<V, F> Network<V, F>
where
    V: Copy + Eq + Hash + Debug,
    F: NumAssign + Ord + Copy + Display,
{
    /// Create a network containing only the source `src` and the sink `snk`.
    ///
    /// # Panics
    ///
    /// If `src == snk`.
    pub fn new(src: V, snk: V) -> Self {
        assert_ne!(src, snk, "Source and sink node must not be equal");
        let mut g = Network {
            src,
            snk,
            ids: vec![],
            present: vec![],
            index: HashMap::new(),
            outs: vec![],
            ins: vec![],
            duplicates: Duplicate::default(),
        };
        g.add_node(src);
        g.add_node(snk);
        g
    }

    /// Create a network from a list of edges `(u, v, capacity)`.
    ///
    /// Parallel edges are merged.
    pub fn from_edges<I>(src: V, snk: V, edges: I) -> Result<Self, V>
    where
        I: IntoIterator<Item = (V, V, F)>,
    {
        let mut g = Network::new(src, snk);
        for (u, v, cap) in edges {
            g.insert_edge(u, v, cap, F::zero(), Duplicate::Merge)?;
        }
        Ok(g)
    }

    /// Create an empty network on the index space of this network.
    ///
    /// If `keep_nodes` is `true` all vertices of this network are contained
    /// in the new network, otherwise it contains no vertex.
    pub(crate) fn derive(&self, keep_nodes: bool) -> Self {
        let n = self.ids.len();
        let present = if keep_nodes { self.present.clone() } else { vec![false; n] };
        let index = if keep_nodes { self.index.clone() } else { HashMap::new() };
        Network {
            src: self.src,
            snk: self.snk,
            ids: self.ids.clone(),
            present,
            index,
            outs: vec![BTreeMap::new(); n],
            ins: vec![BTreeMap::new(); n],
            duplicates: Duplicate::Merge,
        }
    }

    /// The source node.
    pub fn source(&self) -> V {
        self.src
    }

    /// The sink node.
    pub fn sink(&self) -> V {
        self.snk
    }

    /// Number of vertices.
    pub fn num_nodes(&self) -> usize {
        self.index.len()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.outs.iter().map(BTreeMap::len).sum()
    }

    /// Return `true` if `u` is a vertex of this network.
    pub fn contains(&self, u: V) -> bool {
        self.index.contains_key(&u)
    }

    /// Iterate over all vertices in order of insertion.
    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.nodes().map(move |u| self.ids[u])
    }

    /// Iterate over all edges `(u, v, capacity, flow)`.
    pub fn edges(&self) -> impl Iterator<Item = (V, V, F, F)> + '_ {
        self.arcs()
            .map(move |(u, v, label)| (self.ids[u], self.ids[v], label.cap, label.flow))
    }

    pub(crate) fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.ids.len()).filter(move |&u| self.present[u])
    }

    pub(crate) fn arcs(&self) -> impl Iterator<Item = (usize, usize, &Label<F>)> + '_ {
        self.outs
            .iter()
            .enumerate()
            .flat_map(|(u, outs)| outs.iter().map(move |(&v, label)| (u, v, label)))
    }

    pub(crate) fn is_terminal(&self, u: usize) -> bool {
        let id = self.ids[u];
        id == self.src || id == self.snk
    }

    /// Return the index of vertex `u`.
    pub(crate) fn node_id(&self, u: V) -> Result<usize, V> {
        self.index.get(&u).copied().ok_or(Error::UnknownVertex(u))
    }

    /// Return the index of vertex `u`, inserting it if necessary.
    fn add_node(&mut self, u: V) -> usize {
        if let Some(&i) = self.index.get(&u) {
            return i;
        }
        let i = self.ids.len();
        self.ids.push(u);
        self.present.push(true);
        self.outs.push(BTreeMap::new());
        self.ins.push(BTreeMap::new());
        self.index.insert(u, i);
        i
    }

    /// Mark the (existing) index `u` as contained in the network.
    pub(crate) fn restore_node(&mut self, u: usize) {
        if !self.present[u] {
            self.present[u] = true;
            self.index.insert(self.ids[u], u);
        }
    }

    /// Add the edge `(u,v)` with capacity `cap` and no flow.
    ///
    /// Missing vertices are inserted. An existing edge is handled according
    /// to `self.duplicates`.
    pub fn add_edge(&mut self, u: V, v: V, cap: F) -> Result<(), V> {
        self.insert_edge(u, v, cap, F::zero(), self.duplicates)
    }

    /// Add the edge `(u,v)` with capacity `cap` and flow `flow`.
    pub fn add_edge_with_flow(&mut self, u: V, v: V, cap: F, flow: F) -> Result<(), V> {
        self.insert_edge(u, v, cap, flow, self.duplicates)
    }

    /// Add the edge `(u,v)` with an explicit policy for existing edges.
    ///
    /// The capacity must be non-negative and the flow between zero and the
    /// capacity, where for [`Duplicate::Merge`] the merged values are
    /// checked. On error the network is not modified.
    pub fn insert_edge(&mut self, u: V, v: V, cap: F, flow: F, policy: Duplicate) -> Result<(), V> {
        let invalid = |msg: String| Error::InvalidCapacity { src: u, snk: v, msg };
        if cap < F::zero() {
            return Err(invalid(format!("negative capacity {}", cap)));
        }
        if flow < F::zero() {
            return Err(invalid(format!("negative flow {}", flow)));
        }

        let old = self
            .index
            .get(&u)
            .and_then(|i| self.index.get(&v).and_then(|j| self.outs[*i].get(j)))
            .copied();
        let label = match (old, policy) {
            (Some(_), Duplicate::Reject) => return Err(Error::DuplicateEdge(u, v)),
            (Some(old), Duplicate::Merge) => Label {
                cap: old.cap + cap,
                flow: old.flow + flow,
            },
            _ => Label { cap, flow },
        };
        if label.flow > label.cap {
            return Err(invalid(format!("flow {} exceeds capacity {}", label.flow, label.cap)));
        }

        let i = self.add_node(u);
        let j = self.add_node(v);
        self.set_arc(i, j, label);
        Ok(())
    }

    pub(crate) fn set_arc(&mut self, u: usize, v: usize, label: Label<F>) {
        self.outs[u].insert(v, label);
        self.ins[v].insert(u, label);
    }

    /// Add `cap` to the capacity of the edge `(u,v)`, creating it if necessary.
    pub(crate) fn merge_arc(&mut self, u: usize, v: usize, cap: F) {
        let label = match self.outs[u].get(&v) {
            Some(old) => Label {
                cap: old.cap + cap,
                flow: old.flow,
            },
            None => Label { cap, flow: F::zero() },
        };
        self.set_arc(u, v, label);
    }

    /// Return `true` if `(u,v)` is an edge with the given capacity and flow.
    ///
    /// Both the outgoing and the incoming record are compared.
    pub fn has_edge(&self, u: V, v: V, cap: F, flow: F) -> bool {
        let (i, j) = match (self.index.get(&u), self.index.get(&v)) {
            (Some(&i), Some(&j)) => (i, j),
            _ => return false,
        };
        let expected = Label { cap, flow };
        self.outs[i].get(&j) == Some(&expected) && self.ins[j].get(&i) == Some(&expected)
    }

    /// The capacity of edge `(u,v)`, if it exists.
    pub fn capacity_of(&self, u: V, v: V) -> Option<F> {
        self.label(u, v).map(|l| l.cap)
    }

    /// The flow on edge `(u,v)`, if it exists.
    pub fn flow_of(&self, u: V, v: V) -> Option<F> {
        self.label(u, v).map(|l| l.flow)
    }

    fn label(&self, u: V, v: V) -> Option<&Label<F>> {
        let i = *self.index.get(&u)?;
        let j = *self.index.get(&v)?;
        self.outs[i].get(&j)
    }

    /// Number of outgoing edges of `u`, or `UnknownVertex` if `u` is missing.
    pub fn out_degree(&self, u: V) -> Result<usize, V> {
        Ok(self.outs[self.node_id(u)?].len())
    }

    /// Number of incoming edges of `u`, or `UnknownVertex` if `u` is missing.
    pub fn in_degree(&self, u: V) -> Result<usize, V> {
        Ok(self.ins[self.node_id(u)?].len())
    }

    /// The heads of all outgoing edges of `u`.
    pub fn out_neighbours(&self, u: V) -> Result<Vec<V>, V> {
        Ok(self.outs[self.node_id(u)?].keys().map(|&v| self.ids[v]).collect())
    }

    /// The tails of all incoming edges of `u`.
    pub fn in_neighbours(&self, u: V) -> Result<Vec<V>, V> {
        Ok(self.ins[self.node_id(u)?].keys().map(|&v| self.ids[v]).collect())
    }

    /// The capacity of vertex `u`.
    ///
    /// This is the minimum of the total capacity of the incoming and the
    /// total capacity of the outgoing edges, i.e. the maximal amount of
    /// flow that may pass through `u`.
    pub fn capacity(&self, u: V) -> Result<F, V> {
        Ok(self.node_capacity(self.node_id(u)?))
    }

    pub(crate) fn node_capacity(&self, u: usize) -> F {
        let inc = self.ins[u].values().fold(F::zero(), |sum, l| sum + l.cap);
        let out = self.outs[u].values().fold(F::zero(), |sum, l| sum + l.cap);
        inc.min(out)
    }

    /// Remove vertex `u` and all its incident edges.
    pub fn remove_node(&mut self, u: V) -> Result<(), V> {
        let i = self.node_id(u)?;
        self.remove_node_id(i);
        Ok(())
    }

    pub(crate) fn remove_node_id(&mut self, u: usize) {
        for (v, _) in std::mem::take(&mut self.outs[u]) {
            self.ins[v].remove(&u);
        }
        for (v, _) in std::mem::take(&mut self.ins[u]) {
            self.outs[v].remove(&u);
        }
        self.present[u] = false;
        self.index.remove(&self.ids[u]);
    }

    /// Add the flow of one phase to the flow of this network.
    ///
    /// Flow on a pair `(u,v)` is added to the edge `(u,v)`. If that edge does
    /// not exist, or as far as it would exceed its capacity, the flow
    /// cancels flow on the reverse edge `(v,u)`.
    ///
    /// A pair whose flow exceeds the residual capacity of `(u,v)` is
    /// rejected with [`Error::InvariantViolation`]; pairs processed before
    /// it have already been added.
    pub fn add_flow(&mut self, flow: &FlowMap<V, F>) -> Result<(), V> {
        for (u, v, f) in flow.iter() {
            if f.is_zero() {
                continue;
            }
            let i = self.node_id(u)?;
            let j = self.node_id(v)?;
            let forward = self.outs[i].get(&j).copied();
            let backward = self.outs[j].get(&i).copied();
            let exceeded = || {
                Error::InvariantViolation(format!(
                    "flow {} on ({:?}, {:?}) exceeds the residual capacity",
                    f, u, v
                ))
            };
            match (forward, backward) {
                (Some(fw), Some(bw)) => {
                    let d = f.min(fw.cap - fw.flow);
                    if f - d > bw.flow {
                        return Err(exceeded());
                    }
                    self.set_arc(i, j, Label { cap: fw.cap, flow: fw.flow + d });
                    if d < f {
                        self.set_arc(j, i, Label { cap: bw.cap, flow: bw.flow - (f - d) });
                    }
                }
                (Some(fw), None) => {
                    if f > fw.cap - fw.flow {
                        return Err(exceeded());
                    }
                    self.set_arc(i, j, Label { cap: fw.cap, flow: fw.flow + f })
                }
                (None, Some(bw)) => {
                    if f > bw.flow {
                        return Err(exceeded());
                    }
                    self.set_arc(j, i, Label { cap: bw.cap, flow: bw.flow - f })
                }
                (None, None) => return Err(Error::UnknownEdge(u, v)),
            }
        }
        Ok(())
    }

    /// Check capacity bounds and flow conservation.
    ///
    /// Returns the first violated condition as [`Error::InvariantViolation`].
    pub fn check_flow(&self) -> Result<(), V> {
        // (inflow, outflow) of each index
        let mut balance = vec![(F::zero(), F::zero()); self.ids.len()];
        for (u, v, label) in self.arcs() {
            if label.flow < F::zero() || label.flow > label.cap {
                return Err(Error::InvariantViolation(format!(
                    "flow {} on edge ({:?}, {:?}) is not within [0, {}]",
                    label.flow, self.ids[u], self.ids[v], label.cap
                )));
            }
            if self.ins[v].get(&u) != Some(label) {
                return Err(Error::InvariantViolation(format!(
                    "records of edge ({:?}, {:?}) differ",
                    self.ids[u], self.ids[v]
                )));
            }
            balance[u].1 += label.flow;
            balance[v].0 += label.flow;
        }
        match self.nodes().find(|&u| !self.is_terminal(u) && balance[u].0 != balance[u].1) {
            Some(u) => Err(Error::InvariantViolation(format!(
                "flow is not conserved at vertex {:?} (inflow {}, outflow {})",
                self.ids[u], balance[u].0, balance[u].1
            ))),
            None => Ok(()),
        }
    }

    /// Return `true` if the flow satisfies capacity bounds and conservation.
    pub fn is_flow_valid(&self) -> bool {
        self.check_flow().is_ok()
    }

    /// The total flow entering the sink.
    pub fn count_flow(&self) -> F {
        match self.index.get(&self.snk) {
            Some(&t) => self.ins[t].values().fold(F::zero(), |sum, l| sum + l.flow),
            None => F::zero(),
        }
    }

    /// A flow map with a zero entry for each edge.
    pub fn empty_flow(&self) -> FlowMap<V, F> {
        self.flow_map(|_| F::zero())
    }

    /// A flow map with the current flow on each edge.
    pub fn flow(&self) -> FlowMap<V, F> {
        self.flow_map(|l| l.flow)
    }

    fn flow_map<L>(&self, value: L) -> FlowMap<V, F>
    where
        L: Fn(&Label<F>) -> F,
    {
        let mut flow = FlowMap::new();
        for u in self.nodes() {
            flow.insert_node(self.ids[u]);
            for (&v, label) in &self.outs[u] {
                flow.set(self.ids[u], self.ids[v], value(label));
            }
        }
        flow
    }
}

#[cfg(test)]
mod tests {
    use super::{Duplicate, Network};
    use crate::{Error, FlowMap};

    const S: i32 = i32::MIN;
    const T: i32 = i32::MAX;

    fn wikipedia(flows: [i32; 9]) -> Network<i32, i32> {
        let mut g = Network::new(S, T);
        let edges = [
            (S, 1, 10),
            (S, 2, 10),
            (1, 2, 2),
            (1, 3, 4),
            (1, 4, 8),
            (2, 4, 9),
            (3, T, 10),
            (4, 3, 6),
            (4, T, 10),
        ];
        for (&(u, v, c), &f) in edges.iter().zip(flows.iter()) {
            g.add_edge_with_flow(u, v, c, f).unwrap();
        }
        g
    }

    #[test]
    fn test_degrees() {
        let mut g = Network::new(-1, -2);
        g.add_edge(0, 1, 2).unwrap();
        g.add_edge(0, 2, 3).unwrap();
        g.add_edge(1, 2, 1).unwrap();

        assert_eq!(g.out_degree(0), Ok(2));
        assert_eq!(g.out_degree(2), Ok(0));
        assert_eq!(g.in_degree(2), Ok(2));
        assert_eq!(g.in_degree(0), Ok(0));
        assert_eq!(g.out_degree(7), Err(Error::UnknownVertex(7)));
        assert_eq!(g.in_neighbours(5), Err(Error::UnknownVertex(5)));
        assert_eq!(g.capacity(5), Err(Error::UnknownVertex(5)));
    }

    #[test]
    fn test_add_edge() {
        let mut g = Network::new(-1, -2);
        g.add_edge(0, 1, 2).unwrap();
        g.add_edge_with_flow(0, 2, 3, 2).unwrap();
        g.add_edge(1, 2, 1).unwrap();

        assert!(g.has_edge(0, 1, 2, 0));
        assert!(g.has_edge(0, 2, 3, 2));
        assert!(g.has_edge(1, 2, 1, 0));
        assert!(!g.has_edge(0, 2, 3, 0));
        assert!(!g.has_edge(2, 1, 1, 0));
        assert_eq!(g.num_nodes(), 5);
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.out_neighbours(0), Ok(vec![1, 2]));
        assert_eq!(g.in_neighbours(2), Ok(vec![0, 1]));
    }

    #[test]
    fn test_duplicates() {
        let mut g = Network::new(S, T);
        g.add_edge(S, 1, 5).unwrap();
        g.add_edge(S, 1, 4).unwrap();
        assert!(g.has_edge(S, 1, 4, 0));

        g.insert_edge(S, 1, 5, 1, Duplicate::Merge).unwrap();
        assert!(g.has_edge(S, 1, 9, 1));

        g.duplicates = Duplicate::Reject;
        assert_eq!(g.add_edge(S, 1, 1), Err(Error::DuplicateEdge(S, 1)));
        assert!(g.has_edge(S, 1, 9, 1));
        g.add_edge(1, T, 1).unwrap();
    }

    #[test]
    fn test_invalid_capacity() {
        let mut g = Network::new(S, T);
        assert!(matches!(g.add_edge(S, 1, -1), Err(Error::InvalidCapacity { .. })));
        assert!(matches!(
            g.add_edge_with_flow(S, 1, 2, 3),
            Err(Error::InvalidCapacity { src: S, snk: 1, .. })
        ));
        assert!(matches!(g.add_edge_with_flow(S, 1, 2, -1), Err(Error::InvalidCapacity { .. })));
        assert!(!g.contains(1));

        g.add_edge_with_flow(S, 1, 2, 2).unwrap();
        // merged flow would exceed merged capacity
        assert!(g.insert_edge(S, 1, 0, 1, Duplicate::Merge).is_err());
        assert!(g.has_edge(S, 1, 2, 2));
    }

    #[test]
    #[should_panic]
    fn test_equal_terminals() {
        Network::<i32, i32>::new(1, 1);
    }

    #[test]
    fn test_capacity() {
        let g = wikipedia([0; 9]);
        assert_eq!(g.capacity(1), Ok(10));
        assert_eq!(g.capacity(2), Ok(9));
        assert_eq!(g.capacity(3), Ok(10));
        assert_eq!(g.capacity(4), Ok(16));
    }

    #[test]
    fn test_remove_node() {
        let mut g = Network::new(-1, -2);
        g.add_edge(1, 0, 0).unwrap();
        g.add_edge(2, 0, 0).unwrap();
        g.add_edge(1, 2, 0).unwrap();
        g.add_edge(0, 3, 0).unwrap();
        g.add_edge(0, 4, 0).unwrap();
        g.add_edge(4, 3, 0).unwrap();

        g.remove_node(0).unwrap();

        assert!(g.has_edge(1, 2, 0, 0));
        assert!(g.has_edge(4, 3, 0, 0));
        assert!(!g.has_edge(1, 0, 0, 0));
        assert!(!g.has_edge(2, 0, 0, 0));
        assert!(!g.has_edge(0, 3, 0, 0));
        assert!(!g.has_edge(0, 4, 0, 0));
        assert!(!g.contains(0));
        assert_eq!(g.out_degree(1), Ok(1));
        assert_eq!(g.in_degree(3), Ok(1));
        assert_eq!(g.remove_node(0), Err(Error::UnknownVertex(0)));

        // the identifier may be used again
        g.add_edge(0, 1, 1).unwrap();
        assert!(g.has_edge(0, 1, 1, 0));
    }

    #[test]
    fn test_add_flow() {
        let mut g = wikipedia([0; 9]);
        let mut flow = FlowMap::new();
        flow.set(S, 1, 10);
        flow.set(S, 2, 4);
        flow.set(1, 3, 4);
        flow.set(1, 4, 6);
        flow.set(2, 4, 4);
        flow.set(3, T, 4);
        flow.set(4, T, 10);
        g.add_flow(&flow).unwrap();

        assert!(g.has_edge(S, 1, 10, 10));
        assert!(g.has_edge(S, 2, 10, 4));
        assert!(g.has_edge(1, 2, 2, 0));
        assert!(g.has_edge(1, 3, 4, 4));
        assert!(g.has_edge(1, 4, 8, 6));
        assert!(g.has_edge(2, 4, 9, 4));
        assert!(g.has_edge(3, T, 10, 4));
        assert!(g.has_edge(4, 3, 6, 0));
        assert!(g.has_edge(4, T, 10, 10));
        assert!(g.is_flow_valid());
        assert_eq!(g.count_flow(), 14);

        let mut flow = FlowMap::new();
        flow.set(S, 2, 5);
        flow.set(2, 4, 5);
        flow.set(3, T, 5);
        flow.set(4, 3, 5);
        g.add_flow(&flow).unwrap();

        assert!(g.has_edge(S, 2, 10, 9));
        assert!(g.has_edge(2, 4, 9, 9));
        assert!(g.has_edge(3, T, 10, 9));
        assert!(g.has_edge(4, 3, 6, 5));
        assert!(g.is_flow_valid());
        assert_eq!(g.count_flow(), 19);
    }

    #[test]
    fn test_add_back_flow() {
        let mut g = Network::new(-1, -2);
        g.add_edge_with_flow(0, 1, 10, 10).unwrap();

        let mut flow = FlowMap::new();
        flow.set(1, 0, 5);
        g.add_flow(&flow).unwrap();
        assert!(g.has_edge(0, 1, 10, 5));

        let mut flow = FlowMap::new();
        flow.set(1, 2, 5);
        assert_eq!(g.add_flow(&flow), Err(Error::UnknownVertex(2)));
        g.add_edge(2, 3, 1).unwrap();
        assert_eq!(g.add_flow(&flow), Err(Error::UnknownEdge(1, 2)));
    }

    #[test]
    fn test_add_flow_antiparallel() {
        // residual capacity of (1,2) is 1 - 0 + 3 = 4
        let mut g = Network::new(S, T);
        g.add_edge_with_flow(1, 2, 1, 0).unwrap();
        g.add_edge_with_flow(2, 1, 3, 3).unwrap();

        let mut flow = FlowMap::new();
        flow.set(1, 2, 3);
        g.add_flow(&flow).unwrap();
        assert!(g.has_edge(1, 2, 1, 1));
        assert!(g.has_edge(2, 1, 3, 1));
    }

    #[test]
    fn test_unbalanced_flow() {
        let mut g = Network::new(S, T);
        g.add_edge_with_flow(S, 1, 5, 5).unwrap();
        g.add_edge_with_flow(S, 2, 5, 5).unwrap();
        g.add_edge_with_flow(1, 3, 5, 5).unwrap();
        g.add_edge_with_flow(2, 3, 5, 5).unwrap();
        g.add_edge_with_flow(3, T, 10, 5).unwrap();
        assert!(!g.is_flow_valid());
        assert!(matches!(g.check_flow(), Err(Error::InvariantViolation(_))));

        g.add_edge_with_flow(3, T, 10, 10).unwrap();
        assert!(g.is_flow_valid());
        assert_eq!(g.count_flow(), 10);
    }

    #[test]
    fn test_check_flow_unsigned() {
        let mut g = Network::<i32, u32>::new(S, T);
        g.add_edge_with_flow(S, 1, 5, 5).unwrap();
        g.add_edge_with_flow(1, 2, 5, 5).unwrap();
        g.add_edge_with_flow(2, T, 7, 5).unwrap();
        assert_eq!(g.check_flow(), Ok(()));

        g.add_edge_with_flow(2, T, 7, 3).unwrap();
        assert!(matches!(g.check_flow(), Err(Error::InvariantViolation(_))));
        assert_eq!(g.flow().value(T), None);
    }

    #[test]
    fn test_add_flow_exceeds_residual() {
        let mut g = Network::<i32, u32>::new(S, T);
        g.add_edge_with_flow(1, 2, 2, 1).unwrap();
        g.add_edge_with_flow(3, 4, 2, 1).unwrap();

        let mut flow = FlowMap::new();
        flow.set(2, 1, 2);
        assert!(matches!(g.add_flow(&flow), Err(Error::InvariantViolation(_))));
        let mut flow = FlowMap::new();
        flow.set(3, 4, 2);
        assert!(matches!(g.add_flow(&flow), Err(Error::InvariantViolation(_))));
        assert!(g.has_edge(1, 2, 2, 1));
        assert!(g.has_edge(3, 4, 2, 1));
    }

    #[test]
    fn test_count_flow() {
        let g = wikipedia([10, 9, 0, 4, 6, 9, 9, 5, 10]);
        assert!(g.is_flow_valid());
        assert_eq!(g.count_flow(), 19);
    }

    #[test]
    fn test_empty_flow() {
        let mut g = Network::new(S, T);
        g.add_edge(S, 1, 10).unwrap();
        g.add_edge(S, 2, 10).unwrap();
        g.add_edge(1, 2, 2).unwrap();

        let flow = g.empty_flow();
        assert_eq!(flow.num_edges(), 3);
        assert_eq!(flow.get(S, 1), Some(0));
        assert_eq!(flow.get(S, 2), Some(0));
        assert_eq!(flow.get(1, 2), Some(0));
        assert_eq!(flow.get(2, 1), None);
        assert_eq!(flow.get(1, T), None);
    }

    #[test]
    fn test_flow() {
        let g = wikipedia([10, 9, 0, 4, 6, 9, 9, 5, 10]);
        let flow = g.flow();
        assert_eq!(flow.num_edges(), 9);
        assert_eq!(flow.get(S, 2), Some(9));
        assert_eq!(flow.get(1, 2), Some(0));
        assert_eq!(flow.value(S), Some(19));
    }

    #[test]
    fn test_from_edges() {
        let g = Network::from_edges(S, T, vec![(S, 1, 5), (S, 1, 5), (1, T, 7)]).unwrap();
        assert!(g.has_edge(S, 1, 10, 0));
        assert_eq!(g.capacity(1), Ok(7));
        assert!(Network::from_edges(S, T, vec![(S, 1, -5)]).is_err());
    }
}
