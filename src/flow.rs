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

//! Sparse flow assignments.
//!
//! A [`FlowMap`] assigns a flow value to pairs of vertices. It is used for
//! the flow computed within one phase of the algorithm as well as for the
//! final maximum flow returned to the caller. Only pairs that have been set
//! explicitly are contained in the map, there are no implicit zero entries.

use crate::num::traits::NumAssign;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A sparse map `u -> (v -> flow)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct FlowMap<V, F>
where
    V: Eq + Hash,
{
    arcs: HashMap<V, HashMap<V, F>>,
}

impl<V, F> Default for FlowMap<V, F>
where
    V: Eq + Hash,
{
    fn default() -> Self {
        FlowMap { arcs: HashMap::new() }
    }
}

impl<V, F> FlowMap<V, F>
where
    V: Copy + Eq + Hash,
    F: NumAssign + Ord + Copy,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Ensure that `u` has a (possibly empty) row.
    pub fn insert_node(&mut self, u: V) {
        self.arcs.entry(u).or_insert_with(HashMap::new);
    }

    /// Return the flow on `(u,v)` or `None` if the pair is not contained.
    pub fn get(&self, u: V, v: V) -> Option<F> {
        self.arcs.get(&u).and_then(|row| row.get(&v)).copied()
    }

    /// Return `true` if the pair `(u,v)` is contained in the map.
    pub fn contains(&self, u: V, v: V) -> bool {
        self.arcs.get(&u).map(|row| row.contains_key(&v)).unwrap_or(false)
    }

    /// Set the flow on `(u,v)`.
    pub fn set(&mut self, u: V, v: V, flow: F) {
        self.arcs.entry(u).or_insert_with(HashMap::new).insert(v, flow);
    }

    /// Add `flow` to the flow on `(u,v)`, inserting the pair if necessary.
    pub fn add(&mut self, u: V, v: V, flow: F) {
        *self
            .arcs
            .entry(u)
            .or_insert_with(HashMap::new)
            .entry(v)
            .or_insert_with(F::zero) += flow;
    }

    /// Number of pairs in the map.
    pub fn num_edges(&self) -> usize {
        self.arcs.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.num_edges() == 0
    }

    /// Iterate over all entries `(u, v, flow)`.
    pub fn iter(&self) -> impl Iterator<Item = (V, V, F)> + '_ {
        self.arcs
            .iter()
            .flat_map(|(&u, row)| row.iter().map(move |(&v, &f)| (u, v, f)))
    }

    /// The entries of row `u`.
    pub fn row(&self, u: V) -> impl Iterator<Item = (V, F)> + '_ {
        self.arcs.get(&u).into_iter().flat_map(|row| row.iter().map(|(&v, &f)| (v, f)))
    }

    /// Total flow on all pairs `(u, _)`.
    pub fn out_flow(&self, u: V) -> F {
        self.row(u).fold(F::zero(), |sum, (_, f)| sum + f)
    }

    /// Total flow on all pairs `(_, v)`.
    pub fn in_flow(&self, v: V) -> F {
        self.arcs
            .values()
            .filter_map(|row| row.get(&v))
            .fold(F::zero(), |sum, &f| sum + f)
    }

    /// Net amount of flow leaving `u`.
    ///
    /// For the source node of a feasible flow this is the flow value.
    /// Returns `None` if more flow enters `u` than leaves it.
    pub fn value(&self, u: V) -> Option<F> {
        let (out, inc) = (self.out_flow(u), self.in_flow(u));
        if out >= inc {
            Some(out - inc)
        } else {
            None
        }
    }
}

/// Check flow conservation and non-negativity of a flow.
///
/// Only pairs `(u,v)` with both end points in `nodes` and `u != v` are
/// considered. Every node except `src` and `snk` must have equal in- and
/// outflow.
pub fn is_flow_valid<V, F, I>(nodes: I, src: V, snk: V, flow: &FlowMap<V, F>) -> bool
where
    V: Copy + Eq + Hash,
    F: NumAssign + Ord + Copy,
    I: IntoIterator<Item = V>,
{
    is_flow_valid_with(nodes, src, snk, flow, |_, _| None)
}

/// Check flow conservation and capacity bounds of a flow.
///
/// Like [`is_flow_valid`] but additionally each flow value must not exceed
/// `capacity(u,v)`. A capacity of `None` means the pair is unbounded.
pub fn is_flow_valid_with<V, F, I, C>(nodes: I, src: V, snk: V, flow: &FlowMap<V, F>, capacity: C) -> bool
where
    V: Copy + Eq + Hash,
    F: NumAssign + Ord + Copy,
    I: IntoIterator<Item = V>,
    C: Fn(V, V) -> Option<F>,
{
    let nodes: HashSet<V> = nodes.into_iter().collect();
    let mut excess: HashMap<V, (F, F)> = nodes.iter().map(|&u| (u, (F::zero(), F::zero()))).collect();

    for (u, v, f) in flow.iter() {
        if u == v || !nodes.contains(&u) || !nodes.contains(&v) {
            continue;
        }
        if f < F::zero() || capacity(u, v).map(|c| f > c).unwrap_or(false) {
            return false;
        }
        if let Some(e) = excess.get_mut(&u) {
            e.1 += f;
        }
        if let Some(e) = excess.get_mut(&v) {
            e.0 += f;
        }
    }

    excess
        .iter()
        .all(|(&u, &(inflow, outflow))| u == src || u == snk || inflow == outflow)
}
