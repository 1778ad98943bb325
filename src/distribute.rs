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

//! Pushing and pulling flow through a level graph.
//!
//! `push(u, amount)` routes `amount` units from `u` along outgoing edges
//! towards the sink, `pull(u, amount)` fetches `amount` units along
//! incoming edges from the source. Every vertex reached on the way
//! distributes the flow it receives in the same manner, until the flow
//! arrives at a terminal. An edge is only charged after the flow sent
//! over it has been distributed by its other end point, and only with the
//! amount that end point could pass on.
//!
//! The traversal is depth first and uses an explicit stack, so the depth of
//! the level graph is not limited by the call stack. The capacities of the
//! traversed edges are reduced by the amount sent, and the amount is
//! recorded in a [`FlowMap`].

use crate::error::Result;
use crate::flow::FlowMap;
use crate::network::Network;
use crate::num::traits::NumAssign;

use log::warn;

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Direction of a distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    /// Along outgoing edges towards the sink.
    Push,
    /// Along incoming edges from the source.
    Pull,
}

/// A vertex waiting for flow to be distributed.
struct Frame<F> {
    node: usize,
    /// Flow still to be distributed.
    amount: F,
    /// Neighbours at the time the frame has been opened.
    neighs: Vec<usize>,
    /// Next position in `neighs`.
    pos: usize,
    /// Edge to the neighbour currently being served and the amount it
    /// passed on.
    pending: Option<(usize, F)>,
}

impl<V, F> Network<V, F>
where
    V: Copy + Eq + Hash + Debug,
    F: NumAssign + Ord + Copy + Display,
{
    /// Push `amount` units of flow out of `u`.
    ///
    /// The flow is added to `flow`, each vertex that received flow is
    /// appended to `trace`. Returns the amount that could not be sent.
    /// The recorded flow is conserved at every vertex except `u` and the
    /// terminals, so `u` sends exactly `amount` minus the returned value.
    ///
    /// In a level graph the result is zero if `amount` does not exceed the
    /// smallest capacity of all inner vertices.
    pub fn push(&mut self, u: V, amount: F, flow: &mut FlowMap<V, F>, trace: &mut Vec<V>) -> Result<F, V> {
        self.distribute_ids(u, amount, Dir::Push, flow, trace)
    }

    /// Pull `amount` units of flow into `u`.
    ///
    /// See [`Network::push`].
    pub fn pull(&mut self, u: V, amount: F, flow: &mut FlowMap<V, F>, trace: &mut Vec<V>) -> Result<F, V> {
        self.distribute_ids(u, amount, Dir::Pull, flow, trace)
    }

    fn distribute_ids(
        &mut self,
        u: V,
        amount: F,
        dir: Dir,
        flow: &mut FlowMap<V, F>,
        trace: &mut Vec<V>,
    ) -> Result<F, V> {
        let u = self.node_id(u)?;
        let mut touched = vec![];
        let rest = self.distribute(u, amount, dir, flow, &mut touched);
        trace.extend(touched.into_iter().map(|v| self.ids[v]));
        Ok(rest)
    }

    fn open(&self, node: usize, amount: F, dir: Dir) -> Frame<F> {
        let adj = match dir {
            Dir::Push => &self.outs[node],
            Dir::Pull => &self.ins[node],
        };
        Frame {
            node,
            amount,
            neighs: adj.keys().copied().collect(),
            pos: 0,
            pending: None,
        }
    }

    /// Residual capacity of the edge between `u` and its neighbour `v`.
    fn residual(&self, u: usize, v: usize, dir: Dir) -> F {
        let adj = match dir {
            Dir::Push => &self.outs[u],
            Dir::Pull => &self.ins[u],
        };
        adj.get(&v).map(|l| l.cap).unwrap_or_else(F::zero)
    }

    /// Charge `amount` to the edge between `u` and its neighbour `v`.
    pub(crate) fn commit(&mut self, u: usize, v: usize, amount: F, dir: Dir, flow: &mut FlowMap<V, F>) {
        let (from, to) = match dir {
            Dir::Push => (u, v),
            Dir::Pull => (v, u),
        };
        flow.add(self.ids[from], self.ids[to], amount);
        if let Some(l) = self.outs[from].get_mut(&to) {
            l.cap -= amount;
        }
        if let Some(l) = self.ins[to].get_mut(&from) {
            l.cap -= amount;
        }
    }

    /// Distribute `amount` units starting at vertex index `start`.
    ///
    /// Returns the amount that could not be distributed at `start`.
    pub(crate) fn distribute(
        &mut self,
        start: usize,
        amount: F,
        dir: Dir,
        flow: &mut FlowMap<V, F>,
        trace: &mut Vec<usize>,
    ) -> F {
        let mut stack = vec![self.open(start, amount, dir)];
        let mut rest = F::zero();

        while let Some(top) = stack.last_mut() {
            if let Some((v, d)) = top.pending.take() {
                if !d.is_zero() {
                    let u = top.node;
                    top.amount -= d;
                    self.commit(u, v, d, dir, flow);
                    trace.push(v);
                }
            }

            // find the next neighbour that can take some flow
            let mut next = None;
            if !top.amount.is_zero() {
                while top.pos < top.neighs.len() {
                    let v = top.neighs[top.pos];
                    top.pos += 1;
                    let d = self.residual(top.node, v, dir).min(top.amount);
                    if d > F::zero() {
                        next = Some((v, d));
                        break;
                    }
                }
            }

            match next {
                Some((v, d)) => {
                    top.pending = Some((v, d));
                    if !self.is_terminal(v) {
                        let frame = self.open(v, d, dir);
                        stack.push(frame);
                    }
                }
                None => {
                    let done = stack.pop();
                    if let Some(frame) = done {
                        match stack.last_mut().and_then(|parent| parent.pending.as_mut()) {
                            // the parent only charges what has been passed on
                            Some((_, d)) => *d -= frame.amount,
                            None => {
                                if !frame.amount.is_zero() {
                                    warn!(
                                        "could not distribute {} units at vertex {:?}",
                                        frame.amount, self.ids[frame.node]
                                    );
                                }
                                rest = frame.amount;
                            }
                        }
                    }
                }
            }
        }

        rest
    }
}

#[cfg(test)]
mod tests {
    use super::Dir;
    use crate::{is_flow_valid, Network};

    const S: i32 = i32::MIN;
    const T: i32 = i32::MAX;

    fn wikipedia() -> Network<i32, i32> {
        Network::from_edges(
            S,
            T,
            vec![
                (S, 1, 10),
                (S, 2, 10),
                (1, 2, 2),
                (1, 3, 4),
                (1, 4, 8),
                (2, 4, 9),
                (3, T, 10),
                (4, 3, 6),
                (4, T, 10),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_push_and_pull_create_valid_flow() {
        let mut level = wikipedia().level_graph();
        let nodes = vec![S, 1, 2, 3, 4, T];
        let mut flow = level.empty_flow();
        let mut trace = vec![];

        assert_eq!(level.push(1, 10, &mut flow, &mut trace), Ok(0));
        assert_eq!(level.pull(1, 10, &mut flow, &mut trace), Ok(0));
        assert!(is_flow_valid(nodes.clone(), S, T, &flow));
        assert_eq!(flow.get(S, 1), Some(10));
        assert_eq!(flow.get(1, 3), Some(4));
        assert_eq!(flow.get(1, 4), Some(6));
        assert!(level.has_edge(1, 4, 2, 0));
        assert!(level.has_edge(S, 1, 0, 0));
        assert!(trace.contains(&3) && trace.contains(&4) && trace.contains(&S) && trace.contains(&T));

        assert_eq!(level.push(2, 4, &mut flow, &mut trace), Ok(0));
        assert_eq!(level.pull(2, 4, &mut flow, &mut trace), Ok(0));
        assert!(is_flow_valid(nodes, S, T, &flow));
        assert_eq!(flow.value(S), Some(14));
        assert_eq!(flow.in_flow(T), 14);
    }

    #[test]
    fn test_push_is_depth_first() {
        let mut g = Network::from_edges(S, T, vec![(S, 1, 5), (1, 2, 5), (2, 3, 5), (3, T, 5), (1, T, 5)]).unwrap();
        let mut flow = g.empty_flow();
        let mut trace = vec![];
        assert_eq!(g.push(1, 7, &mut flow, &mut trace), Ok(0));
        // neighbours are served in order of insertion, the sink came first
        assert_eq!(flow.get(1, T), Some(5));
        assert_eq!(flow.get(1, 2), Some(2));
        assert_eq!(flow.get(2, 3), Some(2));
        assert_eq!(flow.get(3, T), Some(2));
        // (1,2) is charged after the flow reached the sink
        assert_eq!(trace, vec![T, T, 3, 2]);
        assert!(g.has_edge(1, 2, 3, 0));
    }

    #[test]
    fn test_undistributed_amount() {
        let mut g = Network::from_edges(S, T, vec![(S, 1, 5), (1, 2, 5), (2, T, 3)]).unwrap();
        let mut flow = g.empty_flow();
        let mut trace = vec![];
        assert_eq!(g.push(1, 4, &mut flow, &mut trace), Ok(1));
        assert_eq!(flow.get(1, 2), Some(3));
        assert_eq!(flow.get(2, T), Some(3));
        assert!(is_flow_valid(vec![1, 2, T], 1, T, &flow));
        assert!(g.has_edge(1, 2, 2, 0));

        assert_eq!(g.push(2, 1, &mut flow, &mut trace), Ok(1));
        assert_eq!(flow.get(2, T), Some(3));
        assert_eq!(g.push(7, 1, &mut flow, &mut trace), Err(crate::Error::UnknownVertex(7)));
    }

    #[test]
    fn test_reroute_leftover() {
        // vertex 2 passes on only one of the four units sent to it
        let mut g = Network::from_edges(S, T, vec![(S, 1, 5), (1, 2, 5), (1, 3, 5), (2, T, 1), (3, T, 5)]).unwrap();
        let mut flow = g.empty_flow();
        let mut trace = vec![];
        assert_eq!(g.push(1, 4, &mut flow, &mut trace), Ok(0));
        assert_eq!(flow.get(1, 2), Some(1));
        assert_eq!(flow.get(1, 3), Some(3));
        assert_eq!(flow.get(3, T), Some(3));
        assert!(is_flow_valid(vec![1, 2, 3, T], 1, T, &flow));

        let mut flow = g.empty_flow();
        assert_eq!(g.pull(1, 4, &mut flow, &mut trace), Ok(0));
        assert_eq!(flow.get(S, 1), Some(4));
    }

    #[test]
    fn test_long_path() {
        // deep enough to overflow a recursive implementation with small stacks
        let n = 100_000;
        let mut g = Network::new(-1, -2);
        g.add_edge(-1, 0, 3).unwrap();
        for i in 0..n {
            g.add_edge(i, i + 1, 3).unwrap();
        }
        g.add_edge(n, -2, 3).unwrap();

        let mut flow = g.empty_flow();
        let mut trace = vec![];
        let mid = g.node_id(n / 2).unwrap();
        assert_eq!(g.distribute(mid, 3, Dir::Push, &mut flow, &mut trace), 0);
        assert_eq!(g.distribute(mid, 3, Dir::Pull, &mut flow, &mut trace), 0);
        assert_eq!(flow.in_flow(-2), 3);
        assert_eq!(flow.out_flow(-1), 3);
        assert!(g.has_edge(0, 1, 0, 0));
        assert_eq!(trace.len(), n as usize + 2);
    }
}
