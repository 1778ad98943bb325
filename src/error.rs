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

//! Errors raised while building networks and computing flows.

use std::fmt::Debug;
use thiserror::Error;

/// Error of an operation on a [`Network`](crate::Network).
///
/// `V` is the vertex identifier type of the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error<V>
where
    V: Debug,
{
    /// A query referred to a vertex that is not contained in the network.
    #[error("unknown vertex {0:?}")]
    UnknownVertex(V),

    /// Flow should be added to a pair of vertices that is not connected by
    /// an edge in either direction.
    #[error("no edge between {0:?} and {1:?}")]
    UnknownEdge(V, V),

    /// A capacity or flow value is out of range.
    #[error("invalid capacity on edge ({src:?}, {snk:?}): {msg}")]
    InvalidCapacity { src: V, snk: V, msg: String },

    /// An edge has been inserted twice with [`Duplicate::Reject`](crate::Duplicate::Reject).
    #[error("duplicate edge ({0:?}, {1:?})")]
    DuplicateEdge(V, V),

    /// Capacity bounds or flow conservation do not hold.
    ///
    /// This is a bug in the algorithm or in the initial flow passed by the
    /// caller, it is never a recoverable condition.
    #[error("flow invariant violated: {0}")]
    InvariantViolation(String),
}

pub type Result<T, V> = std::result::Result<T, Error<V>>;
