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

//! Maximum flows in directed networks with the algorithm of Malhotra,
//! Kumar and Maheshwari.
//!
//! A [`Network`] is built by inserting edges with integral capacities
//! between arbitrary vertex identifiers, two of which are the designated
//! source and sink. [`maxflow::mpm`] then computes a maximum flow, which is
//! stored in the network and returned as a [`FlowMap`] together with a
//! minimal cut.
//!
//! ```
//! use rs_mpm::{maxflow, Network};
//!
//! let mut g = Network::new("s", "t");
//! g.add_edge("s", "a", 5u32).unwrap();
//! g.add_edge("s", "b", 5).unwrap();
//! g.add_edge("a", "t", 7).unwrap();
//! g.add_edge("b", "a", 3).unwrap();
//!
//! assert_eq!(maxflow::max_flow(&mut g).unwrap(), 7);
//! assert!(g.is_flow_valid());
//! ```

mod num {
    pub use num_traits as traits;
}

mod error;
pub use self::error::{Error, Result};

// # Data structures

pub mod network;
pub use self::network::{Duplicate, Network};

pub mod flow;
pub use self::flow::{is_flow_valid, is_flow_valid_with, FlowMap};

mod distribute;
mod residual;

pub mod collections;

// # Algorithms

pub mod maxflow;

#[cfg(any(feature = "dimacs"))]
pub mod dimacs;
