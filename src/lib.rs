// BgpSim: BGP Network Simulator written in Rust
// Copyright 2022-2024 Tibor Schneider <sctibor@ethz.ch>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![deny(missing_docs, missing_debug_implementations)]

//! # dvrd
//!
//! A distributed distance-vector routing daemon. Each node binds a UDP socket, maintains a table
//! of `(destination, cost, next_hop)` entries, and keeps it converged with its neighbors by
//! periodically running a Bellman-Ford relaxation pass and re-broadcasting whenever the table
//! changes. There is no central coordinator: every node runs the identical protocol, and the
//! network converges purely from exchanging whole-table advertisements with configured neighbors.
//!
//! ## Main Concepts
//!
//! [`supervisor::Router`] is the assembled node: it owns the shared [`table::RoutingTable`], binds
//! a [`transport::UdpTransport`], and spawns two background tasks onto the tokio runtime —
//! [`inbound::run`] (reacts to incoming advertisements) and [`updater::run`] (periodically relaxes
//! and re-broadcasts). [`console::run`] is a third collaborator, a blocking stdin loop on its own
//! OS thread that lets an operator inspect the table or shut the node down.
//!
//! [`endpoint::Endpoint`] is the `host:port` identifier used both as a routing-table key and as a
//! datagram destination. [`wire`] defines the JSON encoding exchanged between nodes. [`relax`]
//! implements the distance-vector update rule; [`cli`] and [`error`] cover argument parsing and the
//! small set of errors that can prevent a node from starting.

pub mod broadcast;
pub mod cli;
pub mod console;
pub mod endpoint;
pub mod error;
pub mod inbound;
pub mod relax;
pub mod supervisor;
pub mod table;
pub mod transport;
pub mod updater;
pub mod wire;
