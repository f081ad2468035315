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

//! Errors surfaced above the core. Everything else (transient transport failures, decode
//! failures, protocol anomalies) is absorbed inside the relevant component instead of
//! propagating here — see the crate-level documentation for the full taxonomy.

use thiserror::Error;

use crate::endpoint::EndpointParseError;

/// Errors that can cause the router to fail to start.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Binding the UDP transport to the requested port failed.
    #[error("failed to bind UDP socket on port {port}: {source}")]
    Bind {
        /// The port that failed to bind.
        port: u16,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Why a `neighbor:cost` command-line argument was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NeighborParseError {
    /// The argument has no `=` separating the endpoint from the cost.
    #[error("expected '<endpoint>=<cost>', found {0:?}")]
    MissingCostSeparator(String),
    /// The endpoint half did not parse.
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] EndpointParseError),
    /// The cost half did not parse as a non-negative real number.
    #[error("cost must be a non-negative number, found {0:?}")]
    InvalidCost(String),
}
