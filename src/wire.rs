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

//! Wire encoding: one datagram is a JSON object mapping endpoint strings to route records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::table::{RouteRecord, RoutingTable};

/// The wire shape of a single [`RouteRecord`]. Unknown fields are ignored by `serde`'s default
/// behavior; a record missing `cost` or `next_hop` fails to deserialize, which drops the whole
/// datagram (the decoder does not attempt a partial merge).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct WireRecord {
    cost: f64,
    next_hop: Endpoint,
    last_updated: f64,
}

impl From<&RouteRecord> for WireRecord {
    fn from(r: &RouteRecord) -> Self {
        Self {
            cost: r.cost,
            next_hop: r.next_hop.clone(),
            last_updated: r.last_updated,
        }
    }
}

impl From<WireRecord> for RouteRecord {
    fn from(w: WireRecord) -> Self {
        Self {
            cost: w.cost,
            next_hop: w.next_hop,
            last_updated: w.last_updated,
        }
    }
}

/// Error returned by [`decode`] when a datagram is not a valid table advertisement.
#[derive(Debug, thiserror::Error)]
#[error("malformed routing table datagram: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Encode `table` as the bytes of one datagram.
///
/// Keys are sorted before serialization (a `BTreeMap` is used as the serialization target) so the
/// output is deterministic across runs with the same table contents, which keeps round-trip tests
/// reproducible even though [`RoutingTable`] itself makes no iteration-order promises.
pub fn encode(table: &RoutingTable) -> Vec<u8> {
    let ordered: BTreeMap<&Endpoint, WireRecord> = table
        .iter()
        .map(|(dest, record)| (dest, WireRecord::from(record)))
        .collect();
    serde_json::to_vec(&ordered).expect("a routing table always serializes to JSON")
}

/// Decode a datagram into `(destination, record)` pairs. Records with missing required fields (or
/// a payload that isn't a JSON object at all) cause the whole datagram to be rejected.
pub fn decode(bytes: &[u8]) -> Result<Vec<(Endpoint, RouteRecord)>, DecodeError> {
    let parsed: BTreeMap<Endpoint, WireRecord> = serde_json::from_slice(bytes)?;
    Ok(parsed
        .into_iter()
        .map(|(dest, record)| (dest, record.into()))
        .collect())
}
