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

//! The inbound-message handler: decode datagrams, merge advertised routes, and re-broadcast on
//! change. See [`merge`] for how a sender is identified and its link cost applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::broadcast::broadcast;
use crate::endpoint::Endpoint;
use crate::table::{NeighborMap, RoutingTable};
use crate::transport::UdpTransport;
use crate::wire;

/// How long each `receive` call waits before giving the handler a chance to observe the stop
/// flag.
pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(1);

/// Run the inbound handler loop until `stop` is set.
///
/// Consumes datagrams one at a time: a decode failure drops the datagram and logs a warning; a
/// successful decode is merged into `table` under its lock using [`merge`], and a broadcast is
/// sent (lock released first) whenever the merge changed something.
pub async fn run(
    self_endpoint: Endpoint,
    table: Arc<Mutex<RoutingTable>>,
    neighbors: Arc<NeighborMap>,
    transport: Arc<UdpTransport>,
    stop: Arc<AtomicBool>,
) {
    while !stop.load(Ordering::SeqCst) {
        let received = match transport.receive(RECEIVE_TIMEOUT).await {
            Ok(Some((payload, _src))) => payload,
            Ok(None) => continue,
            Err(err) => {
                if stop.load(Ordering::SeqCst) {
                    log::debug!("inbound handler: transport error after stop: {err}");
                } else {
                    log::warn!("inbound handler: transport error: {err}");
                }
                continue;
            }
        };

        let advertised = match wire::decode(&received) {
            Ok(advertised) => advertised,
            Err(err) => {
                log::warn!("inbound handler: dropping malformed datagram: {err}");
                continue;
            }
        };

        let changed = {
            let mut guard = table.lock().expect("routing table lock poisoned");
            merge(&mut guard, &self_endpoint, &neighbors, advertised)
        };

        if changed {
            broadcast(&table, &neighbors, &transport).await;
        }
    }
}

/// Merge `advertised` entries into `table`, skipping the self-endpoint and adopting whichever
/// entries are new or strictly cheaper than what's currently stored. Returns whether anything
/// changed.
///
/// A full-table broadcast always contains its sender's own self-entry (`cost == 0.0` and
/// `next_hop` equal to the entry's own destination); that entry's destination identifies who sent
/// this datagram without relying on the UDP source address. When that sender is one of our
/// configured neighbors, every entry's cost is taken as the sender's reported cost plus our link
/// cost to them, and `next_hop` is rewritten to the sender, the standard distance-vector update
/// needed so a destination reachable only through a neighbor's neighbor converges to the correct
/// total cost instead of the sender's own (shorter) view of it. A payload with no identifiable
/// sender (a partial or hand-built datagram, as in a malformed-input test) falls back to adopting
/// each entry verbatim, including its advertised `next_hop`.
fn merge(
    table: &mut RoutingTable,
    self_endpoint: &Endpoint,
    neighbors: &NeighborMap,
    advertised: Vec<(Endpoint, crate::table::RouteRecord)>,
) -> bool {
    let via_sender = advertised
        .iter()
        .find(|(destination, record)| record.cost == 0.0 && &record.next_hop == *destination)
        .and_then(|(sender, _)| neighbors.link_cost(sender).map(|link_cost| (sender.clone(), link_cost)));

    let mut changed = false;
    for (destination, record) in advertised {
        if &destination == self_endpoint {
            continue;
        }
        let last_updated = record.last_updated;
        let (cost, next_hop) = match &via_sender {
            Some((sender, link_cost)) => (link_cost + record.cost, sender.clone()),
            None => (record.cost, record.next_hop),
        };
        let is_improvement = match table.cost(&destination) {
            Some(current_cost) => cost < current_cost,
            None => true,
        };
        if is_improvement {
            table.adopt(
                destination,
                crate::table::RouteRecord {
                    cost,
                    next_hop,
                    last_updated,
                },
            );
            changed = true;
        }
    }
    changed
}
