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

//! The routing-table data model: [`RouteRecord`], [`RoutingTable`], and [`NeighborMap`].

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::endpoint::Endpoint;

/// The current wall-clock time as Unix-epoch seconds, the representation used both internally
/// and on the wire for [`RouteRecord::last_updated`].
pub fn now_unix_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// A single destination's entry in the routing table.
///
/// Absence of an entry for a destination denotes "unreachable"; `+∞` is never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    /// Non-negative cost to reach the destination.
    pub cost: f64,
    /// The neighbor to forward through, or the self-endpoint for the self-route.
    pub next_hop: Endpoint,
    /// When this record was last written, as Unix-epoch seconds.
    pub last_updated: f64,
}

impl RouteRecord {
    fn new(cost: f64, next_hop: Endpoint) -> Self {
        Self {
            cost,
            next_hop,
            last_updated: now_unix_seconds(),
        }
    }
}

/// The fixed mapping from neighbor endpoint to direct link cost.
///
/// Immutable after construction: the neighbor set is configured at startup and never changes
/// (see the crate's non-goals around dynamic neighbor discovery).
#[derive(Debug, Clone)]
pub struct NeighborMap(HashMap<Endpoint, f64>);

impl NeighborMap {
    /// Build a neighbor map from `(endpoint, cost)` pairs.
    pub fn new(links: impl IntoIterator<Item = (Endpoint, f64)>) -> Self {
        Self(links.into_iter().collect())
    }

    /// The configured link cost to `neighbor`, if it is a configured neighbor.
    pub fn link_cost(&self, neighbor: &Endpoint) -> Option<f64> {
        self.0.get(neighbor).copied()
    }

    /// Iterate over all configured neighbors and their link costs.
    pub fn iter(&self) -> impl Iterator<Item = (&Endpoint, f64)> {
        self.0.iter().map(|(e, c)| (e, *c))
    }

    /// The number of configured neighbors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no configured neighbors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The mapping from destination [`Endpoint`] to [`RouteRecord`] maintained by a single node.
///
/// Always contains a self-route with `cost = 0`. Insertion and iteration order are irrelevant to
/// the protocol; a `HashMap` is used internally, and [`RoutingTable::iter`] does not promise any
/// particular order (callers that need a deterministic order, such as the wire encoder, sort the
/// keys themselves).
#[derive(Debug, Clone)]
pub struct RoutingTable {
    self_endpoint: Endpoint,
    routes: HashMap<Endpoint, RouteRecord>,
}

impl RoutingTable {
    /// Build a fresh table for `self_endpoint`, seeded with the self-route and one route per
    /// configured neighbor (cost = link cost, next hop = that neighbor).
    pub fn new(self_endpoint: Endpoint, neighbors: &NeighborMap) -> Self {
        let mut routes = HashMap::with_capacity(neighbors.len() + 1);
        routes.insert(
            self_endpoint.clone(),
            RouteRecord::new(0.0, self_endpoint.clone()),
        );
        for (neighbor, cost) in neighbors.iter() {
            routes.insert(neighbor.clone(), RouteRecord::new(cost, neighbor.clone()));
        }
        Self {
            self_endpoint,
            routes,
        }
    }

    /// The node's own endpoint.
    pub fn self_endpoint(&self) -> &Endpoint {
        &self.self_endpoint
    }

    /// The current cost to `destination`, if reachable.
    pub fn cost(&self, destination: &Endpoint) -> Option<f64> {
        self.routes.get(destination).map(|r| r.cost)
    }

    /// The record for `destination`, if present.
    pub fn get(&self, destination: &Endpoint) -> Option<&RouteRecord> {
        self.routes.get(destination)
    }

    /// All destinations currently reachable (self-route included).
    pub fn destinations(&self) -> impl Iterator<Item = &Endpoint> {
        self.routes.keys()
    }

    /// Iterate over all `(destination, record)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Endpoint, &RouteRecord)> {
        self.routes.iter()
    }

    /// The number of destinations (including self).
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table holds only the self-route (never true after construction with any
    /// neighbors, but useful for tests).
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Overwrite the record for `destination`. Panics if `destination` is the self-endpoint: the
    /// self-route is never overwritten (invariant 1).
    pub(crate) fn set(&mut self, destination: Endpoint, cost: f64, next_hop: Endpoint) {
        assert_ne!(
            destination, self.self_endpoint,
            "the self-route must never be overwritten"
        );
        self.routes.insert(
            destination,
            RouteRecord {
                cost,
                next_hop,
                last_updated: now_unix_seconds(),
            },
        );
    }

    /// Adopt `record` for `destination`, as the inbound handler does after merging an advertised
    /// route. Unlike [`RoutingTable::set`], the caller supplies the full record (including a
    /// `last_updated`, which may be taken from the wire rather than freshly stamped).
    pub(crate) fn adopt(&mut self, destination: Endpoint, record: RouteRecord) {
        assert_ne!(
            destination, self.self_endpoint,
            "the self-route must never be overwritten"
        );
        self.routes.insert(destination, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(s: &str) -> Endpoint {
        s.parse().unwrap()
    }

    #[test]
    fn new_table_has_self_route() {
        let neighbors = NeighborMap::new([]);
        let table = RoutingTable::new(ep("localhost:5001"), &neighbors);
        let self_route = table.get(&ep("localhost:5001")).unwrap();
        assert_eq!(self_route.cost, 0.0);
        assert_eq!(self_route.next_hop, ep("localhost:5001"));
    }

    #[test]
    fn new_table_seeds_neighbor_routes() {
        let neighbors = NeighborMap::new([(ep("localhost:5002"), 3.0)]);
        let table = RoutingTable::new(ep("localhost:5001"), &neighbors);
        let route = table.get(&ep("localhost:5002")).unwrap();
        assert_eq!(route.cost, 3.0);
        assert_eq!(route.next_hop, ep("localhost:5002"));
    }

    #[test]
    #[should_panic]
    fn set_rejects_self_route_overwrite() {
        let neighbors = NeighborMap::new([]);
        let mut table = RoutingTable::new(ep("localhost:5001"), &neighbors);
        table.set(ep("localhost:5001"), 99.0, ep("localhost:5001"));
    }
}
