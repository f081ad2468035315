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

//! The Bellman-Ford relaxation pass.

use crate::endpoint::Endpoint;
use crate::table::{NeighborMap, RoutingTable};

/// Perform one Bellman-Ford pass over `table` using `neighbors`' link costs, and report whether
/// any entry changed.
///
/// For every destination `D != self` and every neighbor `N`, the candidate cost via `N` is
/// `link_cost(N) + min(cost of routes currently using N as next hop)`. If that candidate is
/// strictly cheaper than `D`'s current cost, `D` is overwritten with `{cost, next_hop: N}`. Ties
/// are left alone, which keeps a converged table stable under repeated passes (see
/// [`relax`]'s fixed-point property in the crate's test suite). The self-route is never examined
/// as a destination or overwritten.
pub fn relax(table: &mut RoutingTable, neighbors: &NeighborMap) -> bool {
    let self_endpoint = table.self_endpoint().clone();
    let destinations: Vec<Endpoint> = table
        .destinations()
        .filter(|d| **d != self_endpoint)
        .cloned()
        .collect();

    let mut changed = false;
    for destination in destinations {
        for (neighbor, link_cost) in neighbors.iter() {
            let Some(via_neighbor) = min_cost_via(table, neighbor) else {
                continue;
            };
            let candidate = link_cost + via_neighbor;
            let current = table.cost(&destination).unwrap_or(f64::INFINITY);
            if candidate < current {
                table.set(destination.clone(), candidate, neighbor.clone());
                changed = true;
            }
        }
    }
    changed
}

/// The minimum cost among all routes currently using `neighbor` as their next hop, or `None` if
/// no such route exists yet.
fn min_cost_via(table: &RoutingTable, neighbor: &Endpoint) -> Option<f64> {
    table
        .iter()
        .filter(|(_, record)| &record.next_hop == neighbor)
        .map(|(_, record)| record.cost)
        .fold(None, |acc, cost| match acc {
            Some(best) if best <= cost => Some(best),
            _ => Some(cost),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(s: &str) -> Endpoint {
        s.parse().unwrap()
    }

    #[test]
    fn self_route_is_never_touched() {
        let neighbors = NeighborMap::new([(ep("localhost:5002"), 3.0)]);
        let mut table = RoutingTable::new(ep("localhost:5001"), &neighbors);
        relax(&mut table, &neighbors);
        let self_route = table.get(&ep("localhost:5001")).unwrap();
        assert_eq!(self_route.cost, 0.0);
        assert_eq!(self_route.next_hop, ep("localhost:5001"));
    }

    #[test]
    fn fixed_point_reports_no_change_twice() {
        let neighbors = NeighborMap::new([(ep("localhost:5002"), 3.0)]);
        let mut table = RoutingTable::new(ep("localhost:5001"), &neighbors);
        relax(&mut table, &neighbors);
        assert!(!relax(&mut table, &neighbors));
    }

    #[test]
    fn transitive_path_is_discovered() {
        // A -> B (1), B -> C (1); A does not know C directly but learns of it via B's route.
        let neighbors = NeighborMap::new([(ep("localhost:5002"), 1.0)]);
        let mut table = RoutingTable::new(ep("localhost:5001"), &neighbors);
        table.adopt(
            ep("localhost:5003"),
            crate::table::RouteRecord {
                cost: 1.0,
                next_hop: ep("localhost:5002"),
                last_updated: crate::table::now_unix_seconds(),
            },
        );
        relax(&mut table, &neighbors);
        let route = table.get(&ep("localhost:5003")).unwrap();
        assert_eq!(route.cost, 2.0);
        assert_eq!(route.next_hop, ep("localhost:5002"));
    }

    #[test]
    fn prefers_cheaper_indirect_route() {
        // A -> B costs 10 directly, but A -> C -> B costs 1 + 1 = 2.
        let neighbors = NeighborMap::new([(ep("localhost:5002"), 10.0), (ep("localhost:5003"), 1.0)]);
        let mut table = RoutingTable::new(ep("localhost:5001"), &neighbors);
        // C advertises that it can reach B (5002) at cost 1.
        table.adopt(
            ep("localhost:5002"),
            crate::table::RouteRecord {
                cost: 10.0,
                next_hop: ep("localhost:5002"),
                last_updated: crate::table::now_unix_seconds(),
            },
        );
        let mut via_c = table.clone();
        via_c.adopt(
            ep("localhost:5002"),
            crate::table::RouteRecord {
                cost: 1.0,
                next_hop: ep("localhost:5003"),
                last_updated: crate::table::now_unix_seconds(),
            },
        );
        relax(&mut via_c, &neighbors);
        let route = via_c.get(&ep("localhost:5002")).unwrap();
        assert_eq!(route.cost, 2.0);
        assert_eq!(route.next_hop, ep("localhost:5003"));
    }

    #[test]
    fn monotone_never_increases_cost() {
        let neighbors = NeighborMap::new([(ep("localhost:5002"), 3.0)]);
        let mut table = RoutingTable::new(ep("localhost:5001"), &neighbors);
        let before: Vec<(Endpoint, f64)> = table
            .iter()
            .map(|(d, r)| (d.clone(), r.cost))
            .collect();
        relax(&mut table, &neighbors);
        for (dest, cost_before) in before {
            let cost_after = table.cost(&dest).unwrap_or(f64::INFINITY);
            assert!(cost_after <= cost_before);
        }
    }
}
