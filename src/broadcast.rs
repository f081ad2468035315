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

//! Sending the full current table to every configured neighbor.

use std::sync::Mutex;

use crate::table::{NeighborMap, RoutingTable};
use crate::transport::UdpTransport;
use crate::wire;

/// Encode `table` once under its lock, then send it to every neighbor.
///
/// The lock is released before any network I/O: the caller only ever holds it long enough to
/// clone out the encoded bytes. Per-neighbor send failures are isolated by
/// [`UdpTransport::send`] and never abort the loop.
pub async fn broadcast(table: &Mutex<RoutingTable>, neighbors: &NeighborMap, transport: &UdpTransport) {
    let payload = {
        let guard = table.lock().expect("routing table lock poisoned");
        wire::encode(&guard)
    };
    for (neighbor, _cost) in neighbors.iter() {
        transport.send(neighbor, &payload).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;

    #[tokio::test]
    async fn broadcast_sends_one_datagram_per_neighbor() {
        let self_transport = UdpTransport::bind(0).unwrap();

        let peer_a = UdpTransport::bind(0).unwrap();
        let peer_b = UdpTransport::bind(0).unwrap();
        let addr_a = peer_a.local_addr().unwrap();
        let addr_b = peer_b.local_addr().unwrap();
        let ep_a: Endpoint = format!("127.0.0.1:{}", addr_a.port()).parse().unwrap();
        let ep_b: Endpoint = format!("127.0.0.1:{}", addr_b.port()).parse().unwrap();

        let neighbors = NeighborMap::new([(ep_a.clone(), 1.0), (ep_b.clone(), 1.0)]);
        let table = Mutex::new(RoutingTable::new(Endpoint::local(0), &neighbors));

        broadcast(&table, &neighbors, &self_transport).await;

        assert!(peer_a
            .receive(std::time::Duration::from_secs(1))
            .await
            .unwrap()
            .is_some());
        assert!(peer_b
            .receive(std::time::Duration::from_secs(1))
            .await
            .unwrap()
            .is_some());
    }
}
