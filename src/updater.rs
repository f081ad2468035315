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

//! The periodic updater: relax the table on a fixed interval and broadcast on change.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::broadcast::broadcast;
use crate::relax::relax;
use crate::table::{NeighborMap, RoutingTable};
use crate::transport::UdpTransport;

/// How often the updater triggers a relaxation pass. Timer drift and jitter are acceptable;
/// missed ticks are not caught up.
pub const UPDATE_INTERVAL: Duration = Duration::from_secs(5);

/// Run the periodic updater loop until `stop` is set.
pub async fn run(
    table: Arc<Mutex<RoutingTable>>,
    neighbors: Arc<NeighborMap>,
    transport: Arc<UdpTransport>,
    stop: Arc<AtomicBool>,
) {
    // Advertise the freshly seeded table once before the first tick. A node whose own direct
    // links are already optimal never finds an improvement to relax, and so would otherwise never
    // broadcast at all, leaving destinations reachable only through a neighbor's neighbor
    // unlearnable by anyone.
    broadcast(&table, &neighbors, &transport).await;

    let mut ticker = tokio::time::interval(UPDATE_INTERVAL);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    while !stop.load(Ordering::SeqCst) {
        ticker.tick().await;
        if stop.load(Ordering::SeqCst) {
            break;
        }
        let changed = {
            let mut guard = table.lock().expect("routing table lock poisoned");
            relax(&mut guard, &neighbors)
        };
        if changed {
            broadcast(&table, &neighbors, &transport).await;
        }
    }
}
