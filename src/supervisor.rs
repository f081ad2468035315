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

//! [`Router`]: the assembled node, owning its background tasks and exposing the handful of
//! operations the operator console needs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::endpoint::Endpoint;
use crate::error::RouterError;
use crate::table::{NeighborMap, RoutingTable};
use crate::transport::UdpTransport;
use crate::{inbound, updater};

/// The join handles for a [`Router`]'s two background tasks, returned separately from the
/// `Arc<Router>` so the router can be shared with the operator console while still allowing the
/// caller to wait for shutdown.
#[derive(Debug)]
pub struct RouterTasks {
    inbound: tokio::task::JoinHandle<()>,
    updater: tokio::task::JoinHandle<()>,
}

impl RouterTasks {
    /// Wait for both background tasks to finish. Intended to be called after
    /// [`Router::request_stop`].
    pub async fn join(self) {
        let _ = tokio::join!(self.inbound, self.updater);
    }
}

/// A running node: its shared routing table plus the handles needed to stop it cleanly.
///
/// `table` is guarded by a single, non-recursive [`Mutex`] that is never held across an `.await`
/// point — every critical section here is a plain synchronous read or write.
#[derive(Debug)]
pub struct Router {
    self_endpoint: Endpoint,
    table: Arc<Mutex<RoutingTable>>,
    neighbors: Arc<NeighborMap>,
    stop: Arc<AtomicBool>,
}

impl Router {
    /// Bind the transport, seed the routing table, and spawn the inbound handler and periodic
    /// updater as background tokio tasks. Returns the router and the handles for its background
    /// tasks separately, so the router can be wrapped in an `Arc` and shared while the caller
    /// retains ownership of the handles to await on shutdown.
    pub fn start(port: u16, links: Vec<(Endpoint, f64)>) -> Result<(Self, RouterTasks), RouterError> {
        let self_endpoint = Endpoint::local(port);
        let neighbors = Arc::new(NeighborMap::new(links));
        let table = Arc::new(Mutex::new(RoutingTable::new(
            self_endpoint.clone(),
            &neighbors,
        )));
        let transport =
            Arc::new(UdpTransport::bind(port).map_err(|source| RouterError::Bind { port, source })?);
        let stop = Arc::new(AtomicBool::new(false));

        let inbound_task = tokio::spawn(inbound::run(
            self_endpoint.clone(),
            table.clone(),
            neighbors.clone(),
            transport.clone(),
            stop.clone(),
        ));
        let updater_task = tokio::spawn(updater::run(
            table.clone(),
            neighbors.clone(),
            transport.clone(),
            stop.clone(),
        ));

        log::info!(
            "router listening on {self_endpoint} with {} neighbor(s)",
            neighbors.len()
        );

        let router = Self {
            self_endpoint,
            table,
            neighbors,
            stop,
        };
        let tasks = RouterTasks {
            inbound: inbound_task,
            updater: updater_task,
        };
        Ok((router, tasks))
    }

    /// This node's own endpoint.
    pub fn self_endpoint(&self) -> &Endpoint {
        &self.self_endpoint
    }

    /// The configured neighbors and their link costs.
    pub fn neighbors(&self) -> &NeighborMap {
        &self.neighbors
    }

    /// A snapshot of the current routing table, taken under the lock and immediately released.
    /// Never `.await`s while holding it.
    pub fn snapshot(&self) -> RoutingTable {
        self.table.lock().expect("routing table lock poisoned").clone()
    }

    /// Signal both background tasks to stop at their next opportunity (within one
    /// [`inbound::RECEIVE_TIMEOUT`] / [`updater::UPDATE_INTERVAL`] tick).
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_with_a_self_route_and_stops_promptly() {
        let (router, tasks) = Router::start(58001, vec![]).unwrap();
        let table = router.snapshot();
        assert_eq!(table.cost(router.self_endpoint()), Some(0.0));

        router.request_stop();
        tokio::time::timeout(std::time::Duration::from_secs(5), tasks.join())
            .await
            .expect("background tasks did not stop promptly");
    }
}
