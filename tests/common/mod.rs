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

//! Shared helpers for the end-to-end loopback scenarios.

use std::time::Duration;

use dvrd::supervisor::Router;
use dvrd::updater::UPDATE_INTERVAL;

/// Advance the paused test clock by `cycles` update periods, yielding in between so the inbound
/// and updater tasks of every running [`Router`] get a chance to run. The tokio clock being paused
/// does not affect real socket I/O: datagrams already in flight on loopback are delivered as soon
/// as their task is polled, independent of virtual time.
pub async fn run_cycles(cycles: u32) {
    for _ in 0..cycles {
        tokio::time::advance(UPDATE_INTERVAL + Duration::from_millis(1)).await;
        for _ in 0..50 {
            tokio::task::yield_now().await;
        }
    }
}
