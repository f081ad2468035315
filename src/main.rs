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

use std::sync::Arc;

use clap::Parser;

use dvrd::cli::Cli;
use dvrd::console;
use dvrd::supervisor::Router;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (router, tasks) = Router::start(cli.port, cli.neighbors)?;
    let router = Arc::new(router);

    let console_router = router.clone();
    let mut console_thread = tokio::task::spawn_blocking(move || console::run(console_router));

    tokio::select! {
        result = &mut console_thread => {
            if let Err(err) = result {
                log::warn!("console thread panicked: {err}");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            log::info!("received interrupt, shutting down");
        }
    }

    // request_stop() is idempotent: the console may have already called it on `quit`/EOF, or
    // neither has run yet because Ctrl-C fired first.
    router.request_stop();
    tasks.join().await;

    Ok(())
}
