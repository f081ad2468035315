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

//! The operator console: a blocking stdin REPL running on its own OS thread, since
//! [`std::io::stdin`] has no non-blocking read and the core otherwise has no reason to touch a
//! thread outside the tokio runtime.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::supervisor::Router;

/// Read commands from stdin until EOF, `quit`, or `exit`, then call [`Router::request_stop`].
///
/// Recognized commands:
/// - `routes` — print the current routing table, one destination per line.
/// - `help` — list recognized commands.
/// - `quit` / `exit` — stop the router and return.
///
/// Anything else prints an "unknown command" message and continues.
pub fn run(router: Arc<Router>) {
    let stdin = io::stdin();
    let prompt = format!("{}> ", router.self_endpoint());
    print_help();
    loop {
        print!("{prompt}");
        let _ = io::stdout().flush();

        let mut line = String::new();
        let bytes_read = match stdin.lock().read_line(&mut line) {
            Ok(n) => n,
            Err(err) => {
                log::warn!("console: error reading stdin: {err}");
                break;
            }
        };
        if bytes_read == 0 {
            // EOF, e.g. the process's stdin was closed or redirected from an empty file.
            break;
        }

        match line.trim() {
            "routes" => print_routes(&router),
            "help" => print_help(),
            "quit" | "exit" => break,
            "" => {}
            other => println!("unknown command: {other:?} (try \"help\")"),
        }
    }
    router.request_stop();
}

fn print_help() {
    println!("commands: routes, help, quit");
}

fn print_routes(router: &Router) {
    let table = router.snapshot();
    let mut rows: Vec<_> = table.iter().collect();
    rows.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
    for (destination, record) in rows {
        println!(
            "{destination}\tcost={}\tnext_hop={}",
            record.cost, record.next_hop
        );
    }
}
