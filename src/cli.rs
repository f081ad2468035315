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

//! Command-line argument parsing, the only external collaborator the core depends on for its
//! initial configuration.

use clap::Parser;

use crate::endpoint::Endpoint;
use crate::error::NeighborParseError;

/// A distributed distance-vector routing daemon.
#[derive(Debug, Parser)]
#[command(name = "dvrd", version, about)]
pub struct Cli {
    /// Local UDP port to bind.
    pub port: u16,

    /// Neighbors as `<endpoint>=<cost>`, e.g. `localhost:5002=3.0`. May be repeated.
    #[arg(value_parser = parse_neighbor)]
    pub neighbors: Vec<(Endpoint, f64)>,
}

/// Parse one `<endpoint>=<cost>` command-line token.
fn parse_neighbor(arg: &str) -> Result<(Endpoint, f64), NeighborParseError> {
    let (endpoint, cost) = arg
        .split_once('=')
        .ok_or_else(|| NeighborParseError::MissingCostSeparator(arg.to_string()))?;
    let endpoint: Endpoint = endpoint.parse()?;
    let cost: f64 = cost
        .parse()
        .map_err(|_| NeighborParseError::InvalidCost(cost.to_string()))?;
    if cost < 0.0 || !cost.is_finite() {
        return Err(NeighborParseError::InvalidCost(cost.to_string()));
    }
    Ok((endpoint, cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_endpoint_and_cost() {
        let (endpoint, cost) = parse_neighbor("localhost:5002=3.0").unwrap();
        assert_eq!(endpoint.as_str(), "localhost:5002");
        assert_eq!(cost, 3.0);
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(parse_neighbor("localhost:5002").is_err());
    }

    #[test]
    fn rejects_negative_cost() {
        assert!(parse_neighbor("localhost:5002=-1.0").is_err());
    }

    #[test]
    fn rejects_non_numeric_cost() {
        assert!(parse_neighbor("localhost:5002=abc").is_err());
    }

    #[test]
    fn cli_parses_full_invocation() {
        let cli = Cli::parse_from(["dvrd", "5001", "localhost:5002=3.0", "localhost:5003=1.0"]);
        assert_eq!(cli.port, 5001);
        assert_eq!(cli.neighbors.len(), 2);
    }
}
