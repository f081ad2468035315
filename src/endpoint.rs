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

//! The [`Endpoint`] identifier used as both a routing-table key and a datagram target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A textual `host:port` label.
///
/// Equality is byte-exact on the label; `localhost` and `127.0.0.1` are two distinct endpoints as
/// far as the routing table is concerned. The wire format serializes an [`Endpoint`] as its bare
/// string (not as a `{host, port}` object), so it can be used directly as a JSON object key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

/// Error produced when a string does not have the shape `host:port`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointParseError {
    /// The string contains no `:` separating host and port.
    #[error("endpoint {0:?} is missing a ':' separating host and port")]
    MissingSeparator(String),
    /// The port segment is not a valid `1..65535` integer.
    #[error("endpoint {0:?} has an invalid port")]
    InvalidPort(String),
}

impl Endpoint {
    /// Build the self-endpoint for a node listening on `port`, i.e. `localhost:<port>`.
    pub fn local(port: u16) -> Self {
        Self(format!("localhost:{port}"))
    }

    /// The label as a plain string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Endpoint {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((_, port)) = s.rsplit_once(':') else {
            return Err(EndpointParseError::MissingSeparator(s.to_string()));
        };
        match port.parse::<u16>() {
            Ok(0) | Err(_) => Err(EndpointParseError::InvalidPort(s.to_string())),
            Ok(_) => Ok(Self(s.to_string())),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Endpoint> for String {
    fn from(e: Endpoint) -> Self {
        e.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_port() {
        let e: Endpoint = "localhost:5001".parse().unwrap();
        assert_eq!(e.as_str(), "localhost:5001");
    }

    #[test]
    fn rejects_missing_port() {
        assert_eq!(
            "localhost".parse::<Endpoint>(),
            Err(EndpointParseError::MissingSeparator("localhost".to_string()))
        );
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!("localhost:abc".parse::<Endpoint>().is_err());
    }

    #[test]
    fn rejects_zero_port() {
        assert!("localhost:0".parse::<Endpoint>().is_err());
    }

    #[test]
    fn local_endpoint_uses_localhost() {
        assert_eq!(Endpoint::local(5001).as_str(), "localhost:5001");
    }

    #[test]
    fn distinguishes_localhost_from_loopback_ip() {
        let a: Endpoint = "localhost:5001".parse().unwrap();
        let b: Endpoint = "127.0.0.1:5001".parse().unwrap();
        assert_ne!(a, b);
    }
}
