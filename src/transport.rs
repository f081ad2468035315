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

//! The UDP datagram transport: bind, send, and receive whole-table payloads.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;

use crate::endpoint::Endpoint;

/// Datagrams larger than this are truncated by the kernel before we ever see them; decoding then
/// fails and the datagram is dropped (see [`crate::wire::decode`]).
pub const RECV_BUF_LEN: usize = 4096;

/// A bidirectional, connectionless datagram endpoint bound to `0.0.0.0:<port>`.
///
/// `send` and `receive` never return I/O errors to the caller for conditions that are expected in
/// normal operation (resolution failures, unreachable peers, timeouts, connection-reset
/// indications) — those are logged and absorbed here, matching the source's "never propagate
/// transient network errors" policy.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Bind a new transport to `0.0.0.0:<port>` with `SO_REUSEADDR` enabled.
    pub fn bind(port: u16) -> io::Result<Self> {
        let addr: SocketAddr = ([0, 0, 0, 0], port).into();
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
        socket.set_reuse_address(true)?;
        socket.set_nonblocking(true)?;
        socket.bind(&addr.into())?;
        let socket = UdpSocket::from_std(socket.into())?;
        Ok(Self { socket })
    }

    /// Resolve `endpoint` and send `payload` as one datagram. Resolution failures, unreachable
    /// destinations, and oversized messages are logged at `warn` and swallowed.
    pub async fn send(&self, endpoint: &Endpoint, payload: &[u8]) {
        let addr = match tokio::net::lookup_host(endpoint.as_str()).await {
            Ok(mut addrs) => match addrs.next() {
                Some(addr) => addr,
                None => {
                    log::warn!("send to {endpoint}: host resolved to no addresses");
                    return;
                }
            },
            Err(err) => {
                log::warn!("send to {endpoint}: resolution failed: {err}");
                return;
            }
        };
        if let Err(err) = self.socket.send_to(payload, addr).await {
            log::warn!("send to {endpoint} ({addr}) failed: {err}");
        }
    }

    /// Wait up to `timeout` for the next datagram, returning its payload and source address.
    /// Returns `Ok(None)` both on a plain timeout and on a connection-reset indication (a prior
    /// send to a now-unreachable peer can surface asynchronously on a datagram socket; treating
    /// it as "no message" avoids tearing down the handler over an expected condition).
    pub async fn receive(&self, timeout: Duration) -> io::Result<Option<(Vec<u8>, SocketAddr)>> {
        let mut buf = vec![0u8; RECV_BUF_LEN];
        match tokio::time::timeout(timeout, self.socket.recv_from(&mut buf)).await {
            Ok(Ok((len, src))) => {
                buf.truncate(len);
                Ok(Some((buf, src)))
            }
            Ok(Err(err)) if err.kind() == io::ErrorKind::ConnectionReset => {
                log::debug!("receive: connection reset, treating as no message: {err}");
                Ok(None)
            }
            Ok(Err(err)) => Err(err),
            Err(_elapsed) => Ok(None),
        }
    }

    /// The local address this transport is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sends_and_receives_a_datagram() {
        let a = UdpTransport::bind(0).unwrap();
        let b = UdpTransport::bind(0).unwrap();
        let b_addr = b.local_addr().unwrap();
        let b_endpoint: Endpoint = format!("127.0.0.1:{}", b_addr.port()).parse().unwrap();

        a.send(&b_endpoint, b"hello").await;

        let (payload, _src) = b
            .receive(Duration::from_secs(1))
            .await
            .unwrap()
            .expect("expected a datagram within the timeout");
        assert_eq!(payload, b"hello");
    }

    #[tokio::test]
    async fn receive_times_out_with_no_message() {
        let a = UdpTransport::bind(0).unwrap();
        let result = a.receive(Duration::from_millis(50)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn send_to_unresolvable_host_does_not_panic_or_error() {
        let a = UdpTransport::bind(0).unwrap();
        let bad: Endpoint = "this-host-does-not-resolve.invalid:9999".parse().unwrap();
        a.send(&bad, b"hello").await;
    }
}
