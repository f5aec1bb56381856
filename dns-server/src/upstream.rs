use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    time::Duration,
};

use async_trait::async_trait;
use dns_lib::query::message::Message;
use log::trace;
use tokio::net::UdpSocket;

use crate::errors::UpstreamError;

/// The resolver that cache misses are forwarded to.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Sends `query` unchanged and returns the first reply that carries the transaction `id`.
    async fn exchange(&self, query: &[u8], id: u16) -> Result<Vec<u8>, UpstreamError>;
}

/// Forwards each query over its own UDP socket.
///
/// The socket is bound to an ephemeral port and connected to the upstream, so the kernel drops
/// datagrams from any other peer. Datagrams from the upstream with a different transaction id are
/// skipped until the timeout runs out.
#[derive(Debug, Clone)]
pub struct UdpUpstream {
    address: SocketAddr,
    timeout: Duration,
}

impl UdpUpstream {
    #[inline]
    pub fn new(address: SocketAddr, timeout: Duration) -> Self {
        Self { address, timeout }
    }

    #[inline]
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    #[inline]
    fn io_error(&self, source: std::io::Error) -> UpstreamError {
        UpstreamError::Io { address: self.address, source }
    }

    async fn connect(&self) -> Result<UdpSocket, UpstreamError> {
        let local_addr = match self.address {
            SocketAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            SocketAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };
        let udp_socket = UdpSocket::bind(local_addr).await
            .map_err(|error| self.io_error(error))?;
        udp_socket.connect(self.address).await
            .map_err(|error| self.io_error(error))?;
        Ok(udp_socket)
    }

    async fn read_reply(&self, udp_socket: &UdpSocket, id: u16) -> Result<Vec<u8>, UpstreamError> {
        let mut buffer = [0_u8; Message::MAX_MESSAGE_SIZE];
        loop {
            let received_byte_count = udp_socket.recv(&mut buffer).await
                .map_err(|error| self.io_error(error))?;
            let reply = &buffer[..received_byte_count];
            match reply {
                [high, low, ..] if u16::from_be_bytes([*high, *low]) == id => return Ok(reply.to_vec()),
                _ => trace!(upstream:% = self.address; "Discarded {received_byte_count} byte datagram that does not answer query {id}"),
            }
        }
    }
}

#[async_trait]
impl Upstream for UdpUpstream {
    async fn exchange(&self, query: &[u8], id: u16) -> Result<Vec<u8>, UpstreamError> {
        let udp_socket = self.connect().await?;

        let bytes_written = udp_socket.send(query).await
            .map_err(|error| self.io_error(error))?;
        if bytes_written != query.len() {
            return Err(UpstreamError::IncorrectNumberBytes {
                address: self.address,
                expected: query.len(),
                sent: bytes_written,
            });
        }

        match tokio::time::timeout(self.timeout, self.read_reply(&udp_socket, id)).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout { address: self.address, timeout: self.timeout }),
        }
    }
}
