use std::{io, net::SocketAddr, sync::Arc};

use dns_lib::{interface::cache::main_cache::AsyncMainCache, query::message::Message};
use log::{debug, info, trace, warn};
use tokio::{net::UdpSocket, sync::Semaphore};

use crate::{
    errors::ProxyError,
    resolver::{ForwardingResolver, Resolution},
    upstream::Upstream,
};

/// Listens for client queries on one UDP socket and resolves each of them on its own task.
pub struct DnsProxyServer<C, U> {
    udp_socket: Arc<UdpSocket>,
    resolver: Arc<ForwardingResolver<C, U>>,
    permits: Arc<Semaphore>,
}

impl<C, U> DnsProxyServer<C, U>
where
    C: AsyncMainCache + Send + Sync + 'static,
    U: Upstream + 'static,
{
    pub async fn bind(
        listen_address: SocketAddr,
        resolver: Arc<ForwardingResolver<C, U>>,
        max_concurrent_queries: usize,
    ) -> io::Result<Self> {
        let udp_socket = UdpSocket::bind(listen_address).await?;
        let local_addr = udp_socket.local_addr()?;
        info!(address:% = local_addr; "Listening for DNS queries");
        Ok(Self {
            udp_socket: Arc::new(udp_socket),
            resolver,
            permits: Arc::new(Semaphore::new(max_concurrent_queries)),
        })
    }

    #[inline]
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.udp_socket.local_addr()
    }

    /// Serves queries until the listening socket fails.
    ///
    /// A permit is taken before each receive, so once the concurrency limit is reached no more
    /// datagrams are read until an exchange finishes. Receive errors caused by a single datagram
    /// or peer are logged and skipped.
    pub async fn run(self) -> io::Result<()> {
        let mut buffer = [0_u8; Message::MAX_UDP_MESSAGE_SIZE];
        loop {
            let permit = self.permits.clone().acquire_owned().await
                .map_err(io::Error::other)?;
            let (received_byte_count, peer) = match self.udp_socket.recv_from(&mut buffer).await {
                Ok(received) => received,
                Err(error) if is_per_datagram_error(&error) => {
                    warn!("Failed to receive a datagram: {error}");
                    continue;
                },
                Err(error) => return Err(error),
            };
            trace!(client:% = peer; "Received {received_byte_count} bytes");

            let query = buffer[..received_byte_count].to_vec();
            let udp_socket = self.udp_socket.clone();
            let resolver = self.resolver.clone();
            tokio::spawn(async move {
                if let Err(error) = handle_query(&udp_socket, &resolver, &query, peer).await {
                    warn!(client:% = peer; "Dropped query: {error}");
                }
                drop(permit);
            });
        }
    }
}

/// Errors that a receive can report for one datagram or one peer without the listening socket
/// itself being broken. Some platforms report an ICMP port unreachable for an earlier reply as a
/// `ConnectionReset` on the next receive.
fn is_per_datagram_error(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::Interrupted
        | io::ErrorKind::WouldBlock
        | io::ErrorKind::TimedOut
    )
}

/// Resolves one datagram and sends the result back to `peer`.
pub async fn handle_query<C, U>(
    udp_socket: &UdpSocket,
    resolver: &ForwardingResolver<C, U>,
    query: &[u8],
    peer: SocketAddr,
) -> Result<(), ProxyError>
where
    C: AsyncMainCache + Send + Sync,
    U: Upstream,
{
    let resolution = resolver.resolve(query).await?;
    match &resolution {
        Resolution::Cached(_) => debug!(client:% = peer; "Sending cached response"),
        Resolution::Forwarded(_) => debug!(client:% = peer; "Relaying upstream response"),
        Resolution::Failed(_) => debug!(client:% = peer; "Relaying upstream error response"),
    }
    udp_socket.send_to(resolution.bytes(), peer).await?;
    Ok(())
}
