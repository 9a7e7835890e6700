//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! One datagram out, one datagram back, bounded by the query timeout.
//! Replies larger than the receive buffer are cut short by the socket read;
//! there is no TCP fallback.

use async_trait::async_trait;
use dnslookup_application::ports::DnsTransport;
use dnslookup_domain::{DomainError, RawMessage, ResolverConfig};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

pub const DNS_PORT: u16 = 53;

/// Receive buffer large enough for the replies this client expects.
pub const DEFAULT_RECEIVE_BUFFER_SIZE: usize = 1024;

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// DNS over UDP transport
///
/// Each `send` binds its own ephemeral socket, so one transport can be
/// shared by independent resolution sessions.
#[derive(Debug, Clone)]
pub struct UdpTransport {
    port: u16,
    timeout: Duration,
    receive_buffer_size: usize,
}

impl UdpTransport {
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self {
            port,
            timeout,
            receive_buffer_size: DEFAULT_RECEIVE_BUFFER_SIZE,
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.port, config.query_timeout())
            .with_receive_buffer_size(config.receive_buffer_size)
    }

    pub fn with_receive_buffer_size(mut self, size: usize) -> Self {
        self.receive_buffer_size = size;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn bind_addr(server: IpAddr) -> SocketAddr {
        match server {
            IpAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            IpAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        }
    }
}

impl Default for UdpTransport {
    fn default() -> Self {
        Self::new(DNS_PORT, DEFAULT_QUERY_TIMEOUT)
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        transaction_id: u16,
        server: IpAddr,
    ) -> Result<RawMessage, DomainError> {
        let server_addr = SocketAddr::new(server, self.port);

        let socket = UdpSocket::bind(Self::bind_addr(server))
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;

        let bytes_sent = socket.send_to(message_bytes, server_addr).await.map_err(|e| {
            DomainError::IoError(format!(
                "Failed to send UDP query to {}: {}",
                server_addr, e
            ))
        })?;

        debug!(
            server = %server_addr,
            id = transaction_id,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; self.receive_buffer_size];

        let (bytes_received, from_addr) =
            tokio::time::timeout(self.timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| {
                    debug!(server = %server_addr, id = transaction_id, "UDP query timed out");
                    DomainError::QueryTimeout
                })?
                .map_err(|e| {
                    DomainError::IoError(format!(
                        "Failed to receive UDP response from {}: {}",
                        server_addr, e
                    ))
                })?;

        if from_addr.ip() != server {
            warn!(
                expected = %server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        debug!(
            server = %server_addr,
            id = transaction_id,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(RawMessage::new(recv_buf, bytes_received))
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
