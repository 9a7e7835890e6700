use async_trait::async_trait;
use dnslookup_domain::{DomainError, RawMessage};
use std::net::IpAddr;

#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Sends one query datagram and waits (bounded) for one reply.
    ///
    /// The transaction ID is only used for logging here; matching it against
    /// the reply header is the response parser's job.
    async fn send(
        &self,
        message_bytes: &[u8],
        transaction_id: u16,
        server: IpAddr,
    ) -> Result<RawMessage, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
