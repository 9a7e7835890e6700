mod dns_resolver;
mod dns_transport;
mod query_id_source;
mod record_cache;

pub use dns_resolver::{DnsResolution, DnsResolver};
pub use dns_transport::DnsTransport;
pub use query_id_source::QueryIdSource;
pub use record_cache::RecordCache;

// Re-export for convenience
pub use dnslookup_domain::DnsQuery;
