//! dnslookup Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod raw_message;

pub use config::{CliOverrides, Config, LoggingConfig, ResolverConfig};
pub use dns_query::DnsQuery;
pub use dns_record::{RecordType, ResourceRecord, NEGATIVE_TTL};
pub use errors::DomainError;
pub use raw_message::RawMessage;
