pub mod cache;
pub mod codec;
pub mod query_id;
pub mod resolver;
pub mod trace;
pub mod transport;

pub use cache::{CacheKey, InMemoryRecordCache};
pub use codec::{DnsResponse, MessageBuilder, NameCodec, ParsedName, ResponseHeader, ResponseParser};
pub use query_id::{FastrandQueryIds, SeededQueryIds};
pub use resolver::IterativeResolver;
pub use trace::QueryTracer;
pub use transport::UdpTransport;
