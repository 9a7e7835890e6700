use async_trait::async_trait;
use dnslookup_domain::{DnsQuery, DomainError, ResourceRecord};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DnsResolution {
    pub records: Vec<ResourceRecord>,
    pub cache_hit: bool,
    /// Final name after following CNAMEs, when it differs from the query.
    pub canonical_name: Option<Arc<str>>,
}

impl DnsResolution {
    pub fn new(records: Vec<ResourceRecord>, cache_hit: bool) -> Self {
        Self {
            records,
            cache_hit,
            canonical_name: None,
        }
    }

    pub fn with_cname(
        records: Vec<ResourceRecord>,
        cache_hit: bool,
        canonical_name: Option<Arc<str>>,
    ) -> Self {
        Self {
            records,
            cache_hit,
            canonical_name,
        }
    }

    pub fn min_ttl(&self) -> Option<i32> {
        self.records.iter().map(|r| r.ttl).min()
    }
}

#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError>;
}
