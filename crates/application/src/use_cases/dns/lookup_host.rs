use crate::ports::{DnsResolution, DnsResolver, RecordCache};
use dnslookup_domain::{DnsQuery, DomainError};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub struct LookupHostUseCase {
    resolver: Arc<dyn DnsResolver>,
    cache: Arc<dyn RecordCache>,
}

impl LookupHostUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>, cache: Arc<dyn RecordCache>) -> Self {
        Self { resolver, cache }
    }

    pub async fn execute(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        let start = Instant::now();
        let query = query.normalized();

        if query.domain.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "Hostname cannot be empty".to_string(),
            ));
        }

        let cached = self.cache.lookup(&query.domain, query.record_type);
        if cached.iter().any(|r| r.is_negative()) {
            debug!(domain = %query.domain, record_type = %query.record_type, "Negative cache hit");
            return Err(DomainError::NotFound(query.domain.to_string()));
        }
        if !cached.is_empty() {
            debug!(
                domain = %query.domain,
                record_type = %query.record_type,
                records = cached.len(),
                "Cache hit"
            );
            return Ok(DnsResolution::new(cached, true));
        }

        let result = self.resolver.resolve(&query).await;

        match &result {
            Ok(resolution) => info!(
                domain = %query.domain,
                record_type = %query.record_type,
                records = resolution.records.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Lookup completed"
            ),
            Err(e) => info!(
                domain = %query.domain,
                record_type = %query.record_type,
                error = %e,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Lookup failed"
            ),
        }

        result
    }
}
