//! Iterative resolution: root → TLD → authoritative, following NS referrals
//! and CNAME chains. Exactly one query is outstanding at any time.

use crate::dns::codec::{DnsResponse, MessageBuilder, ResponseParser};
use crate::dns::trace::QueryTracer;
use async_trait::async_trait;
use dnslookup_application::ports::{
    DnsResolution, DnsResolver, DnsTransport, QueryIdSource, RecordCache,
};
use dnslookup_domain::{DnsQuery, DomainError, RecordType, ResolverConfig, ResourceRecord};
use futures::future::{BoxFuture, FutureExt};
use std::net::IpAddr;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Outcome of resolving one name, after any aliases were followed.
struct Resolved {
    records: Vec<ResourceRecord>,
    canonical: Arc<str>,
}

enum CachedAnswer {
    Records(Vec<ResourceRecord>),
    Negative,
    Alias(Arc<str>),
    Miss,
}

pub struct IterativeResolver {
    transport: Arc<dyn DnsTransport>,
    builder: MessageBuilder,
    cache: Arc<dyn RecordCache>,
    tracer: Arc<QueryTracer>,
    root_server: RwLock<IpAddr>,
    max_referrals: usize,
    max_cname_depth: usize,
}

impl IterativeResolver {
    pub fn new(
        config: &ResolverConfig,
        transport: Arc<dyn DnsTransport>,
        ids: Arc<dyn QueryIdSource>,
        cache: Arc<dyn RecordCache>,
        tracer: Arc<QueryTracer>,
    ) -> Self {
        info!(
            root_server = %config.root_server,
            protocol = transport.protocol_name(),
            max_referrals = config.max_referrals,
            "Iterative DNS resolver created"
        );

        Self {
            transport,
            builder: MessageBuilder::new(ids),
            cache,
            tracer,
            root_server: RwLock::new(config.root_server),
            max_referrals: config.max_referrals,
            max_cname_depth: config.max_cname_depth,
        }
    }

    pub fn root_server(&self) -> IpAddr {
        match self.root_server.read() {
            Ok(server) => *server,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set_root_server(&self, server: IpAddr) {
        match self.root_server.write() {
            Ok(mut current) => *current = server,
            Err(poisoned) => *poisoned.into_inner() = server,
        }
        info!(root_server = %server, "Root server changed");
    }

    /// One build → send → parse round trip against a single server.
    pub async fn query_server(
        &self,
        domain: &str,
        record_type: RecordType,
        server: IpAddr,
    ) -> Result<DnsResponse, DomainError> {
        let (id, bytes) = self.builder.build_query(domain, record_type)?;
        self.tracer.query(id, domain, record_type, server);

        let raw = self.transport.send(&bytes, id, server).await?;
        let response = ResponseParser::parse(&raw, id, self.cache.as_ref())?;

        self.tracer.response(&response);
        Ok(response)
    }

    fn resolve_name(
        &self,
        domain: Arc<str>,
        record_type: RecordType,
        depth: usize,
    ) -> BoxFuture<'_, Result<Resolved, DomainError>> {
        async move {
            if depth > self.max_cname_depth {
                return Err(DomainError::ResolutionLoop(format!(
                    "{} needs more than {} nested lookups",
                    domain, self.max_cname_depth
                )));
            }

            match self.cached_answer(&domain, record_type) {
                CachedAnswer::Records(records) => {
                    return Ok(Resolved {
                        records,
                        canonical: domain,
                    })
                }
                CachedAnswer::Negative => return Err(DomainError::NotFound(domain.to_string())),
                CachedAnswer::Alias(target) => {
                    debug!(domain = %domain, target = %target, "Following cached CNAME");
                    return self.resolve_name(target, record_type, depth + 1).await;
                }
                CachedAnswer::Miss => {}
            }

            let mut servers = vec![self.root_server()];

            for _ in 0..=self.max_referrals {
                let response = self.query_any(&domain, record_type, &servers).await?;

                let answers: Vec<ResourceRecord> = response
                    .answers
                    .iter()
                    .filter(|r| r.record_type == record_type && same_name(&r.name, &domain))
                    .cloned()
                    .collect();
                if !answers.is_empty() {
                    return Ok(Resolved {
                        records: answers,
                        canonical: domain,
                    });
                }

                if record_type != RecordType::CNAME {
                    if let Some(alias) = response
                        .answers
                        .iter()
                        .find(|r| r.record_type == RecordType::CNAME && same_name(&r.name, &domain))
                    {
                        debug!(domain = %domain, target = %alias.value, "Following CNAME");
                        return self
                            .resolve_name(alias.value.clone(), record_type, depth + 1)
                            .await;
                    }
                }

                let targets: Vec<Arc<str>> = response
                    .referral_targets()
                    .into_iter()
                    .map(Arc::from)
                    .collect();

                if targets.is_empty() {
                    if response.is_authoritative() {
                        self.cache_negative(&domain, record_type);
                    }
                    return Err(DomainError::NotFound(domain.to_string()));
                }

                servers = self
                    .referral_servers(&domain, &response, &targets, depth)
                    .await?;
                debug!(
                    domain = %domain,
                    zone_servers = ?targets,
                    addresses = servers.len(),
                    "Following referral"
                );
            }

            Err(DomainError::ResolutionLoop(format!(
                "{} exceeded {} referrals",
                domain, self.max_referrals
            )))
        }
        .boxed()
    }

    fn cached_answer(&self, domain: &str, record_type: RecordType) -> CachedAnswer {
        let records = self.cache.lookup(domain, record_type);
        if records.iter().any(|r| r.is_negative()) {
            return CachedAnswer::Negative;
        }
        if !records.is_empty() {
            return CachedAnswer::Records(records);
        }

        if record_type != RecordType::CNAME {
            if let Some(alias) = self
                .cache
                .lookup(domain, RecordType::CNAME)
                .into_iter()
                .find(|r| !r.is_negative() && !r.value.is_empty())
            {
                return CachedAnswer::Alias(alias.value);
            }
        }

        CachedAnswer::Miss
    }

    /// Tries each candidate in order until one answers.
    async fn query_any(
        &self,
        domain: &str,
        record_type: RecordType,
        servers: &[IpAddr],
    ) -> Result<DnsResponse, DomainError> {
        let mut last_error = None;

        for &server in servers {
            match self.query_server(domain, record_type, server).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_nxdomain() => {
                    self.cache_negative(domain, record_type);
                    return Err(DomainError::NotFound(domain.to_string()));
                }
                Err(e) if e.is_retryable() => {
                    warn!(domain = %domain, server = %server, error = %e, "Server failed, trying next");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| DomainError::NotFound(domain.to_string())))
    }

    /// Addresses for the delegated zone's name servers: glue first, cache
    /// next, and a nested lookup only when neither has an address.
    async fn referral_servers(
        &self,
        domain: &str,
        response: &DnsResponse,
        targets: &[Arc<str>],
        depth: usize,
    ) -> Result<Vec<IpAddr>, DomainError> {
        let mut addresses: Vec<IpAddr> = Vec::new();

        for target in targets {
            let glue = response
                .additional
                .iter()
                .filter(|r| r.record_type == RecordType::A && same_name(&r.name, target))
                .cloned();
            let cached = self
                .cache
                .lookup(target, RecordType::A)
                .into_iter()
                .filter(|r| !r.is_negative());

            for record in glue.chain(cached) {
                if let Ok(addr) = record.value.parse::<IpAddr>() {
                    if !addresses.contains(&addr) {
                        addresses.push(addr);
                    }
                }
            }
        }

        if addresses.is_empty() {
            for target in targets {
                debug!(domain = %domain, name_server = %target, "Resolving name server without glue");
                match self
                    .resolve_name(target.clone(), RecordType::A, depth + 1)
                    .await
                {
                    Ok(resolved) => {
                        addresses.extend(
                            resolved
                                .records
                                .iter()
                                .filter_map(|r| r.value.parse::<IpAddr>().ok()),
                        );
                        if !addresses.is_empty() {
                            break;
                        }
                    }
                    Err(e) => {
                        debug!(name_server = %target, error = %e, "Name server lookup failed");
                    }
                }
            }
        }

        if addresses.is_empty() {
            return Err(DomainError::NotFound(format!(
                "{} (no reachable name server)",
                domain
            )));
        }

        Ok(addresses)
    }

    fn cache_negative(&self, domain: &str, record_type: RecordType) {
        info!(domain = %domain, record_type = %record_type, "Caching negative answer");
        self.cache
            .insert(ResourceRecord::negative(domain, record_type));
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim_end_matches('.')
        .eq_ignore_ascii_case(b.trim_end_matches('.'))
}

#[async_trait]
impl DnsResolver for IterativeResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        let query = query.normalized();
        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            "IterativeResolver: starting lookup"
        );

        let resolved = self
            .resolve_name(query.domain.clone(), query.record_type, 0)
            .await?;

        let canonical = (!same_name(&resolved.canonical, &query.domain)).then_some(resolved.canonical);
        Ok(DnsResolution::with_cname(resolved.records, false, canonical))
    }
}
