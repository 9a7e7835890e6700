use dnslookup_application::use_cases::LookupHostUseCase;
use dnslookup_domain::Config;
use dnslookup_infrastructure::dns::{
    FastrandQueryIds, InMemoryRecordCache, IterativeResolver, QueryTracer, UdpTransport,
};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub resolver: Arc<IterativeResolver>,
    pub cache: Arc<InMemoryRecordCache>,
    pub tracer: Arc<QueryTracer>,
    pub lookup: Arc<LookupHostUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config) -> Self {
        info!("Initializing DNS lookup services");

        let cache = Arc::new(InMemoryRecordCache::new(config.resolver.negative_ttl()));
        let tracer = Arc::new(QueryTracer::stdout(config.resolver.trace));
        let transport = Arc::new(UdpTransport::from_config(&config.resolver));

        let resolver = Arc::new(IterativeResolver::new(
            &config.resolver,
            transport,
            Arc::new(FastrandQueryIds),
            cache.clone(),
            tracer.clone(),
        ));

        let lookup = Arc::new(LookupHostUseCase::new(resolver.clone(), cache.clone()));

        Self {
            resolver,
            cache,
            tracer,
            lookup,
        }
    }
}
