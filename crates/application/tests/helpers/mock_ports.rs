use async_trait::async_trait;
use dnslookup_application::ports::{DnsResolution, DnsResolver, RecordCache};
use dnslookup_domain::{DnsQuery, DomainError, RecordType, ResourceRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct MockDnsResolver {
    responses: Mutex<HashMap<String, Result<DnsResolution, DomainError>>>,
    calls: AtomicUsize,
    last_query: Mutex<Option<DnsQuery>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn set_response(&self, domain: &str, response: Result<DnsResolution, DomainError>) {
        self.responses
            .lock()
            .unwrap()
            .insert(domain.to_string(), response);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<DnsQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());

        self.responses
            .lock()
            .unwrap()
            .get(query.domain.as_ref())
            .cloned()
            .unwrap_or_else(|| Err(DomainError::NotFound(query.domain.to_string())))
    }
}

pub struct MockRecordCache {
    records: Mutex<Vec<ResourceRecord>>,
}

impl MockRecordCache {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl Default for MockRecordCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordCache for MockRecordCache {
    fn insert(&self, record: ResourceRecord) {
        self.records.lock().unwrap().push(record);
    }

    fn lookup(&self, domain: &str, record_type: RecordType) -> Vec<ResourceRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name.eq_ignore_ascii_case(domain) && r.record_type == record_type)
            .cloned()
            .collect()
    }

    fn snapshot(&self) -> Vec<ResourceRecord> {
        self.records.lock().unwrap().clone()
    }
}
