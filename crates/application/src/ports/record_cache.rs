use dnslookup_domain::{RecordType, ResourceRecord};

/// Store for decoded resource records.
///
/// The response parser only ever calls `insert`; the resolution driver reads
/// back through `lookup` to decide its next step.
pub trait RecordCache: Send + Sync {
    /// Must accept duplicate (name, type, value) tuples.
    fn insert(&self, record: ResourceRecord);

    /// Live records for the pair, TTL reduced to the remaining lifetime.
    /// Negative entries are returned as-is.
    fn lookup(&self, domain: &str, record_type: RecordType) -> Vec<ResourceRecord>;

    fn snapshot(&self) -> Vec<ResourceRecord>;
}
