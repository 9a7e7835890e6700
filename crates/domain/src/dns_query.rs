use super::RecordType;
use std::sync::Arc;

/// What is being resolved: a hostname and the record type wanted for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }

    /// Lower-cased, without the trailing root dot.
    pub fn normalized(&self) -> Self {
        let trimmed = self.domain.strip_suffix('.').unwrap_or(&self.domain);
        Self::new(trimmed.to_ascii_lowercase(), self.record_type)
    }
}
