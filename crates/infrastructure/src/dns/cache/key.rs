use dnslookup_domain::RecordType;

/// Names are compared case-insensitively, so keys are stored lower-cased.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: Box<str>,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        let trimmed = domain.strip_suffix('.').unwrap_or(domain);
        Self {
            domain: trimmed.to_ascii_lowercase().into_boxed_str(),
            record_type,
        }
    }
}
