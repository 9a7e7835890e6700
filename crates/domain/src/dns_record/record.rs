use super::RecordType;
use std::sync::Arc;

/// TTL marking a negative cache entry: the name/type pair is known not to exist.
pub const NEGATIVE_TTL: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Arc<str>,

    pub record_type: RecordType,

    pub ttl: i32,

    /// Dotted address for A/AAAA, target name for CNAME/NS/SOA/MX, empty otherwise.
    pub value: Arc<str>,
}

impl ResourceRecord {
    pub fn new(
        name: impl Into<Arc<str>>,
        record_type: RecordType,
        ttl: i32,
        value: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            value: value.into(),
        }
    }

    pub fn negative(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self::new(
            name,
            record_type,
            NEGATIVE_TTL,
            record_type.negative_value(),
        )
    }

    pub fn is_negative(&self) -> bool {
        self.ttl == NEGATIVE_TTL
    }

    /// Lifetime in seconds; `None` for negative entries.
    pub fn ttl_secs(&self) -> Option<u64> {
        if self.ttl < 0 {
            None
        } else {
            Some(self.ttl as u64)
        }
    }

    pub fn with_ttl(&self, ttl: i32) -> Self {
        Self {
            ttl,
            ..self.clone()
        }
    }
}
