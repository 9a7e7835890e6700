//! DNS Message Builder
//!
//! Constructs single-question query datagrams in wire format. Recursion
//! Desired is never set: this client walks the delegation chain itself.

use super::name::NameCodec;
use super::{CLASS_IN, HEADER_LEN};
use dnslookup_application::ports::QueryIdSource;
use dnslookup_domain::{DomainError, RecordType};
use std::sync::Arc;

/// Standard query, RD clear.
const QUERY_FLAGS: u16 = 0x0000;

/// Builds DNS query messages in wire format
pub struct MessageBuilder {
    ids: Arc<dyn QueryIdSource>,
}

impl MessageBuilder {
    pub fn new(ids: Arc<dyn QueryIdSource>) -> Self {
        Self { ids }
    }

    /// Build a query with a fresh transaction ID.
    ///
    /// Returns the ID alongside the bytes so the reply can be matched.
    pub fn build_query(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let id = self.ids.next_id();
        let bytes = Self::build_query_with_id(id, domain, record_type)?;
        Ok((id, bytes))
    }

    /// Header (QDCOUNT=1, all other counts zero) followed by one IN-class question.
    pub fn build_query_with_id(
        id: u16,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(HEADER_LEN + domain.len() + 6);

        buf.extend_from_slice(&id.to_be_bytes());
        buf.extend_from_slice(&QUERY_FLAGS.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());

        NameCodec::encode(domain, &mut buf)?;

        buf.extend_from_slice(&record_type.to_u16().to_be_bytes());
        buf.extend_from_slice(&CLASS_IN.to_be_bytes());

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedId(u16);

    impl QueryIdSource for FixedId {
        fn next_id(&self) -> u16 {
            self.0
        }
    }

    #[test]
    fn test_build_a_query_exact_bytes() {
        let bytes = MessageBuilder::build_query_with_id(0xBEEF, "www.example.com", RecordType::A)
            .unwrap();

        let mut expected = vec![0xBE, 0xEF, 0x00, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0];
        expected.extend_from_slice(b"\x03www\x07example\x03com\x00");
        expected.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);

        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_recursion_desired_not_set() {
        let bytes = MessageBuilder::build_query_with_id(1, "example.com", RecordType::NS).unwrap();
        assert_eq!(bytes[2], 0x00);
        assert_eq!(bytes[3], 0x00);
    }

    #[test]
    fn test_build_query_returns_wire_id() {
        let builder = MessageBuilder::new(Arc::new(FixedId(0x1234)));
        let (id, bytes) = builder.build_query("test.com", RecordType::AAAA).unwrap();

        assert_eq!(id, 0x1234);
        assert_eq!(u16::from_be_bytes([bytes[0], bytes[1]]), id);
        let qtype = &bytes[bytes.len() - 4..bytes.len() - 2];
        assert_eq!(u16::from_be_bytes([qtype[0], qtype[1]]), 28);
    }

    #[test]
    fn test_other_type_code_is_carried() {
        let bytes =
            MessageBuilder::build_query_with_id(7, "example.com", RecordType::Other(16)).unwrap();
        let qtype = &bytes[bytes.len() - 4..bytes.len() - 2];
        assert_eq!(u16::from_be_bytes([qtype[0], qtype[1]]), 16);
    }

    #[test]
    fn test_label_too_long_fails() {
        let domain = format!("{}.com", "x".repeat(64));
        let result = MessageBuilder::build_query_with_id(1, &domain, RecordType::A);
        assert!(matches!(result, Err(DomainError::LabelTooLong(_))));
    }
}
