//! RFC 1035 message codec: name encoding/decoding, query construction and
//! response decoding. Every read is bounds-checked against the message length.

pub mod message_builder;
pub mod name;
pub mod response_parser;

pub use message_builder::MessageBuilder;
pub use name::{NameCodec, ParsedName};
pub use response_parser::{DnsResponse, ResponseHeader, ResponseParser};

use dnslookup_domain::DomainError;

/// Fixed size of the DNS message header.
pub const HEADER_LEN: usize = 12;

/// QCLASS / CLASS value for the Internet.
pub const CLASS_IN: u16 = 1;

#[inline]
pub(crate) fn take(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], DomainError> {
    offset
        .checked_add(len)
        .and_then(|end| buf.get(offset..end))
        .ok_or(DomainError::TruncatedMessage {
            offset,
            needed: len,
            len: buf.len(),
        })
}

#[inline]
pub(crate) fn read_u8(buf: &[u8], offset: usize) -> Result<u8, DomainError> {
    take(buf, offset, 1).map(|b| b[0])
}

#[inline]
pub(crate) fn read_u16(buf: &[u8], offset: usize) -> Result<u16, DomainError> {
    take(buf, offset, 2).map(|b| u16::from_be_bytes([b[0], b[1]]))
}

#[inline]
pub(crate) fn read_u32(buf: &[u8], offset: usize) -> Result<u32, DomainError> {
    take(buf, offset, 4).map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}
