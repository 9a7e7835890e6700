use super::{read_u8, take};
use dnslookup_domain::DomainError;
use rustc_hash::FxHashSet;

pub const MAX_LABEL_LEN: usize = 63;

/// Longest encoded name allowed on the wire, terminating zero included.
pub const MAX_NAME_LEN: usize = 255;

const LABEL_TYPE_MASK: u8 = 0xC0;
const POINTER_TAG: u8 = 0xC0;
const LITERAL_TAG: u8 = 0x00;

/// A domain name read out of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Dotted form without a trailing dot; empty for the root.
    pub text: String,
    /// Bytes the name occupies at the offset it was read from. A pointer
    /// counts as 2 bytes no matter how much it expands to.
    pub wire_len: usize,
}

/// RFC 1035 §3.1 / §4.1.4 domain name encoding and decoding.
pub struct NameCodec;

impl NameCodec {
    /// Appends the uncompressed label sequence for `hostname` to `buf`.
    ///
    /// A single trailing dot is accepted; `""` and `"."` encode the root.
    /// `buf` is left untouched on error.
    pub fn encode(hostname: &str, buf: &mut Vec<u8>) -> Result<(), DomainError> {
        let trimmed = hostname.strip_suffix('.').unwrap_or(hostname);
        let mut encoded = Vec::with_capacity(trimmed.len() + 2);

        if !trimmed.is_empty() {
            for label in trimmed.split('.') {
                if label.is_empty() {
                    return Err(DomainError::InvalidDomainName(format!(
                        "Empty label in '{}'",
                        hostname
                    )));
                }
                if !label.is_ascii() {
                    return Err(DomainError::InvalidDomainName(format!(
                        "Non-ASCII label in '{}'",
                        hostname
                    )));
                }
                if label.len() > MAX_LABEL_LEN {
                    return Err(DomainError::LabelTooLong(label.to_string()));
                }
                encoded.push(label.len() as u8);
                encoded.extend_from_slice(label.as_bytes());
            }
        }
        encoded.push(0);

        if encoded.len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' encodes to {} bytes, limit is {}",
                hostname,
                encoded.len(),
                MAX_NAME_LEN
            )));
        }

        buf.extend_from_slice(&encoded);
        Ok(())
    }

    /// Decodes the name starting at `offset`, following compression pointers.
    ///
    /// Each pointer target may be visited once per call; a repeat is a
    /// `CompressionLoop`. Any read outside `buf` is a `TruncatedMessage`.
    /// Labels reached through pointers count towards `MAX_NAME_LEN`.
    pub fn decode(buf: &[u8], offset: usize) -> Result<ParsedName, DomainError> {
        let mut text = String::new();
        let mut pos = offset;
        let mut wire_len = 0usize;
        let mut name_len = 0usize;
        let mut followed_pointer = false;
        let mut visited: FxHashSet<usize> = FxHashSet::default();

        loop {
            let len_byte = read_u8(buf, pos)?;

            match len_byte & LABEL_TYPE_MASK {
                LITERAL_TAG if len_byte == 0 => {
                    if !followed_pointer {
                        wire_len += 1;
                    }
                    break;
                }
                LITERAL_TAG => {
                    let label_len = len_byte as usize;
                    name_len += 1 + label_len;
                    if name_len + 1 > MAX_NAME_LEN {
                        return Err(DomainError::NameTooLong(offset));
                    }
                    let label = take(buf, pos + 1, label_len)?;

                    if !text.is_empty() {
                        text.push('.');
                    }
                    text.push_str(&String::from_utf8_lossy(label));

                    if !followed_pointer {
                        wire_len += 1 + label_len;
                    }
                    pos += 1 + label_len;
                }
                POINTER_TAG => {
                    let low = read_u8(buf, pos + 1)?;
                    let target = (((len_byte & !LABEL_TYPE_MASK) as usize) << 8) | low as usize;

                    if !followed_pointer {
                        wire_len += 2;
                        followed_pointer = true;
                    }
                    if !visited.insert(target) {
                        return Err(DomainError::CompressionLoop(target));
                    }
                    pos = target;
                }
                _ => {
                    return Err(DomainError::MalformedLabel {
                        offset: pos,
                        byte: len_byte,
                    })
                }
            }
        }

        Ok(ParsedName { text, wire_len })
    }
}
