use super::name::NameCodec;
use super::{read_u16, read_u32, read_u8, take, HEADER_LEN};
use dnslookup_application::ports::RecordCache;
use dnslookup_domain::{DomainError, RawMessage, RecordType, ResourceRecord};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::{debug, warn};

const FLAG_AUTHORITATIVE: u8 = 0x04;
const FLAG_TRUNCATED: u8 = 0x02;
const RCODE_MASK: u8 = 0x0F;

/// Bytes between the owner name and RDATA: TYPE, CLASS, TTL, RDLENGTH.
const RR_FIXED_LEN: usize = 10;

/// QTYPE + QCLASS
const QUESTION_FIXED_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub id: u16,
    pub authoritative: bool,
    pub truncated: bool,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl ResponseHeader {
    pub fn parse(buf: &[u8]) -> Result<Self, DomainError> {
        take(buf, 0, HEADER_LEN)?;
        let flags_hi = read_u8(buf, 2)?;
        let flags_lo = read_u8(buf, 3)?;

        Ok(Self {
            id: read_u16(buf, 0)?,
            authoritative: flags_hi & FLAG_AUTHORITATIVE != 0,
            truncated: flags_hi & FLAG_TRUNCATED != 0,
            rcode: flags_lo & RCODE_MASK,
            qdcount: read_u16(buf, 4)?,
            ancount: read_u16(buf, 6)?,
            nscount: read_u16(buf, 8)?,
            arcount: read_u16(buf, 10)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub header: ResponseHeader,

    pub answers: Vec<ResourceRecord>,

    pub authority: Vec<ResourceRecord>,

    pub additional: Vec<ResourceRecord>,

    /// Records dropped because their RDATA did not fit their type.
    pub skipped: usize,
}

impl DnsResponse {
    pub fn is_authoritative(&self) -> bool {
        self.header.authoritative
    }

    /// NS targets in the authority section (a referral when answers are empty).
    pub fn referral_targets(&self) -> Vec<&str> {
        self.authority
            .iter()
            .filter(|r| r.record_type == RecordType::NS && !r.value.is_empty())
            .map(|r| &*r.value)
            .collect()
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Decodes a reply to the query identified by `expected_id`.
    ///
    /// Every decoded record is handed to `cache` as soon as it is produced,
    /// in section order. A header ID that differs from `expected_id` or a
    /// nonzero RCODE rejects the whole message before any record is read.
    pub fn parse(
        raw: &RawMessage,
        expected_id: u16,
        cache: &dyn RecordCache,
    ) -> Result<DnsResponse, DomainError> {
        let buf = raw.as_bytes();
        let header = ResponseHeader::parse(buf)?;

        if header.id != expected_id {
            return Err(DomainError::TransactionMismatch {
                expected: expected_id,
                received: header.id,
            });
        }

        if header.rcode != 0 {
            return Err(DomainError::ServerError(header.rcode));
        }

        if header.truncated {
            warn!(id = header.id, "Response has TC bit set, records may be incomplete");
        }

        let mut pos = HEADER_LEN;
        for _ in 0..header.qdcount {
            let name = NameCodec::decode(buf, pos)?;
            pos += name.wire_len;
            take(buf, pos, QUESTION_FIXED_LEN)?;
            pos += QUESTION_FIXED_LEN;
        }

        let mut skipped = 0;
        let answers = Self::parse_section(buf, &mut pos, header.ancount, cache, &mut skipped)?;
        let authority = Self::parse_section(buf, &mut pos, header.nscount, cache, &mut skipped)?;
        let additional = Self::parse_section(buf, &mut pos, header.arcount, cache, &mut skipped)?;

        debug!(
            id = header.id,
            authoritative = header.authoritative,
            answers = answers.len(),
            authority = authority.len(),
            additional = additional.len(),
            skipped = skipped,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            header,
            answers,
            authority,
            additional,
            skipped,
        })
    }

    fn parse_section(
        buf: &[u8],
        pos: &mut usize,
        count: u16,
        cache: &dyn RecordCache,
        skipped: &mut usize,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let mut records = Vec::with_capacity(usize::from(count).min(32));

        for _ in 0..count {
            match Self::parse_record(buf, pos)? {
                Some(record) => {
                    cache.insert(record.clone());
                    records.push(record);
                }
                None => *skipped += 1,
            }
        }

        Ok(records)
    }

    /// Reads one resource record and leaves `pos` just past its RDATA.
    ///
    /// `Ok(None)` means the record was framed correctly but its RDATA could
    /// not be interpreted; the cursor is still advanced by RDLENGTH.
    fn parse_record(buf: &[u8], pos: &mut usize) -> Result<Option<ResourceRecord>, DomainError> {
        let owner = NameCodec::decode(buf, *pos)?;
        let fixed = *pos + owner.wire_len;

        let record_type = RecordType::from_u16(read_u16(buf, fixed)?);
        let _class = read_u16(buf, fixed + 2)?;
        // TTLs with the top bit set are read as zero (RFC 2181 §8).
        let ttl = i32::try_from(read_u32(buf, fixed + 4)?).unwrap_or(0);
        let rdlength = usize::from(read_u16(buf, fixed + 8)?);

        let rdata_start = fixed + RR_FIXED_LEN;
        take(buf, rdata_start, rdlength)?;
        *pos = rdata_start + rdlength;

        match Self::decode_rdata(buf, rdata_start, rdlength, record_type) {
            Ok(value) => Ok(Some(ResourceRecord::new(
                owner.text,
                record_type,
                ttl,
                value,
            ))),
            Err(e) => {
                warn!(
                    name = %owner.text,
                    record_type = %record_type,
                    rdlength = rdlength,
                    error = %e,
                    "Skipping malformed record"
                );
                Ok(None)
            }
        }
    }

    fn decode_rdata(
        buf: &[u8],
        start: usize,
        rdlength: usize,
        record_type: RecordType,
    ) -> Result<String, DomainError> {
        let rdata = take(buf, start, rdlength)?;

        match record_type {
            RecordType::A => {
                let octets: [u8; 4] = rdata.try_into().map_err(|_| {
                    DomainError::MalformedRecord(format!("A record with RDLENGTH {}", rdlength))
                })?;
                Ok(Ipv4Addr::from(octets).to_string())
            }
            RecordType::AAAA => {
                let octets: [u8; 16] = rdata.try_into().map_err(|_| {
                    DomainError::MalformedRecord(format!("AAAA record with RDLENGTH {}", rdlength))
                })?;
                Ok(Ipv6Addr::from(octets).to_string())
            }
            // SOA: only the primary name server (MNAME) is kept.
            RecordType::CNAME | RecordType::NS | RecordType::SOA => {
                if rdlength == 0 {
                    return Err(DomainError::MalformedRecord(format!(
                        "{} record with empty RDATA",
                        record_type
                    )));
                }
                let name = NameCodec::decode(buf, start)?;
                if name.wire_len > rdlength {
                    return Err(DomainError::MalformedRecord(format!(
                        "{} name runs {} bytes past RDLENGTH {}",
                        record_type,
                        name.wire_len - rdlength,
                        rdlength
                    )));
                }
                Ok(name.text)
            }
            RecordType::MX => {
                if rdlength < 3 {
                    return Err(DomainError::MalformedRecord(format!(
                        "MX record with RDLENGTH {}",
                        rdlength
                    )));
                }
                let exchange = NameCodec::decode(buf, start + 2)?;
                if 2 + exchange.wire_len > rdlength {
                    return Err(DomainError::MalformedRecord(format!(
                        "MX exchange runs past RDLENGTH {}",
                        rdlength
                    )));
                }
                Ok(exchange.text)
            }
            RecordType::Other(_) => Ok(String::new()),
        }
    }
}
