#![allow(dead_code)]

/// Uncompressed wire form of a dotted name.
pub fn name(dotted: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in dotted.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Compression pointer to `offset`.
pub fn ptr(offset: u16) -> Vec<u8> {
    vec![0xC0 | (offset >> 8) as u8, offset as u8]
}

/// Labels followed by a pointer: `www` + ptr(12) and so on.
pub fn labels_then_ptr(labels: &[&str], offset: u16) -> Vec<u8> {
    let mut out = Vec::new();
    for label in labels {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.extend(ptr(offset));
    out
}

pub fn mx_rdata(preference: u16, exchange: &[u8]) -> Vec<u8> {
    let mut out = preference.to_be_bytes().to_vec();
    out.extend_from_slice(exchange);
    out
}

/// MNAME, RNAME and the five 32-bit SOA counters.
pub fn soa_rdata(mname: &[u8], rname: &[u8]) -> Vec<u8> {
    let mut out = mname.to_vec();
    out.extend_from_slice(rname);
    for value in [2024010101u32, 7200, 3600, 1209600, 300] {
        out.extend_from_slice(&value.to_be_bytes());
    }
    out
}

pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_MX: u16 = 15;
pub const TYPE_TXT: u16 = 16;
pub const TYPE_AAAA: u16 = 28;

/// Assembles a response message section by section.
///
/// Records must be added in wire order: answers, then authority, then
/// additional. Counts in the header are patched as records are appended.
pub struct WireResponse {
    buf: Vec<u8>,
}

impl WireResponse {
    pub fn new(id: u16) -> Self {
        let mut buf = Vec::with_capacity(512);
        buf.extend_from_slice(&id.to_be_bytes());
        buf.extend_from_slice(&[0x80, 0x00]);
        buf.extend_from_slice(&[0; 8]);
        Self { buf }
    }

    pub fn authoritative(mut self) -> Self {
        self.buf[2] |= 0x04;
        self
    }

    pub fn truncated(mut self) -> Self {
        self.buf[2] |= 0x02;
        self
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.buf[3] = (self.buf[3] & 0xF0) | (rcode & 0x0F);
        self
    }

    pub fn question(mut self, qname: &str, qtype: u16) -> Self {
        self.buf.extend(name(qname));
        self.buf.extend_from_slice(&qtype.to_be_bytes());
        self.buf.extend_from_slice(&1u16.to_be_bytes());
        self.bump(4);
        self
    }

    pub fn answer(self, owner: &[u8], rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.record(6, owner, rtype, ttl, rdata)
    }

    pub fn authority(self, owner: &[u8], rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.record(8, owner, rtype, ttl, rdata)
    }

    pub fn additional(self, owner: &[u8], rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.record(10, owner, rtype, ttl, rdata)
    }

    /// Appends a record with an explicit RDLENGTH, which may lie about `rdata`.
    pub fn answer_with_rdlength(
        mut self,
        owner: &[u8],
        rtype: u16,
        ttl: u32,
        rdlength: u16,
        rdata: &[u8],
    ) -> Self {
        self.push_record(owner, rtype, ttl, rdlength, rdata);
        self.bump(6);
        self
    }

    /// Current length, for computing pointer targets.
    pub fn offset(&self) -> u16 {
        self.buf.len() as u16
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }

    fn record(mut self, count_at: usize, owner: &[u8], rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.push_record(owner, rtype, ttl, rdata.len() as u16, rdata);
        self.bump(count_at);
        self
    }

    fn push_record(&mut self, owner: &[u8], rtype: u16, ttl: u32, rdlength: u16, rdata: &[u8]) {
        self.buf.extend_from_slice(owner);
        self.buf.extend_from_slice(&rtype.to_be_bytes());
        self.buf.extend_from_slice(&1u16.to_be_bytes());
        self.buf.extend_from_slice(&ttl.to_be_bytes());
        self.buf.extend_from_slice(&rdlength.to_be_bytes());
        self.buf.extend_from_slice(rdata);
    }

    fn bump(&mut self, at: usize) {
        let count = u16::from_be_bytes([self.buf[at], self.buf[at + 1]]) + 1;
        self.buf[at..at + 2].copy_from_slice(&count.to_be_bytes());
    }
}

/// Reads the ID, question name and type out of a query this client built.
pub fn parse_query(query: &[u8]) -> (u16, String, u16) {
    let id = u16::from_be_bytes([query[0], query[1]]);
    let mut pos = 12;
    let mut labels = Vec::new();
    while query[pos] != 0 {
        let len = query[pos] as usize;
        labels.push(String::from_utf8_lossy(&query[pos + 1..pos + 1 + len]).into_owned());
        pos += 1 + len;
    }
    let qtype = u16::from_be_bytes([query[pos + 1], query[pos + 2]]);
    (id, labels.join("."), qtype)
}
