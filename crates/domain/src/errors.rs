use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Label exceeds 63 bytes: {0}")]
    LabelTooLong(String),

    #[error("Malformed label length byte 0x{byte:02x} at offset {offset}")]
    MalformedLabel { offset: usize, byte: u8 },

    #[error("Compression pointer loop at offset {0}")]
    CompressionLoop(usize),

    #[error("Decoded name exceeds 255 bytes at offset {0}")]
    NameTooLong(usize),

    #[error("Truncated message: needed {needed} bytes at offset {offset}, message is {len} bytes")]
    TruncatedMessage {
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("Transaction ID mismatch: expected {expected}, received {received}")]
    TransactionMismatch { expected: u16, received: u16 },

    #[error("Server returned error RCODE {0} ({name})", name = rcode_name(*.0))]
    ServerError(u8),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Host not found: {0}")]
    NotFound(String),

    #[error("Resolution loop: {0}")]
    ResolutionLoop(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Whether the driver should move on to the next candidate server.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::QueryTimeout
                | DomainError::TransactionMismatch { .. }
                | DomainError::ServerError(_)
                | DomainError::IoError(_)
                | DomainError::TruncatedMessage { .. }
                | DomainError::MalformedLabel { .. }
                | DomainError::CompressionLoop(_)
                | DomainError::NameTooLong(_)
                | DomainError::MalformedRecord(_)
        )
    }

    pub fn is_nxdomain(&self) -> bool {
        matches!(self, DomainError::ServerError(3))
    }
}

pub fn rcode_name(rcode: u8) -> &'static str {
    match rcode {
        0 => "NOERROR",
        1 => "FORMERR",
        2 => "SERVFAIL",
        3 => "NXDOMAIN",
        4 => "NOTIMP",
        5 => "REFUSED",
        _ => "UNKNOWN",
    }
}
