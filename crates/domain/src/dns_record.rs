pub mod record;
pub mod record_type;

pub use record::{ResourceRecord, NEGATIVE_TTL};
pub use record_type::RecordType;
