//! dnslookup Infrastructure Layer
pub mod dns;
