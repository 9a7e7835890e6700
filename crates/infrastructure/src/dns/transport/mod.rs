pub mod udp;

pub use dnslookup_application::ports::DnsTransport;
pub use udp::UdpTransport;
