use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// a.root-servers.net
pub const DEFAULT_ROOT_SERVER: IpAddr = IpAddr::V4(Ipv4Addr::new(198, 41, 0, 4));

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Server every iterative lookup starts from.
    #[serde(default = "default_root_server")]
    pub root_server: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Bounded wait for a single reply datagram.
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    /// Replies larger than this are truncated by the socket read.
    #[serde(default = "default_receive_buffer_size")]
    pub receive_buffer_size: usize,

    #[serde(default = "default_max_referrals")]
    pub max_referrals: usize,

    #[serde(default = "default_max_cname_depth")]
    pub max_cname_depth: usize,

    /// How long a negative entry stays in the cache.
    #[serde(default = "default_negative_ttl_secs")]
    pub negative_ttl_secs: u64,

    #[serde(default)]
    pub trace: bool,
}

impl ResolverConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    pub fn negative_ttl(&self) -> Duration {
        Duration::from_secs(self.negative_ttl_secs)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_server: default_root_server(),
            port: default_port(),
            query_timeout_secs: default_query_timeout_secs(),
            receive_buffer_size: default_receive_buffer_size(),
            max_referrals: default_max_referrals(),
            max_cname_depth: default_max_cname_depth(),
            negative_ttl_secs: default_negative_ttl_secs(),
            trace: false,
        }
    }
}

fn default_root_server() -> IpAddr {
    DEFAULT_ROOT_SERVER
}

fn default_port() -> u16 {
    53
}

fn default_query_timeout_secs() -> u64 {
    5
}

fn default_receive_buffer_size() -> usize {
    1024
}

fn default_max_referrals() -> usize {
    16
}

fn default_max_cname_depth() -> usize {
    8
}

fn default_negative_ttl_secs() -> u64 {
    300
}
