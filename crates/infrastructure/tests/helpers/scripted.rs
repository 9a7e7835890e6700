#![allow(dead_code)]
use super::wire::parse_query;
use async_trait::async_trait;
use dnslookup_application::ports::{DnsTransport, RecordCache};
use dnslookup_domain::{DomainError, RawMessage, RecordType, ResourceRecord};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;

type Reply = Box<dyn Fn(u16) -> Vec<u8> + Send + Sync>;

/// In-memory transport answering from a script keyed by server and question.
///
/// Questions with no scripted reply time out, like an unreachable server.
pub struct ScriptedTransport {
    replies: Mutex<HashMap<(IpAddr, String, u16), Reply>>,
    calls: Mutex<Vec<(IpAddr, String, u16)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `reply` receives the query's transaction ID and returns the datagram.
    pub fn on(
        &self,
        server: &str,
        qname: &str,
        qtype: u16,
        reply: impl Fn(u16) -> Vec<u8> + Send + Sync + 'static,
    ) {
        self.replies.lock().unwrap().insert(
            (server.parse().unwrap(), qname.to_string(), qtype),
            Box::new(reply),
        );
    }

    pub fn calls(&self) -> Vec<(IpAddr, String, u16)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsTransport for ScriptedTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        transaction_id: u16,
        server: IpAddr,
    ) -> Result<RawMessage, DomainError> {
        let (id, qname, qtype) = parse_query(message_bytes);
        assert_eq!(id, transaction_id);

        let key = (server, qname, qtype);
        self.calls.lock().unwrap().push(key.clone());

        let replies = self.replies.lock().unwrap();
        match replies.get(&key) {
            Some(reply) => Ok(RawMessage::from(reply(id))),
            None => Err(DomainError::QueryTimeout),
        }
    }

    fn protocol_name(&self) -> &'static str {
        "scripted"
    }
}

/// Cache that only records what was inserted, in order.
pub struct RecordingCache {
    inserted: Mutex<Vec<ResourceRecord>>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self {
            inserted: Mutex::new(Vec::new()),
        }
    }

    pub fn inserted(&self) -> Vec<ResourceRecord> {
        self.inserted.lock().unwrap().clone()
    }
}

impl Default for RecordingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordCache for RecordingCache {
    fn insert(&self, record: ResourceRecord) {
        self.inserted.lock().unwrap().push(record);
    }

    fn lookup(&self, _domain: &str, _record_type: RecordType) -> Vec<ResourceRecord> {
        Vec::new()
    }

    fn snapshot(&self) -> Vec<ResourceRecord> {
        self.inserted()
    }
}
