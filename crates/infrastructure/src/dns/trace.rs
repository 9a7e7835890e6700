//! Human-readable trace of each query attempt and the records it returned.
//! Presentation only: the format carries no contract beyond readability.

use super::codec::DnsResponse;
use dnslookup_domain::{RecordType, ResourceRecord};
use std::io::{self, Write};
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::warn;

pub fn format_query_line(id: u16, domain: &str, record_type: RecordType, server: IpAddr) -> String {
    format!("Query ID     {} {}  {} --> {}", id, domain, record_type, server)
}

pub fn format_response_line(id: u16, authoritative: bool) -> String {
    format!("Response ID: {} Authoritative = {}", id, authoritative)
}

pub fn format_record_line(record: &ResourceRecord) -> String {
    format!(
        "       {:<30} {:<10} {:<4} {}",
        record.name,
        record.ttl,
        record.record_type.to_string(),
        record.value
    )
}

pub struct QueryTracer {
    enabled: AtomicBool,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl QueryTracer {
    pub fn stdout(enabled: bool) -> Self {
        Self::with_sink(enabled, Box::new(io::stdout()))
    }

    pub fn with_sink(enabled: bool, sink: Box<dyn Write + Send>) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            sink: Mutex::new(sink),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn query(&self, id: u16, domain: &str, record_type: RecordType, server: IpAddr) {
        if self.is_enabled() {
            self.write_lines(&[
                String::new(),
                String::new(),
                format_query_line(id, domain, record_type, server),
            ]);
        }
    }

    pub fn response(&self, response: &DnsResponse) {
        if !self.is_enabled() {
            return;
        }

        let mut lines = vec![format_response_line(
            response.header.id,
            response.is_authoritative(),
        )];
        let sections = [
            ("Answers", &response.answers),
            ("Nameservers", &response.authority),
            ("Additional Information", &response.additional),
        ];
        for (title, records) in sections {
            lines.push(format!("  {} ({})", title, records.len()));
            lines.extend(records.iter().map(format_record_line));
        }

        self.write_lines(&lines);
    }

    fn write_lines(&self, lines: &[String]) {
        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(sink, "{}", line))
            .and_then(|_| sink.flush());
        if let Err(e) = result {
            warn!(error = %e, "Failed to write trace output");
        }
    }
}
