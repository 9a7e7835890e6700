//! Interactive command loop over stdin.

mod command;

pub use command::Command;

use crate::di::DnsServices;
use dnslookup_application::ports::{DnsResolution, RecordCache};
use dnslookup_domain::{DnsQuery, DomainError, RecordType, ResourceRecord, NEGATIVE_TTL};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// One result line per record: `<host> <type> <ttl> <value>`.
pub fn format_answer(host: &str, record: &ResourceRecord) -> String {
    format!(
        "{} {} {} {}",
        host, record.record_type, record.ttl, record.value
    )
}

pub fn format_not_found(host: &str, record_type: RecordType) -> String {
    format!(
        "{} {} {} {}",
        host,
        record_type,
        NEGATIVE_TTL,
        record_type.negative_value()
    )
}

pub fn render_lookup(
    host: &str,
    record_type: RecordType,
    result: &Result<DnsResolution, DomainError>,
) -> Vec<String> {
    match result {
        Ok(resolution) if !resolution.records.is_empty() => resolution
            .records
            .iter()
            .map(|record| format_answer(host, record))
            .collect(),
        _ => vec![format_not_found(host, record_type)],
    }
}

/// Runs one lookup and prints its result lines; returns whether it succeeded.
pub async fn lookup(services: &DnsServices, host: &str, record_type: RecordType) -> bool {
    let result = services
        .lookup
        .execute(&DnsQuery::new(host, record_type))
        .await;

    if let Err(e) = &result {
        if !matches!(e, DomainError::NotFound(_)) {
            warn!(host = %host, record_type = %record_type, error = %e, "Lookup failed");
        }
    }

    for line in render_lookup(host, record_type, &result) {
        println!("{}", line);
    }
    result.is_ok()
}

pub async fn run(services: &DnsServices) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("dnslookup {} (root server {})", env!("CARGO_PKG_VERSION"), services.resolver.root_server());
    println!("Type 'help' for commands.");

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };
        debug!(command = ?command, "Command read");

        match command {
            Command::Lookup { host, record_type } => {
                lookup(services, &host, record_type).await;
            }
            Command::Trace(enabled) => {
                services.tracer.set_enabled(enabled);
                println!("trace {}", if enabled { "on" } else { "off" });
            }
            Command::Server(ip) => {
                services.resolver.set_root_server(ip);
                println!("root server {}", ip);
            }
            Command::Dump => {
                for record in services.cache.snapshot() {
                    println!("{}", format_answer(&record.name, &record));
                }
            }
            Command::Help => println!("{}", command::HELP),
            Command::Quit => break,
            Command::Empty => {}
        }
    }

    Ok(())
}
