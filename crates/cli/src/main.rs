use clap::Parser;
use dnslookup_domain::{CliOverrides, RecordType};
use std::net::IpAddr;
use std::process::ExitCode;
use tracing::info;

mod bootstrap;
mod di;
mod repl;

#[derive(Parser)]
#[command(name = "dnslookup")]
#[command(version = "0.1.0")]
#[command(about = "Iterative DNS lookup client: walks from a root server to the authoritative answer")]
struct Cli {
    /// Host to resolve; starts the interactive prompt when omitted
    host: Option<String>,

    /// Record type for a one-shot lookup (A, NS, CNAME, SOA, MX, AAAA or a number)
    #[arg(short = 't', long = "type", default_value = "A")]
    record_type: RecordType,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Root server to start every lookup from
    #[arg(short = 's', long)]
    root_server: Option<IpAddr>,

    /// Per-query timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print every query and response
    #[arg(long)]
    trace: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        root_server: cli.root_server,
        query_timeout_secs: cli.timeout,
        log_level: cli.log_level.clone(),
        trace: cli.trace,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting dnslookup v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DnsServices::new(&config);

    match cli.host {
        Some(host) => {
            let found = repl::lookup(&services, &host, cli.record_type).await;
            Ok(if found {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            repl::run(&services).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
