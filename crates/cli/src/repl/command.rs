use anyhow::{anyhow, bail};
use dnslookup_domain::RecordType;
use std::net::IpAddr;

pub const HELP: &str = "\
Commands:
  lookup|l <host> [type]   resolve <host> (type defaults to A)
  trace on|off             print every query and response
  server <ip>              start lookups at another root server
  dump                     list every live cached record
  quit|exit                leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lookup { host: String, record_type: RecordType },
    Trace(bool),
    Server(IpAddr),
    Dump,
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Command::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "lookup" | "l" => match args.as_slice() {
                [host] => Command::Lookup {
                    host: (*host).to_string(),
                    record_type: RecordType::A,
                },
                [host, record_type] => Command::Lookup {
                    host: (*host).to_string(),
                    record_type: record_type
                        .parse()
                        .map_err(|_| anyhow!("unknown record type: {}", record_type))?,
                },
                _ => bail!("usage: lookup <host> [type]"),
            },
            "trace" => match args.as_slice() {
                [state] if state.eq_ignore_ascii_case("on") => Command::Trace(true),
                [state] if state.eq_ignore_ascii_case("off") => Command::Trace(false),
                _ => bail!("usage: trace on|off"),
            },
            "server" => match args.as_slice() {
                [ip] => Command::Server(
                    ip.parse()
                        .map_err(|_| anyhow!("not an IP address: {}", ip))?,
                ),
                _ => bail!("usage: server <ip>"),
            },
            "dump" => Command::Dump,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command: {} (try 'help')", other),
        };

        Ok(command)
    }
}
