use dnslookup_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;

    info!(
        config_file = config_path.unwrap_or("default"),
        root_server = %config.resolver.root_server,
        timeout_secs = config.resolver.query_timeout_secs,
        trace = config.resolver.trace,
        "Configuration loaded"
    );

    Ok(config)
}
