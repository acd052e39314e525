//! One-shot remote commands: backups, consoles, logs, cache shells and passthrough

use crate::config::Config;
use crate::connection::CacheConnection;
use crate::environment::Environment;
use crate::error::{ParityError, Result};
use crate::remote::remote_command;
use crate::runner::{CommandLine, ProcessRunner};
use tracing::{debug, info};

/// Capture a fresh database backup on the remote
pub fn handle_backup(runner: &dyn ProcessRunner, config: &Config, environment: &Environment) -> bool {
    info!("Capturing database backup on {}", environment);
    runner.spawn(&remote_command(config, environment, ["pg:backups", "capture"]))
}

/// Open the application console on the remote
pub fn handle_console(runner: &dyn ProcessRunner, config: &Config, environment: &Environment) -> bool {
    let words = std::iter::once("run").chain(config.app.console.split_whitespace());
    runner.spawn(&remote_command(config, environment, words))
}

/// Stream remote logs, forwarding any extra arguments before the remote flag
pub fn handle_tail(
    runner: &dyn ProcessRunner,
    config: &Config,
    environment: &Environment,
    args: &[String],
) -> bool {
    let words = ["logs", "--tail"]
        .into_iter()
        .map(str::to_string)
        .chain(args.iter().cloned());
    runner.spawn(&remote_command(config, environment, words))
}

/// Open `redis-cli` against the cache configured on the remote
pub fn handle_cache_shell(
    runner: &dyn ProcessRunner,
    config: &Config,
    environment: &Environment,
) -> Result<bool> {
    let fetch = remote_command(
        config,
        environment,
        ["config:get", config.app.cache_url_var.as_str()],
    );
    let output = runner.capture(&fetch)?;
    if !output.success {
        return Err(ParityError::InvalidConnectionString {
            value: output.stdout.trim().to_string(),
            reason: format!("`{fetch}` failed: {}", output.stderr.trim()),
        });
    }

    let connection = CacheConnection::parse(&output.stdout)?;
    debug!("Connecting to cache at {}:{}", connection.host, connection.port);
    Ok(runner.spawn(&connection.cli_command()))
}

/// Hand the terminal over to `{cli} <args...> --remote {environment}`
pub fn handle_passthrough(
    runner: &dyn ProcessRunner,
    config: &Config,
    environment: &Environment,
    args: &[String],
) -> bool {
    let command = CommandLine::new(config.platform.cli.as_str())
        .args(args.iter().cloned())
        .args(["--remote", environment.as_str()]);
    runner.replace(&command)
}
