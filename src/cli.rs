use crate::backup::PlatformBackups;
use crate::config::{Config, CONFIG_FILE};
use crate::dispatch::CommandDispatcher;
use crate::environment::Environment;
use crate::migrations::FsProjectShape;
use crate::runner::SystemRunner;
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configuration file location
pub const CONFIG_ENV: &str = "PARITY_CONFIG";

/// Main CLI interface for `Parity`
#[derive(Parser, Debug)]
#[command(name = "parity")]
#[command(version = crate::VERSION)]
#[command(about = "Parity - deploy, back up and restore your app's environments")]
#[command(
    long_about = "Run backup, restore, deploy, console, tail and redis_cli against an environment. \
                  Any other command is passed to the platform CLI with --remote <ENVIRONMENT>."
)]
pub struct Cli {
    /// Configuration file
    #[arg(long, value_name = "FILE", env = CONFIG_ENV, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Target environment, e.g. production, staging or development
    #[arg(value_name = "ENVIRONMENT")]
    pub environment: String,

    /// Command to run, followed by its arguments
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

/// Load configuration and dispatch `args` against `environment` with the real collaborators
pub fn execute(environment: &str, args: &[String], config_path: &Path) -> anyhow::Result<bool> {
    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let root = std::env::current_dir().context("Failed to read the working directory")?;

    let runner = SystemRunner;
    let shape = FsProjectShape::new(&root, &config);
    let backups = PlatformBackups::new(&runner, &config);
    let dispatcher = CommandDispatcher::new(&runner, &shape, &backups, &config);

    Ok(dispatcher.run(&Environment::new(environment), args))
}

/// Entry point for the per-environment binaries.
///
/// Every argument is forwarded untouched, so `production --help` reaches the
/// platform CLI rather than this program.
#[must_use]
pub fn run_binstub(environment: &str) -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = std::env::var_os(CONFIG_ENV)
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);

    exit_code(execute(environment, &args, &config_path))
}

/// Map a dispatch result onto the process exit status
#[must_use]
pub fn exit_code(result: anyhow::Result<bool>) -> ExitCode {
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging based on environment variables.
///
/// Logs go to stderr so stdout stays with the tools being run.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("parity=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}
