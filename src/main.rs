use parity::cli::{self, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::init_logging();

    let cli = Cli::parse();
    tracing::debug!("Parity CLI initialized for {}", cli.environment);

    cli::exit_code(cli::execute(&cli.environment, &cli.args, &cli.config))
}
