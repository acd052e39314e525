use std::process::ExitCode;

fn main() -> ExitCode {
    parity::cli::run_binstub(parity::environment::STAGING)
}
