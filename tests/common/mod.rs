//! Shared test doubles for parity integration tests
#![allow(dead_code)]

use parity::backup::{Backup, BackupFactory};
use parity::config::Config;
use parity::migrations::ProjectShape;
use parity::restore::TransferRequest;
use parity::runner::{CapturedOutput, CommandLine, ProcessRunner};
use parity::{CommandDispatcher, Environment};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// How a command reached the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Replace,
    Spawn,
    Capture,
}

/// Records every command and answers with scripted results.
///
/// Spawns and replacements succeed unless a failure was scripted; captures
/// without a scripted answer fail with empty output.
#[derive(Default)]
pub struct FakeRunner {
    calls: RefCell<Vec<(Mode, String)>>,
    spawn_results: HashMap<String, bool>,
    captures: HashMap<String, CapturedOutput>,
    replace_result: Option<bool>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make spawning `command` return `result`
    pub fn spawn_returns(mut self, command: &str, result: bool) -> Self {
        self.spawn_results.insert(command.to_string(), result);
        self
    }

    /// Make capturing `command` return `output`
    pub fn capture_returns(mut self, command: &str, output: CapturedOutput) -> Self {
        self.captures.insert(command.to_string(), output);
        self
    }

    /// Make a failed process replacement return `result`
    pub fn replace_returns(mut self, result: bool) -> Self {
        self.replace_result = Some(result);
        self
    }

    /// Every command issued, in order
    pub fn calls(&self) -> Vec<(Mode, String)> {
        self.calls.borrow().clone()
    }

    /// Commands issued in `mode`, in order
    pub fn commands(&self, mode: Mode) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|(m, _)| *m == mode)
            .map(|(_, command)| command.clone())
            .collect()
    }

    pub fn spawned(&self) -> Vec<String> {
        self.commands(Mode::Spawn)
    }

    pub fn ran(&self, command: &str) -> bool {
        self.calls.borrow().iter().any(|(_, c)| c == command)
    }

    fn record(&self, mode: Mode, command: &CommandLine) -> String {
        let rendered = command.to_string();
        self.calls.borrow_mut().push((mode, rendered.clone()));
        rendered
    }
}

impl ProcessRunner for FakeRunner {
    fn replace(&self, command: &CommandLine) -> bool {
        self.record(Mode::Replace, command);
        self.replace_result.unwrap_or(true)
    }

    fn spawn(&self, command: &CommandLine) -> bool {
        let rendered = self.record(Mode::Spawn, command);
        self.spawn_results.get(&rendered).copied().unwrap_or(true)
    }

    fn capture(&self, command: &CommandLine) -> parity::Result<CapturedOutput> {
        let rendered = self.record(Mode::Capture, command);
        Ok(self
            .captures
            .get(&rendered)
            .cloned()
            .unwrap_or_else(|| CapturedOutput::failure("not scripted")))
    }
}

/// Project shape with fixed answers
#[derive(Debug, Clone, Copy)]
pub struct FakeShape {
    pub manifest: bool,
    pub migrations: bool,
}

impl FakeShape {
    pub fn rails_app() -> Self {
        Self {
            manifest: true,
            migrations: true,
        }
    }

    pub fn plain() -> Self {
        Self {
            manifest: false,
            migrations: false,
        }
    }
}

impl ProjectShape for FakeShape {
    fn has_manifest(&self) -> bool {
        self.manifest
    }

    fn has_migrations_dir(&self) -> bool {
        self.migrations
    }
}

/// Records constructed backups and their restores
#[derive(Default)]
pub struct RecordingBackups {
    pub requests: RefCell<Vec<TransferRequest>>,
    pub restores: Rc<RefCell<usize>>,
}

impl RecordingBackups {
    pub fn constructed(&self) -> Vec<TransferRequest> {
        self.requests.borrow().clone()
    }

    pub fn restore_count(&self) -> usize {
        *self.restores.borrow()
    }
}

struct RecordedBackup {
    restores: Rc<RefCell<usize>>,
}

impl Backup for RecordedBackup {
    fn restore(&self) {
        *self.restores.borrow_mut() += 1;
    }
}

impl BackupFactory for RecordingBackups {
    fn build<'s>(&'s self, request: TransferRequest) -> Box<dyn Backup + 's> {
        self.requests.borrow_mut().push(request);
        Box::new(RecordedBackup {
            restores: Rc::clone(&self.restores),
        })
    }
}

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| (*t).to_string()).collect()
}

/// `heroku info` output for an app called `{base}-{environment}`
pub fn app_info(base: &str, environment: &str) -> CapturedOutput {
    CapturedOutput::success(format!("=== {base}-{environment}\nAddOns: blahblahblah"))
}

/// Default config plus a local development database
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.development.database = Some("parity_development".to_string());
    config
}

/// Run `tokens` against `environment` with the given doubles and [`test_config`]
pub fn run(
    runner: &FakeRunner,
    shape: &FakeShape,
    backups: &RecordingBackups,
    environment: &str,
    tokens: &[&str],
) -> bool {
    run_with_config(runner, shape, backups, &test_config(), environment, tokens)
}

pub fn run_with_config(
    runner: &FakeRunner,
    shape: &FakeShape,
    backups: &RecordingBackups,
    config: &Config,
    environment: &str,
    tokens: &[&str],
) -> bool {
    CommandDispatcher::new(runner, shape, backups, config)
        .run(&Environment::new(environment), &args(tokens))
}
