//! kconfig module: entry point.
//!
//! Reads and writes a single KDE configuration entry by driving
//! `kreadconfig5`/`kwriteconfig5`, and answers the automation host with one
//! JSON object on stdout.
//!
//! # Usage
//!
//! ```text
//! kconfig <ARGS_FILE>                         # invoked by the automation host
//! kconfig --group General --key Width --state read
//! kconfig --group General --key Width --value 800 --check --diff
//!
//! Options:
//!   --config <PATH>        Tool settings file [env: KCONFIG_SETTINGS]
//!   --read-tool <NAME>     Read tool name or path [env: KCONFIG_READ_TOOL]
//!   --write-tool <NAME>    Write tool name or path [env: KCONFIG_WRITE_TOOL]
//! ```
//!
//! Tool names are taken from the CLI/environment first, then the settings
//! file, then the built-in defaults.
//!
//! # Output channels
//!
//! stdout carries exactly one JSON response; logs go to stderr.  The exit
//! code is `0` on success and `1` when the response has `failed: true`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use kconfig_core::{parse_module_args, DesiredState, ModuleArgs, ModuleParams, ModuleResponse, ToolNames};
use kconfig_module::application::run_module::ModuleRunner;
use kconfig_module::infrastructure::locator::PathLocator;
use kconfig_module::infrastructure::process::SystemCommandRunner;
use kconfig_module::infrastructure::storage::settings::{
    load_settings, load_settings_from, ConfigError, ToolSettings,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Read or write a KDE configuration entry.
#[derive(Debug, Parser)]
#[command(
    name = "kconfig",
    about = "Reads and writes KDE configuration entries through kreadconfig/kwriteconfig",
    version
)]
struct Cli {
    /// JSON arguments file written by the automation host.
    ///
    /// When given, the direct-mode flags below must not be used.
    #[arg(conflicts_with_all = ["group", "key", "file", "value", "state", "check", "diff"])]
    args_file: Option<PathBuf>,

    /// Tool settings file (defaults to the platform config directory).
    #[arg(long, env = "KCONFIG_SETTINGS")]
    config: Option<PathBuf>,

    /// Read tool name or path, overriding the settings file.
    #[arg(long, env = "KCONFIG_READ_TOOL")]
    read_tool: Option<String>,

    /// Write tool name or path, overriding the settings file.
    #[arg(long, env = "KCONFIG_WRITE_TOOL")]
    write_tool: Option<String>,

    /// Group (section) containing the key.
    #[arg(long)]
    group: Option<String>,

    /// Key to read or write.
    #[arg(long)]
    key: Option<String>,

    /// Config file to use instead of the tool's default.
    #[arg(long)]
    file: Option<String>,

    /// Value the key must hold (required for `--state present`).
    #[arg(long, allow_hyphen_values = true)]
    value: Option<String>,

    /// `read` or `present` [default: present].
    #[arg(long)]
    state: Option<DesiredState>,

    /// Report what would change without writing.
    #[arg(long)]
    check: bool,

    /// Include a before/after diff in the response.
    #[arg(long)]
    diff: bool,
}

impl Cli {
    /// Builds the module arguments from the args file or the direct-mode flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the args file cannot be read or is not a valid
    /// arguments document.
    fn module_args(&self) -> anyhow::Result<ModuleArgs> {
        let Some(path) = &self.args_file else {
            return Ok(ModuleArgs {
                params: ModuleParams {
                    file: self.file.clone(),
                    group: self.group.clone(),
                    key: self.key.clone(),
                    value: self.value.clone(),
                    state: self.state.unwrap_or_default(),
                },
                check_mode: self.check,
                diff_mode: self.diff,
            });
        };

        let text = std::fs::read_to_string(path).with_context(|| {
            format!("failed to read module arguments from '{}'", path.display())
        })?;
        Ok(parse_module_args(&text)?)
    }

    fn load_settings(&self) -> Result<ToolSettings, ConfigError> {
        match &self.config {
            Some(path) => load_settings_from(path),
            None => load_settings(),
        }
    }

    /// CLI/env overrides on top of the settings file.
    fn tool_names(&self, settings: &ToolSettings) -> ToolNames {
        let mut names = settings.tool_names();
        if let Some(read) = &self.read_tool {
            names.read = read.clone();
        }
        if let Some(write) = &self.write_tool {
            names.write = write.clone();
        }
        names
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = cli.load_settings();

    // `RUST_LOG` wins; otherwise the settings file level, otherwise `warn`.
    let level = settings
        .as_ref()
        .map(|s| s.logging.level.clone())
        .unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let response = match run(&cli, settings) {
        Ok(response) => response,
        Err(e) => {
            error!("{e:#}");
            ModuleResponse::failure(format!("{e:#}"))
        }
    };

    emit(&response)
}

fn run(cli: &Cli, settings: Result<ToolSettings, ConfigError>) -> anyhow::Result<ModuleResponse> {
    let settings = settings.context("failed to load tool settings")?;
    let args = cli.module_args()?;

    let module = ModuleRunner::new(
        Arc::new(SystemCommandRunner),
        Arc::new(PathLocator::from_env()),
        cli.tool_names(&settings),
    );
    Ok(module.respond(args))
}

/// Prints the response on stdout and maps it to the process exit code.
fn emit(response: &ModuleResponse) -> ExitCode {
    match response.to_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::from(response.exit_code())
        }
        Err(e) => {
            error!("failed to encode response: {e}");
            println!(r#"{{"changed": false, "failed": true, "msg": "failed to encode module response"}}"#);
            ExitCode::FAILURE
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
