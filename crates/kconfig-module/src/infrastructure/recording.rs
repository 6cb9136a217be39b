//! In-memory adapters for tests.
//!
//! # Why recording adapters?
//!
//! The real adapters spawn `kreadconfig5`/`kwriteconfig5`, which need a KDE
//! installation and would modify the test machine's configuration.
//!
//! [`RecordingRunner`] replaces process spawning with a queue of scripted
//! [`CommandOutput`]s and records every invocation, so assertions can check
//! exactly which tools ran, with which arguments, and in what order.
//! [`FixedLocator`] resolves names from a fixed set instead of `PATH`.
//!
//! # Usage in tests
//!
//! ```ignore
//! let runner = Arc::new(RecordingRunner::new().respond_with(CommandOutput::success("600\n")));
//! let module = ModuleRunner::new(runner.clone(), Arc::new(FixedLocator::kde5()), ToolNames::default());
//!
//! module.respond(args);
//!
//! assert_eq!(runner.invocations().len(), 1);
//! ```

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use kconfig_core::domain::tools::{DEFAULT_READ_TOOL, DEFAULT_WRITE_TOOL};

use crate::application::operator::{BinaryLocator, CommandOutput, CommandRunner, ModuleError};

/// One recorded call to [`CommandRunner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    /// File name of the program, e.g. `kwriteconfig5`.
    pub fn tool(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A runner that replays scripted outputs and records every call.
///
/// Calls beyond the scripted responses fail with [`ModuleError::Spawn`].
#[derive(Debug, Default)]
pub struct RecordingRunner {
    responses: Mutex<VecDeque<CommandOutput>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the output for the next unanswered call.
    pub fn respond_with(self, output: CommandOutput) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(output);
        self
    }

    /// Snapshot of all calls so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls made to the tool with the given file name.
    pub fn count_for(&self, tool: &str) -> usize {
        self.invocations().iter().filter(|i| i.tool() == tool).count()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput, ModuleError> {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Invocation {
                program: program.to_path_buf(),
                args: args.to_vec(),
            });

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| ModuleError::Spawn {
                program: program.to_path_buf(),
                source: io::Error::other("no scripted response left"),
            })
    }
}

/// A locator that resolves a fixed set of names under one directory.
#[derive(Debug, Clone)]
pub struct FixedLocator {
    dir: PathBuf,
    available: Vec<String>,
}

impl FixedLocator {
    pub fn new(dir: impl Into<PathBuf>, available: &[&str]) -> Self {
        Self {
            dir: dir.into(),
            available: available.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Both default tools available under `/usr/bin`.
    pub fn kde5() -> Self {
        Self::new("/usr/bin", &[DEFAULT_READ_TOOL, DEFAULT_WRITE_TOOL])
    }
}

impl BinaryLocator for FixedLocator {
    fn locate(&self, name: &str) -> Result<PathBuf, ModuleError> {
        if self.available.iter().any(|a| a == name) {
            Ok(self.dir.join(name))
        } else {
            Err(ModuleError::MissingExecutable {
                name: name.to_string(),
                search_path: self.dir.display().to_string(),
            })
        }
    }
}
