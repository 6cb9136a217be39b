//! Real process execution through `std::process::Command`.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::application::operator::{CommandOutput, CommandRunner, ModuleError};

/// Spawns each command as a blocking child process.
///
/// stdin is closed, stdout/stderr are captured and decoded lossily as UTF-8.
/// There is no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput, ModuleError> {
        debug!(program = %program.display(), ?args, "spawning");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ModuleError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        let code = output.status.code().unwrap_or(-1);
        debug!(program = %program.display(), code, "process exited");

        Ok(CommandOutput {
            code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
