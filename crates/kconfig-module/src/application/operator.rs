//! KConfigOperator: reads and conditionally writes a single entry.
//!
//! The operator never spawns a process itself.  It builds argument lists,
//! hands them to a [`CommandRunner`], and interprets the captured output.
//!
//! # Argument shapes
//!
//! ```text
//! read:  kreadconfig5  --group <group> --key <key> [--file <file>]
//! write: kwriteconfig5 --group <group> --key <key> [--file <file>] <value>
//! ```
//!
//! The write tool parses the value positionally, so it is always the last
//! argument.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kconfig_core::{EntryLocation, ParamError, ToolNames, WriteOutcome};
use thiserror::Error;
use tracing::{debug, info};

/// Exit code and captured streams of a finished tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `-1` when the process was terminated by a signal.
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A zero-exit result with the given stdout and empty stderr.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A non-zero-exit result with the given stderr and empty stdout.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Error type for a module run.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error(transparent)]
    InvalidParams(#[from] ParamError),

    #[error("Failed to find required executable \"{name}\" in paths: {search_path}")]
    MissingExecutable { name: String, search_path: String },

    #[error("failed to run {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{tool} failed while reading the value with error: {}", .output.stderr)]
    ReadFailed { tool: String, output: CommandOutput },

    #[error("{tool} failed while writing the value with error: {}", .output.stderr)]
    WriteFailed { tool: String, output: CommandOutput },
}

impl ModuleError {
    /// The tool's captured streams, for the two tool-failure variants.
    pub fn captured_output(&self) -> Option<&CommandOutput> {
        match self {
            ModuleError::ReadFailed { output, .. } | ModuleError::WriteFailed { output, .. } => {
                Some(output)
            }
            _ => None,
        }
    }
}

/// Runs an external program to completion and captures its output.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`, blocking until it exits.
    ///
    /// A non-zero exit is *not* an error at this level; it is reported in
    /// [`CommandOutput::code`].  Only a failure to start the process is.
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput, ModuleError>;
}

/// Resolves an executable name to an absolute path.
#[cfg_attr(test, mockall::automock)]
pub trait BinaryLocator: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ModuleError::MissingExecutable`] if `name` cannot be found.
    fn locate(&self, name: &str) -> Result<PathBuf, ModuleError>;
}

/// Absolute paths of both tools, resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTools {
    pub read: PathBuf,
    pub write: PathBuf,
}

impl ResolvedTools {
    /// Locates both tools; the first missing one aborts the run.
    ///
    /// # Errors
    ///
    /// Propagates [`ModuleError::MissingExecutable`] from the locator.
    pub fn locate(locator: &dyn BinaryLocator, names: &ToolNames) -> Result<Self, ModuleError> {
        let write = locator.locate(&names.write)?;
        let read = locator.locate(&names.read)?;
        debug!(read = %read.display(), write = %write.display(), "resolved tools");
        Ok(Self { read, write })
    }
}

/// Result of [`KConfigOperator::write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub outcome: WriteOutcome,
    /// Value read before deciding whether to write.
    pub before: Option<String>,
}

/// Reads and writes entries through the injected runner.
pub struct KConfigOperator {
    runner: Arc<dyn CommandRunner>,
    tools: ResolvedTools,
    check_mode: bool,
}

impl KConfigOperator {
    pub fn new(runner: Arc<dyn CommandRunner>, tools: ResolvedTools, check_mode: bool) -> Self {
        Self {
            runner,
            tools,
            check_mode,
        }
    }

    /// Reads the current value of `location`.
    ///
    /// Returns `None` when the tool prints nothing (the entry is unset).
    ///
    /// # Errors
    ///
    /// [`ModuleError::ReadFailed`] on a non-zero exit, or
    /// [`ModuleError::Spawn`] if the tool could not be started.
    pub fn read(&self, location: &EntryLocation) -> Result<Option<String>, ModuleError> {
        let args = read_args(location);
        debug!(%location, "reading entry");

        let output = self.runner.run(&self.tools.read, &args)?;
        if !output.is_success() {
            return Err(ModuleError::ReadFailed {
                tool: tool_label(&self.tools.read),
                output,
            });
        }

        Ok(parse_read_output(&output.stdout))
    }

    /// Ensures `location` holds `value`.
    ///
    /// Always reads first, even if the caller read the entry moments ago:
    /// the tools offer no transaction, so the check must sit right before the
    /// write.  The write tool is spawned only when the values differ and check
    /// mode is off.
    ///
    /// # Errors
    ///
    /// Any error from [`KConfigOperator::read`], or
    /// [`ModuleError::WriteFailed`] on a non-zero exit of the write tool.
    pub fn write(&self, location: &EntryLocation, value: &str) -> Result<WriteReport, ModuleError> {
        let before = self.read(location)?;

        if before.as_deref() == Some(value) {
            debug!(%location, "entry already holds the requested value");
            return Ok(WriteReport {
                outcome: WriteOutcome::Unchanged,
                before,
            });
        }

        if self.check_mode {
            info!(%location, "check mode: entry would change");
            return Ok(WriteReport {
                outcome: WriteOutcome::WouldChange,
                before,
            });
        }

        let args = write_args(location, value);
        let output = self.runner.run(&self.tools.write, &args)?;
        if !output.is_success() {
            return Err(ModuleError::WriteFailed {
                tool: tool_label(&self.tools.write),
                output,
            });
        }

        info!(%location, "entry updated");
        Ok(WriteReport {
            outcome: WriteOutcome::Changed,
            before,
        })
    }
}

// ── Argument building and output parsing ──────────────────────────────────────

fn location_args(location: &EntryLocation) -> Vec<String> {
    let mut args = vec![
        "--group".to_string(),
        location.group.clone(),
        "--key".to_string(),
        location.key.clone(),
    ];
    if let Some(file) = &location.file {
        args.push("--file".to_string());
        args.push(file.clone());
    }
    args
}

/// Arguments for the read tool (program path not included).
pub fn read_args(location: &EntryLocation) -> Vec<String> {
    location_args(location)
}

/// Arguments for the write tool; `value` is always the last element.
pub fn write_args(location: &EntryLocation, value: &str) -> Vec<String> {
    let mut args = location_args(location);
    args.push(value.to_string());
    args
}

/// Interprets the read tool's stdout.
///
/// Empty output means the entry is unset.  Otherwise exactly one trailing
/// newline is removed; any further trailing whitespace is part of the value.
pub fn parse_read_output(stdout: &str) -> Option<String> {
    if stdout.is_empty() {
        return None;
    }
    Some(stdout.strip_suffix('\n').unwrap_or(stdout).to_string())
}

/// Short tool name for error messages (`kreadconfig5` rather than the full path).
fn tool_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const READ_BIN: &str = "/usr/bin/kreadconfig5";
    const WRITE_BIN: &str = "/usr/bin/kwriteconfig5";

    fn tools() -> ResolvedTools {
        ResolvedTools {
            read: PathBuf::from(READ_BIN),
            write: PathBuf::from(WRITE_BIN),
        }
    }

    fn location(file: Option<&str>, key: &str) -> EntryLocation {
        EntryLocation {
            file: file.map(str::to_string),
            group: "General".to_string(),
            key: key.to_string(),
        }
    }

    fn as_strs(args: &[String]) -> Vec<&str> {
        args.iter().map(String::as_str).collect()
    }

    /// A runner whose read tool prints `stdout` and whose write tool must be
    /// called `writes` times.
    fn runner_with_current(stdout: &'static str, writes: usize) -> MockCommandRunner {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|program: &Path, _: &[String]| program == Path::new(READ_BIN))
            .times(1)
            .returning(move |_, _| Ok(CommandOutput::success(stdout)));
        runner
            .expect_run()
            .withf(|program: &Path, _: &[String]| program == Path::new(WRITE_BIN))
            .times(writes)
            .returning(|_, _| Ok(CommandOutput::success("")));
        runner
    }

    // ── Output parsing ────────────────────────────────────────────────────────

    #[test]
    fn test_empty_output_means_no_value() {
        assert_eq!(parse_read_output(""), None);
    }

    #[test]
    fn test_single_trailing_newline_is_stripped() {
        assert_eq!(parse_read_output("foo\n").as_deref(), Some("foo"));
    }

    #[test]
    fn test_only_one_trailing_newline_is_stripped() {
        assert_eq!(parse_read_output("foo\n\n").as_deref(), Some("foo\n"));
    }

    #[test]
    fn test_other_trailing_whitespace_is_kept() {
        assert_eq!(parse_read_output("foo \t\n").as_deref(), Some("foo \t"));
    }

    #[test]
    fn test_lone_newline_is_an_empty_value_not_absent() {
        assert_eq!(parse_read_output("\n").as_deref(), Some(""));
    }

    // ── Argument building ─────────────────────────────────────────────────────

    #[test]
    fn test_read_args_without_file() {
        let args = read_args(&location(None, "Width"));
        assert_eq!(as_strs(&args), ["--group", "General", "--key", "Width"]);
    }

    #[test]
    fn test_read_args_with_file() {
        let args = read_args(&location(Some("kdeglobals"), "Width"));
        assert_eq!(
            as_strs(&args),
            ["--group", "General", "--key", "Width", "--file", "kdeglobals"]
        );
    }

    #[test]
    fn test_write_value_is_last_even_with_file() {
        // Arrange
        let loc = location(Some("kdeglobals"), "Width");

        // Act
        let args = write_args(&loc, "800");

        // Assert
        assert_eq!(
            as_strs(&args),
            ["--group", "General", "--key", "Width", "--file", "kdeglobals", "800"]
        );
    }

    #[test]
    fn test_write_value_that_looks_like_a_flag_is_still_last() {
        let args = write_args(&location(None, "Width"), "--file");
        assert_eq!(args.last().map(String::as_str), Some("--file"));
        assert_eq!(args.len(), 5);
    }

    // ── Read operation ────────────────────────────────────────────────────────

    #[test]
    fn test_read_passes_exact_arguments_to_read_tool() {
        // Arrange
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|program: &Path, args: &[String]| {
                program == Path::new(READ_BIN)
                    && as_strs(args) == ["--group", "General", "--key", "Width"]
            })
            .times(1)
            .returning(|_, _| Ok(CommandOutput::success("600\n")));
        let operator = KConfigOperator::new(Arc::new(runner), tools(), false);

        // Act
        let value = operator.read(&location(None, "Width")).unwrap();

        // Assert
        assert_eq!(value.as_deref(), Some("600"));
    }

    #[test]
    fn test_read_failure_carries_streams() {
        // Arrange
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_, _| {
            Ok(CommandOutput {
                code: 2,
                stdout: "partial".to_string(),
                stderr: "cannot open file".to_string(),
            })
        });
        let operator = KConfigOperator::new(Arc::new(runner), tools(), false);

        // Act
        let err = operator.read(&location(None, "Width")).unwrap_err();

        // Assert
        assert_eq!(
            err.to_string(),
            "kreadconfig5 failed while reading the value with error: cannot open file"
        );
        let output = err.captured_output().expect("read failure keeps output");
        assert_eq!(output.stdout, "partial");
        assert_eq!(output.stderr, "cannot open file");
    }

    // ── Write operation ───────────────────────────────────────────────────────

    #[test]
    fn test_write_with_equal_value_never_spawns_write_tool() {
        // Arrange: current value already 800
        let runner = runner_with_current("800\n", 0);
        let operator = KConfigOperator::new(Arc::new(runner), tools(), false);

        // Act
        let report = operator.write(&location(None, "Width"), "800").unwrap();

        // Assert
        assert_eq!(report.outcome, WriteOutcome::Unchanged);
        assert_eq!(report.before.as_deref(), Some("800"));
    }

    #[test]
    fn test_check_mode_reports_would_change_without_spawning_write_tool() {
        // Arrange
        let runner = runner_with_current("600\n", 0);
        let operator = KConfigOperator::new(Arc::new(runner), tools(), true);

        // Act
        let report = operator.write(&location(None, "Width"), "800").unwrap();

        // Assert
        assert_eq!(report.outcome, WriteOutcome::WouldChange);
    }

    #[test]
    fn test_check_mode_with_equal_value_is_unchanged() {
        let runner = runner_with_current("800\n", 0);
        let operator = KConfigOperator::new(Arc::new(runner), tools(), true);
        let report = operator.write(&location(None, "Width"), "800").unwrap();
        assert_eq!(report.outcome, WriteOutcome::Unchanged);
    }

    #[test]
    fn test_differing_value_reads_once_then_writes_once() {
        // Arrange
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|program: &Path, _: &[String]| program == Path::new(READ_BIN))
            .times(1)
            .returning(|_, _| Ok(CommandOutput::success("600\n")));
        runner
            .expect_run()
            .withf(|program: &Path, args: &[String]| {
                program == Path::new(WRITE_BIN)
                    && as_strs(args).ends_with(&["--key", "Width", "800"])
            })
            .times(1)
            .returning(|_, _| Ok(CommandOutput::success("")));
        let operator = KConfigOperator::new(Arc::new(runner), tools(), false);

        // Act
        let report = operator.write(&location(None, "Width"), "800").unwrap();

        // Assert
        assert_eq!(report.outcome, WriteOutcome::Changed);
        assert_eq!(report.before.as_deref(), Some("600"));
    }

    #[test]
    fn test_unset_entry_differs_from_empty_value() {
        // Arrange: entry unset, target is the empty string
        let runner = runner_with_current("", 1);
        let operator = KConfigOperator::new(Arc::new(runner), tools(), false);

        // Act
        let report = operator.write(&location(None, "Width"), "").unwrap();

        // Assert
        assert_eq!(report.outcome, WriteOutcome::Changed);
        assert_eq!(report.before, None);
    }

    #[test]
    fn test_write_failure_carries_streams() {
        // Arrange
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|program: &Path, _: &[String]| program == Path::new(READ_BIN))
            .returning(|_, _| Ok(CommandOutput::success("600\n")));
        runner
            .expect_run()
            .withf(|program: &Path, _: &[String]| program == Path::new(WRITE_BIN))
            .returning(|_, _| Ok(CommandOutput::failure(1, "read-only file system")));
        let operator = KConfigOperator::new(Arc::new(runner), tools(), false);

        // Act
        let err = operator.write(&location(None, "Width"), "800").unwrap_err();

        // Assert
        assert!(matches!(err, ModuleError::WriteFailed { ref tool, .. } if tool == "kwriteconfig5"));
        assert_eq!(
            err.captured_output().map(|o| o.stderr.as_str()),
            Some("read-only file system")
        );
    }

    #[test]
    fn test_read_failure_aborts_write() {
        // Arrange: read fails, write must not be attempted
        let runner = {
            let mut r = MockCommandRunner::new();
            r.expect_run()
                .withf(|program: &Path, _: &[String]| program == Path::new(READ_BIN))
                .times(1)
                .returning(|_, _| Ok(CommandOutput::failure(1, "boom")));
            r.expect_run()
                .withf(|program: &Path, _: &[String]| program == Path::new(WRITE_BIN))
                .times(0)
                .returning(|_, _| Ok(CommandOutput::success("")));
            r
        };
        let operator = KConfigOperator::new(Arc::new(runner), tools(), false);

        // Act
        let err = operator.write(&location(None, "Width"), "800").unwrap_err();

        // Assert
        assert!(matches!(err, ModuleError::ReadFailed { .. }));
    }

    // ── Tool resolution ───────────────────────────────────────────────────────

    #[test]
    fn test_missing_tool_aborts_resolution() {
        // Arrange
        let mut locator = MockBinaryLocator::new();
        locator
            .expect_locate()
            .withf(|name: &str| name == "kwriteconfig5")
            .returning(|name| {
                Err(ModuleError::MissingExecutable {
                    name: name.to_string(),
                    search_path: "/usr/bin".to_string(),
                })
            });
        locator
            .expect_locate()
            .withf(|name: &str| name == "kreadconfig5")
            .times(0..=1)
            .returning(|name| Ok(PathBuf::from("/usr/bin").join(name)));

        // Act
        let err = ResolvedTools::locate(&locator, &ToolNames::default()).unwrap_err();

        // Assert
        assert_eq!(
            err.to_string(),
            "Failed to find required executable \"kwriteconfig5\" in paths: /usr/bin"
        );
    }

    #[test]
    fn test_both_tools_resolved() {
        let mut locator = MockBinaryLocator::new();
        locator
            .expect_locate()
            .times(2)
            .returning(|name| Ok(PathBuf::from("/usr/bin").join(name)));

        let resolved = ResolvedTools::locate(&locator, &ToolNames::default()).unwrap();

        assert_eq!(resolved, tools());
    }
}
