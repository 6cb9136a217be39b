//! ModuleRunner: one complete module invocation.
//!
//! ```text
//! ModuleArgs ─▶ validate ─▶ locate tools ─▶ KConfigOperator ─▶ ModuleResponse
//!                  │              │                 │
//!                  └──────────────┴─── failure ─────┴──▶ ModuleResponse { failed }
//! ```
//!
//! Validation runs before tool lookup, so a bad request never touches `PATH`
//! or spawns anything.

use std::sync::Arc;

use kconfig_core::{ModuleArgs, ModuleOutcome, ModuleResponse, Request, ToolNames};
use tracing::{info, warn};

use crate::application::operator::{
    BinaryLocator, CommandRunner, KConfigOperator, ModuleError, ResolvedTools,
};

/// Wires the injected capabilities together for a single run.
pub struct ModuleRunner {
    runner: Arc<dyn CommandRunner>,
    locator: Arc<dyn BinaryLocator>,
    tool_names: ToolNames,
}

impl ModuleRunner {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        locator: Arc<dyn BinaryLocator>,
        tool_names: ToolNames,
    ) -> Self {
        Self {
            runner,
            locator,
            tool_names,
        }
    }

    /// Executes a validated request.
    ///
    /// # Errors
    ///
    /// [`ModuleError::MissingExecutable`] if either tool is absent (checked
    /// before anything runs), otherwise any error from the operator.
    pub fn execute(&self, request: &Request, check_mode: bool) -> Result<ModuleOutcome, ModuleError> {
        let tools = ResolvedTools::locate(self.locator.as_ref(), &self.tool_names)?;
        let operator = KConfigOperator::new(Arc::clone(&self.runner), tools, check_mode);

        match request {
            Request::Read(location) => {
                let value = operator.read(location)?;
                Ok(ModuleOutcome::Read { value })
            }
            Request::Present { location, value } => {
                let report = operator.write(location, value)?;
                Ok(ModuleOutcome::Present {
                    outcome: report.outcome,
                    before: report.before,
                    after: value.clone(),
                })
            }
        }
    }

    /// Runs the module end to end and always produces a response.
    pub fn respond(&self, args: ModuleArgs) -> ModuleResponse {
        let ModuleArgs {
            params,
            check_mode,
            diff_mode,
        } = args;

        let state = params.state;
        let request = match params.into_request() {
            Ok(request) => request,
            Err(e) => return failure_response(&ModuleError::from(e)),
        };

        info!(%state, location = %request.location(), check_mode, "running kconfig module");

        match self.execute(&request, check_mode) {
            Ok(outcome) => ModuleResponse::from_outcome(&outcome, request.location(), diff_mode),
            Err(e) => failure_response(&e),
        }
    }
}

/// Maps an error to the failure response, keeping captured tool streams.
pub fn failure_response(err: &ModuleError) -> ModuleResponse {
    warn!("kconfig module failed: {err}");
    let response = ModuleResponse::failure(err.to_string());
    match err.captured_output() {
        Some(output) => response.with_output(output.stdout.clone(), output.stderr.clone()),
        None => response,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
