//! The JSON object the module prints on stdout.
//!
//! # Shape
//!
//! | Situation        | Fields                                                 |
//! |------------------|--------------------------------------------------------|
//! | `state=read`     | `changed: false`, `value` (string or `null`)           |
//! | `state=present`  | `changed`, optional `diff`                             |
//! | any failure      | `failed: true`, `changed: false`, `msg`, optional `out`/`err` |

use serde::Serialize;

use crate::domain::outcome::ModuleOutcome;
use crate::domain::params::EntryLocation;

/// Before/after view of a pending or applied write, shown by the host in
/// diff mode.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValueDiff {
    pub before: String,
    pub after: String,
    pub before_header: String,
    pub after_header: String,
}

impl ValueDiff {
    fn new(location: &EntryLocation, before: Option<&str>, after: &str) -> Self {
        let header = location.to_string();
        Self {
            before: before.map(diff_line).unwrap_or_default(),
            after: diff_line(after),
            before_header: header.clone(),
            after_header: header,
        }
    }
}

fn diff_line(value: &str) -> String {
    format!("{value}\n")
}

/// Response reported back to the automation host.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ModuleResponse {
    pub changed: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,

    /// Outer `None` omits the field; `Some(None)` serializes as `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    /// Captured stdout of a failed tool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,

    /// Captured stderr of a failed tool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<ValueDiff>,
}

impl ModuleResponse {
    /// Builds the success response for `outcome`.
    ///
    /// A diff is attached only when `diff_mode` is on and the entry changed
    /// (or would change under check mode).
    pub fn from_outcome(outcome: &ModuleOutcome, location: &EntryLocation, diff_mode: bool) -> Self {
        match outcome {
            ModuleOutcome::Read { value } => Self {
                changed: false,
                value: Some(value.clone()),
                ..Self::default()
            },
            ModuleOutcome::Present {
                outcome,
                before,
                after,
            } => {
                let changed = outcome.is_changed();
                let diff = (diff_mode && changed)
                    .then(|| ValueDiff::new(location, before.as_deref(), after));
                Self {
                    changed,
                    diff,
                    ..Self::default()
                }
            }
        }
    }

    /// Builds a failure response with a human-readable message.
    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            failed: true,
            msg: Some(msg.into()),
            ..Self::default()
        }
    }

    /// Attaches the captured streams of the tool that failed.
    pub fn with_output(mut self, out: impl Into<String>, err: impl Into<String>) -> Self {
        self.out = Some(out.into());
        self.err = Some(err.into());
        self
    }

    /// Process exit code the host expects for this response.
    pub fn exit_code(&self) -> u8 {
        u8::from(self.failed)
    }

    /// Serializes the response as a single-line JSON object.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error; with the field types used
    /// here this does not occur in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
