//! Module parameters and their validation.
//!
//! [`ModuleParams`] mirrors what the caller sent: every field may be absent.
//! [`ModuleParams::into_request`] is the single gate that turns it into a
//! [`Request`], and it runs before any external tool is located or spawned.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error type for invalid or incomplete module parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamError {
    /// One or more always-required parameters were not supplied.
    #[error("missing required arguments: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),

    /// `state=present` was requested without a target value.
    #[error("state is present but all of the following are missing: value")]
    MissingValue,

    /// `state` is not one of the supported choices.
    #[error("value of state must be one of: read, present, got: {0}")]
    InvalidState(String),

    /// The caller passed parameters this module does not know.
    #[error("Unsupported parameters for (kconfig) module: {}", .0.join(", "))]
    Unsupported(Vec<String>),

    /// A parameter had a type that cannot be converted to a string.
    #[error("argument '{name}' is of type {found} and we were unable to convert to str")]
    InvalidType { name: String, found: &'static str },

    /// The arguments document itself could not be parsed.
    #[error("failed to parse module arguments: {0}")]
    Malformed(String),
}

// ── Desired state ─────────────────────────────────────────────────────────────

/// What the caller wants the module to do with the entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DesiredState {
    /// Only report the current value.
    Read,
    /// Ensure the entry holds the supplied value.
    #[default]
    Present,
}

impl DesiredState {
    /// Every accepted spelling, in the order shown in error messages.
    pub const CHOICES: [&'static str; 2] = ["read", "present"];

    pub fn as_str(self) -> &'static str {
        match self {
            DesiredState::Read => "read",
            DesiredState::Present => "present",
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DesiredState {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(DesiredState::Read),
            "present" => Ok(DesiredState::Present),
            other => Err(ParamError::InvalidState(other.to_string())),
        }
    }
}

// ── Entry location ────────────────────────────────────────────────────────────

/// Address of a single setting in the configuration store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLocation {
    /// Config file to operate on; `None` lets the tool pick its default.
    pub file: Option<String>,
    /// Section inside the file.
    pub group: String,
    /// Setting name inside the group.
    pub key: String,
}

impl fmt::Display for EntryLocation {
    /// Formats as `file:[group] key`, or `[group] key` without a file.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}:")?;
        }
        write!(f, "[{}] {}", self.group, self.key)
    }
}

// ── Raw parameters and validated request ──────────────────────────────────────

/// Parameters exactly as the caller supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleParams {
    pub file: Option<String>,
    pub group: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
    pub state: DesiredState,
}

/// A fully validated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Report the current value of the entry.
    Read(EntryLocation),
    /// Make the entry hold `value`.
    Present { location: EntryLocation, value: String },
}

impl Request {
    pub fn location(&self) -> &EntryLocation {
        match self {
            Request::Read(location) => location,
            Request::Present { location, .. } => location,
        }
    }
}

impl ModuleParams {
    /// Validates the parameters and produces a [`Request`].
    ///
    /// # Errors
    ///
    /// - [`ParamError::MissingRequired`] when `group` or `key` is absent (both
    ///   are listed if both are missing).
    /// - [`ParamError::MissingValue`] when `state` is `present` and no `value`
    ///   was given.  An empty string is a valid value.
    pub fn into_request(self) -> Result<Request, ParamError> {
        let mut missing = Vec::new();
        if self.group.is_none() {
            missing.push("group");
        }
        if self.key.is_none() {
            missing.push("key");
        }

        let (Some(group), Some(key)) = (self.group, self.key) else {
            return Err(ParamError::MissingRequired(missing));
        };

        let location = EntryLocation {
            file: self.file,
            group,
            key,
        };

        match self.state {
            DesiredState::Read => Ok(Request::Read(location)),
            DesiredState::Present => {
                let value = self.value.ok_or(ParamError::MissingValue)?;
                Ok(Request::Present { location, value })
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
