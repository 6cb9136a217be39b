//! # kconfig-core
//!
//! Shared library for the kconfig module containing the parameter model,
//! operation outcomes, and the host protocol used to talk to the automation
//! engine.
//!
//! This crate has zero dependencies on process spawning or the file system.
//! Everything here is plain data plus the rules that validate and encode it.
//!
//! # Architecture overview (for beginners)
//!
//! The kconfig module reads and writes settings in the KDE configuration
//! store.  It never touches the store's files itself: the work is delegated to
//! the `kreadconfig5` and `kwriteconfig5` command-line tools.  The module only
//! decides *which* tool to call, *with which arguments*, and *what the answer
//! means*.
//!
//! - **`domain`** – What the caller asked for (`ModuleParams` → `Request`) and
//!   what happened (`ModuleOutcome`, `WriteOutcome`).
//!
//! - **`protocol`** – How the automation host hands parameters to the module
//!   (a JSON arguments file) and how the module answers (one JSON object on
//!   stdout).

pub mod domain;
pub mod protocol;

pub use domain::outcome::{ModuleOutcome, WriteOutcome};
pub use domain::params::{DesiredState, EntryLocation, ModuleParams, ParamError, Request};
pub use domain::tools::ToolNames;
pub use protocol::args::{parse_module_args, ModuleArgs};
pub use protocol::response::{ModuleResponse, ValueDiff};
