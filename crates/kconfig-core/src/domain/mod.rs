//! Domain layer for the kconfig module.
//!
//! Pure types with no I/O: the parameters a caller supplies, the validated
//! request derived from them, the names of the external tools, and the
//! outcome of an operation.

pub mod outcome;
pub mod params;
pub mod tools;

pub use outcome::{ModuleOutcome, WriteOutcome};
pub use params::{DesiredState, EntryLocation, ModuleParams, ParamError, Request};
pub use tools::ToolNames;
