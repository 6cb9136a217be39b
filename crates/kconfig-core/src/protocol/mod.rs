//! Host protocol: the JSON arguments document in, the JSON response out.
//!
//! ```text
//! automation host ──(args file: {"group": ..., "_ansible_check_mode": ...})──▶ kconfig
//! automation host ◀──────────(stdout: {"changed": ..., "value": ...})──────── kconfig
//! ```

pub mod args;
pub mod response;

pub use args::{parse_module_args, ModuleArgs};
pub use response::{ModuleResponse, ValueDiff};
