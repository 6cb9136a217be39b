//! kconfig-module library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the module do? (for beginners)
//!
//! An automation engine hands the module a group, a key, and optionally a
//! file and a value.  The module:
//!
//! 1. Validates the parameters (a `present` run must carry a value).
//! 2. Finds `kreadconfig5` and `kwriteconfig5` on `PATH`.
//! 3. Reads the current value with `kreadconfig5`.
//! 4. For `present`, runs `kwriteconfig5` only if the value differs and the
//!    engine is not in check mode.
//! 5. Prints a JSON response (`changed`, `value`, or a failure) on stdout.

/// Application layer: the operator and the module runner.
pub mod application;

/// Infrastructure layer: `PATH` lookup, process spawning, tool settings.
pub mod infrastructure;
