//! Infrastructure layer for the kconfig module.
//!
//! Contains OS-facing adapters behind the application-layer traits.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `kconfig_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`locator`** – `PathLocator`, the [`BinaryLocator`] that searches `PATH`.
//! - **`process`** – `SystemCommandRunner`, the [`CommandRunner`] that spawns
//!   real child processes with `std::process::Command`.
//! - **`recording`** – `RecordingRunner` and `FixedLocator`, in-memory
//!   adapters with scripted responses for tests.
//! - **`storage`** – The optional TOML settings file naming the tools.
//!
//! [`BinaryLocator`]: crate::application::operator::BinaryLocator
//! [`CommandRunner`]: crate::application::operator::CommandRunner

pub mod locator;
pub mod process;
pub mod recording;
pub mod storage;
