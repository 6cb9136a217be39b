//! Application layer use cases for the kconfig module.
//!
//! - **`operator`** – Builds the `kreadconfig`/`kwriteconfig` argument lists,
//!   interprets their output, and decides whether a write is needed.  Process
//!   execution and `PATH` lookup are injected through the [`CommandRunner`]
//!   and [`BinaryLocator`] traits, so the logic is testable without spawning
//!   anything.
//!
//! - **`run_module`** – One full module invocation: validate, locate both
//!   tools, run the operator, and turn the result into a response.
//!
//! [`CommandRunner`]: operator::CommandRunner
//! [`BinaryLocator`]: operator::BinaryLocator

pub mod operator;
pub mod run_module;
