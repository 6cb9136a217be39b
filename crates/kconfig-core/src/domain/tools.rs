//! Names of the external tools the module drives.

/// Default name of the read tool looked up on `PATH`.
pub const DEFAULT_READ_TOOL: &str = "kreadconfig5";

/// Default name of the write tool looked up on `PATH`.
pub const DEFAULT_WRITE_TOOL: &str = "kwriteconfig5";

/// The pair of executables to locate before any operation runs.
///
/// Names without a path separator are searched on `PATH`; names with one are
/// used as given.  Plasma 6 ships the same tools as `kreadconfig6` and
/// `kwriteconfig6`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolNames {
    pub read: String,
    pub write: String,
}

impl Default for ToolNames {
    fn default() -> Self {
        Self {
            read: DEFAULT_READ_TOOL.to_string(),
            write: DEFAULT_WRITE_TOOL.to_string(),
        }
    }
}
