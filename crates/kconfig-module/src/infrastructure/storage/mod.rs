//! Storage infrastructure: the optional tool settings file.
//!
//! The `settings` sub-module reads a small TOML file that names the read and
//! write tools and the default log level.  A missing file is not an error:
//! the defaults (`kreadconfig5`, `kwriteconfig5`, `warn`) apply.

pub mod settings;
