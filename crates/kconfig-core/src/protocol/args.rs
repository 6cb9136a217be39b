//! Parsing of the arguments document written by the automation host.
//!
//! The host writes a JSON object to a temporary file and passes its path as
//! the module's only argument.  The object holds the module parameters plus
//! host-internal keys prefixed with `_ansible_`.  Some hosts wrap the whole
//! object in an `ANSIBLE_MODULE_ARGS` envelope; both shapes are accepted.
//!
//! Parameter values are coerced to strings the same way the host coerces
//! `type: str` options: numbers keep their textual form, booleans become
//! `True`/`False`.  Lists and objects are rejected.

use serde_json::{Map, Value};

use crate::domain::params::{DesiredState, ModuleParams, ParamError};

const ENVELOPE_KEY: &str = "ANSIBLE_MODULE_ARGS";
const INTERNAL_PREFIX: &str = "_ansible_";
const CHECK_MODE_KEY: &str = "_ansible_check_mode";
const DIFF_MODE_KEY: &str = "_ansible_diff";

/// Every parameter the module accepts.
pub const KNOWN_PARAMS: [&str; 5] = ["file", "group", "key", "value", "state"];

/// Parameters plus the host execution flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleArgs {
    pub params: ModuleParams,
    /// Report what would change without running the write tool.
    pub check_mode: bool,
    /// Include a before/after diff in the response.
    pub diff_mode: bool,
}

/// Parses an arguments document.
///
/// Only shape and type checks happen here.  Required-field rules are applied
/// later by [`ModuleParams::into_request`].
///
/// # Errors
///
/// - [`ParamError::Malformed`] if the text is not a JSON object.
/// - [`ParamError::Unsupported`] listing every unknown non-internal key.
/// - [`ParamError::InvalidType`] if a parameter is a list or an object.
/// - [`ParamError::InvalidState`] if `state` is not `read` or `present`.
pub fn parse_module_args(json: &str) -> Result<ModuleArgs, ParamError> {
    let doc: Value =
        serde_json::from_str(json).map_err(|e| ParamError::Malformed(e.to_string()))?;

    let mut map = match doc {
        Value::Object(map) => map,
        _ => return Err(ParamError::Malformed("arguments must be a JSON object".into())),
    };

    if map.len() == 1 && matches!(map.get(ENVELOPE_KEY), Some(Value::Object(_))) {
        if let Some(Value::Object(inner)) = map.remove(ENVELOPE_KEY) {
            map = inner;
        }
    }

    let mut unsupported: Vec<String> = map
        .keys()
        .filter(|k| !k.starts_with(INTERNAL_PREFIX) && !KNOWN_PARAMS.contains(&k.as_str()))
        .cloned()
        .collect();
    if !unsupported.is_empty() {
        unsupported.sort();
        return Err(ParamError::Unsupported(unsupported));
    }

    let state = match string_param(&map, "state")? {
        Some(s) => s.parse::<DesiredState>()?,
        None => DesiredState::default(),
    };

    Ok(ModuleArgs {
        params: ModuleParams {
            file: string_param(&map, "file")?,
            group: string_param(&map, "group")?,
            key: string_param(&map, "key")?,
            value: string_param(&map, "value")?,
            state,
        },
        check_mode: flag(&map, CHECK_MODE_KEY),
        diff_mode: flag(&map, DIFF_MODE_KEY),
    })
}

/// Reads an optional `str` parameter, treating JSON `null` as absent.
fn string_param(map: &Map<String, Value>, name: &str) -> Result<Option<String>, ParamError> {
    match map.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(if *b { "True" } else { "False" }.to_string())),
        Some(Value::Array(_)) => Err(ParamError::InvalidType {
            name: name.to_string(),
            found: "list",
        }),
        Some(Value::Object(_)) => Err(ParamError::InvalidType {
            name: name.to_string(),
            found: "dict",
        }),
    }
}

fn flag(map: &Map<String, Value>, name: &str) -> bool {
    map.get(name).and_then(Value::as_bool).unwrap_or(false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
