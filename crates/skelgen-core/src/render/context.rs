use std::collections::BTreeMap;

use tera::{Context, Value};

use crate::error::{Result, SkelError};

const WARNING: &str = "\x1b[93m";
const OK_GREEN: &str = "\x1b[92m";
const FAIL: &str = "\x1b[91m";
const END: &str = "\x1b[0m";

/// Presentation-only values available to every template.
pub fn globals(colors: bool) -> BTreeMap<&'static str, Value> {
    let code = |c: &str| Value::String(if colors { c.to_string() } else { String::new() });

    BTreeMap::from([
        (
            "tool_version",
            Value::String(env!("CARGO_PKG_VERSION").to_string()),
        ),
        ("require", code(WARNING)),
        ("enabled", code(OK_GREEN)),
        ("disabled", code(FAIL)),
        ("red", code(FAIL)),
        ("end", code(END)),
    ])
}

/// Build a Tera context from the globals plus the caller's variables.
///
/// Fails if a variable would shadow one of the globals.
pub fn build_context(variables: &BTreeMap<String, Value>, colors: bool) -> Result<Context> {
    let globals = globals(colors);
    let mut context = Context::new();

    for (key, value) in &globals {
        context.insert(*key, value);
    }
    for (key, value) in variables {
        if globals.contains_key(key.as_str()) {
            return Err(SkelError::ReservedVariable { name: key.clone() });
        }
        context.insert(key, value);
    }

    Ok(context)
}
