use std::collections::HashMap;
use std::fmt::Write as _;

use tera::{Tera, Value};

/// Register the quoting filters used by the configuration templates.
///
/// `toml_str` and `py_str` emit a complete quoted literal, so templates must
/// not wrap them in quotes. `cfg_line` folds a value onto a single line for
/// INI-style files.
pub fn register(tera: &mut Tera) {
    tera.register_filter("toml_str", toml_str);
    tera.register_filter("py_str", py_str);
    tera.register_filter("cfg_line", cfg_line);
}

fn string_arg<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("filter `{filter}` expects a string")))
}

fn toml_str(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = string_arg(value, "toml_str")?;
    Ok(Value::String(toml::Value::String(s.to_string()).to_string()))
}

fn py_str(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = string_arg(value, "py_str")?;
    Ok(Value::String(python_literal(s)))
}

fn cfg_line(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = string_arg(value, "cfg_line")?;
    Ok(Value::String(s.split_whitespace().collect::<Vec<_>>().join(" ")))
}

/// Double-quoted Python string literal for `s`.
pub fn python_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(template: &str, value: &str) -> String {
        let mut tera = Tera::default();
        register(&mut tera);
        tera.add_raw_template("t", template).unwrap();
        let mut ctx = tera::Context::new();
        ctx.insert("v", value);
        tera.render("t", &ctx).unwrap()
    }

    #[test]
    fn toml_str_output_parses_back() {
        let out = apply("x = {{ v | toml_str }}", r#"A "quoted" \ demo"#);
        let table: toml::Table = toml::from_str(&out).unwrap();
        assert_eq!(table["x"].as_str(), Some(r#"A "quoted" \ demo"#));
    }

    #[test]
    fn python_literal_escapes_quotes_and_control_chars() {
        assert_eq!(python_literal(r#"my"app"#), r#""my\"app""#);
        assert_eq!(python_literal("a\\b\nc"), r#""a\\b\nc""#);
        assert_eq!(python_literal("\u{7}"), r#""\u0007""#);
    }

    #[test]
    fn cfg_line_folds_newlines() {
        assert_eq!(apply("{{ v | cfg_line }}", "two\n  lines "), "two lines");
    }

    #[test]
    fn non_string_input_is_an_error() {
        let mut tera = Tera::default();
        register(&mut tera);
        tera.add_raw_template("t", "{{ v | py_str }}").unwrap();
        let mut ctx = tera::Context::new();
        ctx.insert("v", &3);
        assert!(tera.render("t", &ctx).is_err());
    }
}
