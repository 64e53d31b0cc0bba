//! `--arg NAME=VALUE` parsing into controller commands.

use openspm_command::{Arguments, Command, FeedbackConfig, Value};

use crate::cmd::CommandSpec;
use crate::exit::{CliError, CliResult};

/// What a [`CommandSpec`] resolves to.
pub enum Resolved {
    Command(Command),
    Text(String),
}

pub fn resolve(spec: &CommandSpec) -> CliResult<Resolved> {
    if let Some(text) = &spec.text {
        return Ok(Resolved::Text(text.clone()));
    }
    let name = spec
        .name
        .as_deref()
        .ok_or_else(|| CliError::usage("a command name or --text is required"))?;
    build_command(name, &spec.args).map(Resolved::Command)
}

/// Build a command from its name and raw `NAME=VALUE` pairs.
///
/// `set_feedback` arguments are mapped onto [`FeedbackConfig`] fields so the
/// nested layout is produced.
pub fn build_command(name: &str, raw: &[String]) -> CliResult<Command> {
    let mut args = Arguments::new();
    for pair in raw {
        let (key, value) = parse_arg(pair)?;
        args.insert(key, value);
    }

    if name == FeedbackConfig::COMMAND_NAME {
        return feedback_from_args(&args).map(Command::feedback);
    }
    Ok(Command::new(name, args))
}

pub fn parse_arg(pair: &str) -> CliResult<(String, Value)> {
    let (name, raw) = pair
        .split_once('=')
        .ok_or_else(|| CliError::usage(format!("expected NAME=VALUE, got {pair:?}")))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::usage(format!("empty argument name in {pair:?}")));
    }
    Ok((name.to_string(), parse_value(raw)?))
}

/// Parse one value: bool, `Infinity`/`-Infinity`/`NaN`, integer, float,
/// `[a,b,...]` numeric list, `"quoted"` string, else bare string.
pub fn parse_value(raw: &str) -> CliResult<Value> {
    let raw = raw.trim();

    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        return parse_list(inner);
    }
    if let Some(text) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        return Ok(Value::Str(text.to_string()));
    }

    Ok(parse_scalar(raw).unwrap_or_else(|| Value::Str(raw.to_string())))
}

fn parse_scalar(raw: &str) -> Option<Value> {
    match raw {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        "Infinity" => return Some(Value::Float(f64::INFINITY)),
        "-Infinity" => return Some(Value::Float(f64::NEG_INFINITY)),
        "NaN" => return Some(Value::Float(f64::NAN)),
        _ => {}
    }
    if let Ok(v) = raw.parse::<i64>() {
        return Some(Value::Int(v));
    }
    // f64's parser also takes "inf"/"nan" spellings; those stay strings.
    if raw.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(v) = raw.parse::<f64>() {
            return Some(Value::Float(v));
        }
    }
    None
}

fn parse_list(inner: &str) -> CliResult<Value> {
    if inner.trim().is_empty() {
        return Ok(Value::Sequence(Vec::new()));
    }
    inner
        .split(',')
        .map(|item| {
            parse_scalar(item.trim())
                .filter(Value::is_numeric)
                .ok_or_else(|| CliError::usage(format!("list element {item:?} is not a number")))
        })
        .collect::<CliResult<Vec<_>>>()
        .map(Value::Sequence)
}

fn feedback_from_args(args: &Arguments) -> CliResult<FeedbackConfig> {
    let mut config = FeedbackConfig::default();
    for (name, value) in args.iter() {
        match name {
            "fb_ch" => config.fb_ch = int_arg(name, value)?,
            "input_ch" => config.input_ch = int_arg(name, value)?,
            "output_ch" => config.output_ch = int_arg(name, value)?,
            "out_limit_low" => config.out_limit_low = float_arg(name, value)?,
            "out_limit_high" => config.out_limit_high = float_arg(name, value)?,
            "setpoint" => config.setpoint = float_arg(name, value)?,
            "p_gain" => config.p_gain = float_arg(name, value)?,
            "i_gain" => config.i_gain = float_arg(name, value)?,
            "negative" => config.negative = bool_arg(name, value)?,
            "reset" => config.reset = bool_arg(name, value)?,
            "hold" => config.hold = bool_arg(name, value)?,
            "err_limit_low" => config.err_limit_low = float_arg(name, value)?,
            "err_limit_high" => config.err_limit_high = float_arg(name, value)?,
            "wait_for_fb" => config.wait_for_fb = int_arg(name, value)?,
            other => {
                return Err(CliError::usage(format!(
                    "unknown set_feedback argument {other:?}"
                )))
            }
        }
    }
    Ok(config)
}

fn int_arg(name: &str, value: &Value) -> CliResult<i64> {
    match value {
        Value::Int(v) => Ok(*v),
        other => Err(kind_error(name, "integer", other)),
    }
}

fn float_arg(name: &str, value: &Value) -> CliResult<f64> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Int(v) => Ok(*v as f64),
        other => Err(kind_error(name, "number", other)),
    }
}

fn bool_arg(name: &str, value: &Value) -> CliResult<bool> {
    match value {
        Value::Bool(v) => Ok(*v),
        other => Err(kind_error(name, "boolean", other)),
    }
}

fn kind_error(name: &str, expected: &str, got: &Value) -> CliError {
    CliError::usage(format!(
        "argument {name:?} must be a {expected}, got {}",
        got.kind()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::USAGE;

    fn raw(pairs: &[&str]) -> Vec<String> {
        pairs.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn scalar_kinds() {
        assert_eq!(parse_value("3").unwrap(), Value::Int(3));
        assert_eq!(parse_value("-2").unwrap(), Value::Int(-2));
        assert_eq!(parse_value("1.5").unwrap(), Value::Float(1.5));
        assert_eq!(parse_value("1e-3").unwrap(), Value::Float(0.001));
        assert_eq!(parse_value("true").unwrap(), Value::Bool(true));
        assert_eq!(
            parse_value("-Infinity").unwrap(),
            Value::Float(f64::NEG_INFINITY)
        );
        assert_eq!(parse_value("hello").unwrap(), Value::Str("hello".into()));
        assert_eq!(parse_value("inf").unwrap(), Value::Str("inf".into()));
        assert_eq!(parse_value("\"42\"").unwrap(), Value::Str("42".into()));
    }

    #[test]
    fn lists_are_numeric() {
        assert_eq!(
            parse_value("[1, 2.5,-3]").unwrap(),
            Value::Sequence(vec![Value::Int(1), Value::Float(2.5), Value::Int(-3)])
        );
        assert_eq!(parse_value("[]").unwrap(), Value::Sequence(Vec::new()));

        let err = parse_value("[1,x]").unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn arg_needs_equals_and_name() {
        assert_eq!(parse_arg("missing").unwrap_err().code, USAGE);
        assert_eq!(parse_arg("=3").unwrap_err().code, USAGE);

        let (name, value) = parse_arg("note=a=b").unwrap();
        assert_eq!(name, "note");
        assert_eq!(value, Value::Str("a=b".into()));
    }

    #[test]
    fn flat_command_keeps_argument_order() {
        let command = build_command("move", &raw(&["ch=3", "val=1.5"])).unwrap();
        assert_eq!(
            command.to_text().unwrap(),
            r#"{"cmd":"move","args":{"ch":3,"val":1.5}}"#
        );
    }

    #[test]
    fn feedback_arguments_fill_config() {
        let command = build_command(
            "set_feedback",
            &raw(&["fb_ch=1", "setpoint=0.2", "p_gain=1e-3", "hold=true"]),
        )
        .unwrap();
        let text = command.to_text().unwrap();
        assert!(text.starts_with(
            r#"{"cmd":"set_feedback","args":{"fb channel":1, "fb config":{"Setpoint":0.2, "#
        ));
        assert!(text.contains(r#""P gain":0.001"#));
        assert!(text.contains(r#""Hold":true"#));
    }

    #[test]
    fn feedback_rejects_unknown_and_mistyped() {
        let err = build_command("set_feedback", &raw(&["gain=1"])).unwrap_err();
        assert_eq!(err.code, USAGE);

        let err = build_command("set_feedback", &raw(&["fb_ch=1.5"])).unwrap_err();
        assert_eq!(err.code, USAGE);
        assert!(err.message.contains("integer"));
    }
}
