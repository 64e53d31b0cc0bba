use crate::error::Result;
use crate::message::{Command, ObjectWriter};
use crate::render::format_general;
use crate::value::Value;

/// Separator used inside the nested feedback objects.
const NESTED_SEPARATOR: &str = ", ";

/// Closed-loop feedback parameters for one feedback channel.
///
/// Unlike every other command, `set_feedback` is sent as a nested object
/// whose member names and order are fixed by the controller:
///
/// ```text
/// {"cmd":"set_feedback","args":{"fb channel":0, "fb config":{"Setpoint":0.5, ...}}}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackConfig {
    /// Feedback channel, 0 or 1.
    pub fb_ch: i64,
    /// Analog input channel, 0-7.
    pub input_ch: i64,
    /// Analog output channel, 0-7.
    pub output_ch: i64,
    pub out_limit_low: f64,
    pub out_limit_high: f64,
    pub setpoint: f64,
    pub p_gain: f64,
    pub i_gain: f64,
    /// Invert the output sign.
    pub negative: bool,
    pub reset: bool,
    pub hold: bool,
    /// Lower error bound used by wait-for-feedback.
    pub err_limit_low: f64,
    /// Upper error bound used by wait-for-feedback.
    pub err_limit_high: f64,
    /// Wait-for-feedback count; 0 disables it.
    pub wait_for_fb: i64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            fb_ch: 0,
            input_ch: 0,
            output_ch: 0,
            out_limit_low: 0.0,
            out_limit_high: 0.0,
            setpoint: 0.0,
            p_gain: 0.0,
            i_gain: 0.0,
            negative: false,
            reset: false,
            hold: false,
            err_limit_low: f64::NEG_INFINITY,
            err_limit_high: f64::INFINITY,
            wait_for_fb: 0,
        }
    }
}

impl FeedbackConfig {
    pub const COMMAND_NAME: &'static str = "set_feedback";

    /// Render the nested `set_feedback` command text.
    pub fn to_text(&self) -> Result<String> {
        let mut out = String::with_capacity(512);

        let mut top = ObjectWriter::begin(&mut out, ",");
        top.command_name(&mut out, Self::COMMAND_NAME)?;
        top.key(&mut out, "args");

        let mut args = ObjectWriter::begin(&mut out, NESTED_SEPARATOR);
        args.raw(&mut out, "fb channel", &self.fb_ch.to_string());
        args.key(&mut out, "fb config");

        let mut cfg = ObjectWriter::begin(&mut out, NESTED_SEPARATOR);
        cfg.raw(&mut out, "Setpoint", &format_general(self.setpoint));
        cfg.field(&mut out, "Output limit (low)", &Value::Float(self.out_limit_low))?;
        cfg.field(&mut out, "Output limit (high)", &Value::Float(self.out_limit_high))?;
        cfg.raw(&mut out, "P gain", &format_general(self.p_gain));
        cfg.raw(&mut out, "I gain", &format_general(self.i_gain));
        cfg.field(&mut out, "Reset", &Value::Bool(self.reset))?;
        cfg.field(&mut out, "Hold", &Value::Bool(self.hold))?;
        cfg.field(&mut out, "Negative", &Value::Bool(self.negative))?;
        cfg.field(&mut out, "Input channel", &Value::Int(self.input_ch))?;
        cfg.field(&mut out, "Output channel", &Value::Int(self.output_ch))?;
        cfg.field(&mut out, "wait for fb", &Value::Int(self.wait_for_fb))?;
        cfg.field(&mut out, "Error limit (high)", &Value::Float(self.err_limit_high))?;
        cfg.field(&mut out, "Error limit (low)", &Value::Float(self.err_limit_low))?;
        cfg.end(&mut out);

        args.end(&mut out);
        top.end(&mut out);
        Ok(out)
    }

    /// Wrap into a [`Command`].
    pub fn into_command(self) -> Command {
        Command::feedback(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeedbackConfig {
        FeedbackConfig {
            fb_ch: 0,
            input_ch: 2,
            output_ch: 7,
            out_limit_low: -10.0,
            out_limit_high: 10.0,
            setpoint: 0.5,
            p_gain: 0.001,
            i_gain: 1500.0,
            negative: true,
            ..FeedbackConfig::default()
        }
    }

    #[test]
    fn nested_layout_is_exact() {
        let text = sample().to_text().unwrap();
        assert_eq!(
            text,
            concat!(
                r#"{"cmd":"set_feedback","args":{"fb channel":0, "fb config":{"#,
                r#""Setpoint":0.5, "Output limit (low)":-10.0, "Output limit (high)":10.0, "#,
                r#""P gain":0.001, "I gain":1500, "Reset":false, "Hold":false, "#,
                r#""Negative":true, "Input channel":2, "Output channel":7, "wait for fb":0, "#,
                r#""Error limit (high)":Infinity, "Error limit (low)":-Infinity}}}"#,
            )
        );
    }

    #[test]
    fn gains_use_six_significant_digits() {
        let cfg = FeedbackConfig {
            setpoint: 1.0 / 3.0,
            p_gain: 1234567.0,
            i_gain: 1e-7,
            ..FeedbackConfig::default()
        };
        let text = cfg.to_text().unwrap();

        assert!(text.contains(r#""Setpoint":0.333333, "#));
        assert!(text.contains(r#""P gain":1.23457e+06, "#));
        assert!(text.contains(r#""I gain":1e-07, "#));
    }

    #[test]
    fn finite_error_limits_render_as_numbers() {
        let cfg = FeedbackConfig {
            err_limit_low: -0.05,
            err_limit_high: 0.05,
            wait_for_fb: 20,
            ..sample()
        };
        let text = cfg.to_text().unwrap();

        assert!(text.contains(r#""wait for fb":20, "#));
        assert!(text.ends_with(r#""Error limit (high)":0.05, "Error limit (low)":-0.05}}}"#));

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["args"]["fb config"]["Negative"], true);
        assert_eq!(parsed["args"]["fb config"]["I gain"], 1500);
    }

    #[test]
    fn command_wraps_nested_layout() {
        let cmd = sample().into_command();
        assert_eq!(cmd.name(), "set_feedback");
        assert_eq!(cmd.to_text().unwrap(), sample().to_text().unwrap());

        let wire = cmd.encode().unwrap();
        let declared = u32::from_be_bytes(wire[..4].try_into().unwrap()) as usize;
        assert_eq!(declared, wire.len() - 4);
    }
}
