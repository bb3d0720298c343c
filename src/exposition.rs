//! Prometheus text exposition rendering.

use std::io::Write;

use crate::parser::LightStatus;

/// Render light records in Prometheus exposition format.
///
/// One `# TYPE` header followed by one gauge sample per record, in the order
/// the records were parsed (no sorting or grouping).
pub fn render(lights: &[LightStatus]) -> String {
    let mut output = Vec::with_capacity(64 + lights.len() * 64);

    writeln!(output, "# TYPE light_brightness gauge").ok();
    for light in lights {
        writeln!(
            output,
            "light_brightness{{index=\"{}\",model_number=\"{}\"}} {}",
            light.index,
            escape_label_value(&light.model_number),
            light.brightness
        )
        .ok();
    }

    String::from_utf8(output).unwrap_or_default()
}

/// Escape special characters in label values.
fn escape_label_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}
