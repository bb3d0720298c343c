//! Parser for the WTY2001 controller's status page.
//!
//! The controller's CGI endpoint answers with a script payload in which each
//! light channel appears as one call-like line:
//!
//! ```text
//! javascript:parent.lightValueSet([index],[info],[dimmer],[brightness],'[name]',[repeater],'[model_number]+[num].png');
//! javascript:parent.lightValueSet(0,1,1,38,'照明1',0,'WTY22473+20.png');
//! ```
//!
//! Only the index, brightness, and model number are extracted; the other
//! fields are ignored. Lines that do not match the pattern (headers, blank
//! lines, surrounding markup) are skipped without error.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// Status of a single light channel, in the order it appeared on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightStatus {
    /// Channel index as reported by the controller.
    pub index: u64,
    /// Device-reported intensity.
    pub brightness: u64,
    /// Hardware model identifier, e.g. "WTY22473".
    pub model_number: String,
}

/// Parse errors. A matched line whose numeric capture cannot be decoded
/// aborts the whole parse; no partial results are returned.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse {field} '{raw}': {source}")]
    InvalidNumber {
        field: &'static str,
        raw: String,
        source: std::num::ParseIntError,
    },
}

static LIGHT_VALUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"javascript:parent\.lightValueSet\((?P<index>\d+),\d+,\d+,(?P<brightness>\d+),'[^']*',\d+,'(?P<model_number>[^+]+)\+\d+\.png'\);",
    )
    .unwrap()
});

/// Parse a raw status page into light records.
///
/// Line-oriented: each line is tested independently against the pattern and
/// non-matching lines are silently skipped. Record order follows line order;
/// duplicate indices are retained. Non-UTF-8 bytes are decoded lossily, which
/// cannot corrupt a capture since matching lines are ASCII outside the
/// ignored quoted name.
pub fn parse_response(raw: &[u8]) -> Result<Vec<LightStatus>, ParseError> {
    let text = String::from_utf8_lossy(raw);

    let mut lights = Vec::new();
    for line in text.lines() {
        let Some(caps) = LIGHT_VALUE_REGEX.captures(line) else {
            continue;
        };

        lights.push(LightStatus {
            index: numeric_field(&caps, "index")?,
            brightness: numeric_field(&caps, "brightness")?,
            model_number: caps["model_number"].to_string(),
        });
    }

    Ok(lights)
}

/// Decode a named numeric capture. The `\d+` capture guarantees digits, so
/// the only failure mode left is overflow of the target type.
fn numeric_field(caps: &Captures<'_>, field: &'static str) -> Result<u64, ParseError> {
    let raw = &caps[field];
    raw.parse().map_err(|source| ParseError::InvalidNumber {
        field,
        raw: raw.to_string(),
        source,
    })
}
