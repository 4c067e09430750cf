use std::time::Duration;

use crate::{ConfigError, Result};

/// A delay as written by the user, before the sign is checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SignedDelay {
    negative: bool,
    magnitude: Duration,
}

impl SignedDelay {
    fn is_negative(self) -> bool {
        self.negative && !self.magnitude.is_zero()
    }
}

/// Parses a textual retry delay into a non-negative [`Duration`].
///
/// Accepted forms, tried in order:
/// - the empty string, meaning no delay;
/// - a duration literal such as `"500ms"`, `"1.5s"` or `"1h30m"`;
/// - a plain integer, treated as whole seconds.
///
/// Negative delays (`"-5s"`, `"-1"`) are rejected rather than clamped.
pub fn parse_delay(raw: &str) -> Result<Duration> {
    if raw.is_empty() {
        return Ok(Duration::ZERO);
    }

    let delay = parse_duration_literal(raw)
        .or_else(|| parse_whole_seconds(raw))
        .ok_or_else(|| ConfigError::InvalidDelay {
            raw: raw.to_owned(),
        })?;

    if delay.is_negative() {
        return Err(ConfigError::NegativeDelay {
            raw: raw.to_owned(),
        }
        .into());
    }

    Ok(delay.magnitude)
}

/// Units a duration literal may carry, mapped to their `humantime` spelling.
const UNITS: &[(&str, &str)] = &[
    ("ns", "ns"),
    ("us", "us"),
    ("\u{b5}s", "us"),
    ("\u{3bc}s", "us"),
    ("ms", "ms"),
    ("s", "s"),
    ("m", "m"),
    ("h", "h"),
];

fn parse_duration_literal(raw: &str) -> Option<SignedDelay> {
    let (negative, unsigned) = split_sign(raw);
    let normalized = normalize_literal(unsigned)?;
    humantime::parse_duration(&normalized)
        .ok()
        .map(|magnitude| SignedDelay {
            negative,
            magnitude,
        })
}

/// Checks `literal` against the `1h30m` / `1.5s` / `.5s` grammar and rewrites
/// it into a form `humantime` accepts.
///
/// Whitespace, unknown units and unitless numbers other than `0` are rejected.
fn normalize_literal(literal: &str) -> Option<String> {
    if literal.is_empty() {
        return None;
    }
    if literal == "0" {
        return Some("0s".to_owned());
    }

    let mut normalized = String::with_capacity(literal.len() + 2);
    let mut rest = literal;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            return None;
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);
        let unit = UNITS
            .iter()
            .find(|(accepted, _)| *accepted == unit)
            .map(|(_, spelling)| *spelling)?;

        normalized.push_str(if whole.is_empty() { "0" } else { whole });
        if !fraction.is_empty() {
            normalized.push('.');
            normalized.push_str(fraction);
        }
        normalized.push_str(unit);
        rest = next;
    }

    Some(normalized)
}

fn parse_whole_seconds(raw: &str) -> Option<SignedDelay> {
    let seconds = raw.parse::<i64>().ok()?;
    Some(SignedDelay {
        negative: seconds < 0,
        magnitude: Duration::from_secs(seconds.unsigned_abs()),
    })
}

fn split_sign(raw: &str) -> (bool, &str) {
    if let Some(rest) = raw.strip_prefix('-') {
        (true, rest)
    } else {
        (false, raw.strip_prefix('+').unwrap_or(raw))
    }
}
