//! ISO-8601 duration codes as served by the catalog (`PT#H#M#S`).
//!
//! Only the `PT` subset appears in practice; date components are never sent.
//! Parsing is lenient: any component may be absent, and input that does not
//! match at all is treated as zero so display code never has to branch.

use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

fn duration_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").unwrap())
}

fn components(code: &str) -> Option<(u64, u64, u64)> {
    let caps = duration_code_re().captures(code)?;
    let part = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };
    Some((part(1), part(2), part(3)))
}

/// Parse a `PT#H#M#S` code into a [`Duration`]. Unparsable input is zero.
pub fn parse_duration_code(code: &str) -> Duration {
    match components(code) {
        Some((h, m, s)) => Duration::from_secs(h * 3600 + m * 60 + s),
        None => Duration::ZERO,
    }
}

/// Render a `PT#H#M#S` code for display: `H:MM:SS` when hours are present,
/// `M:SS` otherwise, with minutes and seconds zero-padded to two digits.
pub fn format_duration_code(code: &str) -> String {
    let Some((hours, minutes, seconds)) = components(code) else {
        return "0:00".to_string();
    };

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
