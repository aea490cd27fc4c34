use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ChapterError, Result};

/// A transcript line optionally prefixed with `[M:SS]` or `[H:MM:SS]`.
static TIMESTAMPED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d{1,2}:\d{2}(?::\d{2})?)\]\s*(.*)$").expect("valid timestamped line regex")
});

/// Convert a timestamp string (`M:SS`, `H:MM:SS`, brackets optional) to seconds.
/// Any arity other than two or three parts maps to 0.
pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
    let cleaned = timestamp
        .trim()
        .trim_matches(|c| c == '[' || c == ']')
        .trim();
    let parts: Vec<&str> = cleaned.split(':').collect();

    let number = |part: &str| -> Result<u64> {
        part.parse::<u64>()
            .map_err(|_| ChapterError::MalformedTimestamp {
                token: timestamp.to_string(),
            })
    };

    match parts.as_slice() {
        [minutes, seconds] => Ok(number(minutes)? * 60 + number(seconds)?),
        [hours, minutes, seconds] => {
            Ok(number(hours)? * 3600 + number(minutes)? * 60 + number(seconds)?)
        }
        _ => Ok(0),
    }
}

/// Render seconds as `M:SS`, or `H:MM:SS` from one hour on.
pub fn format_timestamp(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Split a transcript line into its timestamp token (without brackets) and text.
pub fn split_timestamped_line(line: &str) -> (Option<&str>, &str) {
    match TIMESTAMPED_LINE.captures(line) {
        Some(caps) => {
            let timestamp = caps.get(1).map(|m| m.as_str());
            let text = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            (timestamp, text)
        }
        None => (None, line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes_seconds() {
        assert_eq!(parse_timestamp("1:23").unwrap(), 83);
        assert_eq!(parse_timestamp("12:05").unwrap(), 725);
    }

    #[test]
    fn test_parse_hours_minutes_seconds() {
        assert_eq!(parse_timestamp("1:02:03").unwrap(), 3723);
    }

    #[test]
    fn test_parse_strips_brackets_and_whitespace() {
        assert_eq!(parse_timestamp(" [4:30] ").unwrap(), 270);
        assert_eq!(parse_timestamp("[1:00:00]").unwrap(), 3600);
    }

    #[test]
    fn test_parse_unexpected_arity_is_zero() {
        assert_eq!(parse_timestamp("").unwrap(), 0);
        assert_eq!(parse_timestamp("42").unwrap(), 0);
        assert_eq!(parse_timestamp("1:2:3:4").unwrap(), 0);
    }

    #[test]
    fn test_parse_non_numeric_is_error() {
        let err = parse_timestamp("1:xx").unwrap_err();
        assert!(matches!(err, ChapterError::MalformedTimestamp { .. }));
    }

    #[test]
    fn test_format_under_an_hour() {
        assert_eq!(format_timestamp(0), "0:00");
        assert_eq!(format_timestamp(83), "1:23");
        assert_eq!(format_timestamp(3599), "59:59");
    }

    #[test]
    fn test_format_with_hours() {
        assert_eq!(format_timestamp(3600), "1:00:00");
        assert_eq!(format_timestamp(3723), "1:02:03");
        assert_eq!(format_timestamp(359_999), "99:59:59");
    }

    #[test]
    fn test_round_trip() {
        for seconds in 0..=359_999u64 {
            assert_eq!(parse_timestamp(&format_timestamp(seconds)).unwrap(), seconds);
        }
    }

    #[test]
    fn test_split_timestamped_line() {
        assert_eq!(
            split_timestamped_line("[1:23] hello there"),
            (Some("1:23"), "hello there")
        );
        assert_eq!(
            split_timestamped_line("[1:02:03]no space"),
            (Some("1:02:03"), "no space")
        );
        assert_eq!(split_timestamped_line("plain text"), (None, "plain text"));
        assert_eq!(split_timestamped_line("[123:45] too many"), (None, "[123:45] too many"));
    }
}
