//! Severity filtering and syslog severity mapping

use super::log_level::LogLevel;

/// Decide whether an entry at `level` should be shipped given the configured
/// minimum level.
///
/// An unset or empty minimum ships everything. A minimum that does not parse
/// as a known level ships nothing (fail closed), so a typo in configuration
/// cannot silently ship the full firehose.
pub fn should_ship(level: LogLevel, min_level: Option<&str>) -> bool {
    match min_level {
        None => true,
        Some(min) if min.is_empty() => true,
        Some(min) => match min.parse::<LogLevel>() {
            Ok(min) => level >= min,
            Err(_) => false,
        },
    }
}

/// Map a level name to its syslog severity name and numeric code.
///
/// Lower code means more severe, per syslog numbering. Unknown names map to
/// `("none", -1)`. Used only by the syslog point encoding.
pub fn parse_severity(level: &str) -> (&'static str, i32) {
    match level {
        "info" => ("info", 6),
        "error" => ("err", 3),
        "debug" => ("debug", 7),
        "panic" => ("panic", 0),
        "fatal" => ("crit", 2),
        "warning" => ("warning", 4),
        _ => ("none", -1),
    }
}
