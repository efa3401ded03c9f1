//! Optional wall-clock runtime extraction from docking logs.
//!
//! Only lines of the form `<label>[:=] <number> [unit]` are recognised, where
//! the label is one of `time`, `total time`, `runtime`, `run time`,
//! `elapsed`, `elapsed time`, `wall time` or `time taken`. The value must end
//! the line, so clock times and dates (`End time: 10:32:15`) never match.
//! The last matching line in the log wins.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Metric name emitted when a runtime was found.
pub const RUNTIME_SECONDS: &str = "runtime_seconds";

fn runtime_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:total\s+)?(?:run\s*time|elapsed(?:\s+time)?|wall\s*time|time\s+taken|time)\s*[:=]?\s*([0-9]+(?:\.[0-9]+)?)\s*(milliseconds?|ms|hours?|hrs?|h|minutes?|mins?|m|seconds?|secs?|s)?\.?\s*$",
        )
        .expect("runtime regex is valid")
    })
}

fn unit_to_seconds(unit: Option<&str>) -> f64 {
    match unit.map(|u| u.to_lowercase()) {
        Some(u) if u == "ms" || u.starts_with("millisecond") => 0.001,
        Some(u) if u.starts_with('h') => 3600.0,
        Some(u) if u.starts_with('m') => 60.0,
        _ => 1.0,
    }
}

/// Parse the runtime, in seconds, from log text.
pub fn parse_runtime(text: &str) -> Option<f64> {
    let re = runtime_regex();
    text.lines()
        .filter_map(|line| {
            let caps = re.captures(line)?;
            let value: f64 = caps.get(1)?.as_str().parse().ok()?;
            Some(value * unit_to_seconds(caps.get(2).map(|m| m.as_str())))
        })
        .last()
}

/// Read a log file and parse its runtime. Unreadable files yield `None`.
pub fn parse_runtime_file(path: &Path) -> Option<f64> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let runtime = parse_runtime(&text);
            if runtime.is_none() {
                debug!("No runtime line found in {}", path.display());
            }
            runtime
        }
        Err(e) => {
            debug!("Could not read log {}: {}", path.display(), e);
            None
        }
    }
}
