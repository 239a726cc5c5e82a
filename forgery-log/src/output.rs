//! Line writers for each output format.

use crate::{Format, Level, LogConfig};
use std::io::Write;

pub(crate) fn write_record(level: Level, target: &str, message: &str, config: &LogConfig) {
    let line = match config.format {
        Format::Pretty => pretty_line(level, target, message, config),
        Format::Compact => compact_line(level, target, message, config),
        Format::Json => json_line(level, target, message),
    };

    // A closed stderr is not worth failing a generation call over.
    let _ = writeln!(std::io::stderr().lock(), "{line}");
}

fn pretty_line(level: Level, target: &str, message: &str, config: &LogConfig) -> String {
    let mut line = String::with_capacity(message.len() + 48);
    if config.timestamps {
        line.push_str(&chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f ").to_string());
    }
    line.push_str(&format!("{:5} ", level.as_str()));
    if !target.is_empty() {
        line.push_str(&format!("[{target}] "));
    }
    line.push_str(message);
    line
}

fn compact_line(level: Level, target: &str, message: &str, config: &LogConfig) -> String {
    let mut line = String::with_capacity(message.len() + 24);
    if config.timestamps {
        line.push_str(&chrono::Local::now().format("%H:%M:%S ").to_string());
    }
    line.push(level.as_str().chars().next().unwrap_or('?'));
    line.push(' ');
    if !target.is_empty() {
        line.push_str(target);
        line.push_str(": ");
    }
    line.push_str(message);
    line
}

#[cfg(feature = "json")]
pub(crate) fn json_line(level: Level, target: &str, message: &str) -> String {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Record<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let record = Record {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    serde_json::to_string(&record).unwrap_or_else(|_| message.to_string())
}

#[cfg(not(feature = "json"))]
pub(crate) fn json_line(level: Level, target: &str, message: &str) -> String {
    format!(
        r#"{{"timestamp":"{}","level":"{}","target":"{}","message":"{}"}}"#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        escape(target),
        escape(message)
    )
}

#[cfg(not(feature = "json"))]
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
