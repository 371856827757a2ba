use chrono::NaiveTime;
use std::fmt;

// Severity of a log panel entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Warn,
    Info,
}

impl Severity {
    // Case-insensitive; anything unrecognised is INFO.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "SUCCESS" => Severity::Success,
            "ERROR" => Severity::Error,
            "WARN" => Severity::Warn,
            _ => Severity::Info,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Success => "SUCCESS",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
        }
    }

    pub fn color(self) -> LogColor {
        match self {
            Severity::Success => LogColor::Green,
            Severity::Error => LogColor::Red,
            Severity::Warn => LogColor::Yellow,
            Severity::Info => LogColor::Gray,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogColor {
    Green,
    Red,
    Yellow,
    Gray,
}

impl LogColor {
    pub fn css_class(self) -> &'static str {
        match self {
            LogColor::Green => "text-green-600",
            LogColor::Red => "text-red-600",
            LogColor::Yellow => "text-yellow-600",
            LogColor::Gray => "text-gray-700",
        }
    }

    // SGR foreground code.
    pub fn ansi_code(self) -> &'static str {
        match self {
            LogColor::Green => "32",
            LogColor::Red => "31",
            LogColor::Yellow => "33",
            LogColor::Gray => "90",
        }
    }
}

// One rendered line of the log panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub severity: Severity,
    pub timestamp: NaiveTime,
    pub message: String,
}

impl LogEntry {
    pub fn label(&self) -> String {
        format!("[{}]", self.severity.label())
    }

    pub fn timestamp_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}
