use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{LogEntry, LogPanel};

const ENTRY_CLASS: &str = "p-1.5 text-sm font-mono border-b border-gray-200";

// Shared, in-memory log panel. Entries are kept newest first.
#[derive(Clone, Default)]
pub struct InMemoryLogPanel {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl InMemoryLogPanel {
    pub fn new() -> Self {
        Self::default()
    }

    // Snapshot for display, newest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Renders the panel as dashboard markup, one `div` per entry.
    ///
    /// Message text is HTML-escaped; labels, classes and timestamps are fixed strings.
    pub fn render_html(&self) -> String {
        let mut html = String::new();
        for entry in self.lock().iter() {
            let _ = write!(
                html,
                r#"<div class="{ENTRY_CLASS}"><span class="font-semibold {color}">{label}</span><span class="text-gray-500 text-xs mx-1">{time}</span><span class="block text-gray-800">{message}</span></div>"#,
                color = entry.severity.color().css_class(),
                label = entry.label(),
                time = entry.timestamp_label(),
                message = escape_html(&entry.message),
            );
        }
        html
    }

    // One line per entry with SGR colours, for terminals.
    // Control characters in messages are shown as `\u{..}` escapes.
    pub fn render_ansi(&self) -> String {
        let mut out = String::new();
        for entry in self.lock().iter() {
            let _ = writeln!(
                out,
                "\x1b[1;{code}m{label}\x1b[0m \x1b[2m{time}\x1b[0m {message}",
                code = entry.severity.color().ansi_code(),
                label = entry.label(),
                time = entry.timestamp_label(),
                message = escape_control(&entry.message),
            );
        }
        out
    }

    // A poisoned lock still holds a consistent deque; keep using it.
    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogPanel for InMemoryLogPanel {
    fn prepend(&self, entry: LogEntry) {
        self.lock().push_front(entry);
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn escape_control(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_control() {
            escaped.extend(ch.escape_unicode());
        } else {
            escaped.push(ch);
        }
    }
    escaped
}
