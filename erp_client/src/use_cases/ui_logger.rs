use std::sync::Arc;

use crate::domain::{Clock, LogEntry, LogPanel, LogSink, Severity};

// Writes timestamped entries to the top of an injected log panel.
pub struct UiLogger<C> {
    pub clock: C,
    // `None` when the panel is not available; entries are then dropped.
    pub panel: Option<Arc<dyn LogPanel>>,
}

impl<C> UiLogger<C>
where
    C: Clock,
{
    pub fn attached(clock: C, panel: Arc<dyn LogPanel>) -> Self {
        Self {
            clock,
            panel: Some(panel),
        }
    }

    pub fn detached(clock: C) -> Self {
        Self { clock, panel: None }
    }

    // Severity given as a free-form tag; unknown tags log as INFO.
    pub fn log_tagged(&self, message: &str, tag: &str) {
        self.log(message, Severity::from_tag(tag));
    }
}

impl<C> LogSink for UiLogger<C>
where
    C: Clock,
{
    fn log(&self, message: &str, severity: Severity) {
        let Some(panel) = &self.panel else {
            tracing::error!(%severity, entry = message, "system log container not found.");
            return;
        };

        panel.prepend(LogEntry {
            severity,
            timestamp: self.clock.now_local_time(),
            message: message.to_string(),
        });
    }
}
