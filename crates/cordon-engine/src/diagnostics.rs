use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `Severity` values.
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Trait contract for `DiagnosticSink` behavior.
///
/// Hosts supply a sink to receive parse diagnostics; the engine does not
/// depend on how messages are rendered or persisted.
pub trait DiagnosticSink {
    fn write(&mut self, message: &str, severity: Severity);
}

#[derive(Debug, Clone, Copy, Default)]
/// Sink forwarding each message to the tracing subscriber at the mapped
/// level.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn write(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Info => tracing::info!("{message}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Sink accumulating messages in memory, for tests and embedding hosts.
pub struct BufferedSink {
    entries: Vec<(Severity, String)>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(Severity, String)] {
        &self.entries
    }
}

impl DiagnosticSink for BufferedSink {
    fn write(&mut self, message: &str, severity: Severity) {
        self.entries.push((severity, message.to_string()));
    }
}
