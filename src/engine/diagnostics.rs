//! Diagnostic line stream for resize operations
//!
//! Every measurement and platform call made during a resize is written as a
//! labeled line so a front end can show it in a log panel. Lines are also
//! mirrored to `tracing` at debug level.

/// Receiver of diagnostic lines
pub trait DiagnosticLog {
    fn record(&mut self, line: String);
}

impl DiagnosticLog for Vec<String> {
    fn record(&mut self, line: String) {
        self.push(line);
    }
}

/// Discards every line
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl DiagnosticLog for NullLog {
    fn record(&mut self, _line: String) {}
}

/// Forwards lines to a closure
pub struct FnLog<F: FnMut(&str)>(pub F);

impl<F: FnMut(&str)> DiagnosticLog for FnLog<F> {
    fn record(&mut self, line: String) {
        (self.0)(&line);
    }
}

/// Writes to a caller's log and to `tracing`
pub(crate) struct Diagnostics<'l> {
    sink: &'l mut dyn DiagnosticLog,
}

impl<'l> Diagnostics<'l> {
    pub(crate) fn new(sink: &'l mut dyn DiagnosticLog) -> Self {
        Self { sink }
    }

    pub(crate) fn line(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::debug!("{}", line);
        self.sink.record(line);
    }

    /// Records each line of a multi-line block
    pub(crate) fn block(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }
}
