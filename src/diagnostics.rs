//! Diagnostic reporting for the parser and validator.
//!
//! Parsing is tolerant: unsupported or malformed lines are skipped, not
//! fatal. This module provides the callback mechanism through which those
//! per-line findings reach the caller, who decides whether to log, collect,
//! or ignore them.
//!
//! # Example
//!
//! ```
//! use obj2vbo::diagnostics::DiagnosticSink;
//!
//! let sink = DiagnosticSink::new(|d| {
//!     eprintln!("{}({}): {}: {}", d.file, d.line, d.severity, d.message);
//! });
//! ```

use std::sync::{Arc, Mutex};

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recognized-but-unsupported input; the line was skipped.
    Warning,
    /// Malformed or unknown input; the line was skipped.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One per-line finding emitted during parsing or synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious the finding is.
    pub severity: Severity,
    /// Name of the source being parsed (file path or caller-supplied label).
    pub file: String,
    /// 1-based line number in the source.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

/// A sink that receives [`Diagnostic`] records as they are produced.
///
/// The conversion pipeline never prints; everything flows through the sink
/// the caller injects. Use [`DiagnosticSink::none`] to discard records or
/// [`DiagnosticSink::collect`] to capture them for later inspection.
pub struct DiagnosticSink {
    callback: Box<dyn Fn(&Diagnostic) + Send + Sync>,
}

impl DiagnosticSink {
    /// Create a new sink with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Diagnostic) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Create a no-op sink that discards all records.
    pub fn none() -> Self {
        Self::new(|_| {})
    }

    /// Create a sink that appends every record to a shared vector.
    ///
    /// Returns the sink and a handle to the vector, for tests and callers
    /// that want to inspect diagnostics after the conversion finishes.
    pub fn collect() -> (Self, Arc<Mutex<Vec<Diagnostic>>>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        let handle = Arc::clone(&records);
        let sink = Self::new(move |d: &Diagnostic| {
            records.lock().unwrap().push(d.clone());
        });
        (sink, handle)
    }

    /// Report a diagnostic.
    #[inline]
    pub fn report(&self, severity: Severity, file: &str, line: usize, message: impl Into<String>) {
        (self.callback)(&Diagnostic {
            severity,
            file: file.to_string(),
            line,
            message: message.into(),
        });
    }

    /// Report a warning.
    #[inline]
    pub fn warning(&self, file: &str, line: usize, message: impl Into<String>) {
        self.report(Severity::Warning, file, line, message);
    }

    /// Report an error.
    #[inline]
    pub fn error(&self, file: &str, line: usize, message: impl Into<String>) {
        self.report(Severity::Error, file, line, message);
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticSink").finish_non_exhaustive()
    }
}
