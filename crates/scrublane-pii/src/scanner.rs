//! Scanner-backed redaction
//!
//! Wraps a statistical PII scanner behind the `Redactor` trait. The scanner
//! is probed once at construction; when it is unavailable, or when a scan
//! fails at call time, the embedded pattern engine handles the call instead.
//! Scanner failures never reach the caller.

use crate::engine::PatternRedactor;
use scrublane_core::{
    RedactionMapExport, RedactionReport, RedactionStats, Redactor, Result, ScanSummary,
};
use std::sync::Arc;
use tracing::warn;

/// Outcome of one scanner pass
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    /// Sanitized text, with detected values replaced by the scanner's own
    /// placeholders
    pub sanitized: String,

    /// Whether the scanner considered the input valid
    pub is_valid: bool,

    /// Risk score for the input (0.0 to 1.0)
    pub risk_score: f32,
}

/// Statistical PII recognizer abstraction
///
/// The concrete recognizer vaults original values internally; restoration of
/// scanner output is its concern, not this crate's.
#[cfg_attr(test, mockall::automock)]
pub trait PiiScanner: Send + Sync {
    /// Whether the underlying recognizer is usable
    fn is_available(&self) -> bool;

    /// Scan `text` and return the sanitized form
    fn scan(&self, text: &str) -> Result<ScanOutcome>;
}

/// Scanner-backed implementation of the `Redactor` trait
pub struct ScannerRedactor {
    scanner: Option<Arc<dyn PiiScanner>>,
    fallback: PatternRedactor,
}

impl ScannerRedactor {
    /// Probe the scanner once and wire the fallback engine
    ///
    /// An unavailable scanner leaves a pure pass-through: every operation
    /// delegates to the pattern engine.
    pub fn new(scanner: Arc<dyn PiiScanner>, fallback: PatternRedactor) -> Self {
        let scanner = if scanner.is_available() {
            Some(scanner)
        } else {
            warn!("PII scanner unavailable, falling back to pattern redaction");
            None
        };

        Self { scanner, fallback }
    }

    /// Whether calls are currently routed to the scanner
    pub fn is_scanner_active(&self) -> bool {
        self.scanner.is_some()
    }
}

impl Redactor for ScannerRedactor {
    fn redact(&self, text: &str, session_id: &str) -> (String, RedactionReport) {
        if text.is_empty() {
            return (text.to_string(), RedactionReport::empty());
        }

        let Some(scanner) = &self.scanner else {
            return self.fallback.redact(text, session_id);
        };

        match scanner.scan(text) {
            Ok(outcome) => {
                let brackets_before = text.matches('[').count();
                let brackets_after = outcome.sanitized.matches('[').count();

                let summary = ScanSummary {
                    is_valid: outcome.is_valid,
                    risk_score: outcome.risk_score,
                    original_length: text.len(),
                    redacted_length: outcome.sanitized.len(),
                    redactions_count: brackets_after.saturating_sub(brackets_before),
                };

                (outcome.sanitized, RedactionReport::Scanner(summary))
            }
            Err(e) => {
                warn!(error = %e, "PII scan failed, falling back to pattern redaction");
                self.fallback.redact(text, session_id)
            }
        }
    }

    /// With an active scanner this is a pass-through: the scanner's vault
    /// owns restoration and stored text stays redacted.
    fn restore(&self, text: &str, session_id: &str) -> String {
        if self.scanner.is_some() {
            return text.to_string();
        }
        self.fallback.restore(text, session_id)
    }

    fn get_stats(&self, session_id: &str) -> RedactionStats {
        // The scanner's vault is opaque; stats cover the pattern engine's
        // token store, which also holds everything minted on fallback calls.
        self.fallback.get_stats(session_id)
    }

    fn export_map(&self, session_id: &str) -> RedactionMapExport {
        self.fallback.export_map(session_id)
    }

    fn clear_session(&self, session_id: &str) {
        self.fallback.clear_session(session_id);
    }
}
