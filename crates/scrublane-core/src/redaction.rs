//! Redaction capability trait and boundary types
//!
//! The `Redactor` trait provides an abstraction over PII redaction backends,
//! so the pattern-based engine and the scanner-backed engine can be swapped
//! behind one interface. Which implementation a deployment gets is decided
//! once, at construction time, by the factory in `scrublane-pii`.
//!
//! Everything a `redact` call hands back crosses the storage boundary, so all
//! types here serialize with stable field order (`BTreeMap`, not `HashMap`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single redaction performed during one `redact` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactionEntry {
    /// Category label of the detected value (e.g. "EMAIL")
    pub label: String,

    /// The original substring that was replaced
    pub original: String,

    /// Human-readable category description
    pub description: String,
}

/// Aggregate metadata from a scanner-backed redaction pass
///
/// The scanner vaults original values internally, so per-token metadata is
/// not available; this summary is what the scanner reports instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Whether the scanner considered the input valid
    pub is_valid: bool,

    /// Risk score reported by the scanner (0.0 to 1.0)
    pub risk_score: f32,

    /// Length of the input text in bytes
    pub original_length: usize,

    /// Length of the sanitized text in bytes
    pub redacted_length: usize,

    /// Approximate number of redactions, derived from the change in
    /// bracket-character counts between input and output
    pub redactions_count: usize,
}

/// Per-call redaction metadata
///
/// The shape depends on which backend handled the call. The serialized form
/// carries a `method` tag so audit consumers can tell them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum RedactionReport {
    /// Pattern-engine report: token -> entry for this call's redactions only
    Pattern {
        redactions: BTreeMap<String, RedactionEntry>,
    },

    /// Scanner report: aggregate scan summary
    Scanner(ScanSummary),
}

impl RedactionReport {
    /// An empty pattern report, returned for empty input
    pub fn empty() -> Self {
        Self::Pattern {
            redactions: BTreeMap::new(),
        }
    }

    /// Number of redactions this call performed
    pub fn redaction_count(&self) -> usize {
        match self {
            Self::Pattern { redactions } => redactions.len(),
            Self::Scanner(summary) => summary.redactions_count,
        }
    }

    /// Whether the call performed no redactions
    pub fn is_empty(&self) -> bool {
        self.redaction_count() == 0
    }
}

impl Default for RedactionReport {
    fn default() -> Self {
        Self::empty()
    }
}

/// Cumulative redaction statistics for one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionStats {
    /// Total tokens minted for the session
    pub total_redactions: usize,

    /// Token count per category label
    pub by_type: BTreeMap<String, usize>,
}

/// Full token mapping for one session, exported for audits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedactionMapExport {
    /// The session this export covers
    pub session_id: String,

    /// token -> original value
    pub redaction_map: BTreeMap<String, String>,

    /// Stats over the same mapping
    pub stats: RedactionStats,
}

/// Trait for session-scoped PII redaction
///
/// Implementations:
/// - `PatternRedactor`: regex catalog + known-value list, reversible tokens
/// - `ScannerRedactor`: statistical scanner with pattern fallback
///
/// Sessions are opaque string identifiers; state for a session is created
/// lazily on first token mint. Unknown sessions are never an error: stats,
/// export, restore, and clear all define safe empty/zero results. Callers
/// are responsible for passing a non-empty `session_id`.
pub trait Redactor: Send + Sync {
    /// Redact PII from `text`, minting or reusing tokens scoped to
    /// `session_id`
    ///
    /// Returns the sanitized text and metadata covering this call only.
    /// Empty input comes back unchanged with an empty report and no state
    /// mutation.
    fn redact(&self, text: &str, session_id: &str) -> (String, RedactionReport);

    /// Replace every `[TOKEN]` occurrence in `text` with the original value
    /// recorded for `session_id`
    ///
    /// Read-only with respect to session state; unknown sessions return the
    /// input unchanged.
    fn restore(&self, text: &str, session_id: &str) -> String;

    /// Cumulative token counts for `session_id`, zeroed when unknown
    fn get_stats(&self, session_id: &str) -> RedactionStats;

    /// Full token mapping plus stats for `session_id`, for audit purposes
    fn export_map(&self, session_id: &str) -> RedactionMapExport;

    /// Discard all redaction state for `session_id`; idempotent
    fn clear_session(&self, session_id: &str);
}
