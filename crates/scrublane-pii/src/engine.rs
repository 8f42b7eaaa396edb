//! Pattern-based redaction engine
//!
//! Detection is a two-pass design: collect candidate spans from the
//! known-value list and every catalog category over the original text,
//! resolve overlaps by priority, then substitute tokens in one
//! left-to-right pass. Matching never sees partially substituted text.

use crate::catalog::PatternCatalog;
use crate::config::PiiConfig;
use crate::store::SessionTokenStore;
use regex::Regex;
use scrublane_core::{
    RedactionEntry, RedactionMapExport, RedactionReport, RedactionStats, Redactor, Result,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Description attached to known-value redactions
const KNOWN_VALUE_DESCRIPTION: &str = "Known person name";

/// A candidate PII span over the original text
///
/// Priority 0 is the known-value list; categories get 1 + their registry
/// index. Lower priority number wins contested spans.
struct Candidate<'a> {
    start: usize,
    end: usize,
    priority: usize,
    label: &'a str,
    description: &'a str,
}

/// Pattern-based implementation of the `Redactor` trait
pub struct PatternRedactor {
    catalog: PatternCatalog,
    store: Arc<SessionTokenStore>,
    token_re: Regex,
}

impl PatternRedactor {
    /// Build an engine with its own private session store
    pub fn from_config(config: &PiiConfig) -> Result<Self> {
        Self::with_store(config, Arc::new(SessionTokenStore::new()))
    }

    /// Build an engine over an injected session store
    ///
    /// Lets the host share one store across engines, or hold a handle for
    /// inspection.
    pub fn with_store(config: &PiiConfig, store: Arc<SessionTokenStore>) -> Result<Self> {
        let catalog = PatternCatalog::from_config(config)?;

        // Matches tokens already present in the input, e.g. [EMAIL_1] in
        // text that was redacted on a previous call and stored.
        let token_re = Regex::new(r"\[[A-Z][A-Z0-9_]*_[0-9]+\]")?;

        Ok(Self {
            catalog,
            store,
            token_re,
        })
    }

    /// The engine's session store
    pub fn store(&self) -> &Arc<SessionTokenStore> {
        &self.store
    }

    /// Collect, block, and overlap-resolve candidate spans for one text
    ///
    /// Returns accepted spans sorted by start position.
    fn resolve_spans<'a>(&'a self, text: &str) -> Vec<Candidate<'a>> {
        let mut candidates = Vec::new();

        for m in self.catalog.find_known_values(text) {
            candidates.push(Candidate {
                start: m.start,
                end: m.end,
                priority: 0,
                label: "PERSON",
                description: KNOWN_VALUE_DESCRIPTION,
            });
        }

        for (index, category) in self.catalog.categories().iter().enumerate() {
            for m in category.rule.find_iter(text) {
                candidates.push(Candidate {
                    start: m.start(),
                    end: m.end(),
                    priority: index + 1,
                    label: &category.label,
                    description: &category.description,
                });
            }
        }

        // Tokens already present in the input are off limits for every
        // category, so re-redacting stored text never mints from a token's
        // interior.
        let blocked: Vec<(usize, usize)> = self
            .token_re
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect();
        candidates.retain(|c| !blocked.iter().any(|&(s, e)| c.start < e && s < c.end));

        // Known values outrank every category, earlier categories outrank
        // later ones, earliest start then longest span wins within one
        // priority.
        candidates.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(a.start.cmp(&b.start))
                .then(b.end.cmp(&a.end))
        });

        let mut accepted: Vec<Candidate<'a>> = Vec::new();
        for candidate in candidates {
            let contested = accepted
                .iter()
                .any(|a| candidate.start < a.end && a.start < candidate.end);
            if !contested {
                accepted.push(candidate);
            }
        }

        accepted.sort_by_key(|c| c.start);
        accepted
    }
}

impl Redactor for PatternRedactor {
    fn redact(&self, text: &str, session_id: &str) -> (String, RedactionReport) {
        if text.is_empty() {
            return (text.to_string(), RedactionReport::empty());
        }

        let spans = self.resolve_spans(text);
        if spans.is_empty() {
            return (text.to_string(), RedactionReport::empty());
        }

        let mut redacted = String::with_capacity(text.len());
        let mut redactions = BTreeMap::new();
        let mut last_end = 0;

        for span in &spans {
            let value = &text[span.start..span.end];
            let token = self
                .store
                .get_or_create_token(session_id, span.label, value);

            redacted.push_str(&text[last_end..span.start]);
            redacted.push('[');
            redacted.push_str(&token);
            redacted.push(']');
            last_end = span.end;

            redactions.insert(
                token,
                RedactionEntry {
                    label: span.label.to_string(),
                    original: value.to_string(),
                    description: span.description.to_string(),
                },
            );
        }
        redacted.push_str(&text[last_end..]);

        debug!(
            session_id,
            spans = spans.len(),
            tokens = redactions.len(),
            "redacted PII"
        );

        (redacted, RedactionReport::Pattern { redactions })
    }

    fn restore(&self, text: &str, session_id: &str) -> String {
        if text.is_empty() {
            return text.to_string();
        }

        let Some(tokens) = self.store.snapshot(session_id) else {
            return text.to_string();
        };

        // Tokens are disjoint bracketed strings, so replacement order cannot
        // change the result; the snapshot's sorted order keeps it
        // deterministic anyway.
        let mut restored = text.to_string();
        for (token, value) in &tokens {
            restored = restored.replace(&format!("[{}]", token), value);
        }
        restored
    }

    fn get_stats(&self, session_id: &str) -> RedactionStats {
        let Some(tokens) = self.store.snapshot(session_id) else {
            return RedactionStats::default();
        };

        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        for token in tokens.keys() {
            // Recover the category label by stripping the _N suffix.
            let label = token
                .rsplit_once('_')
                .map(|(label, _)| label)
                .unwrap_or(token.as_str());
            *by_type.entry(label.to_string()).or_insert(0) += 1;
        }

        RedactionStats {
            total_redactions: tokens.len(),
            by_type,
        }
    }

    fn export_map(&self, session_id: &str) -> RedactionMapExport {
        RedactionMapExport {
            session_id: session_id.to_string(),
            redaction_map: self.store.snapshot(session_id).unwrap_or_default(),
            stats: self.get_stats(session_id),
        }
    }

    fn clear_session(&self, session_id: &str) {
        self.store.clear(session_id);
    }
}

#[cfg(test)]
mod tests;
