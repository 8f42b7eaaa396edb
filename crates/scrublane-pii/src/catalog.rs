//! PII pattern catalog
//!
//! The ordered registry of PII category definitions plus the known-value
//! list. Catalog order is significant: it is the priority order in which
//! categories compete for overlapping spans during redaction, with the
//! known-value list outranking every category.

use crate::config::PiiConfig;
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use scrublane_core::{Error, Result};

/// A single PII category definition
///
/// Immutable once compiled; shared read-only across all sessions.
#[derive(Debug, Clone)]
pub struct PiiCategory {
    /// Unique key (e.g. "email")
    pub key: String,

    /// Token label (e.g. "EMAIL"); forms the `LABEL_N` token prefix
    pub label: String,

    /// Human-readable description, carried into redaction metadata
    pub description: String,

    /// Compiled detection rule
    pub rule: Regex,
}

impl PiiCategory {
    fn new(key: &str, label: &str, description: &str, pattern: &str) -> Result<Self> {
        Ok(Self {
            key: key.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            rule: Regex::new(pattern)?,
        })
    }
}

/// An occurrence of a known literal value in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownValueMatch {
    /// Byte offset of the first character
    pub start: usize,

    /// Byte offset one past the last character
    pub end: usize,
}

/// Ordered PII category registry plus the known-value matcher
pub struct PatternCatalog {
    categories: Vec<PiiCategory>,
    known_values: Vec<String>,
    known_matcher: Option<AhoCorasick>,
}

impl PatternCatalog {
    /// Compile the catalog from configuration
    ///
    /// Built-in categories keep their registry order regardless of which
    /// toggles are set; custom categories are appended after them. A
    /// malformed custom pattern surfaces as `Error::InvalidPattern`.
    pub fn from_config(config: &PiiConfig) -> Result<Self> {
        let mut categories = Vec::new();

        if config.detect_email {
            categories.push(PiiCategory::new(
                "email",
                "EMAIL",
                "Email address",
                r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b",
            )?);
        }
        if config.detect_phone {
            categories.push(PiiCategory::new(
                "phone",
                "PHONE",
                "Phone number",
                r"\b(?:\+?1[-.]?)?\(?([0-9]{3})\)?[-.]?([0-9]{3})[-.]?([0-9]{4})\b",
            )?);
        }
        if config.detect_ssn {
            categories.push(PiiCategory::new(
                "ssn",
                "SSN",
                "Social Security Number",
                r"\b\d{3}-\d{2}-\d{4}\b",
            )?);
        }
        if config.detect_credit_card {
            categories.push(PiiCategory::new(
                "credit_card",
                "CREDIT_CARD",
                "Credit card number",
                r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b",
            )?);
        }
        if config.detect_ip_address {
            categories.push(PiiCategory::new(
                "ip_address",
                "IP_ADDRESS",
                "IP address",
                r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b",
            )?);
        }
        if config.detect_dob {
            categories.push(PiiCategory::new(
                "date_of_birth",
                "DOB",
                "Date of birth",
                r"\b(?:0[1-9]|1[0-2])[/-](?:0[1-9]|[12][0-9]|3[01])[/-](?:19|20)\d{2}\b",
            )?);
        }
        if config.detect_person {
            categories.push(PiiCategory::new(
                "name",
                "PERSON",
                "Person name",
                r"\b(?:[A-Z][a-z]+ ){1,2}[A-Z][a-z]+\b",
            )?);
        }
        if config.detect_address {
            categories.push(PiiCategory::new(
                "address",
                "ADDRESS",
                "Physical address",
                r"\b\d+\s+[A-Za-z\s]+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr)\b",
            )?);
        }

        for custom in &config.custom_categories {
            categories.push(PiiCategory::new(
                &custom.key,
                &custom.label,
                &custom.description,
                &custom.pattern,
            )?);
        }

        let known_values: Vec<String> = config
            .known_names
            .iter()
            .filter(|name| !name.is_empty())
            .cloned()
            .collect();

        // LeftmostLongest so "Jane Anne Doe" beats "Jane" at the same start.
        let known_matcher = if known_values.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .match_kind(MatchKind::LeftmostLongest)
                    .build(&known_values)
                    .map_err(|e| Error::Config(format!("invalid known-value list: {}", e)))?,
            )
        };

        Ok(Self {
            categories,
            known_values,
            known_matcher,
        })
    }

    /// Categories in registry (priority) order
    pub fn categories(&self) -> &[PiiCategory] {
        &self.categories
    }

    /// The configured known-value literals
    pub fn known_values(&self) -> &[String] {
        &self.known_values
    }

    /// Every occurrence of every known value in `text`
    ///
    /// Substring containment semantics: matches are not word-boundary
    /// sensitive, so a known value inside a longer word still matches.
    pub fn find_known_values(&self, text: &str) -> Vec<KnownValueMatch> {
        let Some(matcher) = &self.known_matcher else {
            return Vec::new();
        };

        matcher
            .find_iter(text)
            .map(|m| KnownValueMatch {
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }
}
