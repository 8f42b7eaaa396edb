//! PII redaction configuration

use serde::{Deserialize, Serialize};

/// Redaction backend, selected once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RedactionBackend {
    /// Regex catalog + known-value list with reversible tokens
    #[default]
    Pattern,

    /// Statistical scanner with fallback to the pattern engine
    Scanner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiiConfig {
    /// Which backend to construct
    #[serde(default)]
    pub backend: RedactionBackend,

    /// Literal values always redacted as PERSON, checked before the pattern
    /// registry. Case-sensitive, substring containment (not word-boundary).
    #[serde(default)]
    pub known_names: Vec<String>,

    /// Enable email detection
    #[serde(default = "default_true")]
    pub detect_email: bool,

    /// Enable phone number detection
    #[serde(default = "default_true")]
    pub detect_phone: bool,

    /// Enable SSN detection
    #[serde(default = "default_true")]
    pub detect_ssn: bool,

    /// Enable credit card detection
    #[serde(default = "default_true")]
    pub detect_credit_card: bool,

    /// Enable IP address detection
    #[serde(default = "default_true")]
    pub detect_ip_address: bool,

    /// Enable date-of-birth detection
    #[serde(default = "default_true")]
    pub detect_dob: bool,

    /// Enable person name detection
    #[serde(default = "default_true")]
    pub detect_person: bool,

    /// Enable physical address detection
    #[serde(default = "default_true")]
    pub detect_address: bool,

    /// Extra categories appended after the built-in registry
    #[serde(default)]
    pub custom_categories: Vec<CustomCategoryConfig>,
}

impl Default for PiiConfig {
    fn default() -> Self {
        Self {
            backend: RedactionBackend::Pattern,
            known_names: Vec::new(),
            detect_email: true,
            detect_phone: true,
            detect_ssn: true,
            detect_credit_card: true,
            detect_ip_address: true,
            detect_dob: true,
            detect_person: true,
            detect_address: true,
            custom_categories: Vec::new(),
        }
    }
}

/// A user-defined PII category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomCategoryConfig {
    /// Unique key for the category
    pub key: String,

    /// Token label; forms the `LABEL_N` token prefix, so it must be stable
    pub label: String,

    /// Regex detection rule
    pub pattern: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,
}

fn default_true() -> bool {
    true
}
