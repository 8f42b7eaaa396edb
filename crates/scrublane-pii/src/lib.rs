//! Scrublane PII Detection and Redaction
//!
//! This crate provides session-scoped PII redaction for conversation text:
//! - Ordered pattern catalog (email, phone, SSN, credit card, and more) plus
//!   a known-value list
//! - Reversible tokenization: every detected value becomes a stable
//!   `[LABEL_N]` token, deduplicated per session
//! - Restoration, per-session stats, and audit export
//! - Scanner-backed backend with graceful fallback to the pattern engine

pub mod catalog;
pub mod config;
pub mod engine;
pub mod factory;
pub mod scanner;
pub mod store;

pub use catalog::{KnownValueMatch, PatternCatalog, PiiCategory};
pub use config::{CustomCategoryConfig, PiiConfig, RedactionBackend};
pub use engine::PatternRedactor;
pub use factory::build_redactor;
pub use scanner::{PiiScanner, ScanOutcome, ScannerRedactor};
pub use store::SessionTokenStore;
