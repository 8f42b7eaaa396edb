//! Scrublane Core Types and Traits
//!
//! This crate provides the fundamental types and traits used throughout Scrublane:
//! - The `Redactor` capability trait
//! - Redaction report, stats, and audit export types
//! - Core error types

pub mod error;
pub mod redaction;

pub use error::{Error, Result};
pub use redaction::{
    RedactionEntry, RedactionMapExport, RedactionReport, RedactionStats, Redactor, ScanSummary,
};
