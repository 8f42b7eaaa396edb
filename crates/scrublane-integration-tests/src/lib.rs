//! End-to-end integration tests for Scrublane
//!
//! These tests drive the redaction engine the way the host application does:
//! redact the user's question and the model's answer before storage, keep
//! the unredacted text for the live conversation, and restore stored history
//! on demand.
