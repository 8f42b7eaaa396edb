//! Redactor factory
//!
//! Builds a `Redactor` implementation from configuration. Backend selection
//! happens here, once, at construction time; nothing downstream inspects
//! which backend it got.

use crate::config::{PiiConfig, RedactionBackend};
use crate::engine::PatternRedactor;
use crate::scanner::{PiiScanner, ScannerRedactor};
use scrublane_core::{Error, Redactor, Result};
use std::sync::Arc;
use tracing::info;

/// Create a redactor for the configured backend
///
/// The scanner backend requires a scanner instance; asking for it without
/// one is a configuration error. The pattern backend ignores `scanner`.
///
/// # Errors
/// - `Error::Config` if the scanner backend is selected with no scanner
/// - `Error::InvalidPattern` if a configured pattern fails to compile
pub fn build_redactor(
    config: &PiiConfig,
    scanner: Option<Arc<dyn PiiScanner>>,
) -> Result<Arc<dyn Redactor>> {
    match config.backend {
        RedactionBackend::Pattern => {
            info!("Initializing pattern redaction backend");
            Ok(Arc::new(PatternRedactor::from_config(config)?))
        }
        RedactionBackend::Scanner => {
            let Some(scanner) = scanner else {
                return Err(Error::Config(
                    "scanner backend selected but no scanner provided".to_string(),
                ));
            };

            info!("Initializing scanner redaction backend");
            let fallback = PatternRedactor::from_config(config)?;
            Ok(Arc::new(ScannerRedactor::new(scanner, fallback)))
        }
    }
}
