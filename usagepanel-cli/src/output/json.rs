//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use usagepanel_core::ProviderUsage;

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats provider results as an array, in display order.
    pub fn format_results(&self, results: &[ProviderUsage]) -> Result<String> {
        self.format(results)
    }
}

// ============================================================================
// Tests
// ============================================================================
