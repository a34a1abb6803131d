//! Configuration for inspection runs.
//!
//! Centralized, serde-backed configuration with sensible defaults. The
//! core walk itself needs nothing beyond the diagnostics knobs; the I/O
//! limits guard the file boundary.

use serde::{Deserialize, Serialize};

/// Master configuration for an inspection run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspectConfig {
    /// I/O limits for reading module files.
    pub io: IOConfig,
    /// Failure diagnostics rendering.
    pub diagnostics: DiagnosticsConfig,
}

/// Resource limits for the file-reading boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IOConfig {
    /// The absolute maximum file size that can be opened.
    pub max_file_size: u64,
    /// The maximum total number of bytes that can be read from the file.
    pub max_read_bytes: u64,
}

impl Default for IOConfig {
    fn default() -> Self {
        Self {
            max_file_size: 100 * 1024 * 1024, // 100MB
            // Decoding always reads the whole file, so the read budget
            // must cover every file the size cap admits.
            max_read_bytes: 100 * 1024 * 1024,
        }
    }
}

/// How much context a failure diagnostic carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Include the hex rendering of the unconsumed tail.
    pub include_trailing: bool,
    /// Cap on how many trailing bytes are rendered.
    pub max_trailing_bytes: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            include_trailing: true,
            max_trailing_bytes: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = InspectConfig::default();
        assert_eq!(config.io.max_file_size, 100 * 1024 * 1024);
        assert_eq!(config.io.max_read_bytes, 100 * 1024 * 1024);
        assert!(config.diagnostics.include_trailing);
        assert_eq!(config.diagnostics.max_trailing_bytes, 256);
    }

    #[test]
    fn default_read_budget_covers_the_size_cap() {
        let config = IOConfig::default();
        assert!(config.max_read_bytes >= config.max_file_size);
    }

    #[test]
    fn round_trips_through_json() {
        let config = InspectConfig {
            io: IOConfig {
                max_file_size: 1024,
                max_read_bytes: 512,
            },
            diagnostics: DiagnosticsConfig {
                include_trailing: false,
                max_trailing_bytes: 16,
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: InspectConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.io, config.io);
        assert_eq!(back.diagnostics, config.diagnostics);
    }
}
