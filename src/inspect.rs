//! Top-level inspection pipeline.
//!
//! Ties the boundary interfaces together: bytes in (directly or through
//! the bounded file reader), annotated listing out. The walk itself is a
//! plain sequential scan with no I/O interleaved.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::InspectConfig;
use crate::error::Result;
use crate::io::SafeReader;
use crate::walker::{Diagnostic, SectionWalker};

/// Outcome of one inspection run.
///
/// The listing text is always present; on failure it is partial and
/// diagnostic only, with the fault described by `failure`.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub report: String,
    pub failure: Option<Diagnostic>,
}

impl Inspection {
    /// True when the walk reached clean end of input.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Decodes one in-memory module image. Never panics; structural faults
/// surface through [`Inspection::failure`].
pub fn inspect_bytes(bytes: &[u8], config: &InspectConfig) -> Inspection {
    let span = tracing::info_span!("inspect", size_bytes = bytes.len());
    let _g = span.enter();
    debug!(phase = "walk", "decoding sections");
    let walker = SectionWalker::with_config(bytes, config.diagnostics.clone());
    let (report, failure) = walker.walk();
    match &failure {
        None => info!("walk terminated cleanly"),
        Some(diag) => warn!(kind = ?diag.kind, remaining = diag.remaining, "walk failed"),
    }
    Inspection { report, failure }
}

/// Reads a module file through the bounded reader and decodes it.
pub fn inspect_file<P: AsRef<Path>>(path: P, config: &InspectConfig) -> Result<Inspection> {
    let path = path.as_ref();
    let mut reader = SafeReader::open(path, config.io.clone())?;
    let data = reader.read_all()?;
    info!(path = %path.display(), size_bytes = data.len(), "inspecting module file");
    Ok(inspect_bytes(&data, config))
}

/// Writes the listing text to `path`. Consumers treat the report opaquely.
pub fn write_report<P: AsRef<Path>>(path: P, inspection: &Inspection) -> Result<()> {
    fs::write(path.as_ref(), inspection.report.as_bytes())?;
    Ok(())
}
