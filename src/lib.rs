//! Annotated hex listings for WebAssembly binary modules.
//!
//! The crate walks a module image (8-byte header followed by tagged,
//! length-prefixed sections) with an explicit cursor and state machine,
//! resolving section ids to display names and rendering every consumed
//! byte as lowercase hex. Malformed or truncated structure stops the
//! walk with an operator-facing [`walker::Diagnostic`].

/// Run configuration (I/O limits, diagnostics rendering)
pub mod config;
/// Byte cursor over the in-memory module image
pub mod cursor;
/// Hex and label rendering for the listing
pub mod emit;
/// Crate-wide error types
pub mod error;
/// Top-level inspection pipeline
pub mod inspect;
/// Bounded, memory-mapped file reading
pub mod io;
/// Tracing subscriber setup
pub mod logging;
/// Section id table for the binary format
pub mod section;
/// The section walker state machine
pub mod walker;

pub use config::InspectConfig;
pub use error::{InspectError, Result};
pub use inspect::{inspect_bytes, inspect_file, write_report, Inspection};
pub use section::SectionKind;
pub use walker::{Diagnostic, FaultKind, SectionWalker, WalkError};
