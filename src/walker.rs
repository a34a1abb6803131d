//! The section walker: a sequential state machine over the module image.
//!
//! `AwaitingHeader -> AwaitingSection -> (AwaitingSection | Terminated |
//! Failed)`. `Terminated` is the sole success path (cursor exhausted at a
//! section-id boundary); `Failed` carries a [`Diagnostic`] and preserves
//! whatever listing text was accumulated before the fault.
//!
//! Length and count fields are read as single fixed-width bytes. Real
//! modules encode both as LEB128; this walker deliberately keeps the
//! one-byte simplification and will stop on images where it does not hold.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::DiagnosticsConfig;
use crate::cursor::Cursor;
use crate::emit::Emitter;
use crate::section::SectionKind;

/// Size of the module header: 4-byte magic plus 4-byte version.
pub const HEADER_LEN: usize = 8;

/// Magic bytes (`\0asm`); consumed but not validated.
pub const MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6d];

/// Version field of the supported format; consumed but not validated.
pub const VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

/// Structural faults that terminate a walk.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalkError {
    #[error("truncated header: {got} of 8 bytes present")]
    TruncatedHeader { got: usize },

    #[error("section 0x{id:02x}: input ended before the length byte")]
    TruncatedSectionLength { id: u8 },

    #[error("section 0x{id:02x}: payload truncated ({got} of {expected} bytes)")]
    TruncatedPayload {
        id: u8,
        expected: usize,
        got: usize,
    },

    #[error("unknown section id 0x{id:02x} with {remaining} bytes unconsumed")]
    UnknownSectionId { id: u8, remaining: usize },
}

/// Classifies a [`Diagnostic`] by the fault that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultKind {
    TruncatedHeader,
    TruncatedSectionLength,
    TruncatedPayload,
    UnknownSectionId,
}

/// Operator-facing failure payload.
///
/// Intended for console or log output; there is no programmatic recovery
/// and no resumption after a failed walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: FaultKind,
    /// Human-readable description of the fault.
    pub message: String,
    /// The byte the walk stopped at, when one was read.
    pub offending: Option<u8>,
    /// Bytes left unconsumed, counting the offending byte itself.
    pub remaining: usize,
    /// Hex rendering of the unconsumed tail, when enabled by config.
    pub trailing_hex: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingHeader,
    AwaitingSection,
    Terminated,
    Failed,
}

enum Step {
    Section(SectionKind),
    EndOfInput,
}

/// Drives one decode run over one module image.
///
/// Created at walk start, consumed by [`SectionWalker::walk`]; a fresh
/// walker (and cursor) is needed for every run.
pub struct SectionWalker<'a> {
    cursor: Cursor<'a>,
    emitter: Emitter,
    state: State,
    diagnostics: DiagnosticsConfig,
}

impl<'a> SectionWalker<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_config(bytes, DiagnosticsConfig::default())
    }

    pub fn with_config(bytes: &'a [u8], diagnostics: DiagnosticsConfig) -> Self {
        Self {
            cursor: Cursor::new(bytes),
            emitter: Emitter::new(),
            state: State::AwaitingHeader,
            diagnostics,
        }
    }

    /// Runs the walk to a terminal state.
    ///
    /// Returns the listing text accumulated up to that point together
    /// with the failure diagnostic, when the terminal state is `Failed`.
    pub fn walk(mut self) -> (String, Option<Diagnostic>) {
        let mut failure = None;
        loop {
            match self.state {
                State::AwaitingHeader => match self.read_header() {
                    Ok(()) => self.state = State::AwaitingSection,
                    Err(err) => {
                        failure = Some(self.diagnose(err));
                        self.state = State::Failed;
                    }
                },
                State::AwaitingSection => match self.read_section() {
                    Ok(Step::Section(kind)) => {
                        trace!(section = kind.name(), "section decoded");
                    }
                    Ok(Step::EndOfInput) => {
                        debug!(consumed = self.cursor.position(), "clean end of input");
                        self.state = State::Terminated;
                    }
                    Err(err) => {
                        warn!(error = %err, "walk failed");
                        failure = Some(self.diagnose(err));
                        self.state = State::Failed;
                    }
                },
                State::Terminated | State::Failed => break,
            }
        }
        (self.emitter.into_report(), failure)
    }

    /// Consumes the 8 header bytes unconditionally, emitting them under a
    /// `Header` label. The header is mandatory; a short read is fatal.
    fn read_header(&mut self) -> Result<(), WalkError> {
        self.emitter.label("Header");
        let mut got = 0;
        while got < HEADER_LEN {
            match self.cursor.next() {
                Some(byte) => {
                    self.emitter.byte(byte);
                    got += 1;
                }
                None => return Err(WalkError::TruncatedHeader { got }),
            }
        }
        self.emitter.end_block();
        Ok(())
    }

    /// One iteration of the section loop.
    ///
    /// Exhaustion at the id read is the clean termination condition; any
    /// later exhaustion means a partially read descriptor and is fatal.
    fn read_section(&mut self) -> Result<Step, WalkError> {
        let id = match self.cursor.next() {
            Some(id) => id,
            None => return Ok(Step::EndOfInput),
        };
        let kind = SectionKind::from_id(id).ok_or(WalkError::UnknownSectionId {
            id,
            // The offending byte counts as unconsumed: the walk stopped at it.
            remaining: self.cursor.remaining() + 1,
        })?;

        self.emitter.label(&format!("---- {} ----", kind.name()));
        self.emitter.byte(id);

        let length = self
            .cursor
            .next()
            .ok_or(WalkError::TruncatedSectionLength { id })?;
        self.emitter.byte(length);

        let declared = length as usize;
        let mut got = 0;

        // The Type section's declared length covers a leading entry-count
        // byte plus the entries, so the count is pulled out and labeled
        // before the generic payload loop runs over the rest.
        if kind == SectionKind::Type && declared > 0 {
            self.emitter.label("Count");
            match self.cursor.next() {
                Some(count) => {
                    self.emitter.byte(count);
                    got += 1;
                }
                None => {
                    return Err(WalkError::TruncatedPayload {
                        id,
                        expected: declared,
                        got,
                    })
                }
            }
        }

        while got < declared {
            match self.cursor.next() {
                Some(byte) => {
                    self.emitter.byte(byte);
                    got += 1;
                }
                None => {
                    return Err(WalkError::TruncatedPayload {
                        id,
                        expected: declared,
                        got,
                    })
                }
            }
        }

        self.emitter.end_block();
        Ok(Step::Section(kind))
    }

    fn diagnose(&self, err: WalkError) -> Diagnostic {
        let message = err.to_string();
        let (kind, offending, mut tail) = match &err {
            WalkError::TruncatedHeader { .. } => (FaultKind::TruncatedHeader, None, Vec::new()),
            WalkError::TruncatedSectionLength { id } => {
                (FaultKind::TruncatedSectionLength, Some(*id), Vec::new())
            }
            WalkError::TruncatedPayload { id, .. } => {
                (FaultKind::TruncatedPayload, Some(*id), Vec::new())
            }
            // The id byte was already consumed by the cursor; put it back
            // in front of the tail so the dump starts at the stop point.
            WalkError::UnknownSectionId { id, .. } => {
                (FaultKind::UnknownSectionId, Some(*id), vec![*id])
            }
        };
        tail.extend_from_slice(self.cursor.rest());
        let remaining = tail.len();
        let trailing_hex = if self.diagnostics.include_trailing && !tail.is_empty() {
            let capped = &tail[..tail.len().min(self.diagnostics.max_trailing_bytes)];
            Some(hex::encode(capped))
        } else {
            None
        };
        Diagnostic {
            kind,
            message,
            offending,
            remaining,
            trailing_hex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(sections: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&VERSION);
        bytes.extend_from_slice(sections);
        bytes
    }

    #[test]
    fn header_consumes_exactly_eight_bytes() {
        let bytes = module(&[0x03, 0x00]);
        let mut walker = SectionWalker::new(&bytes);
        walker.read_header().unwrap();
        assert_eq!(walker.cursor.position(), HEADER_LEN);
    }

    #[test]
    fn generic_section_consumes_two_plus_length_bytes() {
        // Export section, length 4
        let bytes = module(&[0x07, 0x04, 0xaa, 0xbb, 0xcc, 0xdd]);
        let mut walker = SectionWalker::new(&bytes);
        walker.read_header().unwrap();
        let before = walker.cursor.position();
        assert!(matches!(
            walker.read_section(),
            Ok(Step::Section(SectionKind::Export))
        ));
        assert_eq!(walker.cursor.position() - before, 2 + 4);
        assert_eq!(walker.cursor.remaining(), 0);
    }

    #[test]
    fn type_section_consumes_two_plus_length_bytes() {
        // Type section: length 3 = count byte + 2 entry bytes
        let bytes = module(&[0x01, 0x03, 0x01, 0x60, 0x00]);
        let mut walker = SectionWalker::new(&bytes);
        walker.read_header().unwrap();
        let before = walker.cursor.position();
        assert!(matches!(
            walker.read_section(),
            Ok(Step::Section(SectionKind::Type))
        ));
        assert_eq!(walker.cursor.position() - before, 2 + 3);
    }

    #[test]
    fn type_section_with_zero_length_reads_no_count_byte() {
        let bytes = module(&[0x01, 0x00]);
        let mut walker = SectionWalker::new(&bytes);
        walker.read_header().unwrap();
        assert!(matches!(
            walker.read_section(),
            Ok(Step::Section(SectionKind::Type))
        ));
        assert_eq!(walker.cursor.remaining(), 0);
    }

    #[test]
    fn missing_length_byte_is_fatal() {
        let bytes = module(&[0x05]);
        let (_, failure) = SectionWalker::new(&bytes).walk();
        let diag = failure.unwrap();
        assert_eq!(diag.kind, FaultKind::TruncatedSectionLength);
        assert_eq!(diag.offending, Some(0x05));
        assert_eq!(diag.remaining, 0);
    }

    #[test]
    fn unknown_id_diagnostic_counts_the_offending_byte() {
        let bytes = module(&[0x0d, 0x99, 0x98]);
        let (_, failure) = SectionWalker::new(&bytes).walk();
        let diag = failure.unwrap();
        assert_eq!(diag.kind, FaultKind::UnknownSectionId);
        assert_eq!(diag.offending, Some(0x0d));
        assert_eq!(diag.remaining, 3);
        assert_eq!(diag.trailing_hex.as_deref(), Some("0d9998"));
    }

    #[test]
    fn empty_tail_produces_no_trailing_dump() {
        let (_, failure) = SectionWalker::new(&[]).walk();
        let diag = failure.unwrap();
        assert_eq!(diag.kind, FaultKind::TruncatedHeader);
        assert_eq!(diag.remaining, 0);
        assert_eq!(diag.trailing_hex, None);
    }

    #[test]
    fn trailing_dump_honors_config() {
        let bytes = module(&[0x0d, 0x99, 0x98]);
        let config = DiagnosticsConfig {
            include_trailing: false,
            ..DiagnosticsConfig::default()
        };
        let (_, failure) = SectionWalker::with_config(&bytes, config).walk();
        assert_eq!(failure.unwrap().trailing_hex, None);
    }

    #[test]
    fn failed_walk_keeps_partial_listing() {
        let bytes = module(&[0x05, 0x02, 0xaa]);
        let (report, failure) = SectionWalker::new(&bytes).walk();
        let diag = failure.unwrap();
        assert_eq!(diag.kind, FaultKind::TruncatedPayload);
        assert!(report.contains("---- Memory ----"));
        assert!(report.ends_with("05 02 aa "));
    }
}
