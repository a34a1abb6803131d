//! Section id table for the WebAssembly binary format.
//!
//! Ids 0 through 12 map to fixed display names; everything else resolves
//! to `"unknown"`. The table is static and immutable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The thirteen known section ids of the binary format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Custom,
    Type,
    Import,
    Function,
    Table,
    Memory,
    Global,
    Export,
    Start,
    Element,
    Code,
    Data,
    DataCount,
}

impl SectionKind {
    /// Resolves a raw id byte; `None` for ids outside 0-12.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Custom),
            1 => Some(Self::Type),
            2 => Some(Self::Import),
            3 => Some(Self::Function),
            4 => Some(Self::Table),
            5 => Some(Self::Memory),
            6 => Some(Self::Global),
            7 => Some(Self::Export),
            8 => Some(Self::Start),
            9 => Some(Self::Element),
            10 => Some(Self::Code),
            11 => Some(Self::Data),
            12 => Some(Self::DataCount),
            _ => None,
        }
    }

    /// The numeric id this kind is encoded as.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Display name used in listing headers.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Custom => "Custom",
            Self::Type => "Type",
            Self::Import => "Import",
            Self::Function => "Function",
            Self::Table => "Table",
            Self::Memory => "Memory",
            Self::Global => "Global",
            Self::Export => "Export",
            Self::Start => "Start",
            Self::Element => "Element",
            Self::Code => "Code",
            Self::Data => "Data",
            Self::DataCount => "Data Count",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Total resolver over all id bytes: unknown ids map to `"unknown"`.
pub fn name_for(id: u8) -> &'static str {
    SectionKind::from_id(id).map_or("unknown", SectionKind::name)
}
