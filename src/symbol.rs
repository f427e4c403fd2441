//! Symbol kinds and records
//!
//! This module defines the kinds of linkable symbols the engine tracks and
//! the record form in which an external symbol source reports them. The kind
//! characters follow the `nm` convention: `U` (undefined reference), `C`
//! (common/weak data), `b`/`d` (local static data), `T`/`D` (strong text and
//! data definitions). Any other character is not a linkable symbol in this
//! model and is skipped by the source.

use std::fmt::{Display, Formatter};

/// Symbol names longer than this are truncated by the symbol source.
pub const MAX_NAME_LEN: usize = 30;

/// The linkage kind of one symbol record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// A reference with no definition supplied yet (`U`).
    Undefined,
    /// A tentative/uninitialized-data definition that yields to any strong
    /// definition of the same name (`C`).
    CommonWeak,
    /// A module-private definition, not visible for linking under its
    /// original name (`b`/`d`).
    LocalStatic,
    /// A strong function definition (`T`).
    StrongText,
    /// A strong initialized-data definition (`D`).
    StrongData,
}

impl SymbolKind {
    /// Maps an `nm` kind character onto a symbol kind.
    ///
    /// Returns `None` for characters that do not name a linkable symbol in
    /// this model (absolute symbols, read-only data, weak objects, ...).
    pub fn from_nm_char(c: char) -> Option<Self> {
        match c {
            'U' => Some(SymbolKind::Undefined),
            'C' => Some(SymbolKind::CommonWeak),
            'b' | 'd' => Some(SymbolKind::LocalStatic),
            'T' => Some(SymbolKind::StrongText),
            'D' => Some(SymbolKind::StrongData),
            _ => None,
        }
    }

    /// The canonical `nm` character for this kind.
    ///
    /// Both local-static characters collapse onto `b`; the distinction
    /// carries no weight once the symbol has been renamed.
    pub fn as_nm_char(&self) -> char {
        match self {
            SymbolKind::Undefined => 'U',
            SymbolKind::CommonWeak => 'C',
            SymbolKind::LocalStatic => 'b',
            SymbolKind::StrongText => 'T',
            SymbolKind::StrongData => 'D',
        }
    }

    /// Whether this kind is a strong definition (`T`/`D`).
    #[inline]
    pub fn is_strong(&self) -> bool {
        matches!(self, SymbolKind::StrongText | SymbolKind::StrongData)
    }

    /// Whether a record of this kind can satisfy an outstanding reference.
    #[inline]
    pub fn is_definition(&self) -> bool {
        self.is_strong() || matches!(self, SymbolKind::CommonWeak)
    }
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_nm_char())
    }
}

/// A named program entity tracked by the resolution engine.
///
/// A `Symbol` is owned by exactly one [`SymbolSet`](crate::SymbolSet) at a
/// time; its lifetime runs from insertion until removal, overwrite, or the
/// end of the resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The symbol name, unique within its set.
    pub name: String,
    /// The current linkage kind.
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Symbol {
            name: name.into(),
            kind,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.kind)
    }
}

/// One `(name, kind)` pair reported by a symbol source for a module, in the
/// module's emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    pub name: String,
    pub kind: SymbolKind,
}

impl SymbolRecord {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        SymbolRecord {
            name: name.into(),
            kind,
        }
    }
}
