use crate::memory::ArenaSpan;

use super::ValueKind;

/// One stored SQL value.
///
/// A cell points into its table's arenas: the raw payload lives in the
/// binary arena (integers, floats and blobs only) and the display string in
/// the string arena (every kind). Both are written when the cell is created
/// and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    kind: ValueKind,
    raw: Option<ArenaSpan>,
    text: ArenaSpan,
}

impl Cell {
    pub(crate) fn new(kind: ValueKind, raw: Option<ArenaSpan>, text: ArenaSpan) -> Self {
        Self { kind, raw, text }
    }

    /// Returns the kind of the stored value.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_null(&self) -> bool {
        self.kind == ValueKind::Null
    }

    /// Location of the raw payload in the binary arena.
    pub fn raw_span(&self) -> Option<ArenaSpan> {
        self.raw
    }

    /// Location of the display string in the string arena.
    pub fn text_span(&self) -> ArenaSpan {
        self.text
    }

    /// Size of the raw payload in bytes, zero when there is none.
    pub fn raw_size(&self) -> usize {
        self.raw.map_or(0, |span| span.len())
    }

    /// Size of the display string in bytes, terminator excluded.
    pub fn str_size(&self) -> usize {
        self.text.len()
    }
}
