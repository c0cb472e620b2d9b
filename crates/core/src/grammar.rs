//! Line grammar of the text document.
//!
//! ```text
//! sheet header   ::= "#  " <sheet-name>
//! cell header    ::= "## " <coordinate>
//! block open     ::= "'''" <line-remainder>
//! block close    ::= <line-remainder> "'''"
//! ```
//!
//! Blank lines between blocks are cosmetic. Cell content containing the
//! literal block marker is not representable; no escaping is performed.

/// Prefix of a sheet header line.
pub const SHEET_HEADER: &str = "#  ";

/// Prefix of a cell header line.
pub const CELL_HEADER: &str = "## ";

/// Delimiter opening and closing a content block.
pub const MARKER: &str = "'''";
