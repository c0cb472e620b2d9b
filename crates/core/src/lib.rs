//! Grid model and text-document codec for sheetdown
//!
//! sheetdown turns the non-empty cells of a spreadsheet into a flat,
//! human-editable text document, and applies edits made to that document
//! back onto the spreadsheet, writing only the cells whose content actually
//! changed.
//!
//! # Format
//!
//! ```text
//! #  Sheet1
//!
//! ## A1
//!
//! '''Hello'''
//! ```
//!
//! `#  ` names the active sheet, `## ` the active cell, and `'''` delimits
//! the cell content, which may span several lines.
//!
//! # Examples
//!
//! ## Round-tripping a grid
//!
//! ```
//! use sheetdown_core::{encode, import_str, Book, Sheet};
//!
//! let mut book = Book::new();
//! book.add_sheet("Sheet1", Sheet::from_rows(vec![vec!["Hello"]])).unwrap();
//!
//! let text = encode(&book, None).unwrap();
//! assert!(text.contains("'''Hello'''"));
//!
//! // Re-importing an unmodified export is a no-op
//! let report = import_str(&mut book, &text).unwrap();
//! assert_eq!(report.updated, 0);
//!
//! // Editing a block updates exactly that cell
//! let edited = text.replace("'''Hello'''", "'''Hello World'''");
//! let report = import_str(&mut book, &edited).unwrap();
//! assert_eq!(report.updated, 1);
//! ```
//!
//! ## Decoding lazily
//!
//! ```
//! use sheetdown_core::Decoder;
//!
//! let text = "#  Sheet1\n## A1\n'''one'''\n## B2\n'''two'''\n";
//! for record in Decoder::new(text) {
//!     let record = record.unwrap();
//!     println!("{} {} = {:?}", record.sheet, record.coordinate, record.value);
//! }
//! ```
//!
//! ## Working with xlsx files
//!
//! ```no_run
//! use sheetdown_core::{encode, Book};
//!
//! let book = Book::from_xlsx("report.xlsx").unwrap();
//! let text = encode(&book, Some("Summary")).unwrap();
//! ```

mod address;
mod apply;
mod book;
mod decode;
mod encode;
mod error;
mod grammar;
mod sheet;
mod source;
mod xlsx;

/// Re-export coordinate helpers.
pub use address::{column_letters, coordinate, parse_coordinate};
/// Re-export the applier and its report types.
pub use apply::{apply, import_str, CellFailure, ImportReport};
/// Re-export the book type.
pub use book::Book;
/// Re-export the decoder types.
pub use decode::{decode_str, Decoder, Record};
/// Re-export the encoder.
pub use encode::encode;
/// Re-export the error types.
pub use error::{GridError, Result};
/// Re-export the line grammar tokens.
pub use grammar::{CELL_HEADER, MARKER, SHEET_HEADER};
/// Re-export the sheet type.
pub use sheet::Sheet;
/// Re-export the grid capability surface.
pub use source::GridSource;
