use crate::error::{GridError, Result};
use crate::grammar::{CELL_HEADER, MARKER, SHEET_HEADER};
use tracing::debug;

/// One decoded cell edit: a content block addressed to a sheet and coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub sheet: String,
    pub coordinate: String,
    pub value: String,
}

/// Line-driven decoder over a text document.
///
/// Sheet and cell headers set the decoding context; each completed content
/// block is emitted as a [`Record`] against that context. Records come out
/// lazily in document order; the first malformed construct ends the stream
/// with an error, after which the iterator is exhausted.
#[derive(Debug)]
pub struct Decoder<'a> {
    lines: std::str::Lines<'a>,
    line_no: usize,
    sheet: Option<String>,
    coordinate: Option<String>,
    buffer: String,
    in_block: bool,
    failed: bool,
}

impl<'a> Decoder<'a> {
    /// Create a decoder over the full text of a document
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Decoder {
            lines: text.lines(),
            line_no: 0,
            sheet: None,
            coordinate: None,
            buffer: String::new(),
            in_block: false,
            failed: false,
        }
    }

    fn fail(&mut self, message: &str) -> Result<Record> {
        self.failed = true;
        Err(GridError::Parse {
            line: self.line_no,
            message: message.to_string(),
        })
    }

    /// Finalize the buffered block against the current context
    fn emit(&mut self, value: String) -> Result<Record> {
        let Some(sheet) = self.sheet.clone() else {
            return self.fail("content block with no active sheet");
        };
        let Some(coordinate) = self.coordinate.clone() else {
            return self.fail("content block with no active coordinate");
        };
        debug!(sheet = %sheet, coordinate = %coordinate, "decoded block");
        Ok(Record {
            sheet,
            coordinate,
            value,
        })
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while let Some(line) = self.lines.next() {
            self.line_no += 1;

            // Headers take precedence over block state
            if let Some(name) = line.strip_prefix(SHEET_HEADER) {
                debug!(sheet = name, "sheet header");
                self.sheet = Some(name.to_string());
                continue;
            }
            if let Some(coordinate) = line.strip_prefix(CELL_HEADER) {
                debug!(coordinate, "cell header");
                self.coordinate = Some(coordinate.to_string());
                continue;
            }

            let rest = if self.in_block {
                line
            } else if let Some(opened) = line.strip_prefix(MARKER) {
                self.buffer.clear();
                self.in_block = true;
                opened
            } else {
                // Formatting whitespace between blocks
                continue;
            };

            // A block closes on the line that ends with the marker, which may
            // be the very line that opened it
            if let Some(content) = rest.strip_suffix(MARKER) {
                self.in_block = false;
                self.buffer.push_str(content);
                let value = std::mem::take(&mut self.buffer);
                return Some(self.emit(value));
            }

            self.buffer.push_str(rest);
            self.buffer.push('\n');
        }

        if self.in_block {
            return Some(self.fail("content block still open at end of input"));
        }
        None
    }
}

/// Decode a whole document eagerly
pub fn decode_str(text: &str) -> Result<Vec<Record>> {
    Decoder::new(text).collect()
}
