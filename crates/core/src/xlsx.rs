use crate::book::Book;
use crate::error::{GridError, Result};
use crate::sheet::Sheet;
use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use rust_xlsxwriter::Workbook;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Map a spreadsheet library error into the crate's IO variant
fn io_err<E: ToString>(error: E) -> GridError {
    GridError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        error.to_string(),
    ))
}

/// Convert a calamine cell to its text form; empty means "absent"
fn data_to_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::Bool(b) => b.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::String(s) => s.clone(),
        // Excel stores dates as day counts since 1899-12-30
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERROR: {e:?}"),
    }
}

impl Book {
    /// Load a book from an Excel file (all sheets, cell text only)
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or a sheet cannot be read.
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut workbook: Xlsx<BufReader<File>> =
            open_workbook(path.as_ref()).map_err(|e: XlsxError| io_err(e))?;

        let sheet_names = workbook.sheet_names().to_vec();
        let mut book = Book::new();

        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e: XlsxError| io_err(e))?;

            // The range is anchored at its first used cell, not at A1
            let (row_off, col_off) = range
                .start()
                .map_or((0, 0), |(r, c)| (r as usize, c as usize));

            let mut sheet = Sheet::with_name(&sheet_name);
            for (row, cols) in range.rows().enumerate() {
                for (col, data) in cols.iter().enumerate() {
                    let text = data_to_text(data);
                    if !text.is_empty() {
                        sheet.set_value(row_off + row, col_off + col, &text);
                    }
                }
            }

            book.add_sheet(&sheet_name, sheet)?;
        }

        Ok(book)
    }

    /// Save the book to an Excel file
    ///
    /// Every non-empty cell is written as text.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();

        for (name, sheet) in self.sheets() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(name).map_err(io_err)?;

            for (row, col, value) in sheet.cells() {
                let row = u32::try_from(row).map_err(|_| io_err("row index overflow"))?;
                let col = u16::try_from(col).map_err(|_| io_err("column index overflow"))?;
                worksheet.write_string(row, col, value).map_err(io_err)?;
            }
        }

        workbook.save(path.as_ref()).map_err(io_err)?;
        Ok(())
    }
}
