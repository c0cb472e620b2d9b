use crate::address::coordinate;
use crate::error::Result;
use crate::grammar::{CELL_HEADER, MARKER, SHEET_HEADER};
use crate::source::GridSource;
use tracing::{debug, info};

/// Encode the non-empty cells of `source` as a text document.
///
/// Sheets appear in container order; `filter` restricts output to the named
/// sheet. Cells are walked row-major and each non-empty cell becomes one cell
/// header plus one marker-delimited content block. The whole document is
/// built in memory before the caller writes it anywhere, so a failed read
/// never leaves partial output behind.
pub fn encode<S: GridSource>(source: &S, filter: Option<&str>) -> Result<String> {
    let mut out = String::new();
    let mut cells = 0usize;

    for sheet in source.list_sheets() {
        if filter.is_some_and(|wanted| wanted != sheet) {
            debug!(sheet = %sheet, "skipped by sheet filter");
            continue;
        }
        info!(sheet = %sheet, "encoding sheet");

        out.push_str(SHEET_HEADER);
        out.push_str(&sheet);
        out.push_str("\n\n");

        let grid = source.read_grid(&sheet)?;
        for (row, cols) in grid.iter().enumerate() {
            for (col, value) in cols.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                out.push_str(CELL_HEADER);
                out.push_str(&coordinate(row, col));
                out.push_str("\n\n");
                // Multi-line content embeds its newlines verbatim between the
                // markers; no escaping, so a value containing the marker
                // itself will not round-trip
                out.push_str(MARKER);
                out.push_str(value);
                out.push_str(MARKER);
                out.push_str("\n\n");
                cells += 1;
            }
        }
    }

    info!(cells, "encoded document");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Book;
    use crate::sheet::Sheet;

    fn book_with(rows: Vec<Vec<&str>>) -> Book {
        let mut book = Book::new();
        book.add_sheet("Sheet1", Sheet::from_rows(rows)).unwrap();
        book
    }

    #[test]
    fn test_single_cell_document() {
        let book = book_with(vec![vec!["Hello"]]);
        let text = encode(&book, None).unwrap();
        assert_eq!(text, "#  Sheet1\n\n## A1\n\n'''Hello'''\n\n");
    }

    #[test]
    fn test_empty_cells_skipped() {
        let book = book_with(vec![vec!["a", "", "c"], vec!["", "", ""]]);
        let text = encode(&book, None).unwrap();
        assert!(text.contains("## A1"));
        assert!(text.contains("## C1"));
        assert!(!text.contains("## B1"));
        assert!(!text.contains("## A2"));
    }

    #[test]
    fn test_row_major_order() {
        let book = book_with(vec![vec!["r1c1", "r1c2"], vec!["r2c1"]]);
        let text = encode(&book, None).unwrap();
        let a1 = text.find("## A1").unwrap();
        let b1 = text.find("## B1").unwrap();
        let a2 = text.find("## A2").unwrap();
        assert!(a1 < b1 && b1 < a2);
    }

    #[test]
    fn test_multi_line_value() {
        let book = book_with(vec![vec!["line one\nline two"]]);
        let text = encode(&book, None).unwrap();
        assert!(text.contains("'''line one\nline two'''"));
    }

    #[test]
    fn test_sheet_filter() {
        let mut book = Book::new();
        book.add_sheet("Keep", Sheet::from_rows(vec![vec!["x"]]))
            .unwrap();
        book.add_sheet("Drop", Sheet::from_rows(vec![vec!["y"]]))
            .unwrap();

        let text = encode(&book, Some("Keep")).unwrap();
        assert!(text.contains("#  Keep"));
        assert!(!text.contains("#  Drop"));
        assert!(!text.contains("'''y'''"));
    }

    #[test]
    fn test_empty_sheet_still_gets_header() {
        let book = book_with(vec![]);
        let text = encode(&book, None).unwrap();
        assert_eq!(text, "#  Sheet1\n\n");
    }

    #[test]
    fn test_sheets_in_container_order() {
        let mut book = Book::new();
        book.add_sheet("Zed", Sheet::from_rows(vec![vec!["1"]]))
            .unwrap();
        book.add_sheet("Alpha", Sheet::from_rows(vec![vec!["2"]]))
            .unwrap();

        let text = encode(&book, None).unwrap();
        assert!(text.find("#  Zed").unwrap() < text.find("#  Alpha").unwrap());
    }
}
