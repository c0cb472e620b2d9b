use crate::address::parse_coordinate;
use crate::book::Book;
use crate::error::Result;
use std::path::Path;

/// Capability surface over a spreadsheet container.
///
/// The encoder, decoder, and applier only ever see this trait; the concrete
/// backing (an in-memory [`Book`], a workbook loaded from disk) stays behind
/// it, so the codec can be exercised without touching the filesystem.
pub trait GridSource {
    /// Sheet names in container order.
    fn list_sheets(&self) -> Vec<String>;

    /// Row-major cell text of one sheet; an empty string is an empty cell.
    fn read_grid(&self, sheet: &str) -> Result<Vec<Vec<String>>>;

    /// Current text of one cell; "" when the cell is absent.
    fn cell_value(&self, sheet: &str, coordinate: &str) -> Result<String>;

    /// Overwrite one cell, growing the grid when the target lies beyond it.
    fn set_cell_value(&mut self, sheet: &str, coordinate: &str, value: &str) -> Result<()>;

    /// Persist the container to `path`.
    fn save(&self, path: &Path) -> Result<()>;
}

impl GridSource for Book {
    fn list_sheets(&self) -> Vec<String> {
        self.sheet_names().iter().map(ToString::to_string).collect()
    }

    fn read_grid(&self, sheet: &str) -> Result<Vec<Vec<String>>> {
        Ok(self.get_sheet(sheet)?.rows().to_vec())
    }

    fn cell_value(&self, sheet: &str, coordinate: &str) -> Result<String> {
        let (row, col) = parse_coordinate(coordinate)?;
        Ok(self.get_sheet(sheet)?.value(row, col).to_string())
    }

    fn set_cell_value(&mut self, sheet: &str, coordinate: &str, value: &str) -> Result<()> {
        let (row, col) = parse_coordinate(coordinate)?;
        self.get_sheet_mut(sheet)?.set_value(row, col, value);
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        self.save_as_xlsx(path)
    }
}
