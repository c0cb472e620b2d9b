use crate::decode::{Decoder, Record};
use crate::error::{GridError, Result};
use crate::source::GridSource;
use tracing::{info, warn};

/// One record the grid source rejected; the import keeps going past these.
#[derive(Debug)]
pub struct CellFailure {
    pub sheet: String,
    pub coordinate: String,
    pub error: GridError,
}

/// Outcome of applying a decoded document onto a grid source.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Records consumed from the document.
    pub processed: usize,
    /// Cells whose content actually changed.
    pub updated: usize,
    /// Per-record read/write failures.
    pub failures: Vec<CellFailure>,
}

/// Apply decoded records onto `source`, writing only cells whose content
/// differs from the record.
///
/// A record whose target cell cannot be read or written is recorded as a
/// failure and processing continues; a decode error aborts the whole import.
/// Re-applying an unchanged export is a no-op.
pub fn apply<S, I>(source: &mut S, records: I) -> Result<ImportReport>
where
    S: GridSource,
    I: IntoIterator<Item = Result<Record>>,
{
    let mut report = ImportReport::default();

    for record in records {
        let record = record?;
        report.processed += 1;

        let current = match source.cell_value(&record.sheet, &record.coordinate) {
            Ok(value) => value,
            Err(error) => {
                warn!(
                    sheet = %record.sheet,
                    coordinate = %record.coordinate,
                    %error,
                    "cell read failed"
                );
                report.failures.push(CellFailure {
                    sheet: record.sheet,
                    coordinate: record.coordinate,
                    error,
                });
                continue;
            }
        };

        if current == record.value {
            continue;
        }

        if let Err(error) = source.set_cell_value(&record.sheet, &record.coordinate, &record.value)
        {
            warn!(
                sheet = %record.sheet,
                coordinate = %record.coordinate,
                %error,
                "cell update failed"
            );
            report.failures.push(CellFailure {
                sheet: record.sheet,
                coordinate: record.coordinate,
                error,
            });
            continue;
        }

        report.updated += 1;
        info!(sheet = %record.sheet, coordinate = %record.coordinate, "cell updated");
    }

    Ok(report)
}

/// Decode `text` and apply it onto `source` in one pass.
pub fn import_str<S: GridSource>(source: &mut S, text: &str) -> Result<ImportReport> {
    apply(source, Decoder::new(text))
}
