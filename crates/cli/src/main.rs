//! # sheetdown-cli
//!
//! Command-line interface for converting spreadsheet cells to an editable
//! text document and applying the edited document back.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use sheetdown_core::{encode, import_str, Book, GridSource};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// sheetdown - edit spreadsheet cells as plain text
#[derive(Parser)]
#[command(name = "sheetdown")]
#[command(author, version, about = "Convert spreadsheet cells to editable text and back", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Write a workbook's non-empty cells to a text document
    Export {
        /// Workbook to read (.xlsx)
        workbook: PathBuf,

        /// Output document (defaults to the workbook path with ".md" appended)
        output: Option<PathBuf>,

        /// Only export the named sheet
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Apply an edited text document back onto a workbook
    Import {
        /// Edited text document
        document: PathBuf,

        /// Workbook to update (defaults to the document path with ".md" stripped)
        workbook: Option<PathBuf>,

        /// Where to save the updated workbook (defaults to "new_<workbook>")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    let start = Instant::now();
    match cli.command {
        Command::Export {
            workbook,
            output,
            sheet,
        } => run_export(&workbook, output, sheet.as_deref())?,
        Command::Import {
            document,
            workbook,
            output,
        } => run_import(&document, workbook, output)?,
    }
    info!(elapsed = ?start.elapsed(), "done");

    Ok(())
}

/// Export a workbook to a text document.
fn run_export(workbook: &Path, output: Option<PathBuf>, sheet: Option<&str>) -> Result<()> {
    let output = output.unwrap_or_else(|| default_document_path(workbook));
    println!("converting: {} -> {}", workbook.display(), output.display());

    let book = Book::from_xlsx(workbook)
        .with_context(|| format!("failed to open workbook {}", workbook.display()))?;

    if let Some(name) = sheet {
        if !book.has_sheet(name) {
            bail!("workbook has no sheet named '{name}'");
        }
    }

    let text = encode(&book, sheet).context("failed to read workbook cells")?;
    std::fs::write(&output, text)
        .with_context(|| format!("failed to write document {}", output.display()))?;

    Ok(())
}

/// Import a text document back onto a workbook, saving the result separately.
fn run_import(document: &Path, workbook: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let workbook = match workbook {
        Some(path) => path,
        None => default_workbook_path(document)?,
    };
    let output = output.unwrap_or_else(|| default_save_path(&workbook));
    println!("updating: {} -> {}", workbook.display(), output.display());

    let mut book = Book::from_xlsx(&workbook)
        .with_context(|| format!("failed to open workbook {}", workbook.display()))?;
    let text = std::fs::read_to_string(document)
        .with_context(|| format!("failed to read document {}", document.display()))?;

    let report = import_str(&mut book, &text)
        .with_context(|| format!("failed to parse document {}", document.display()))?;

    for failure in &report.failures {
        eprintln!(
            "{} {}:{}: {}",
            "cell error:".red().bold(),
            failure.sheet,
            failure.coordinate,
            failure.error
        );
    }

    book.save(&output)
        .with_context(|| format!("failed to save workbook {}", output.display()))?;

    if report.failures.is_empty() {
        println!("cells updated: {}", report.updated);
    } else {
        println!(
            "cells updated: {} ({} {})",
            report.updated,
            report.failures.len(),
            "failed".red()
        );
    }

    Ok(())
}

/// Default export target: the workbook path with ".md" appended.
fn default_document_path(workbook: &Path) -> PathBuf {
    let mut path = workbook.as_os_str().to_os_string();
    path.push(".md");
    PathBuf::from(path)
}

/// Default import source: the document path with a trailing ".md" stripped.
fn default_workbook_path(document: &Path) -> Result<PathBuf> {
    let name = document.to_string_lossy();
    match name.strip_suffix(".md") {
        Some(stem) if !stem.is_empty() => Ok(PathBuf::from(stem)),
        _ => bail!(
            "cannot derive a workbook path from {}; pass one explicitly",
            document.display()
        ),
    }
}

/// Default save target: "new_" prepended to the workbook file name, so the
/// input workbook is never overwritten.
fn default_save_path(workbook: &Path) -> PathBuf {
    let file_name = workbook
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    workbook.with_file_name(format!("new_{file_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetdown_core::Sheet;
    use tempfile::tempdir;

    // ========================================================================
    // CLI argument parsing tests
    // ========================================================================

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["sheetdown", "export", "book.xlsx"]);
        match cli.command {
            Command::Export {
                workbook,
                output,
                sheet,
            } => {
                assert_eq!(workbook, PathBuf::from("book.xlsx"));
                assert!(output.is_none());
                assert!(sheet.is_none());
            }
            Command::Import { .. } => panic!("expected export"),
        }
    }

    #[test]
    fn test_cli_parse_export_with_sheet_filter() {
        let cli = Cli::parse_from(["sheetdown", "export", "book.xlsx", "out.md", "-s", "Data"]);
        match cli.command {
            Command::Export { output, sheet, .. } => {
                assert_eq!(output, Some(PathBuf::from("out.md")));
                assert_eq!(sheet.as_deref(), Some("Data"));
            }
            Command::Import { .. } => panic!("expected export"),
        }
    }

    #[test]
    fn test_cli_parse_import() {
        let cli = Cli::parse_from(["sheetdown", "import", "book.xlsx.md", "--output", "v2.xlsx"]);
        match cli.command {
            Command::Import {
                document,
                workbook,
                output,
            } => {
                assert_eq!(document, PathBuf::from("book.xlsx.md"));
                assert!(workbook.is_none());
                assert_eq!(output, Some(PathBuf::from("v2.xlsx")));
            }
            Command::Export { .. } => panic!("expected import"),
        }
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["sheetdown", "-v", "export", "book.xlsx"]);
        assert!(cli.verbose);
    }

    // ========================================================================
    // Path derivation tests
    // ========================================================================

    #[test]
    fn test_default_document_path() {
        assert_eq!(
            default_document_path(Path::new("report.xlsx")),
            PathBuf::from("report.xlsx.md")
        );
        assert_eq!(
            default_document_path(Path::new("dir/report.xlsx")),
            PathBuf::from("dir/report.xlsx.md")
        );
    }

    #[test]
    fn test_default_workbook_path() {
        assert_eq!(
            default_workbook_path(Path::new("report.xlsx.md")).unwrap(),
            PathBuf::from("report.xlsx")
        );
        assert!(default_workbook_path(Path::new("notes.txt")).is_err());
        assert!(default_workbook_path(Path::new(".md")).is_err());
    }

    #[test]
    fn test_default_save_path() {
        assert_eq!(
            default_save_path(Path::new("report.xlsx")),
            PathBuf::from("new_report.xlsx")
        );
        assert_eq!(
            default_save_path(Path::new("dir/report.xlsx")),
            PathBuf::from("dir/new_report.xlsx")
        );
    }

    // ========================================================================
    // End-to-end export/import through temp files
    // ========================================================================

    #[test]
    fn test_export_then_import_applies_edit() {
        let dir = tempdir().unwrap();
        let workbook_path = dir.path().join("book.xlsx");
        let document_path = dir.path().join("book.xlsx.md");
        let updated_path = dir.path().join("new_book.xlsx");

        let mut book = Book::new();
        book.add_sheet("Sheet1", Sheet::from_rows(vec![vec!["Hello"]]))
            .unwrap();
        book.save(&workbook_path).unwrap();

        run_export(&workbook_path, Some(document_path.clone()), None).unwrap();

        let text = std::fs::read_to_string(&document_path).unwrap();
        assert!(text.contains("'''Hello'''"));

        let edited = text.replace("'''Hello'''", "'''Hello World'''");
        std::fs::write(&document_path, edited).unwrap();

        run_import(&document_path, None, None).unwrap();

        let updated = Book::from_xlsx(&updated_path).unwrap();
        assert_eq!(updated.get_sheet("Sheet1").unwrap().value(0, 0), "Hello World");
    }

    #[test]
    fn test_export_unknown_sheet_filter_fails() {
        let dir = tempdir().unwrap();
        let workbook_path = dir.path().join("book.xlsx");

        let mut book = Book::new();
        book.add_sheet("Sheet1", Sheet::from_rows(vec![vec!["x"]]))
            .unwrap();
        book.save(&workbook_path).unwrap();

        let result = run_export(&workbook_path, None, Some("Missing"));
        assert!(result.is_err());
    }

    #[test]
    fn test_import_parse_error_is_fatal_and_saves_nothing() {
        let dir = tempdir().unwrap();
        let workbook_path = dir.path().join("book.xlsx");
        let document_path = dir.path().join("book.xlsx.md");
        let updated_path = dir.path().join("new_book.xlsx");

        let mut book = Book::new();
        book.add_sheet("Sheet1", Sheet::from_rows(vec![vec!["x"]]))
            .unwrap();
        book.save(&workbook_path).unwrap();

        std::fs::write(&document_path, "'''orphan'''\n").unwrap();

        let result = run_import(&document_path, None, None);
        assert!(result.is_err());
        assert!(!updated_path.exists());
    }
}
