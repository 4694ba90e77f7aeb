// Roster import from spreadsheets and delimited text files.
//
// The first row is a header and is skipped. Column 0 is the participant's
// name and column 1 their department; any further columns are ignored. Rows
// where either cell is blank after trimming are dropped. Workbooks are read
// from their first sheet.

use std::io::Read;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use thiserror::Error;
use tracing::{debug, info};

use crate::roster::participant::Participant;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported roster format `{extension}`: expected .xlsx, .xls, .ods, .csv or .tsv")]
    UnsupportedFormat { extension: String },

    #[error("could not parse {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("could not read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        source: calamine::Error,
    },

    #[error("no valid participants in {path}; expected name and department columns with at least one data row")]
    NoRecords { path: PathBuf },
}

/// Field separator for a delimited text roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    fn byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

/// How a roster file is read, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Workbook,
    Delimited(Delimiter),
}

impl RosterFormat {
    pub fn for_path(path: &Path) -> Result<Self, ImportError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(RosterFormat::Workbook),
            "csv" => Ok(RosterFormat::Delimited(Delimiter::Comma)),
            "tsv" | "tab" => Ok(RosterFormat::Delimited(Delimiter::Tab)),
            _ => Err(ImportError::UnsupportedFormat { extension }),
        }
    }
}

/// Read participants from the roster file at `path`.
///
/// Fails with `NoRecords` when nothing survives filtering, so callers can
/// reject the import and keep the current roster.
pub fn import_roster(path: &Path) -> Result<Vec<Participant>, ImportError> {
    let participants = match RosterFormat::for_path(path)? {
        RosterFormat::Workbook => read_workbook(path)?,
        RosterFormat::Delimited(delimiter) => {
            let file = std::fs::File::open(path).map_err(|e| ImportError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            parse_records(file, delimiter).map_err(|e| ImportError::Csv {
                path: path.to_path_buf(),
                source: e,
            })?
        }
    };

    if participants.is_empty() {
        return Err(ImportError::NoRecords {
            path: path.to_path_buf(),
        });
    }

    info!(
        "Imported {} participants from {}",
        participants.len(),
        path.display()
    );
    Ok(participants)
}

/// Read participant rows from the first sheet of a workbook. The result may
/// be empty.
pub fn read_workbook(path: &Path) -> Result<Vec<Participant>, ImportError> {
    let workbook_error = |source: calamine::Error| ImportError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(workbook_error)?,
        None => {
            debug!("Workbook {} has no sheets", path.display());
            return Ok(Vec::new());
        }
    };

    let participants = range
        .rows()
        .enumerate()
        .skip(1)
        .filter_map(|(idx, row)| {
            let name = cell_text(row.first());
            let department = cell_text(row.get(1));
            participant_from_cells(idx, &name, &department)
        })
        .collect();
    Ok(participants)
}

fn cell_text(cell: Option<&Data>) -> String {
    cell.map(|c| c.to_string()).unwrap_or_default()
}

/// Parse participant rows from any delimited reader. Blank or incomplete
/// rows are skipped; the result may be empty.
pub fn parse_records<R: Read>(rdr: R, delimiter: Delimiter) -> Result<Vec<Participant>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter.byte())
        .from_reader(rdr);

    let mut participants = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let name = record.get(0).unwrap_or_default();
        let department = record.get(1).unwrap_or_default();
        // +1 for the header row
        participants.extend(participant_from_cells(idx + 1, name, department));
    }
    Ok(participants)
}

/// Build a participant from a data row's first two cells, or `None` when
/// either is blank. `row` is the 0-based row index including the header.
fn participant_from_cells(row: usize, name: &str, department: &str) -> Option<Participant> {
    let name = name.trim();
    let department = department.trim();
    if name.is_empty() || department.is_empty() {
        debug!("Skipping incomplete roster row {}", row + 1);
        return None;
    }
    Some(Participant::new(name, department))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_rows_and_skips_header() {
        let csv = "姓名,部门\nAlice,R&D\nBob,QA\n";
        let records = parse_records(csv.as_bytes(), Delimiter::Comma).unwrap();
        assert_eq!(
            records,
            vec![Participant::new("Alice", "R&D"), Participant::new("Bob", "QA")]
        );
    }

    #[test]
    fn trims_cells_and_drops_incomplete_rows() {
        let csv = "name,dept\n  Carol  , Ops \n,Sales\nDan,\n   ,   \nEve\nFrank,HR,extra\n";
        let records = parse_records(csv.as_bytes(), Delimiter::Comma).unwrap();
        assert_eq!(
            records,
            vec![Participant::new("Carol", "Ops"), Participant::new("Frank", "HR")]
        );
    }

    #[test]
    fn header_only_yields_no_records() {
        let records = parse_records("name,dept\n".as_bytes(), Delimiter::Comma).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn tab_delimited_rows_parse() {
        let tsv = "name\tdept\nGina\tDesign\n";
        let records = parse_records(tsv.as_bytes(), Delimiter::Tab).unwrap();
        assert_eq!(records, vec![Participant::new("Gina", "Design")]);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            RosterFormat::for_path(Path::new("a.CSV")).unwrap(),
            RosterFormat::Delimited(Delimiter::Comma)
        );
        assert_eq!(
            RosterFormat::for_path(Path::new("a.tsv")).unwrap(),
            RosterFormat::Delimited(Delimiter::Tab)
        );
        assert_eq!(
            RosterFormat::for_path(Path::new("staff.xlsx")).unwrap(),
            RosterFormat::Workbook
        );
        assert_eq!(
            RosterFormat::for_path(Path::new("staff.XLS")).unwrap(),
            RosterFormat::Workbook
        );
        assert!(matches!(
            RosterFormat::for_path(Path::new("roster.txt")),
            Err(ImportError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            RosterFormat::for_path(Path::new("roster")),
            Err(ImportError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn blank_cells_are_rejected_after_trimming() {
        assert_eq!(
            participant_from_cells(1, "  Ivy ", " Ops "),
            Some(Participant::new("Ivy", "Ops"))
        );
        assert_eq!(participant_from_cells(2, " ", "Ops"), None);
        assert_eq!(participant_from_cells(3, "Ivy", ""), None);
    }

    #[test]
    fn workbook_fixture_reads_first_sheet() {
        let records = import_roster(Path::new("tests/fixtures/roster.xlsx")).unwrap();
        let names: Vec<&str> = records.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ivy", "Jack", "Li Wei", "Li Wei"]);
    }

    #[test]
    fn corrupt_workbook_is_a_workbook_error() {
        let dir = std::env::temp_dir().join("lucky_draw_import_tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.xlsx");
        fs::write(&path, "this is not a zip archive").unwrap();

        let err = import_roster(&path).unwrap_err();
        assert!(matches!(err, ImportError::Workbook { .. }), "got {err:?}");
    }

    #[test]
    fn import_missing_file_is_io_error() {
        let err = import_roster(Path::new("/no/such/roster.csv")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }

    #[test]
    fn import_file_without_valid_rows_is_rejected() {
        let dir = std::env::temp_dir().join("lucky_draw_import_tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("empty.csv");
        fs::write(&path, "name,dept\n,\n").unwrap();

        let err = import_roster(&path).unwrap_err();
        assert!(matches!(err, ImportError::NoRecords { .. }));
    }

    #[test]
    fn import_file_returns_participants() {
        let dir = std::env::temp_dir().join("lucky_draw_import_tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ok.csv");
        fs::write(&path, "name,dept\nHank,Finance\n").unwrap();

        let records = import_roster(&path).unwrap();
        assert_eq!(records, vec![Participant::new("Hank", "Finance")]);
    }
}
