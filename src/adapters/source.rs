//! CSV row source
//!
//! Reads the export with a header row. Columns are matched by name, so their
//! order does not matter; unknown columns are ignored and missing ones load
//! as empty strings.

use crate::domain::{Result, Row, SvcregError};
use std::io::Read;
use std::path::Path;

/// Reads every record of the CSV file at `path`, in file order
///
/// # Errors
///
/// Returns [`SvcregError::Source`] when the file cannot be opened or a record
/// cannot be decoded. Either ends the run.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| {
            SvcregError::Source(format!("Failed to open CSV {}: {}", path.display(), e))
        })?;

    let rows = collect_rows(reader)
        .map_err(|e| SvcregError::Source(format!("{}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), rows = rows.len(), "CSV loaded");
    Ok(rows)
}

/// Reads rows from any reader; used by [`read_rows`] and in tests
pub fn read_rows_from<R: Read>(input: R) -> Result<Vec<Row>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);
    collect_rows(reader).map_err(SvcregError::Source)
}

fn collect_rows<R: Read>(mut reader: csv::Reader<R>) -> std::result::Result<Vec<Row>, String> {
    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<Row>().enumerate() {
        // header is line 1
        let row = record.map_err(|e| format!("Invalid record at data row {}: {}", index + 2, e))?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_rows_by_header_name() {
        let csv = "test_code,name,type,national_code,mobile,price,test_count,date,discount,name_rabet_company,family_rabet_company,tariffs_basis\n\
                   101,Sara,1,0012345678,09121234567,\"12,000\",2,1400/01/01,0,,,2\n";
        let rows = read_rows_from(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Sara");
        assert_eq!(rows[0].kind, "1");
        assert_eq!(rows[0].test_code, "101");
        assert_eq!(rows[0].price, "12,000");
        assert_eq!(rows[0].tariffs_basis, "2");
        assert_eq!(rows[0].row_id, 0);
    }

    #[test]
    fn test_missing_and_extra_columns() {
        let csv = "name,comment\nReza,ignored\n";
        let rows = read_rows_from(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "Reza");
        assert_eq!(rows[0].mobile, "");
        assert_eq!(rows[0].tariffs_basis, "");
    }

    #[test]
    fn test_multibyte_values() {
        let csv = "name,family_rabet_company\nعلی,محمدی\n";
        let rows = read_rows_from(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "علی");
        assert_eq!(rows[0].family_rabet_company, "محمدی");
    }

    #[test]
    fn test_read_rows_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"name,price\nA,1\nB,2\n").unwrap();
        file.flush().unwrap();

        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "B");
    }

    #[test]
    fn test_read_rows_missing_file() {
        let err = read_rows("/nonexistent/export.csv").unwrap_err();
        assert!(matches!(err, SvcregError::Source(_)));
    }
}
