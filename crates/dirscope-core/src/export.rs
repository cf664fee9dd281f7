/// CSV export of file records.
///
/// One row per record, columns named after the record fields.
use crate::model::FileRecord;
use std::io::Write;

/// Write `files` as CSV with a header row.
pub fn write_csv<W: Write>(files: &[FileRecord], writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for f in files {
        wtr.serialize(f)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::probe;

    #[test]
    fn header_and_one_row_per_record() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("q1, final.xlsx");
        std::fs::write(&path, b"1234").unwrap();
        let rec = probe(&path).unwrap();

        let mut out = Vec::new();
        write_csv(&[rec], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some(
                "path,name,directory,extension,size_bytes,size_display,created,modified,\
                 accessed,mime_type,is_readable,is_writable,is_executable,category"
            )
        );
        let row = lines.next().unwrap();
        // The comma in the file name forces quoting.
        assert!(row.contains("\"q1, final.xlsx\""));
        assert!(row.ends_with(",Spreadsheets"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_input_writes_nothing() {
        let mut out = Vec::new();
        write_csv(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}
