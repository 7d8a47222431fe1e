// SPDX-License-Identifier: Apache-2.0

use crate::ImportError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One header-keyed row of a delimited table. Columns missing from a
/// row are simply absent, mirroring the uneven coverage of the
/// upstream reference files.
pub type KeyedRow = BTreeMap<String, String>;

pub fn read_keyed_rows(path: &Path, delimiter: u8) -> Result<Vec<KeyedRow>, ImportError> {
    let file = fs::File::open(path)
        .map_err(|e| ImportError(format!("cannot open {}: {e}", path.display())))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError(format!("bad header row in {}: {e}", path.display())))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut out = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| ImportError(format!("bad row in {}: {e}", path.display())))?;
        let mut row = BTreeMap::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            row.insert(header.clone(), value.to_string());
        }
        out.push(row);
    }
    Ok(out)
}

/// Positional read for headerless or skip-header sources such as the
/// protein-interaction network.
pub fn read_columns(
    path: &Path,
    delimiter: u8,
    skip_first_line: bool,
) -> Result<Vec<Vec<String>>, ImportError> {
    let file = fs::File::open(path)
        .map_err(|e| ImportError(format!("cannot open {}: {e}", path.display())))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(skip_first_line)
        .flexible(true)
        .from_reader(file);
    let mut out = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| ImportError(format!("bad row in {}: {e}", path.display())))?;
        out.push(record.iter().map(str::to_string).collect());
    }
    Ok(out)
}

pub fn required_field<'a>(
    row: &'a KeyedRow,
    column: &str,
    path: &Path,
) -> Result<&'a str, ImportError> {
    row.get(column).map(String::as_str).ok_or_else(|| {
        ImportError(format!(
            "missing required column '{column}' in {}",
            path.display()
        ))
    })
}

pub fn parse_float(raw: &str, column: &str, path: &Path) -> Result<f64, ImportError> {
    raw.trim().parse::<f64>().map_err(|_| {
        ImportError(format!(
            "column '{column}' in {} is not numeric: '{raw}'",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::{read_columns, read_keyed_rows, required_field};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn keyed_rows_tolerate_short_records() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("t.tsv");
        fs::write(&path, "a\tb\tc\n1\t2\t3\nx\ty\n").expect("write");
        let rows = read_keyed_rows(&path, b'\t').expect("read");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("c").map(String::as_str), Some("3"));
        assert_eq!(rows[1].get("c"), None);
        assert_eq!(
            required_field(&rows[0], "b", &path).expect("field"),
            "2"
        );
        assert!(required_field(&rows[1], "c", &path).is_err());
    }

    #[test]
    fn positional_read_skips_the_header_line() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("links.txt");
        fs::write(
            &path,
            "protein1 protein2 combined_score\n9606.ENSP1 9606.ENSP2 710\n",
        )
        .expect("write");
        let rows = read_columns(Path::new(&path), b' ', true).expect("read");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][2], "710");
    }
}
