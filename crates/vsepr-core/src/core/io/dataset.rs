use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Column '{column}' not found in header of '{path}'")]
    MissingColumn { path: String, column: String },
}

/// One row of a property table as read from disk, before any validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based data row number (the header is not counted).
    pub row: usize,
    pub smiles: String,
    /// Raw target cell; `None` when the row is too short to contain it.
    pub target: Option<String>,
}

/// A validated `(SMILES, value)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
    pub smiles: String,
    pub value: f64,
}

/// Column layout of a property table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub smiles: String,
    pub target: String,
}

impl ColumnNames {
    pub fn new(smiles: &str, target: &str) -> Self {
        Self {
            smiles: smiles.to_string(),
            target: target.to_string(),
        }
    }
}

pub struct PropertyTable;

impl PropertyTable {
    /// Reads every data row of a CSV file, locating the SMILES and target
    /// columns by header name. Extra columns are ignored and rows may have
    /// differing lengths.
    pub fn read_raw(path: &Path, columns: &ColumnNames) -> Result<Vec<RawRecord>, DatasetError> {
        let csv_error = |e: csv::Error| DatasetError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(csv_error)?;

        let headers = reader.headers().map_err(csv_error)?.clone();
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DatasetError::MissingColumn {
                    path: path.to_string_lossy().to_string(),
                    column: name.to_string(),
                })
        };
        let smiles_idx = find(&columns.smiles)?;
        let target_idx = find(&columns.target)?;

        let mut records = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.map_err(csv_error)?;
            records.push(RawRecord {
                row: i + 1,
                smiles: record.get(smiles_idx).unwrap_or_default().to_string(),
                target: record.get(target_idx).map(str::to_string),
            });
        }
        Ok(records)
    }

    /// Writes a two-column table with the given header names.
    pub fn write(
        path: &Path,
        columns: &ColumnNames,
        records: &[PropertyRecord],
    ) -> Result<(), DatasetError> {
        let csv_error = |e: csv::Error| DatasetError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        };

        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
        writer
            .write_record([columns.smiles.as_str(), columns.target.as_str()])
            .map_err(csv_error)?;
        for record in records {
            writer
                .write_record([record.smiles.as_str(), &record.value.to_string()])
                .map_err(csv_error)?;
        }
        writer.flush().map_err(|e| DatasetError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn columns() -> ColumnNames {
        ColumnNames::new("smiles", "logS")
    }

    #[test]
    fn read_raw_locates_columns_by_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "id,logS,smiles\n1,-0.77,CCO\n2,,O\n3, 1.5 , C1CC1 \n").unwrap();

        let rows = PropertyTable::read_raw(&path, &columns()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].smiles, "CCO");
        assert_eq!(rows[0].target.as_deref(), Some("-0.77"));
        assert_eq!(rows[1].target.as_deref(), Some(""));
        assert_eq!(rows[2].smiles, "C1CC1");
        assert_eq!(rows[2].target.as_deref(), Some("1.5"));
        assert_eq!(rows[2].row, 3);
    }

    #[test]
    fn short_rows_have_no_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.csv");
        fs::write(&path, "smiles,logS\nCCO\n").unwrap();

        let rows = PropertyTable::read_raw(&path, &columns()).unwrap();
        assert_eq!(rows[0].target, None);
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "smiles,value\nCCO,1.0\n").unwrap();

        let result = PropertyTable::read_raw(&path, &columns());
        assert!(matches!(
            result,
            Err(DatasetError::MissingColumn { column, .. }) if column == "logS"
        ));
    }

    #[test]
    fn missing_file_is_a_csv_error() {
        let dir = tempdir().unwrap();
        let result = PropertyTable::read_raw(&dir.path().join("nope.csv"), &columns());
        assert!(matches!(result, Err(DatasetError::Csv { .. })));
    }

    #[test]
    fn write_produces_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![
            PropertyRecord {
                smiles: "CCO".into(),
                value: 0.5,
            },
            PropertyRecord {
                smiles: "c1ccccc1".into(),
                value: -1.25,
            },
        ];
        PropertyTable::write(&path, &columns(), &records).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "smiles,logS\nCCO,0.5\nc1ccccc1,-1.25\n");
    }
}
