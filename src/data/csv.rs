//! Dense CSV observation matrices
//!
//! Every non-empty line is one observation and every field one feature:
//! - Lines starting with `#` and blank lines are skipped
//! - The first data line can be headers (automatically detected)
//! - All lines must have the same number of fields

use crate::core::{KernelError, Result};
use ndarray::Array2;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Observation matrix loaded from CSV
#[derive(Debug, Clone, PartialEq)]
pub struct CsvMatrix {
    data: Array2<f64>,
    header: Option<Vec<String>>,
}

impl CsvMatrix {
    /// Load a matrix from a CSV file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a matrix from a reader, detecting a header line
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, true)
    }

    /// Load a matrix from a reader with explicit header option
    pub fn from_reader_with_options<R: BufRead>(reader: R, auto_detect_header: bool) -> Result<Self> {
        let mut values = Vec::new();
        let mut n_cols = None;
        let mut n_rows = 0;
        let mut header = None;

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if n_cols.is_none() && header.is_none() && auto_detect_header && Self::is_header_line(line)
            {
                header = Some(line.split(',').map(|f| f.trim().to_string()).collect());
                continue;
            }

            let row = Self::parse_data_line(line, lineno + 1)?;
            match n_cols {
                None => n_cols = Some(row.len()),
                Some(n) if n != row.len() => {
                    return Err(KernelError::ParseError(format!(
                        "Line {}: expected {} fields, got {}",
                        lineno + 1,
                        n,
                        row.len()
                    )));
                }
                Some(_) => {}
            }
            values.extend(row);
            n_rows += 1;
        }

        let n_cols = n_cols.ok_or(KernelError::EmptyDataset)?;
        let data = Array2::from_shape_vec((n_rows, n_cols), values)
            .map_err(|e| KernelError::ParseError(e.to_string()))?;
        Ok(CsvMatrix { data, header })
    }

    /// Check if a line appears to be a header
    fn is_header_line(line: &str) -> bool {
        let fields: Vec<&str> = line.split(',').collect();
        let non_numeric_count = fields
            .iter()
            .filter(|field| field.trim().parse::<f64>().is_err())
            .count();

        non_numeric_count * 2 > fields.len()
    }

    fn parse_data_line(line: &str, lineno: usize) -> Result<Vec<f64>> {
        line.split(',')
            .enumerate()
            .map(|(col, field)| {
                let field = field.trim();
                field.parse::<f64>().map_err(|_| {
                    KernelError::ParseError(format!(
                        "Line {lineno}: invalid value at column {}: {field:?}",
                        col + 1
                    ))
                })
            })
            .collect()
    }

    /// Observations, one per row
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_data(self) -> Array2<f64> {
        self.data
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }
}

/// Read a dense observation matrix from a CSV file
pub fn read_csv_matrix<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    CsvMatrix::from_file(path).map(CsvMatrix::into_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::io::Cursor;

    #[test]
    fn test_csv_basic() {
        let data = "1.0,2.0,1\n3.0,4.0,-1\n";
        let matrix = CsvMatrix::from_reader(Cursor::new(data)).unwrap();

        assert_eq!(matrix.nrows(), 2);
        assert_eq!(matrix.ncols(), 3);
        assert_eq!(matrix.data(), &array![[1.0, 2.0, 1.0], [3.0, 4.0, -1.0]]);
        assert!(matrix.header().is_none());
    }

    #[test]
    fn test_csv_with_headers() {
        let data = "x, y\n1.0,2.0\n3.0,4.0\n";
        let matrix = CsvMatrix::from_reader(Cursor::new(data)).unwrap();

        assert_eq!(matrix.nrows(), 2);
        assert_eq!(
            matrix.header().unwrap(),
            &["x".to_string(), "y".to_string()]
        );
    }

    #[test]
    fn test_csv_empty_lines_and_comments() {
        let data = "# generated\nfeature\n\n0.5\n# more\n-1e-3\n";
        let matrix = CsvMatrix::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(matrix.data(), &array![[0.5], [-1e-3]]);
    }

    #[test]
    fn test_csv_ragged_rows() {
        let data = "1.0,2.0\n3.0\n";
        let err = CsvMatrix::from_reader(Cursor::new(data)).unwrap_err();
        match err {
            KernelError::ParseError(msg) => assert!(msg.contains("Line 2")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_csv_invalid_number() {
        let data = "1.0,2.0\n1.0,abc\n";
        assert!(matches!(
            CsvMatrix::from_reader(Cursor::new(data)),
            Err(KernelError::ParseError(_))
        ));
    }

    #[test]
    fn test_csv_empty() {
        assert!(matches!(
            CsvMatrix::from_reader(Cursor::new("")),
            Err(KernelError::EmptyDataset)
        ));
        assert!(matches!(
            CsvMatrix::from_reader(Cursor::new("# only\na,b\n")),
            Err(KernelError::EmptyDataset)
        ));
    }

    #[test]
    fn test_csv_manual_header_control() {
        let data = "a,b\n1.0,2.0\n";
        assert!(CsvMatrix::from_reader_with_options(Cursor::new(data), false).is_err());
    }

    #[test]
    fn test_is_header_line() {
        assert!(CsvMatrix::is_header_line("feature1,feature2,label"));
        assert!(CsvMatrix::is_header_line("x"));
        assert!(!CsvMatrix::is_header_line("1.0,2.0,3.0,1"));
        assert!(!CsvMatrix::is_header_line("1.0,nan_value,3.0"));
    }

    #[test]
    fn test_read_csv_matrix_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0,1\n2,3").unwrap();

        let x = read_csv_matrix(file.path()).unwrap();
        assert_eq!(x, array![[0.0, 1.0], [2.0, 3.0]]);
    }
}
