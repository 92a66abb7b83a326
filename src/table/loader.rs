// ABOUTME: CSV parameter table parsing into ordered row records
// ABOUTME: Enforces a unique header and a uniform field count across all rows

use csv::{ReaderBuilder, StringRecord, Trim};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use super::error::{Result, SchemaError, TableError};

const INLINE_ORIGIN: &str = "<inline>";

/// One data row of a parameter table, keyed by column name in header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line: u64,
    values: IndexMap<String, String>,
}

impl Row {
    pub fn new(line: u64, values: IndexMap<String, String>) -> Self {
        Self { line, values }
    }

    /// 1-based line number of this row in the source file
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A loaded parameter sweep: a unique header plus at least one row
#[derive(Debug, Clone)]
pub struct ParameterTable {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl ParameterTable {
    /// Parse a comma-separated table. Fields are kept verbatim, blank lines are skipped.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::parse(content, INLINE_ORIGIN)
    }

    fn parse(content: &str, origin: &str) -> Result<Self> {
        // Spreadsheet exports often lead with a byte order mark
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::None)
            .from_reader(content.as_bytes());

        let mut records = reader.records();

        let header = match records.next() {
            Some(record) => record.map_err(|e| malformed(content, &e))?,
            None => {
                return Err(TableError::EmptyTable {
                    path: origin.to_string(),
                })
            }
        };
        let headers = parse_header(&header)?;

        let mut rows = Vec::new();
        for record in records {
            let record = record.map_err(|e| malformed(content, &e))?;
            let line = record_line(content, &record);

            if record.len() != headers.len() {
                return Err(SchemaError::FieldCountMismatch {
                    line,
                    expected: headers.len(),
                    found: record.len(),
                }
                .into());
            }

            let values = headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect();
            rows.push(Row::new(line, values));
        }

        if rows.is_empty() {
            return Err(TableError::EmptyTable {
                path: origin.to_string(),
            });
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a successfully loaded table
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParameterTable {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

fn parse_header(record: &StringRecord) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut headers = Vec::with_capacity(record.len());

    for column in record.iter() {
        if !seen.insert(column) {
            return Err(SchemaError::DuplicateColumn {
                column: column.to_string(),
            }
            .into());
        }
        headers.push(column.to_string());
    }

    Ok(headers)
}

fn record_line(content: &str, record: &StringRecord) -> u64 {
    record
        .position()
        .map(|p| line_at(content, p.byte()))
        .unwrap_or_default()
}

/// 1-based line of the record whose read began at `byte`.
///
/// The reader's position may still sit on the previous record's terminator
/// (the `\n` of a CRLF pair) or before skipped blank lines, so line breaks
/// are stepped over before counting.
fn line_at(content: &str, byte: u64) -> u64 {
    let bytes = content.as_bytes();
    let mut start = usize::try_from(byte).map_or(bytes.len(), |b| b.min(bytes.len()));
    while start < bytes.len() && matches!(bytes[start], b'\r' | b'\n') {
        start += 1;
    }
    let breaks = bytes[..start].iter().filter(|&&b| b == b'\n').count();
    breaks as u64 + 1
}

fn malformed(content: &str, error: &csv::Error) -> TableError {
    let line = error
        .position()
        .map(|p| line_at(content, p.byte()))
        .unwrap_or_default();
    SchemaError::Malformed {
        line,
        message: error.to_string(),
    }
    .into()
}

#[derive(Debug, Clone)]
pub struct TableLoader;

impl TableLoader {
    pub fn new() -> Self {
        Self
    }

    pub async fn load<P: AsRef<Path>>(&self, path: P) -> Result<ParameterTable> {
        let path = path.as_ref();
        debug!("Reading parameter table from {}", path.display());

        let content = fs::read_to_string(path)
            .await
            .map_err(|source| TableError::NotFound {
                path: path.to_path_buf(),
                source,
            })?;

        let table = ParameterTable::parse(&content, &path.display().to_string())?;
        info!(
            "Loaded {} parameter set(s) from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}
