//! Copy one named column between delimited-text files.
//!
//! Rows are matched by position, not by key: destination row `i` receives
//! source row `i`'s value, or an empty string once the source runs out.
//! The destination keeps its line terminator and any UTF-8 BOM.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::io;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone)]
pub struct ColumnCopyRequest {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub column: String,
    pub delimiter: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnCopyReport {
    pub column: String,
    pub source: String,
    pub destination: String,
    pub source_rows: usize,
    pub destination_rows: usize,
    pub copied_rows: usize,
    pub padded_rows: usize,
    pub written: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    bom: bool,
    crlf: bool,
}

impl Table {
    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Parse a delimiter argument: a single ASCII character, or `tab`/`\t`.
pub fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw {
        "tab" | "\\t" | "\t" => return Ok(b'\t'),
        _ => {}
    }

    match raw.as_bytes() {
        [byte] if byte.is_ascii() && *byte != b'"' && *byte != b'\n' && *byte != b'\r' => {
            Ok(*byte)
        }
        _ => Err(Error::validation_invalid_argument(
            "delimiter",
            "Delimiter must be a single ASCII character (or 'tab')",
            Some(raw.to_string()),
            None,
        )),
    }
}

fn read_table(path: &Path, delimiter: u8) -> Result<Table> {
    let raw = io::read_bytes(path, &format!("read {}", path.display()))?;
    let bom = raw.starts_with(UTF8_BOM);
    let bytes = raw.strip_prefix(UTF8_BOM).unwrap_or(&raw[..]);
    let crlf = bytes
        .iter()
        .position(|&b| b == b'\n')
        .is_some_and(|i| i > 0 && bytes[i - 1] == b'\r');

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::columns_invalid_table(path.display().to_string(), e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| Error::columns_invalid_table(path.display().to_string(), e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table {
        headers,
        rows,
        bom,
        crlf,
    })
}

fn table_to_string(table: &Table, delimiter: u8, path: &Path) -> Result<String> {
    let terminator = if table.crlf {
        csv::Terminator::CRLF
    } else {
        csv::Terminator::Any(b'\n')
    };

    let mut out = Vec::new();
    if table.bom {
        out.extend_from_slice(UTF8_BOM);
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(terminator)
        .flexible(true)
        .from_writer(out);

    let invalid = |e: String| Error::internal_io(e, Some(format!("encode {}", path.display())));

    writer
        .write_record(&table.headers)
        .map_err(|e| invalid(e.to_string()))?;
    for row in &table.rows {
        writer.write_record(row).map_err(|e| invalid(e.to_string()))?;
    }

    let bytes = writer.into_inner().map_err(|e| invalid(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| invalid(e.to_string()))
}

/// A validated copy whose destination has not been written yet.
#[derive(Debug)]
pub struct PreparedCopy {
    request: ColumnCopyRequest,
    updated: Table,
    report: ColumnCopyReport,
}

impl PreparedCopy {
    pub fn report(&self) -> &ColumnCopyReport {
        &self.report
    }

    pub fn write(self) -> Result<ColumnCopyReport> {
        let destination = &self.request.destination;
        let content = table_to_string(&self.updated, self.request.delimiter, destination)?;
        io::write_file_atomic(
            destination,
            &content,
            &format!("write {}", destination.display()),
        )?;

        log_status!(
            "columns",
            "Copied '{}' into {} ({} rows, {} padded)",
            self.report.column,
            destination.display(),
            self.report.copied_rows,
            self.report.padded_rows
        );

        Ok(ColumnCopyReport {
            written: true,
            ..self.report
        })
    }
}

/// Validate the request and compute the updated destination in memory.
pub fn prepare_copy(request: &ColumnCopyRequest) -> Result<PreparedCopy> {
    let source = read_table(&request.source, request.delimiter)?;
    let mut destination = read_table(&request.destination, request.delimiter)?;

    let source_index = source.column_index(&request.column).ok_or_else(|| {
        Error::columns_column_missing(
            &request.column,
            request.source.display().to_string(),
            source.headers.clone(),
        )
    })?;

    if destination.column_index(&request.column).is_some() {
        return Err(Error::columns_column_exists(
            &request.column,
            request.destination.display().to_string(),
            destination.headers.clone(),
        ));
    }

    if destination.rows.len() < source.rows.len() {
        return Err(Error::columns_row_count_mismatch(
            source.rows.len(),
            destination.rows.len(),
        ));
    }

    let width = destination.headers.len();
    destination.headers.push(request.column.clone());

    let mut padded_rows = 0;
    for (i, row) in destination.rows.iter_mut().enumerate() {
        let value = source
            .rows
            .get(i)
            .and_then(|src| src.get(source_index))
            .cloned();

        if value.is_none() {
            padded_rows += 1;
        }

        // Short rows are filled so the new value lands under its header.
        if row.len() < width {
            row.resize(width, String::new());
        }
        row.push(value.unwrap_or_default());
    }

    let report = ColumnCopyReport {
        column: request.column.clone(),
        source: request.source.display().to_string(),
        destination: request.destination.display().to_string(),
        source_rows: source.rows.len(),
        destination_rows: destination.rows.len(),
        copied_rows: destination.rows.len() - padded_rows,
        padded_rows,
        written: false,
    };

    Ok(PreparedCopy {
        request: request.clone(),
        updated: destination,
        report,
    })
}

/// Copy `request.column` from source to destination, writing atomically.
///
/// Any validation failure leaves the destination untouched.
pub fn copy_column(request: &ColumnCopyRequest) -> Result<ColumnCopyReport> {
    prepare_copy(request)?.write()
}
