use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{HrmError, Result};

/// A row that can be written as CSV: ordered `(header, value)` pairs, `None`
/// for an absent value.
pub trait ExportRow {
    fn columns(&self) -> Vec<(&'static str, Option<String>)>;
}

/// Quotes a cell containing a comma, double quote or newline, doubling inner
/// quotes. Absent values become empty cells.
pub fn escape_cell(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Header row from the first row's keys, then one line per row.
pub fn to_csv<R: ExportRow>(rows: &[R]) -> Result<String> {
    let first = rows.first().ok_or(HrmError::NothingToExport)?;
    let headers: Vec<&'static str> = first.columns().into_iter().map(|(h, _)| h).collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));

    for row in rows {
        let columns = row.columns();
        let cells: Vec<String> = headers
            .iter()
            .map(|header| {
                let value = columns
                    .iter()
                    .find(|(h, _)| h == header)
                    .and_then(|(_, v)| v.as_deref());
                escape_cell(value)
            })
            .collect();
        lines.push(cells.join(","));
    }

    Ok(lines.join("\n"))
}

/// Writes `<dir>/<file_name>.csv` and returns its path. An empty row set is
/// reported as `NothingToExport` and no file is created.
pub fn export_rows<R: ExportRow>(rows: &[R], file_name: &str, dir: &Path) -> Result<PathBuf> {
    let body = to_csv(rows).inspect_err(|_| {
        warn!(file_name, "Nothing to export");
    })?;

    fs::create_dir_all(dir)?;
    let safe_name = file_name.replace(['/', '\\'], "-");
    let path = dir.join(format!("{safe_name}.csv"));
    fs::write(&path, body)?;

    info!(path = %path.display(), rows = rows.len(), "Exported report");
    Ok(path)
}
