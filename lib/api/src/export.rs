//! CSV export of free variable search results.

use crate::error::ApiError;
use crate::types::FreeVarRow;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rootcause::Report;

/// File name offered for downloaded results.
pub const RESULTS_FILE_NAME: &str = "res.csv";

fn export_failed(e: impl std::fmt::Display) -> ApiError {
    ApiError::ExportFailed {
        details: e.to_string(),
    }
}

/// Renders rows as CSV with a header line and no index column.
///
/// Columns come from the first row. Cells missing from later rows are empty.
/// An empty slice produces an empty string.
pub fn results_csv(rows: &[FreeVarRow]) -> Result<String, Report<ApiError>> {
    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let columns: Vec<&str> = first.columns().collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns).map_err(export_failed)?;
    for row in rows {
        writer
            .write_record(columns.iter().map(|c| row.cell(c)))
            .map_err(export_failed)?;
    }

    let bytes = writer.into_inner().map_err(export_failed)?;
    Ok(String::from_utf8(bytes).map_err(export_failed)?)
}

/// Returns a `data:` URL holding the CSV, suitable for a download link.
pub fn results_data_url(rows: &[FreeVarRow]) -> Result<String, Report<ApiError>> {
    let csv = results_csv(rows)?;
    Ok(format!("data:text/csv;base64,{}", STANDARD.encode(csv)))
}
