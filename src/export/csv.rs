use crate::errors::AppResult;
use crate::export::{TimesheetExport, notify_export_success};
use crate::ui::messages::info;
use std::io::Write;
use std::path::Path;

/// Write rows as CSV (header row from the serde field names).
pub(crate) fn write_csv<W: Write>(out: W, rows: &[TimesheetExport]) -> AppResult<()> {
    let mut wtr = ::csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub(crate) fn export_csv(rows: &[TimesheetExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let file = std::fs::File::create(path)?;
    write_csv(file, rows)?;

    notify_export_success("CSV", rows.len(), path);
    Ok(())
}
