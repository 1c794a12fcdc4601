// src/export/logic.rs

use crate::core::timesheet::{Scope, TimesheetLogic};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::csv::export_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::export_json;
use crate::export::model::TimesheetExport;
use crate::models::profile::Profile;
use crate::ui::messages::warning;
use crate::utils::date::{DateBounds, describe_range};
use chrono::{DateTime, Utc};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the timesheet rows `viewer` may see.
    ///
    /// - `format`: csv | json
    /// - `file`: absolute path of the output file
    /// - `bounds`: resolved `--range` (None = every date)
    ///
    /// Returns the number of rows written (0 when the selection is empty,
    /// in which case no file is created).
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        pool: &mut DbPool,
        viewer: &Profile,
        scope: &Scope,
        format: ExportFormat,
        file: &str,
        bounds: DateBounds,
        force: bool,
        now: DateTime<Utc>,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let sheet = TimesheetLogic::build(&pool.conn, viewer, scope, bounds, now)?;
        let rows: Vec<TimesheetExport> = sheet.lines.iter().map(TimesheetExport::from).collect();

        if rows.is_empty() {
            warning(format!(
                "No shifts found for {}; nothing exported.",
                describe_range(&bounds)
            ));
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!(
                "{} row(s) as {} for {}",
                rows.len(),
                format.as_str(),
                describe_range(&bounds)
            ),
        )?;

        Ok(rows.len())
    }
}
