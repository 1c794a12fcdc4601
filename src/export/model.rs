// src/export/model.rs

use crate::core::timesheet::ShiftLine;
use crate::utils::mins2readable;
use crate::utils::time::{local_date, local_time};
use serde::Serialize;

/// Flat timesheet row written by every export format.
/// Field order is the CSV column order.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TimesheetExport {
    pub employee: String,
    pub email: String,
    pub date: String,
    pub clock_in: String,
    pub clock_out: String,
    pub break_minutes: i64,
    pub worked_minutes: i64,
    pub worked: String,
}

impl From<&ShiftLine> for TimesheetExport {
    fn from(line: &ShiftLine) -> Self {
        Self {
            employee: line.employee.clone(),
            email: line.email.clone(),
            date: local_date(line.shift.clock_in),
            clock_in: local_time(line.shift.clock_in),
            // An open shift exports an empty clock-out cell.
            clock_out: line.shift.clock_out.map(local_time).unwrap_or_default(),
            break_minutes: line.durations.break_minutes,
            worked_minutes: line.durations.worked_minutes,
            worked: mins2readable(line.durations.worked_minutes, false, false),
        }
    }
}
