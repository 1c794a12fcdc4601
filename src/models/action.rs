use crate::models::status::WorkStatus;
use std::fmt;

/// The four transitions of the time clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAction {
    ClockIn,
    ClockOut,
    StartBreak,
    EndBreak,
}

impl ClockAction {
    /// Operation name written to the audit log.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockAction::ClockIn => "clock_in",
            ClockAction::ClockOut => "clock_out",
            ClockAction::StartBreak => "break_start",
            ClockAction::EndBreak => "break_end",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClockAction::ClockIn => "clock in",
            ClockAction::ClockOut => "clock out",
            ClockAction::StartBreak => "start a break",
            ClockAction::EndBreak => "end a break",
        }
    }

    /// Whether the action may run from `status`.
    pub fn allowed_from(&self, status: WorkStatus) -> bool {
        match self {
            ClockAction::ClockIn => status == WorkStatus::ClockedOut,
            ClockAction::ClockOut => status.is_clocked_in(),
            ClockAction::StartBreak => status == WorkStatus::Working,
            ClockAction::EndBreak => status == WorkStatus::OnBreak,
        }
    }
}

impl fmt::Display for ClockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
