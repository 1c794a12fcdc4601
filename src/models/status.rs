use crate::utils::colors::{GREEN, GREY, RESET, YELLOW};
use std::fmt;

/// Current work status of a user, derived from the open shift/break rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkStatus {
    ClockedOut,
    Working,
    OnBreak,
}

impl WorkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::ClockedOut => "clocked_out",
            WorkStatus::Working => "working",
            WorkStatus::OnBreak => "on_break",
        }
    }

    /// Human label used in terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            WorkStatus::ClockedOut => "Clocked Out",
            WorkStatus::Working => "Working",
            WorkStatus::OnBreak => "On Break",
        }
    }

    /// Label wrapped in the ANSI color of the status dot.
    pub fn badge(&self) -> String {
        let color = match self {
            WorkStatus::ClockedOut => GREY,
            WorkStatus::Working => GREEN,
            WorkStatus::OnBreak => YELLOW,
        };
        format!("{color}● {}{RESET}", self.label())
    }

    pub fn is_clocked_in(&self) -> bool {
        !matches!(self, WorkStatus::ClockedOut)
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
