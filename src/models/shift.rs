//! Work-shift templates.

use crate::error::{AppError, Result};
use crate::timeutil::{ClockTime, MINUTES_PER_DAY, duration_minutes};
use serde::{Deserialize, Serialize};

/// Minimum shift duration in minutes (4 hours).
const MIN_SHIFT_MINUTES: i64 = 240;
/// Maximum shift duration in minutes (12 hours).
const MAX_SHIFT_MINUTES: i64 = 720;
/// Minimum lunch break in minutes.
const MIN_LUNCH_MINUTES: i64 = 30;
/// Maximum lunch break in minutes (2 hours).
const MAX_LUNCH_MINUTES: i64 = 120;

fn default_tolerance() -> i64 {
    10
}

fn default_full_day_window() -> i64 {
    120
}

fn default_active() -> bool {
    true
}

/// A named work-schedule template assignable to employees.
///
/// Read-only input for the calculation engine. Structural invariants are
/// enforced once at creation/load time via [`Shift::validate`]; the engine
/// assumes a valid shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub name: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub lunch_start_time: ClockTime,
    pub lunch_end_time: ClockTime,
    /// Grace period in minutes applied to lateness and early leave.
    #[serde(default = "default_tolerance")]
    pub tolerance_minutes: i64,
    #[serde(default)]
    pub overtime_allowed: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Window around shift start/end within which two lone punches are read
    /// as a full workday with an unrecorded lunch break.
    #[serde(default = "default_full_day_window")]
    pub full_day_window_minutes: i64,
}

impl Shift {
    /// Total shift span minus the lunch break, midnight-adjusted.
    pub fn expected_work_minutes(&self) -> i64 {
        let span = duration_minutes(self.start_time, self.end_time);
        let lunch = duration_minutes(self.lunch_start_time, self.lunch_end_time);
        (span - lunch).max(0)
    }

    /// Nominal lunch break length in minutes.
    pub fn lunch_minutes(&self) -> i64 {
        duration_minutes(self.lunch_start_time, self.lunch_end_time)
    }

    /// True when the shift ends on the next calendar day.
    pub fn is_overnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Minutes since the shift-day midnight.
    ///
    /// For overnight shifts, times numerically earlier than the shift start
    /// belong to the next calendar day and get a day added, so ordering and
    /// window comparisons stay monotonic across the midnight boundary.
    pub fn relative_minutes(&self, t: ClockTime) -> i64 {
        let m = t.minutes();
        if self.is_overnight() && m < self.start_time.minutes() {
            m + MINUTES_PER_DAY
        } else {
            m
        }
    }

    /// Validate the structural invariants of a shift definition.
    ///
    /// Called at creation/configuration time, never inside the calculators.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Shift name must not be empty"));
        }

        let work = duration_minutes(self.start_time, self.end_time);
        if work < MIN_SHIFT_MINUTES {
            return Err(AppError::validation(format!(
                "Shift '{}' must last at least 4 hours",
                self.name
            )));
        }
        if work > MAX_SHIFT_MINUTES {
            return Err(AppError::validation(format!(
                "Shift '{}' must not exceed 12 hours",
                self.name
            )));
        }

        let lunch = self.lunch_minutes();
        if lunch < MIN_LUNCH_MINUTES {
            return Err(AppError::validation(format!(
                "Lunch break of shift '{}' must last at least 30 minutes",
                self.name
            )));
        }
        if lunch > MAX_LUNCH_MINUTES {
            return Err(AppError::validation(format!(
                "Lunch break of shift '{}' must not exceed 2 hours",
                self.name
            )));
        }

        // Lunch window must fall inside the shift span. For overnight shifts
        // the lunch endpoints are shifted past midnight before comparing.
        let start = self.start_time.minutes();
        let end = self.relative_minutes(self.end_time);
        let lunch_start = self.relative_minutes(self.lunch_start_time);
        let lunch_end = self.relative_minutes(self.lunch_end_time);
        if lunch_start < start || lunch_end > end || lunch_start > lunch_end {
            return Err(AppError::validation(format!(
                "Lunch window of shift '{}' must fall within the shift hours",
                self.name
            )));
        }

        if self.tolerance_minutes < 0 {
            return Err(AppError::validation(format!(
                "Tolerance of shift '{}' must not be negative",
                self.name
            )));
        }
        if self.full_day_window_minutes < 0 {
            return Err(AppError::validation(format!(
                "Full-day window of shift '{}' must not be negative",
                self.name
            )));
        }

        Ok(())
    }
}
