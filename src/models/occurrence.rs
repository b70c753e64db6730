//! Reviewable occurrence events derived from daily metrics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Occurrence categories raised for human review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OccurrenceType {
    Absence,
    LateArrival,
    EarlyDeparture,
    ExcessiveLunch,
    Overtime,
    IncompleteRecord,
    WeekendWork,
    HolidayWork,
}

/// Approval workflow state. New candidates always start as `Pending`;
/// transitions are owned by the review workflow, not by the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OccurrenceStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// One occurrence candidate for an employee-day.
///
/// Regenerated from scratch on every processing pass; the caller replaces
/// any previously stored candidates for the same record atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub employee_id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: OccurrenceType,
    /// Minutes involved; 0 for incomplete-record occurrences.
    pub minutes: i64,
    pub description: String,
    #[serde(default)]
    pub status: OccurrenceStatus,
}
