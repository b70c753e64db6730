//! Daily time records and computed metrics.

use crate::timeutil::{ClockTime, day_of_week_iso, is_weekend};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw punch-clock export row for one employee on one date.
///
/// Punches are `HH:MM` strings straight from the source sheet: unordered,
/// possibly malformed, at most the first six valid ones are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPunchSet {
    pub employee_id: String,
    pub date: NaiveDate,
    pub punches: Vec<String>,
}

impl RawPunchSet {
    /// Parse the raw strings into clock values, dropping malformed entries.
    pub fn clock_times(&self) -> Vec<ClockTime> {
        self.punches
            .iter()
            .filter_map(|p| ClockTime::parse_lenient(p))
            .collect()
    }
}

/// Canonical interpreted record: up to three ordered (in, out) pairs for one
/// employee-day. This is the shape that gets persisted and re-read when a
/// day is reprocessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub employee_id: String,
    pub date: NaiveDate,
    /// ISO day of week, Monday=1 .. Sunday=7.
    pub day_of_week: u32,
    pub is_weekend: bool,
    #[serde(default)]
    pub is_holiday: bool,
    pub clock_in1: Option<ClockTime>,
    pub clock_out1: Option<ClockTime>,
    pub clock_in2: Option<ClockTime>,
    pub clock_out2: Option<ClockTime>,
    pub clock_in3: Option<ClockTime>,
    pub clock_out3: Option<ClockTime>,
}

impl TimeRecord {
    /// Empty record for an employee-day with no punches.
    pub fn empty(employee_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            day_of_week: day_of_week_iso(date),
            is_weekend: is_weekend(date),
            is_holiday: false,
            clock_in1: None,
            clock_out1: None,
            clock_in2: None,
            clock_out2: None,
            clock_in3: None,
            clock_out3: None,
        }
    }

    /// Slot raw punches chronologically into the six fields, no inference.
    pub fn from_punches(raw: &RawPunchSet) -> Self {
        let mut clocks = raw.clock_times();
        clocks.sort();
        let mut record = Self::empty(raw.employee_id.clone(), raw.date);
        record.set_slots(&clocks);
        record
    }

    /// Overwrite all six slots from a chronologically sorted list.
    /// Punches beyond the sixth are discarded.
    pub fn set_slots(&mut self, clocks: &[ClockTime]) {
        let slot = |i: usize| clocks.get(i).copied();
        self.clock_in1 = slot(0);
        self.clock_out1 = slot(1);
        self.clock_in2 = slot(2);
        self.clock_out2 = slot(3);
        self.clock_in3 = slot(4);
        self.clock_out3 = slot(5);
    }

    /// All defined punches in slot order.
    pub fn defined_clocks(&self) -> Vec<ClockTime> {
        [
            self.clock_in1,
            self.clock_out1,
            self.clock_in2,
            self.clock_out2,
            self.clock_in3,
            self.clock_out3,
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Number of defined punches in the record.
    pub fn punch_count(&self) -> usize {
        self.defined_clocks().len()
    }

    pub fn has_any_punch(&self) -> bool {
        self.punch_count() > 0
    }

    pub fn has_any_clock_out(&self) -> bool {
        self.clock_out1.is_some() || self.clock_out2.is_some() || self.clock_out3.is_some()
    }

    /// Last defined clock-out, scanning from the third pair backwards.
    pub fn last_clock_out(&self) -> Option<ClockTime> {
        self.clock_out3.or(self.clock_out2).or(self.clock_out1)
    }

    /// The three (in, out) slot pairs, in order.
    pub fn pairs(&self) -> [(Option<ClockTime>, Option<ClockTime>); 3] {
        [
            (self.clock_in1, self.clock_out1),
            (self.clock_in2, self.clock_out2),
            (self.clock_in3, self.clock_out3),
        ]
    }

    /// Fully paired intervals (both endpoints present).
    pub fn valid_intervals(&self) -> Vec<(ClockTime, ClockTime)> {
        self.pairs()
            .into_iter()
            .filter_map(|(i, o)| Some((i?, o?)))
            .collect()
    }

    /// A record is complete when every pair is either both-present or
    /// both-absent; a dangling single punch makes it incomplete.
    pub fn is_complete(&self) -> bool {
        self.pairs()
            .into_iter()
            .all(|(i, o)| i.is_some() == o.is_some())
    }
}

/// Derived time metrics for one employee-day.
///
/// All values are non-negative minute counts. Regular + overtime is not
/// required to partition total worked time when minutes are missing; the
/// fields are independent derived values. Fully recomputed on every pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeCalculation {
    pub total_worked_minutes: i64,
    pub regular_minutes: i64,
    pub overtime_minutes: i64,
    pub night_shift_minutes: i64,
    pub late_minutes: i64,
    pub early_leave_minutes: i64,
    pub missing_minutes: i64,
    pub lunch_duration_minutes: i64,
    pub excessive_lunch_minutes: i64,
}

impl TimeCalculation {
    /// Clamp every field to zero or above.
    pub fn clamp_non_negative(&mut self) {
        self.total_worked_minutes = self.total_worked_minutes.max(0);
        self.regular_minutes = self.regular_minutes.max(0);
        self.overtime_minutes = self.overtime_minutes.max(0);
        self.night_shift_minutes = self.night_shift_minutes.max(0);
        self.late_minutes = self.late_minutes.max(0);
        self.early_leave_minutes = self.early_leave_minutes.max(0);
        self.missing_minutes = self.missing_minutes.max(0);
        self.lunch_duration_minutes = self.lunch_duration_minutes.max(0);
        self.excessive_lunch_minutes = self.excessive_lunch_minutes.max(0);
    }
}
