//! Daily work-time metric calculation.
//!
//! Computes the full metric set (worked, regular, overtime, night, late,
//! early leave, missing, lunch) for one interpreted record against its
//! shift. Always recomputed from scratch; never fails. Malformed inputs
//! degrade to zeroed fields, so strict shift validation belongs to the
//! configuration layer, not here.

use crate::models::{Shift, TimeCalculation, TimeRecord};
use crate::processing::interpreter::interpret;
use crate::timeutil::{MINUTES_PER_DAY, duration_minutes};

/// Jornada above which the CLT mandates a lunch break; when no explicit
/// lunch was punched the standard break is deducted from the total.
const CLT_LUNCH_THRESHOLD_MINUTES: i64 = 360;

/// Night-differential window: 22:00-24:00 plus 00:00-05:00.
const NIGHT_WINDOW_START: i64 = 22 * 60;
const NIGHT_WINDOW_END: i64 = 5 * 60;

/// Compute the day's metrics from a (possibly raw) record and its shift.
///
/// The record is re-interpreted internally, so callers may pass either the
/// persisted canonical shape or a freshly slotted punch set. The punch count
/// of the record *before* interpretation drives the incomplete-versus-absent
/// decision, so it is taken once up front.
pub fn calculate(record: &TimeRecord, shift: Option<&Shift>) -> TimeCalculation {
    let mut calc = TimeCalculation::default();

    // No punches at all: the whole expected workday is missing.
    if !record.has_any_punch() {
        if let Some(shift) = shift {
            calc.missing_minutes = shift.expected_work_minutes();
        }
        return calc;
    }

    let original_count = record.punch_count();
    let interpreted = interpret(record, shift).record;

    // A shift, no clock-out anywhere, and more than one original punch:
    // the day cannot be credited, treat as absent.
    if let Some(shift) = shift
        && !interpreted.has_any_clock_out()
        && original_count != 1
    {
        calc.missing_minutes = shift.expected_work_minutes();
        return calc;
    }

    calc.total_worked_minutes = total_worked_minutes(&interpreted, shift);

    if let Some(shift) = shift {
        // Lateness and early leave compare in shift-relative minutes, so an
        // overnight shift's morning clock-out lands after its evening start.
        if let Some(in1) = interpreted.clock_in1 {
            calc.late_minutes = late_minutes(
                shift.relative_minutes(in1),
                shift.start_time.minutes(),
                shift.tolerance_minutes,
            );
        }

        if let Some(last_out) = interpreted.last_clock_out() {
            calc.early_leave_minutes = early_leave_minutes(
                shift.relative_minutes(last_out),
                shift.relative_minutes(shift.end_time),
                shift.tolerance_minutes,
            );
        }

        // Lunch metrics only when both the departure and the return exist.
        if let (Some(out1), Some(in2)) = (interpreted.clock_out1, interpreted.clock_in2) {
            calc.lunch_duration_minutes = duration_minutes(out1, in2);
            let expected_lunch = shift.lunch_minutes();
            if calc.lunch_duration_minutes > expected_lunch {
                calc.excessive_lunch_minutes = calc.lunch_duration_minutes - expected_lunch;
            }
        }

        let expected_work = shift.expected_work_minutes();
        if calc.total_worked_minutes > expected_work {
            calc.regular_minutes = expected_work;
            calc.overtime_minutes = calc.total_worked_minutes - expected_work;
        } else {
            calc.regular_minutes = calc.total_worked_minutes;
            if calc.total_worked_minutes < expected_work {
                calc.missing_minutes = expected_work - calc.total_worked_minutes;
            }
        }

        calc.night_shift_minutes = night_shift_minutes(&interpreted);
    } else {
        calc.regular_minutes = calc.total_worked_minutes;
    }

    calc.clamp_non_negative();
    calc
}

/// Sum the valid (in, out) intervals of the interpreted record.
///
/// Period 1 pays from shift start at the earliest (early arrival is not
/// credited) but keeps the raw clock-out (late departure counts towards
/// overtime; early departure is tracked separately). A lunch return without
/// a final clock-out voids the whole day. The CLT standard lunch is deducted
/// when the day ran long without an explicit break.
fn total_worked_minutes(record: &TimeRecord, shift: Option<&Shift>) -> i64 {
    let mut total = 0;
    let mut has_explicit_lunch = false;

    if let (Some(in1), Some(out1)) = (record.clock_in1, record.clock_out1) {
        let effective_in = match shift {
            Some(shift) if shift.relative_minutes(in1) < shift.start_time.minutes() => {
                shift.start_time
            }
            _ => in1,
        };
        total += duration_minutes(effective_in, out1);
        if record.clock_in2.is_some() {
            has_explicit_lunch = true;
        }
    }

    match (record.clock_in2, record.clock_out2) {
        (Some(in2), Some(out2)) => {
            has_explicit_lunch = true;
            total += duration_minutes(in2, out2);
        }
        (Some(_), None) if shift.is_some() => {
            // Came back from lunch but never clocked out again.
            return 0;
        }
        _ => {}
    }

    if let (Some(in3), Some(out3)) = (record.clock_in3, record.clock_out3) {
        total += duration_minutes(in3, out3);
    }

    if let Some(shift) = shift
        && !has_explicit_lunch
        && total > CLT_LUNCH_THRESHOLD_MINUTES
    {
        total -= shift.lunch_minutes();
    }

    total.max(0)
}

/// Minutes late past the tolerance window; 0 when on time.
/// Both arguments are shift-relative minutes.
fn late_minutes(actual: i64, expected: i64, tolerance: i64) -> i64 {
    if actual <= expected {
        return 0;
    }
    let diff = actual - expected;
    if diff > tolerance { diff - tolerance } else { 0 }
}

/// Minutes left early past the tolerance window; 0 when stayed to the end.
/// Both arguments are shift-relative minutes.
fn early_leave_minutes(actual: i64, expected: i64, tolerance: i64) -> i64 {
    let diff = expected - actual;
    if diff > tolerance { diff - tolerance } else { 0 }
}

/// Overlap of two half-open minute intervals.
fn overlap(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> i64 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0)
}

/// Minutes worked inside the night window, splitting midnight-crossing
/// intervals at 24:00 before intersecting.
fn night_shift_minutes(record: &TimeRecord) -> i64 {
    let mut night = 0;

    for (start, end) in record.valid_intervals() {
        let start_min = start.minutes();
        let end_min = end.minutes();

        if end_min < start_min {
            night += overlap(start_min, MINUTES_PER_DAY, NIGHT_WINDOW_START, MINUTES_PER_DAY);
            night += overlap(0, end_min, 0, NIGHT_WINDOW_END);
        } else {
            night += overlap(start_min, end_min, NIGHT_WINDOW_START, MINUTES_PER_DAY);
            night += overlap(start_min, end_min, 0, NIGHT_WINDOW_END);
        }
    }

    night
}
