//! Punch-record interpretation heuristics.
//!
//! Raw punch-clock exports frequently carry 1 or 2 punches for a day that
//! really had four: employees skip the lunch punches, or the device drops
//! rows. The interpreter turns an unordered, variable-length punch list into
//! the canonical three-pair shape, borrowing the shift's lunch window to fill
//! the gaps when the pattern is unambiguous enough.

use crate::models::{Shift, TimeRecord};
use crate::timeutil::ClockTime;

/// How a two-punch day was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairKind {
    /// Entry near shift start and exit near shift end: a full workday with
    /// an unrecorded lunch break, standard lunch window inserted.
    FullDay,
    /// Both punches before the lunch window: one continuous work block.
    Continuous,
    /// Second punch inside the lunch window: entry plus lunch departure,
    /// standard lunch return inserted.
    LunchLeave,
    /// Second punch after the lunch window: entry plus lunch return, the
    /// lunch departure was never punched.
    LunchReturn,
    /// No shift to reason with: plain in/out pair.
    Fallback,
}

/// Interpretation outcome, tagged by the punch-count case that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchPattern {
    /// No punches at all.
    Empty,
    /// A single punch, read as the day's clock-in with the standard lunch
    /// window appended when a shift is known.
    Single,
    /// Exactly two punches, disambiguated against the shift's lunch window.
    Pair(PairKind),
    /// Three or more punches slotted chronologically.
    Multi,
}

/// An interpreted record together with the branch that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub record: TimeRecord,
    pub pattern: PunchPattern,
}

/// Normalize a record's punches into the canonical three-pair shape.
///
/// Pure function of its inputs; never fails. With no shift there is nothing
/// to infer from, so punches are slotted chronologically as-is (a single
/// punch stays a bare clock-in and downstream marks the day incomplete).
pub fn interpret(record: &TimeRecord, shift: Option<&Shift>) -> Interpretation {
    let mut clocks = record.defined_clocks();
    let mut interpreted = record.clone();

    let Some(shift) = shift else {
        clocks.sort();
        interpreted.set_slots(&clocks);
        let pattern = match clocks.len() {
            0 => PunchPattern::Empty,
            1 => PunchPattern::Single,
            2 => PunchPattern::Pair(PairKind::Fallback),
            _ => PunchPattern::Multi,
        };
        return Interpretation {
            record: interpreted,
            pattern,
        };
    };

    // Order across midnight: for an overnight shift the morning punches
    // come after the evening ones.
    clocks.sort_by_key(|c| shift.relative_minutes(*c));

    let pattern = match clocks.len() {
        0 => {
            interpreted.set_slots(&[]);
            PunchPattern::Empty
        }
        1 => {
            // Single punch: take it as the entry and assume the standard
            // lunch break was simply not punched.
            interpreted.set_slots(&[]);
            interpreted.clock_in1 = Some(clocks[0]);
            interpreted.clock_out1 = Some(shift.lunch_start_time);
            interpreted.clock_in2 = Some(shift.lunch_end_time);
            PunchPattern::Single
        }
        2 => {
            let kind = interpret_pair(&mut interpreted, clocks[0], clocks[1], shift);
            PunchPattern::Pair(kind)
        }
        _ => {
            interpreted.set_slots(&clocks);
            PunchPattern::Multi
        }
    };

    Interpretation {
        record: interpreted,
        pattern,
    }
}

/// Disambiguate a two-punch day against the shift's lunch window.
fn interpret_pair(
    record: &mut TimeRecord,
    first: ClockTime,
    second: ClockTime,
    shift: &Shift,
) -> PairKind {
    // All comparisons run on shift-relative minutes so the heuristics hold
    // for overnight shifts too.
    let first_min = shift.relative_minutes(first);
    let second_min = shift.relative_minutes(second);
    let lunch_start = shift.relative_minutes(shift.lunch_start_time);
    let lunch_end = shift.relative_minutes(shift.lunch_end_time);

    // Compatible with a full workday when the entry falls within the window
    // after shift start and the exit within the window before shift end.
    let entry_window = shift.start_time.minutes() + shift.full_day_window_minutes;
    let exit_window = shift.relative_minutes(shift.end_time) - shift.full_day_window_minutes;

    record.set_slots(&[]);
    record.clock_in1 = Some(first);

    if first_min <= entry_window && second_min >= exit_window {
        record.clock_out1 = Some(shift.lunch_start_time);
        record.clock_in2 = Some(shift.lunch_end_time);
        record.clock_out2 = Some(second);
        return PairKind::FullDay;
    }

    if second_min <= lunch_start {
        record.clock_out1 = Some(second);
        return PairKind::Continuous;
    }

    if second_min > lunch_start && second_min <= lunch_end {
        // Lunch departure punched; insert the standard return.
        record.clock_out1 = Some(second);
        record.clock_in2 = Some(shift.lunch_end_time);
        return PairKind::LunchLeave;
    }

    if second_min > lunch_end {
        // Lunch return punched; the departure is missing.
        record.clock_in2 = Some(second);
        return PairKind::LunchReturn;
    }

    record.clock_out1 = Some(second);
    PairKind::Fallback
}
