//! Occurrence generation from daily metrics.
//!
//! Maps one record's computed metrics into reviewable occurrence candidates.
//! Stateless and idempotent: the same inputs always produce the same list,
//! and the persistence layer replaces any previously stored candidates for
//! the record in one atomic delete-then-insert.

use crate::models::{Occurrence, OccurrenceStatus, OccurrenceType, Shift, TimeCalculation, TimeRecord};

/// Generate all occurrence candidates for one record.
///
/// Returns an empty list without a shift: occurrences encode shift policy
/// violations, so there is nothing to raise against no policy. The rules are
/// independent; a single day can produce several candidates at once.
pub fn generate(
    record: &TimeRecord,
    calculation: &TimeCalculation,
    shift: Option<&Shift>,
) -> Vec<Occurrence> {
    let Some(shift) = shift else {
        return Vec::new();
    };

    let mut occurrences = Vec::new();
    let is_complete = record.is_complete();

    if calculation.total_worked_minutes == 0 && calculation.missing_minutes > 0 {
        occurrences.push(candidate(
            record,
            OccurrenceType::Absence,
            calculation.missing_minutes,
            "Falta — nenhum trabalho registrado.".to_string(),
        ));
    }

    if calculation.late_minutes > 0 {
        occurrences.push(candidate(
            record,
            OccurrenceType::LateArrival,
            calculation.late_minutes,
            format!("Atraso de {} min", calculation.late_minutes),
        ));
    }

    if calculation.early_leave_minutes > 0 {
        occurrences.push(candidate(
            record,
            OccurrenceType::EarlyDeparture,
            calculation.early_leave_minutes,
            format!("Saída antecipada de {} min", calculation.early_leave_minutes),
        ));
    }

    if calculation.excessive_lunch_minutes > 0 {
        occurrences.push(candidate(
            record,
            OccurrenceType::ExcessiveLunch,
            calculation.excessive_lunch_minutes,
            format!("Excesso de almoço: {} min", calculation.excessive_lunch_minutes),
        ));
    }

    // Overtime only counts when the policy allows it and the record has no
    // dangling punches to dispute the total.
    if shift.overtime_allowed && is_complete && calculation.overtime_minutes > 0 {
        occurrences.push(candidate(
            record,
            OccurrenceType::Overtime,
            calculation.overtime_minutes,
            format!("{} min de hora extra", calculation.overtime_minutes),
        ));
    }

    if !is_complete {
        occurrences.push(candidate(
            record,
            OccurrenceType::IncompleteRecord,
            0,
            incomplete_description(record),
        ));
    }

    if record.is_weekend && calculation.total_worked_minutes > 0 {
        occurrences.push(candidate(
            record,
            OccurrenceType::WeekendWork,
            calculation.total_worked_minutes,
            format!("Trabalho fim de semana: {} min", calculation.total_worked_minutes),
        ));
    }

    if record.is_holiday && calculation.total_worked_minutes > 0 {
        occurrences.push(candidate(
            record,
            OccurrenceType::HolidayWork,
            calculation.total_worked_minutes,
            format!("Trabalho em feriado: {} min", calculation.total_worked_minutes),
        ));
    }

    occurrences
}

fn candidate(
    record: &TimeRecord,
    kind: OccurrenceType,
    minutes: i64,
    description: String,
) -> Occurrence {
    Occurrence {
        employee_id: record.employee_id.clone(),
        date: record.date,
        kind,
        minutes,
        description,
        status: OccurrenceStatus::Pending,
    }
}

/// Name exactly which slots are missing their counterpart.
fn incomplete_description(record: &TimeRecord) -> String {
    let mut missing = Vec::new();
    let slots = [
        (record.clock_in1, record.clock_out1, 1),
        (record.clock_in2, record.clock_out2, 2),
        (record.clock_in3, record.clock_out3, 3),
    ];
    for (clock_in, clock_out, n) in slots {
        if clock_in.is_some() && clock_out.is_none() {
            missing.push(format!("Falta saída {n}"));
        }
        if clock_in.is_none() && clock_out.is_some() {
            missing.push(format!("Falta entrada {n}"));
        }
    }
    missing.join(", ")
}
