//! Batch processing orchestration.
//!
//! Drives interpret → calculate → generate over stored records, one
//! employee-day at a time, and persists results through the injected
//! [`RecordStore`]. All heavy lifting stays in the pure engine modules;
//! this layer owns ordering, chunking, and error isolation.

use crate::error::{AppError, Result};
use crate::models::{Employee, Occurrence, Shift, TimeCalculation, TimeRecord};
use crate::processing::analyzer::{Analysis, analyze};
use crate::processing::calculator::calculate;
use crate::processing::occurrences::generate;
use crate::store::RecordStore;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

/// Records persisted per batch when reprocessing a range.
const CHUNK_SIZE: usize = 50;

/// Lunch excess above which a day is flagged for review even without an
/// occurrence policy hit.
const LUNCH_REVIEW_THRESHOLD: i64 = 15;

/// Knobs for a processing run.
#[derive(Debug, Clone)]
pub struct ProcessingOptions {
    pub generate_occurrences: bool,
    /// Raise weekend-work occurrences.
    pub consider_weekends: bool,
    /// Raise holiday-work occurrences for dates in `holidays`.
    pub consider_holidays: bool,
    pub holidays: Vec<NaiveDate>,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            generate_occurrences: true,
            consider_weekends: true,
            consider_holidays: true,
            holidays: Vec::new(),
        }
    }
}

/// Result of processing one employee-day.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingOutcome {
    pub record: TimeRecord,
    pub calculation: TimeCalculation,
    pub occurrences: Vec<Occurrence>,
    pub has_issues: bool,
    pub is_complete: bool,
}

/// Summary of a range-processing run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingReport {
    pub processed: usize,
    pub occurrences_generated: usize,
    pub errors: usize,
    pub warnings: Vec<String>,
}

impl ProcessingReport {
    /// Get summary message.
    pub fn summary(&self) -> String {
        format!(
            "Processed: {}, Occurrences: {}, Errors: {}",
            self.processed, self.occurrences_generated, self.errors
        )
    }
}

/// Date-range selection for batch runs.
#[derive(Debug, Clone)]
pub struct RangeFilter {
    pub employee_id: Option<String>,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Batch processor over an injected record store.
pub struct Processor<'a, S: RecordStore> {
    store: &'a mut S,
    options: ProcessingOptions,
}

impl<'a, S: RecordStore> Processor<'a, S> {
    pub fn new(store: &'a mut S, options: ProcessingOptions) -> Self {
        Self { store, options }
    }

    /// Process a single employee-day and persist the results.
    ///
    /// Creates an empty record when none exists yet, so a day with no
    /// punches still yields its absence metrics and occurrence. An explicit
    /// single-day request processes inactive employees too, with a warning.
    pub fn process_day(&mut self, employee_id: &str, date: NaiveDate) -> Result<ProcessingOutcome> {
        let employee = self
            .store
            .employee(employee_id)?
            .ok_or_else(|| AppError::not_found(format!("Employee '{employee_id}'")))?;
        if !employee.is_active {
            warn!(employee = employee_id, "Employee inactive, processing anyway");
        }
        let shift = self.shift_for(&employee)?;

        let record = self
            .store
            .record(employee_id, date)?
            .unwrap_or_else(|| TimeRecord::empty(employee_id, date));

        let outcome = self.run_engine(record, shift.as_ref())?;
        self.store
            .save_record(&outcome.record, &outcome.calculation)?;
        if self.options.generate_occurrences {
            self.store.replace_occurrences(
                employee_id,
                date,
                outcome.occurrences.clone(),
            )?;
        }
        info!(
            employee = employee_id,
            %date,
            worked = outcome.calculation.total_worked_minutes,
            occurrences = outcome.occurrences.len(),
            "Processed day"
        );
        Ok(outcome)
    }

    /// Reprocess every stored record in a date range.
    ///
    /// Records of inactive employees are skipped with a warning. Per-record
    /// failures are counted and logged, never fatal for the batch;
    /// persistence happens in chunks to bound transaction size on real
    /// stores.
    pub fn process_range(&mut self, filter: &RangeFilter) -> Result<ProcessingReport> {
        if filter.to < filter.from {
            return Err(AppError::validation("End date must not precede start date"));
        }

        let records =
            self.store
                .records_in_range(filter.employee_id.as_deref(), filter.from, filter.to)?;
        info!(
            from = %filter.from,
            to = %filter.to,
            count = records.len(),
            "Starting range processing"
        );

        let mut report = ProcessingReport::default();
        let mut pending: Vec<ProcessingOutcome> = Vec::new();

        for record in records {
            let employee_id = record.employee_id.clone();
            let date = record.date;

            let outcome = match self.store.employee(&employee_id)? {
                Some(employee) if !employee.is_active => {
                    warn!(employee = %employee_id, %date, "Employee inactive, skipping");
                    report
                        .warnings
                        .push(format!("{employee_id} {date}: employee inactive, skipped"));
                    continue;
                }
                Some(employee) => self
                    .shift_for(&employee)
                    .and_then(|shift| self.run_engine(record, shift.as_ref())),
                None => Err(AppError::not_found(format!("Employee '{employee_id}'"))),
            };

            match outcome {
                Ok(outcome) => {
                    report.processed += 1;
                    report.occurrences_generated += outcome.occurrences.len();
                    pending.push(outcome);
                }
                Err(e) => {
                    warn!(employee = %employee_id, %date, error = %e, "Record failed");
                    report.errors += 1;
                    report.warnings.push(format!("{employee_id} {date}: {e}"));
                }
            }

            if pending.len() >= CHUNK_SIZE {
                self.flush(&mut pending)?;
            }
        }
        self.flush(&mut pending)?;

        info!("{}", report.summary());
        Ok(report)
    }

    /// Diagnostic view of one stored record, without persisting anything.
    pub fn analyze_day(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<(TimeRecord, Analysis, TimeCalculation)> {
        let record = self
            .store
            .record(employee_id, date)?
            .ok_or_else(|| AppError::not_found(format!("No record for {employee_id} on {date}")))?;

        let employee = self
            .store
            .employee(employee_id)?
            .ok_or_else(|| AppError::not_found(format!("Employee '{employee_id}'")))?;
        let shift = self.shift_for(&employee)?;

        let analysis = analyze(&record, shift.as_ref());
        let calculation = calculate(&record, shift.as_ref());
        Ok((record, analysis, calculation))
    }

    /// Run the pure engine over one record. Does not persist.
    fn run_engine(
        &self,
        mut record: TimeRecord,
        shift: Option<&Shift>,
    ) -> Result<ProcessingOutcome> {
        record.is_holiday =
            self.options.consider_holidays && self.options.holidays.contains(&record.date);
        if !self.options.consider_weekends {
            record.is_weekend = false;
        }

        let calculation = calculate(&record, shift);
        let has_issues = calculation.late_minutes > 0
            || calculation.early_leave_minutes > 0
            || calculation.missing_minutes > 0
            || calculation.excessive_lunch_minutes > LUNCH_REVIEW_THRESHOLD;

        let occurrences = if self.options.generate_occurrences {
            generate(&record, &calculation, shift)
        } else {
            Vec::new()
        };

        Ok(ProcessingOutcome {
            is_complete: record.is_complete(),
            record,
            calculation,
            occurrences,
            has_issues,
        })
    }

    /// Persist a batch of outcomes: record + metrics upsert, then the
    /// atomic occurrence replacement.
    fn flush(&mut self, pending: &mut Vec<ProcessingOutcome>) -> Result<()> {
        for outcome in pending.drain(..) {
            self.store.save_record(&outcome.record, &outcome.calculation)?;
            if self.options.generate_occurrences {
                self.store.replace_occurrences(
                    &outcome.record.employee_id,
                    outcome.record.date,
                    outcome.occurrences,
                )?;
            }
        }
        Ok(())
    }

    /// Resolve the employee's shift, treating missing or inactive shifts as
    /// "no shift" so the day still gets best-effort metrics.
    fn shift_for(&self, employee: &Employee) -> Result<Option<Shift>> {
        let Some(shift_id) = employee.shift_id.as_deref() else {
            return Ok(None);
        };
        match self.store.shift(shift_id)? {
            Some(shift) if shift.is_active => Ok(Some(shift)),
            Some(_) => {
                warn!(employee = %employee.id, shift = shift_id, "Shift inactive, ignoring");
                Ok(None)
            }
            None => {
                warn!(employee = %employee.id, shift = shift_id, "Shift not found, ignoring");
                Ok(None)
            }
        }
    }
}
