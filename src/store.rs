//! Persistence port for processed records.
//!
//! The calculation engine itself is pure; everything that touches storage
//! goes through [`RecordStore`]. The batch processor receives a store by
//! injection, so the engine never holds a database handle of its own.

use crate::error::{AppError, Result};
use crate::models::{Employee, Occurrence, Shift, TimeCalculation, TimeRecord};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Storage boundary the processing pipeline writes through.
///
/// Implementations must enforce uniqueness of (employee, date) and make
/// `replace_occurrences` atomic per record (delete-then-insert).
pub trait RecordStore {
    fn employee(&self, id: &str) -> Result<Option<Employee>>;

    fn shift(&self, id: &str) -> Result<Option<Shift>>;

    fn record(&self, employee_id: &str, date: NaiveDate) -> Result<Option<TimeRecord>>;

    /// Records in `[from, to]`, optionally restricted to one employee,
    /// ordered by date.
    fn records_in_range(
        &self,
        employee_id: Option<&str>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeRecord>>;

    /// Upsert the canonical record and its freshly computed metrics.
    fn save_record(&mut self, record: &TimeRecord, calculation: &TimeCalculation) -> Result<()>;

    /// Replace all stored occurrences of one record with a new set.
    fn replace_occurrences(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        occurrences: Vec<Occurrence>,
    ) -> Result<()>;

    fn occurrences(&self, employee_id: &str, date: NaiveDate) -> Result<Vec<Occurrence>>;
}

/// In-memory store backing the CLI runs and the test suite.
#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: HashMap<String, Employee>,
    shifts: HashMap<String, Shift>,
    records: BTreeMap<(String, NaiveDate), (TimeRecord, TimeCalculation)>,
    occurrences: HashMap<(String, NaiveDate), Vec<Occurrence>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Register a shift under its name.
    pub fn add_shift(&mut self, shift: Shift) {
        self.shifts.insert(shift.name.clone(), shift);
    }

    /// Seed a raw record, e.g. from the punch-sheet importer.
    pub fn insert_record(&mut self, record: TimeRecord) {
        let key = (record.employee_id.clone(), record.date);
        self.records
            .insert(key, (record, TimeCalculation::default()));
    }

    pub fn calculation(&self, employee_id: &str, date: NaiveDate) -> Option<&TimeCalculation> {
        self.records
            .get(&(employee_id.to_string(), date))
            .map(|(_, calc)| calc)
    }
}

impl RecordStore for MemoryStore {
    fn employee(&self, id: &str) -> Result<Option<Employee>> {
        Ok(self.employees.get(id).cloned())
    }

    fn shift(&self, id: &str) -> Result<Option<Shift>> {
        Ok(self.shifts.get(id).cloned())
    }

    fn record(&self, employee_id: &str, date: NaiveDate) -> Result<Option<TimeRecord>> {
        Ok(self
            .records
            .get(&(employee_id.to_string(), date))
            .map(|(record, _)| record.clone()))
    }

    fn records_in_range(
        &self,
        employee_id: Option<&str>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeRecord>> {
        if to < from {
            return Err(AppError::validation("End date must not precede start date"));
        }
        Ok(self
            .records
            .values()
            .filter(|(record, _)| {
                record.date >= from
                    && record.date <= to
                    && employee_id.is_none_or(|id| record.employee_id == id)
            })
            .map(|(record, _)| record.clone())
            .collect())
    }

    fn save_record(&mut self, record: &TimeRecord, calculation: &TimeCalculation) -> Result<()> {
        let key = (record.employee_id.clone(), record.date);
        self.records
            .insert(key, (record.clone(), calculation.clone()));
        Ok(())
    }

    fn replace_occurrences(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        occurrences: Vec<Occurrence>,
    ) -> Result<()> {
        let key = (employee_id.to_string(), date);
        if occurrences.is_empty() {
            self.occurrences.remove(&key);
        } else {
            self.occurrences.insert(key, occurrences);
        }
        Ok(())
    }

    fn occurrences(&self, employee_id: &str, date: NaiveDate) -> Result<Vec<Occurrence>> {
        Ok(self
            .occurrences
            .get(&(employee_id.to_string(), date))
            .cloned()
            .unwrap_or_default())
    }
}
