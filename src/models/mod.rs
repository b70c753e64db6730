//! Domain model types.

pub mod employee;
pub mod occurrence;
pub mod shift;
pub mod time_record;

pub use employee::Employee;
pub use occurrence::{Occurrence, OccurrenceStatus, OccurrenceType};
pub use shift::Shift;
pub use time_record::{RawPunchSet, TimeCalculation, TimeRecord};
