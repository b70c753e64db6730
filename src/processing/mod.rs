//! Time-record interpretation and calculation engine.
//!
//! The pure core of the back office: interpreter, calculator, analyzer and
//! occurrence generator are deterministic functions with no I/O, safe to run
//! concurrently. The pipeline module wires them to a persistence port.

pub mod analyzer;
pub mod calculator;
pub mod interpreter;
pub mod occurrences;
pub mod pipeline;


pub use analyzer::{Analysis, analyze};
pub use calculator::calculate;
pub use interpreter::{Interpretation, PairKind, PunchPattern, interpret};
pub use occurrences::generate;
pub use pipeline::{
    ProcessingOptions, ProcessingOutcome, ProcessingReport, Processor, RangeFilter,
};
