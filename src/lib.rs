pub mod config;
pub mod error;
pub mod importer;
pub mod models;
pub mod processing;
pub mod store;
pub mod timeutil;

pub use error::{AppError, Result};
