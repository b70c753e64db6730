//! Employee master data.

use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// Employee reference as the processing pipeline sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Shift assignment; an employee may have no shift.
    #[serde(default)]
    pub shift_id: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}
