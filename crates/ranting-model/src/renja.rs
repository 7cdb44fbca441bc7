//! Annual work plans (rencana kerja).

use serde::{Deserialize, Serialize};

use crate::month::Month;

/// One month of a work plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenjaItem {
    pub month: Month,
    pub program: String,
    pub indicator: String,
}

/// A generated work plan with one entry per calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenjaPlan {
    pub id: String,
    pub year: i32,
    pub plan: Vec<RenjaItem>,
}
