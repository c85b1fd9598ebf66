use super::category::Rgb;
use serde::{Deserialize, Serialize};

/// One weighted slice of the report ring (and one row of the list below it)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportItem {
    pub name: String,
    /// Non-negative weight, in currency units
    pub magnitude: f64,
    pub color: Rgb,
}

impl ReportItem {
    pub fn new(name: impl Into<String>, magnitude: f64, color: Rgb) -> Self {
        ReportItem {
            name: name.into(),
            magnitude,
            color,
        }
    }
}
