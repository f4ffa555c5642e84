//! Aggregated per-function rows, as shown by a summary view.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardItem {
    pub function: String,
    pub self_time: f64,
    pub self_percent: f64,
    pub total: f64,
    pub max_time: f64,
    pub count: u64,
    pub path: String,
}
