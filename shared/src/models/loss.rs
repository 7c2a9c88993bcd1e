//! Loss record model

use serde::{Deserialize, Serialize};

/// Operational loss entry (spoilage, refunds outside the order flow, ...)
///
/// Append-only: created once, never updated, removed only by the
/// administrative bulk clear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LossRecord {
    pub id: String,
    /// Amount in currency unit
    pub amount: f64,
    pub description: String,
    /// Creation time, Unix millis
    pub timestamp: i64,
}
