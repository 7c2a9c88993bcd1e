//! Dashboard statistics
//!
//! Pure aggregation over a mirrored snapshot; recomputed by the UI on
//! every mirror update, never persisted.

use shared::OrderStatus;

use crate::decode::StoreData;

/// Back-office dashboard aggregates
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    /// Sum of archived order totals with a revenue-counted status
    pub revenue: f64,
    /// Units sold across revenue-counted archived orders
    pub items_sold: u64,
    /// Sum of all loss records
    pub total_loss: f64,
    /// Revenue minus losses
    pub net: f64,
    /// Active (unresolved) order count
    pub pending: usize,
}

impl DashboardStats {
    pub fn compute(data: &StoreData) -> Self {
        let counted = data
            .history
            .iter()
            .filter(|o| o.status.counts_as_revenue());

        let mut revenue = 0.0;
        let mut items_sold = 0u64;
        for order in counted {
            revenue += order.total;
            items_sold += order.items.iter().map(|i| u64::from(i.qty)).sum::<u64>();
        }

        let total_loss: f64 = data.losses.iter().map(|l| l.amount).sum();

        Self {
            revenue,
            items_sold,
            total_loss,
            net: revenue - total_loss,
            pending: data.active.len(),
        }
    }
}
