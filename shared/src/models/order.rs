//! Order model and status state machine
//!
//! An order lives in the `transactions` branch while open and is moved to
//! the `history` branch once it reaches a terminal status. Wire field
//! names follow the remote database (`type`, `proofUrl`, lowercase
//! statuses).

use serde::{Deserialize, Serialize};

/// Payment type chosen at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[default]
    Cash,
    Qris,
}

/// Order status
///
/// Nominal machine: `pending → paid → {confirmed, rejected}` plus
/// `pending → cancelled`. `completed` appears only on archived orders
/// (administrative correction). Terminal statuses live in `history`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Confirmed,
    Rejected,
    Cancelled,
    Completed,
}

impl OrderStatus {
    /// Whether this status ends the active lifecycle.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Confirmed | Self::Rejected | Self::Cancelled | Self::Completed
        )
    }

    /// Whether an archived order with this status counts as a sale.
    pub fn counts_as_revenue(self) -> bool {
        matches!(self, Self::Confirmed | Self::Completed | Self::Paid)
    }

    /// Nominal transition legality.
    ///
    /// The lifecycle controller does not enforce this; it only warns when
    /// a caller steps outside the machine, so observed behavior stays
    /// identical to the shipping storefront.
    pub fn can_transition(self, to: OrderStatus) -> bool {
        match self {
            Self::Pending => matches!(
                to,
                Self::Paid | Self::Confirmed | Self::Rejected | Self::Cancelled
            ),
            Self::Paid => matches!(to, Self::Confirmed | Self::Rejected | Self::Cancelled),
            _ => false,
        }
    }

    /// Lowercase wire name, also used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer contact details captured at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub name: String,
    /// WhatsApp number with country prefix, digits only
    #[serde(rename = "wa")]
    pub whatsapp: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// Order line item — a snapshot copy of the product at order time, not a
/// live reference into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Product id at the time of ordering
    pub id: u32,
    pub name: String,
    pub qty: u32,
    /// Unit price in currency unit
    pub price: f64,
}

/// Order entity ("transaction" on the wire)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Client-generated unique id, doubles as the remote slot key
    pub id: String,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
    /// Grand total in currency unit, fixed at creation time
    pub total: f64,
    /// Delivery/service fee in currency unit
    pub fee: f64,
    pub status: OrderStatus,
    /// Creation time, Unix millis
    pub timestamp: i64,
    /// Proof-of-payment reference (URL or data URI)
    #[serde(rename = "proofUrl", default, skip_serializing_if = "Option::is_none")]
    pub proof_url: Option<String>,
}

impl Order {
    /// Total implied by the line items plus fee. Checked nowhere after
    /// creation; provided for forms that want to pre-fill `total`.
    pub fn items_total(&self) -> f64 {
        let items: f64 = self
            .items
            .iter()
            .map(|item| item.price * f64::from(item.qty))
            .sum();
        items + self.fee
    }
}
