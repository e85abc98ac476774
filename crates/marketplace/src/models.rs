//! Closed value sets stored in the marketplace's `VARCHAR` status columns.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an order (`orders.status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// How an order was paid (`payments.payment_method`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Paypal,
        PaymentMethod::BankTransfer,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }
}

/// Settlement state of a payment (`payments.status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    Standard,
    Express,
    Overnight,
    International,
}

impl ShippingMethod {
    pub const ALL: [ShippingMethod; 4] = [
        ShippingMethod::Standard,
        ShippingMethod::Express,
        ShippingMethod::Overnight,
        ShippingMethod::International,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "standard",
            ShippingMethod::Express => "express",
            ShippingMethod::Overnight => "overnight",
            ShippingMethod::International => "international",
        }
    }
}

/// Whether `discounts.discount_value` is a percentage or a currency amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    FixedAmount,
}

impl DiscountType {
    pub const ALL: [DiscountType; 2] = [DiscountType::Percentage, DiscountType::FixedAmount];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::FixedAmount => "fixed_amount",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_strings_fit_status_columns() {
        // status/method columns are VARCHAR(50), discount_type is VARCHAR(20)
        let statuses = OrderStatus::ALL.iter().map(|s| s.as_str());
        let methods = PaymentMethod::ALL.iter().map(|m| m.as_str());
        let payment_statuses = PaymentStatus::ALL.iter().map(|s| s.as_str());
        let shipping = ShippingMethod::ALL.iter().map(|m| m.as_str());

        for value in statuses.chain(methods).chain(payment_statuses).chain(shipping) {
            assert!(!value.is_empty() && value.len() <= 50, "{value}");
        }
        for value in DiscountType::ALL.iter().map(|t| t.as_str()) {
            assert!(value.len() <= 20, "{value}");
        }
    }

    #[test]
    fn test_db_strings_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for value in OrderStatus::ALL.iter().map(|s| s.as_str()) {
            assert!(seen.insert(value));
        }

        let mut seen = std::collections::HashSet::new();
        for value in PaymentStatus::ALL.iter().map(|s| s.as_str()) {
            assert!(seen.insert(value));
        }
    }
}
