//! Payment generation, one per order.

use rand::Rng;
use rand::seq::SliceRandom;

use marketplace::models::{PaymentMethod, PaymentStatus};

use super::{money, random_code};

pub const TRANSACTION_ID_LEN: usize = 10;

/// Generated payment data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedPayment {
    pub order_id: i32,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: String,
}

#[derive(Debug, Default)]
pub struct PaymentGenerator;

impl PaymentGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates exactly one payment for each order, in the given order.
    pub fn generate_for_orders(
        &self,
        order_ids: &[i32],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedPayment> {
        order_ids
            .iter()
            .map(|&order_id| GeneratedPayment {
                order_id,
                amount: money(20.0, 2000.0, rng),
                payment_method: *PaymentMethod::ALL
                    .choose(rng)
                    .unwrap_or(&PaymentMethod::CreditCard),
                status: *PaymentStatus::ALL
                    .choose(rng)
                    .unwrap_or(&PaymentStatus::Pending),
                transaction_id: random_code(TRANSACTION_ID_LEN, rng),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::ordinal_ids;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_one_payment_per_order() {
        let mut rng = StdRng::seed_from_u64(12345);
        let order_ids = ordinal_ids(200);
        let payments = PaymentGenerator::new().generate_for_orders(&order_ids, &mut rng);

        assert_eq!(payments.len(), 200);
        for (payment, order_id) in payments.iter().zip(&order_ids) {
            assert_eq!(payment.order_id, *order_id);
            assert_eq!(payment.transaction_id.len(), TRANSACTION_ID_LEN);
            assert!((20.0..=2000.0).contains(&payment.amount));
        }
    }

    #[test]
    fn test_no_orders_no_payments() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(PaymentGenerator::new().generate_for_orders(&[], &mut rng).is_empty());
    }
}
