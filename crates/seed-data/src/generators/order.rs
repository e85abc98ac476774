//! Order and order line generation.

use rand::Rng;
use rand::seq::SliceRandom;

use marketplace::models::OrderStatus;

use super::{GenerateError, money, pick_id};

/// Generated order data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedOrder {
    pub user_id: i32,
    pub status: OrderStatus,
    pub total_amount: f64,
}

/// Generated order line ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedOrderItem {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Configuration for order generation.
#[derive(Debug, Clone)]
pub struct OrderGenConfig {
    /// Inclusive order total range.
    pub total_range: (f64, f64),
    /// Inclusive quantity range per line.
    pub quantity_range: (i32, i32),
    /// Inclusive unit price range per line.
    pub unit_price_range: (f64, f64),
}

impl Default for OrderGenConfig {
    fn default() -> Self {
        Self {
            total_range: (20.0, 2000.0),
            quantity_range: (1, 5),
            unit_price_range: (10.0, 500.0),
        }
    }
}

/// Generates orders placed by existing users.
///
/// Totals are drawn independently of the order's lines.
#[derive(Debug, Default)]
pub struct OrderGenerator {
    config: OrderGenConfig,
}

impl OrderGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OrderGenConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        user_ids: &[i32],
        rng: &mut impl Rng,
    ) -> Result<GeneratedOrder, GenerateError> {
        let (min_total, max_total) = self.config.total_range;
        let status = OrderStatus::ALL
            .choose(rng)
            .copied()
            .unwrap_or(OrderStatus::Pending);

        Ok(GeneratedOrder {
            user_id: pick_id(user_ids, "users", rng)?,
            status,
            total_amount: money(min_total, max_total, rng),
        })
    }

    pub fn generate_batch(
        &self,
        count: usize,
        user_ids: &[i32],
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedOrder>, GenerateError> {
        (0..count).map(|_| self.generate(user_ids, rng)).collect()
    }
}

/// Generates order lines linking existing orders to existing products.
#[derive(Debug, Default)]
pub struct OrderItemGenerator {
    config: OrderGenConfig,
}

impl OrderItemGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OrderGenConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        order_ids: &[i32],
        product_ids: &[i32],
        rng: &mut impl Rng,
    ) -> Result<GeneratedOrderItem, GenerateError> {
        let (min_qty, max_qty) = self.config.quantity_range;
        let (min_price, max_price) = self.config.unit_price_range;

        Ok(GeneratedOrderItem {
            order_id: pick_id(order_ids, "orders", rng)?,
            product_id: pick_id(product_ids, "products", rng)?,
            quantity: rng.gen_range(min_qty..=max_qty),
            unit_price: money(min_price, max_price, rng),
        })
    }

    /// Generates `count` lines spread randomly across orders.
    pub fn generate_batch(
        &self,
        count: usize,
        order_ids: &[i32],
        product_ids: &[i32],
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedOrderItem>, GenerateError> {
        (0..count)
            .map(|_| self.generate(order_ids, product_ids, rng))
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
    fn test_orders_reference_users() {
        let mut rng = StdRng::seed_from_u64(12345);
        let orders = OrderGenerator::new()
            .generate_batch(200, &ordinal_ids(50), &mut rng)
            .unwrap();

        assert_eq!(orders.len(), 200);
        for order in &orders {
            assert!((1..=50).contains(&order.user_id));
            assert!((20.0..=2000.0).contains(&order.total_amount));
        }
        // 200 draws over 5 statuses should hit more than one
        assert!(orders.iter().any(|o| o.status != orders[0].status));
    }

    #[test]
    fn test_order_items_within_ranges() {
        let mut rng = StdRng::seed_from_u64(12345);
        let items = OrderItemGenerator::new()
            .generate_batch(500, &ordinal_ids(200), &ordinal_ids(100), &mut rng)
            .unwrap();

        assert_eq!(items.len(), 500);
        for item in &items {
            assert!((1..=200).contains(&item.order_id));
            assert!((1..=100).contains(&item.product_id));
            assert!((1..=5).contains(&item.quantity));
            assert!((10.0..=500.0).contains(&item.unit_price));
        }
    }

    #[test]
    fn test_order_items_use_given_keys() {
        let mut rng = StdRng::seed_from_u64(3);
        let order_ids = [1001, 1002];
        let product_ids = [77];
        let items = OrderItemGenerator::new()
            .generate_batch(20, &order_ids, &product_ids, &mut rng)
            .unwrap();

        assert!(items.iter().all(|i| order_ids.contains(&i.order_id)));
        assert!(items.iter().all(|i| i.product_id == 77));
    }

    #[test]
    fn test_order_items_need_products() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = OrderItemGenerator::new()
            .generate(&[1], &[], &mut rng)
            .unwrap_err();
        assert!(matches!(err, GenerateError::EmptyParent { table: "products" }));
    }
}
