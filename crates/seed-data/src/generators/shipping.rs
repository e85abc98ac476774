//! Shipping record generation, one per order.

use fake::{
    Fake,
    faker::address::en::{
        BuildingNumber, CityName, CountryName, PostCode, SecondaryAddress, StateName, StreetName,
    },
};
use rand::Rng;
use rand::seq::SliceRandom;

use marketplace::models::ShippingMethod;

use super::random_code;

pub const TRACKING_NUMBER_LEN: usize = 12;

/// Probability that an address carries a second line (apartment, suite).
const SECOND_LINE_PROBABILITY: f64 = 0.5;

/// Generated shipping data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedShipping {
    pub order_id: i32,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub tracking_number: String,
    pub shipping_method: ShippingMethod,
}

#[derive(Debug, Default)]
pub struct ShippingGenerator;

impl ShippingGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates exactly one shipping record for each order, in the given order.
    pub fn generate_for_orders(
        &self,
        order_ids: &[i32],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedShipping> {
        order_ids
            .iter()
            .map(|&order_id| self.generate(order_id, rng))
            .collect()
    }

    fn generate(&self, order_id: i32, rng: &mut impl Rng) -> GeneratedShipping {
        let number: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);

        let address_line2 = if rng.r#gen::<f64>() < SECOND_LINE_PROBABILITY {
            Some(SecondaryAddress().fake_with_rng(rng))
        } else {
            None
        };

        GeneratedShipping {
            order_id,
            address_line1: format!("{number} {street}"),
            address_line2,
            city: CityName().fake_with_rng(rng),
            state: StateName().fake_with_rng(rng),
            postal_code: PostCode().fake_with_rng(rng),
            country: CountryName().fake_with_rng(rng),
            tracking_number: random_code(TRACKING_NUMBER_LEN, rng),
            shipping_method: *ShippingMethod::ALL
                .choose(rng)
                .unwrap_or(&ShippingMethod::Standard),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::ordinal_ids;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_one_shipping_record_per_order() {
        let mut rng = StdRng::seed_from_u64(12345);
        let order_ids = ordinal_ids(200);
        let records = ShippingGenerator::new().generate_for_orders(&order_ids, &mut rng);

        assert_eq!(records.len(), 200);
        for (record, order_id) in records.iter().zip(&order_ids) {
            assert_eq!(record.order_id, *order_id);
            assert_eq!(record.tracking_number.len(), TRACKING_NUMBER_LEN);
            assert!(!record.address_line1.is_empty());
            assert!(record.postal_code.len() <= 20);
        }

        // Roughly half carry a second line
        let with_line2 = records.iter().filter(|r| r.address_line2.is_some()).count();
        assert!(with_line2 > 50 && with_line2 < 150, "{with_line2}");
    }
}
