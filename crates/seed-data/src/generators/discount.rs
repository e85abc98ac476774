//! Discount code generation.

use std::collections::HashSet;

use fake::{Fake, faker::lorem::en::Sentence};
use rand::Rng;
use rand::seq::SliceRandom;
use time::{Duration, PrimitiveDateTime};

use marketplace::models::DiscountType;

use super::{GenerateError, MAX_UNIQUE_ATTEMPTS, money, random_code};

/// Generated discount data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedDiscount {
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub start_date: PrimitiveDateTime,
    pub end_date: PrimitiveDateTime,
    pub minimum_purchase: f64,
    pub usage_limit: i32,
}

/// Configuration for discount generation.
#[derive(Debug, Clone)]
pub struct DiscountGenConfig {
    pub code_length: usize,
    /// Start date offset from now, in days (inclusive, may be negative).
    pub start_offset_days: (i64, i64),
    /// Validity window length, in days (inclusive).
    pub duration_days: (i64, i64),
    pub value_range: (f64, f64),
    pub minimum_purchase_range: (f64, f64),
    pub usage_limit_range: (i32, i32),
}

impl Default for DiscountGenConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            start_offset_days: (-30, 30),
            duration_days: (1, 90),
            value_range: (5.0, 50.0),
            minimum_purchase_range: (50.0, 200.0),
            usage_limit_range: (50, 1000),
        }
    }
}

/// Generates discounts whose codes are unique across the generator's lifetime.
#[derive(Debug, Default)]
pub struct DiscountGenerator {
    config: DiscountGenConfig,
    codes: HashSet<String>,
}

impl DiscountGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiscountGenConfig) -> Self {
        Self {
            config,
            codes: HashSet::new(),
        }
    }

    /// Generates a discount whose window is placed relative to `now`.
    pub fn generate(
        &mut self,
        now: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Result<GeneratedDiscount, GenerateError> {
        let code = self.unique_code(rng)?;
        let config = &self.config;

        let (min_offset, max_offset) = config.start_offset_days;
        let (min_days, max_days) = config.duration_days;
        let start_date = now + Duration::days(rng.gen_range(min_offset..=max_offset));
        let end_date = start_date + Duration::days(rng.gen_range(min_days..=max_days));

        Ok(GeneratedDiscount {
            code,
            description: Sentence(4..10).fake_with_rng(rng),
            discount_type: *DiscountType::ALL
                .choose(rng)
                .unwrap_or(&DiscountType::Percentage),
            discount_value: money(config.value_range.0, config.value_range.1, rng),
            start_date,
            end_date,
            minimum_purchase: money(
                config.minimum_purchase_range.0,
                config.minimum_purchase_range.1,
                rng,
            ),
            usage_limit: rng.gen_range(config.usage_limit_range.0..=config.usage_limit_range.1),
        })
    }

    pub fn generate_batch(
        &mut self,
        count: usize,
        now: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedDiscount>, GenerateError> {
        (0..count).map(|_| self.generate(now, rng)).collect()
    }

    fn unique_code(&mut self, rng: &mut impl Rng) -> Result<String, GenerateError> {
        for _ in 0..MAX_UNIQUE_ATTEMPTS {
            let code = random_code(self.config.code_length, rng);
            if self.codes.insert(code.clone()) {
                return Ok(code);
            }
        }

        Err(GenerateError::Exhausted {
            what: "discount code",
            attempts: MAX_UNIQUE_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::datetime;

    #[test]
    fn test_discount_windows() {
        let now = datetime!(2024-06-01 12:00);
        let mut rng = StdRng::seed_from_u64(12345);
        let discounts = DiscountGenerator::new()
            .generate_batch(20, now, &mut rng)
            .unwrap();

        assert_eq!(discounts.len(), 20);
        for discount in &discounts {
            assert!(discount.start_date >= now - Duration::days(30));
            assert!(discount.start_date <= now + Duration::days(30));
            let window = discount.end_date - discount.start_date;
            assert!(window >= Duration::days(1) && window <= Duration::days(90));
            assert!((5.0..=50.0).contains(&discount.discount_value));
            assert!((50.0..=200.0).contains(&discount.minimum_purchase));
            assert!((50..=1000).contains(&discount.usage_limit));
        }
    }

    #[test]
    fn test_codes_unique_within_run() {
        let now = datetime!(2024-06-01 12:00);
        let mut rng = StdRng::seed_from_u64(12345);
        let discounts = DiscountGenerator::new()
            .generate_batch(500, now, &mut rng)
            .unwrap();

        let codes: HashSet<_> = discounts.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes.len(), 500);
        assert!(discounts.iter().all(|d| d.code.len() == 6));
    }

    #[test]
    fn test_exhausted_code_space() {
        // One-character codes: 36 possibilities
        let mut discount_gen = DiscountGenerator::with_config(DiscountGenConfig {
            code_length: 1,
            ..Default::default()
        });
        let now = datetime!(2024-06-01 12:00);
        let mut rng = StdRng::seed_from_u64(9);

        let err = discount_gen.generate_batch(37, now, &mut rng).unwrap_err();
        assert!(matches!(err, GenerateError::Exhausted { .. }));
    }
}
