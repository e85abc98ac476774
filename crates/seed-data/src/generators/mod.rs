//! Row generators for the marketplace tables.
//!
//! This module provides one generator per table:
//! - [`UserGenerator`]: Accounts with unique usernames/emails and hashed passwords
//! - [`CategoryGenerator`]: The fixed two-level category tree
//! - [`ProductGenerator`]: Listings owned by sellers within categories
//! - [`OrderGenerator`] / [`OrderItemGenerator`]: Orders and their line items
//! - [`PaymentGenerator`]: Exactly one payment per order
//! - [`ReviewGenerator`]: Product ratings from users
//! - [`ShippingGenerator`]: Exactly one shipping record per order
//! - [`DiscountGenerator`]: Discount codes with validity windows
//!
//! Generators for child tables take the primary keys of their parent rows as
//! slices and only ever emit foreign keys drawn from them.

pub mod category;
pub mod discount;
pub mod order;
pub mod payment;
pub mod product;
pub mod review;
pub mod shipping;
pub mod user;

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use marketplace::DbError;

pub use category::{CATEGORY_TREE, CategoryGenerator, GeneratedCategory};
pub use discount::{DiscountGenConfig, DiscountGenerator, GeneratedDiscount};
pub use order::{
    GeneratedOrder, GeneratedOrderItem, OrderGenConfig, OrderGenerator, OrderItemGenerator,
};
pub use payment::{GeneratedPayment, PaymentGenerator};
pub use product::{GeneratedProduct, ProductGenConfig, ProductGenerator};
pub use review::{GeneratedReview, ReviewGenerator};
pub use shipping::{GeneratedShipping, ShippingGenerator};
pub use user::{GeneratedUser, UserGenerator};

/// Upper bound on retries when drawing a value that must be unique in a run.
pub const MAX_UNIQUE_ATTEMPTS: usize = 100;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("No {table} rows to reference")]
    EmptyParent { table: &'static str },
    #[error("Expected {expected} {table} keys, got {found}")]
    ParentCount {
        table: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Could not draw a unique {what} after {attempts} attempts")]
    Exhausted { what: &'static str, attempts: usize },
    #[error(transparent)]
    Auth(#[from] DbError),
}

/// Picks a foreign key from the parent table's primary keys.
pub(crate) fn pick_id(
    ids: &[i32],
    table: &'static str,
    rng: &mut impl Rng,
) -> Result<i32, GenerateError> {
    ids.choose(rng)
        .copied()
        .ok_or(GenerateError::EmptyParent { table })
}

/// Draws a currency amount in `[min, max]` with cent precision.
pub(crate) fn money(min: f64, max: f64, rng: &mut impl Rng) -> f64 {
    let low = (min * 100.0).round() as i64;
    let high = (max * 100.0).round() as i64;
    rng.gen_range(low..=high) as f64 / 100.0
}

/// Random `[A-Z0-9]` string, as used for codes and reference numbers.
pub(crate) fn random_code(len: usize, rng: &mut impl Rng) -> String {
    (0..len)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Ordinal primary keys `1..=count`, what a SERIAL column hands out on a fresh table.
pub fn ordinal_ids(count: usize) -> Vec<i32> {
    (1..=count as i32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_money_has_cent_precision() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let value = money(10.0, 1000.0, &mut rng);
            assert!((10.0..=1000.0).contains(&value));
            let cents = value * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6, "{value}");
        }
    }

    #[test]
    fn test_random_code_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        let code = random_code(12, &mut rng);

        assert_eq!(code.len(), 12);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_pick_id_from_empty_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = pick_id(&[], "orders", &mut rng).unwrap_err();
        assert!(matches!(err, GenerateError::EmptyParent { table: "orders" }));
    }

    #[test]
    fn test_ordinal_ids() {
        assert_eq!(ordinal_ids(3), vec![1, 2, 3]);
        assert!(ordinal_ids(0).is_empty());
    }
}
