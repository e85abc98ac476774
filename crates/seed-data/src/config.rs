//! Configuration types for seeding runs.

use serde::{Deserialize, Serialize};

/// Postgres rejects statements with more bind parameters than this.
pub const MAX_BIND_PARAMS: usize = 65_535;

/// Row counts for one seeding run.
///
/// Payments and shipping records are generated one per order, and the category
/// tree is fixed, so neither has a count here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    pub users: usize,
    pub products: usize,
    pub orders: usize,
    pub order_items: usize,
    pub reviews: usize,
    pub discounts: usize,

    /// Maximum rows per multi-row INSERT.
    pub batch_size: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 50,
            products: 100,
            orders: 200,
            order_items: 500,
            reviews: 300,
            discounts: 20,
            batch_size: 1000,
        }
    }
}
