//! Synthetic data for the marketplace schema.
//!
//! This crate generates plausible users, categories, products, orders, order
//! lines, payments, reviews, shipping records and discounts, and inserts them
//! parents-first so every foreign key points at a row that exists.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let result = ScenarioBuilder::marketplace()
//!     .with_metrics(true)
//!     .build(&pool, &mut rng)
//!     .await?;
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{ScenarioBuilder, ScenarioMetrics, ScenarioResult};
    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, Seeder};
    pub use crate::generators::{
        CategoryGenerator, DiscountGenerator, GenerateError, OrderGenerator, OrderItemGenerator,
        PaymentGenerator, ProductGenerator, ReviewGenerator, ShippingGenerator, UserGenerator,
    };
}
