//! Database integration for seeding generated data.
//!
//! The [`Seeder`] writes generated rows with multi-row inserts on a caller-owned
//! connection, so a whole run can share one transaction.

mod seeder;

pub use seeder::{SeedError, Seeder};
