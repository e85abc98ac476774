//! Fluent builder APIs for seeding runs.
//!
//! The [`ScenarioBuilder`] generates every marketplace table in dependency
//! order and, optionally, writes it to the database in one transaction.

mod scenario;

pub use scenario::{ScenarioBuilder, ScenarioMetrics, ScenarioResult};
