//! Fluent builder for constructing seeding runs.

use std::time::Instant;

use rand::Rng;
use sqlx::{PgConnection, PgPool};
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::{error, info};

use crate::config::SeedConfig;
use crate::db::{SeedError, Seeder};
use crate::generators::{
    CategoryGenerator, DiscountGenConfig, DiscountGenerator, GenerateError, GeneratedCategory,
    GeneratedDiscount, GeneratedOrder, GeneratedOrderItem, GeneratedPayment, GeneratedProduct,
    GeneratedReview, GeneratedShipping, GeneratedUser, OrderGenConfig, OrderGenerator,
    OrderItemGenerator, PaymentGenerator, ProductGenConfig, ProductGenerator, ReviewGenerator,
    ShippingGenerator, UserGenerator, ordinal_ids,
};

/// Rows produced by a run, per table, in insertion order.
#[derive(Debug)]
pub struct ScenarioResult {
    pub users: Vec<GeneratedUser>,
    pub categories: Vec<GeneratedCategory>,
    pub products: Vec<GeneratedProduct>,
    pub orders: Vec<GeneratedOrder>,
    pub order_items: Vec<GeneratedOrderItem>,
    pub payments: Vec<GeneratedPayment>,
    pub reviews: Vec<GeneratedReview>,
    pub shipping: Vec<GeneratedShipping>,
    pub discounts: Vec<GeneratedDiscount>,
    /// Metrics from the run (populated if metrics tracking enabled).
    pub metrics: Option<ScenarioMetrics>,
}

impl ScenarioResult {
    /// Row count per table, parents first.
    pub fn table_counts(&self) -> [(&'static str, usize); 9] {
        [
            ("users", self.users.len()),
            ("categories", self.categories.len()),
            ("products", self.products.len()),
            ("orders", self.orders.len()),
            ("order_items", self.order_items.len()),
            ("payments", self.payments.len()),
            ("reviews", self.reviews.len()),
            ("shipping_info", self.shipping.len()),
            ("discounts", self.discounts.len()),
        ]
    }

    pub fn total_rows(&self) -> usize {
        self.table_counts().iter().map(|(_, count)| count).sum()
    }
}

/// Timing metrics from a run.
#[derive(Debug, Clone)]
pub struct ScenarioMetrics {
    /// Time spent generating rows (milliseconds).
    pub generation_time_ms: u64,
    /// Time spent in INSERT statements (milliseconds, 0 if build_data used).
    pub seeding_time_ms: u64,
}

/// Builder for a complete seeding run.
///
/// # Example
///
/// ```rust,ignore
/// let result = ScenarioBuilder::new()
///     .with_config(SeedConfig { users: 10, ..Default::default() })
///     .with_metrics(true)
///     .build(&pool, &mut rng)
///     .await?;
/// ```
pub struct ScenarioBuilder {
    config: SeedConfig,
    product_config: ProductGenConfig,
    order_config: OrderGenConfig,
    discount_config: DiscountGenConfig,

    // Reference time for discount windows; defaults to the current UTC time
    now: Option<PrimitiveDateTime>,
    track_metrics: bool,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Creates a builder with the default marketplace volumes.
    pub fn new() -> Self {
        Self {
            config: SeedConfig::default(),
            product_config: ProductGenConfig::default(),
            order_config: OrderGenConfig::default(),
            discount_config: DiscountGenConfig::default(),
            now: None,
            track_metrics: false,
        }
    }

    /// Sets row counts and batch size.
    pub fn with_config(mut self, config: SeedConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_product_config(mut self, config: ProductGenConfig) -> Self {
        self.product_config = config;
        self
    }

    /// Sets order totals and order line ranges.
    pub fn with_order_config(mut self, config: OrderGenConfig) -> Self {
        self.order_config = config;
        self
    }

    pub fn with_discount_config(mut self, config: DiscountGenConfig) -> Self {
        self.discount_config = config;
        self
    }

    /// Pins the reference time discount windows are placed around.
    pub fn with_now(mut self, now: PrimitiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    /// Enables timing metrics on the result.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Generates every table without touching a database.
    ///
    /// Foreign keys assume a fresh schema: parent rows receive keys `1..=n`
    /// in generation order.
    pub fn build_data(&self, rng: &mut impl Rng) -> Result<ScenarioResult, GenerateError> {
        let start_time = self.track_metrics.then(Instant::now);

        let users = UserGenerator::new().generate_batch(self.config.users, rng)?;
        let user_ids = ordinal_ids(users.len());

        let category_gen = CategoryGenerator::new();
        let mut categories = category_gen.main_categories();
        categories.extend(category_gen.sub_categories(&ordinal_ids(categories.len()))?);
        let category_ids = ordinal_ids(categories.len());

        let products = ProductGenerator::with_config(self.product_config.clone()).generate_batch(
            self.config.products,
            &user_ids,
            &category_ids,
            rng,
        )?;
        let product_ids = ordinal_ids(products.len());

        let orders = OrderGenerator::with_config(self.order_config.clone()).generate_batch(
            self.config.orders,
            &user_ids,
            rng,
        )?;
        let order_ids = ordinal_ids(orders.len());

        let order_items = OrderItemGenerator::with_config(self.order_config.clone())
            .generate_batch(self.config.order_items, &order_ids, &product_ids, rng)?;
        let payments = PaymentGenerator::new().generate_for_orders(&order_ids, rng);
        let reviews = ReviewGenerator::new().generate_batch(
            self.config.reviews,
            &product_ids,
            &user_ids,
            rng,
        )?;
        let shipping = ShippingGenerator::new().generate_for_orders(&order_ids, rng);
        let discounts = DiscountGenerator::with_config(self.discount_config.clone())
            .generate_batch(self.config.discounts, self.reference_time(), rng)?;

        let metrics = start_time.map(|start| ScenarioMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            seeding_time_ms: 0,
        });

        Ok(ScenarioResult {
            users,
            categories,
            products,
            orders,
            order_items,
            payments,
            reviews,
            shipping,
            discounts,
            metrics,
        })
    }

    /// Generates and inserts every table in one transaction.
    ///
    /// Each child table is generated only after its parents are inserted, from
    /// the keys the database actually returned. Nothing is committed unless
    /// every table succeeds.
    pub async fn build(
        self,
        pool: &PgPool,
        rng: &mut impl Rng,
    ) -> Result<ScenarioResult, SeedError> {
        match self.seed_transaction(pool, rng).await {
            Ok(result) => {
                info!("Sample data inserted successfully");
                Ok(result)
            }
            Err(e) => {
                error!("Error inserting sample data: {e}");
                Err(e)
            }
        }
    }

    async fn seed_transaction(
        &self,
        pool: &PgPool,
        rng: &mut impl Rng,
    ) -> Result<ScenarioResult, SeedError> {
        let mut tx = pool.begin().await?;
        let result = self.seed_tables(&mut *tx, rng).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn seed_tables(
        &self,
        conn: &mut PgConnection,
        rng: &mut impl Rng,
    ) -> Result<ScenarioResult, SeedError> {
        let start_time = Instant::now();
        let mut generation = std::time::Duration::ZERO;
        let seeder = Seeder::new().with_batch_size(self.config.batch_size);

        let mut timed = Instant::now();
        let users = UserGenerator::new().generate_batch(self.config.users, rng)?;
        generation += timed.elapsed();
        let user_ids = seeder.insert_users(conn, &users).await?;

        // Sub-categories point at the keys their main categories were given
        let category_gen = CategoryGenerator::new();
        let mut categories = category_gen.main_categories();
        let mut category_ids = seeder.insert_categories(conn, &categories).await?;
        let sub_categories = category_gen.sub_categories(&category_ids)?;
        category_ids.extend(seeder.insert_categories(conn, &sub_categories).await?);
        categories.extend(sub_categories);

        timed = Instant::now();
        let products = ProductGenerator::with_config(self.product_config.clone()).generate_batch(
            self.config.products,
            &user_ids,
            &category_ids,
            rng,
        )?;
        generation += timed.elapsed();
        let product_ids = seeder.insert_products(conn, &products).await?;

        timed = Instant::now();
        let orders = OrderGenerator::with_config(self.order_config.clone()).generate_batch(
            self.config.orders,
            &user_ids,
            rng,
        )?;
        generation += timed.elapsed();
        let order_ids = seeder.insert_orders(conn, &orders).await?;

        timed = Instant::now();
        let order_items = OrderItemGenerator::with_config(self.order_config.clone())
            .generate_batch(self.config.order_items, &order_ids, &product_ids, rng)?;
        let payments = PaymentGenerator::new().generate_for_orders(&order_ids, rng);
        let reviews = ReviewGenerator::new().generate_batch(
            self.config.reviews,
            &product_ids,
            &user_ids,
            rng,
        )?;
        let shipping = ShippingGenerator::new().generate_for_orders(&order_ids, rng);
        let discounts = DiscountGenerator::with_config(self.discount_config.clone())
            .generate_batch(self.config.discounts, self.reference_time(), rng)?;
        generation += timed.elapsed();

        seeder.insert_order_items(conn, &order_items).await?;
        seeder.insert_payments(conn, &payments).await?;
        seeder.insert_reviews(conn, &reviews).await?;
        seeder.insert_shipping(conn, &shipping).await?;
        seeder.insert_discounts(conn, &discounts).await?;

        let metrics = self.track_metrics.then(|| {
            let total = start_time.elapsed();
            ScenarioMetrics {
                generation_time_ms: generation.as_millis() as u64,
                seeding_time_ms: total.saturating_sub(generation).as_millis() as u64,
            }
        });

        Ok(ScenarioResult {
            users,
            categories,
            products,
            orders,
            order_items,
            payments,
            reviews,
            shipping,
            discounts,
            metrics,
        })
    }

    fn reference_time(&self) -> PrimitiveDateTime {
        self.now.unwrap_or_else(|| {
            let now = OffsetDateTime::now_utc();
            PrimitiveDateTime::new(now.date(), now.time())
        })
    }
}

/// Preset scenarios for common needs.
impl ScenarioBuilder {
    /// The standard development dataset (50 users, 200 orders, ...).
    pub fn marketplace() -> Self {
        Self::new()
    }

    /// A handful of rows per table, for quick smoke tests.
    pub fn small() -> Self {
        Self::new().with_config(SeedConfig {
            users: 5,
            products: 10,
            orders: 8,
            order_items: 20,
            reviews: 10,
            discounts: 3,
            ..Default::default()
        })
    }
}
