//! Database seeding utilities.

use sqlx::query_builder::Separated;
use sqlx::{PgConnection, Postgres, QueryBuilder};
use thiserror::Error;
use tracing::info;

use marketplace::schema::{self, TableSchema};

use crate::config::MAX_BIND_PARAMS;
use crate::generators::{
    GenerateError, GeneratedCategory, GeneratedDiscount, GeneratedOrder, GeneratedOrderItem,
    GeneratedPayment, GeneratedProduct, GeneratedReview, GeneratedShipping, GeneratedUser,
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Generation error: {0}")]
    Generate(#[from] GenerateError),
    #[error("Inserted {expected} {table} rows but {returned} keys came back")]
    RowCount {
        table: &'static str,
        expected: usize,
        returned: usize,
    },
}

/// Writes generated rows and reports the primary keys the database assigned.
///
/// Every insert runs on the connection it is handed; pass a transaction
/// (`&mut *tx`) to make a run all-or-nothing.
pub struct Seeder {
    batch_size: usize,
}

impl Default for Seeder {
    fn default() -> Self {
        Self::new()
    }
}

impl Seeder {
    pub fn new() -> Self {
        Self { batch_size: 1000 }
    }

    /// Sets the maximum rows per INSERT statement.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Rows per statement for a table with `columns` bound columns.
    pub fn rows_per_statement(&self, columns: usize) -> usize {
        let limit = MAX_BIND_PARAMS / columns.max(1);
        self.batch_size.clamp(1, limit)
    }

    pub async fn insert_users(
        &self,
        conn: &mut PgConnection,
        users: &[GeneratedUser],
    ) -> Result<Vec<i32>, SeedError> {
        info!("Seeding {} users...", users.len());

        let ids = self
            .insert_rows(
                conn,
                &schema::USERS,
                &["username", "email", "password_hash", "first_name", "last_name"],
                users,
                |mut b, user| {
                    b.push_bind(&user.username)
                        .push_bind(&user.email)
                        .push_bind(&user.password_hash)
                        .push_bind(&user.first_name)
                        .push_bind(&user.last_name);
                },
            )
            .await?;

        info!("Seeded {} users", ids.len());
        Ok(ids)
    }

    pub async fn insert_categories(
        &self,
        conn: &mut PgConnection,
        categories: &[GeneratedCategory],
    ) -> Result<Vec<i32>, SeedError> {
        info!("Seeding {} categories...", categories.len());

        let ids = self
            .insert_rows(
                conn,
                &schema::CATEGORIES,
                &["name", "description", "parent_category_id"],
                categories,
                |mut b, category| {
                    b.push_bind(&category.name)
                        .push_bind(&category.description)
                        .push_bind(category.parent_category_id);
                },
            )
            .await?;

        info!("Seeded {} categories", ids.len());
        Ok(ids)
    }

    pub async fn insert_products(
        &self,
        conn: &mut PgConnection,
        products: &[GeneratedProduct],
    ) -> Result<Vec<i32>, SeedError> {
        info!("Seeding {} products...", products.len());

        let ids = self
            .insert_rows(
                conn,
                &schema::PRODUCTS,
                &[
                    "seller_id",
                    "category_id",
                    "name",
                    "description",
                    "price",
                    "stock_quantity",
                ],
                products,
                |mut b, product| {
                    b.push_bind(product.seller_id)
                        .push_bind(product.category_id)
                        .push_bind(&product.name)
                        .push_bind(&product.description)
                        .push_bind(product.price)
                        .push_unseparated("::numeric")
                        .push_bind(product.stock_quantity);
                },
            )
            .await?;

        info!("Seeded {} products", ids.len());
        Ok(ids)
    }

    pub async fn insert_orders(
        &self,
        conn: &mut PgConnection,
        orders: &[GeneratedOrder],
    ) -> Result<Vec<i32>, SeedError> {
        info!("Seeding {} orders...", orders.len());

        let ids = self
            .insert_rows(
                conn,
                &schema::ORDERS,
                &["user_id", "status", "total_amount"],
                orders,
                |mut b, order| {
                    b.push_bind(order.user_id)
                        .push_bind(order.status.as_str())
                        .push_bind(order.total_amount)
                        .push_unseparated("::numeric");
                },
            )
            .await?;

        info!("Seeded {} orders", ids.len());
        Ok(ids)
    }

    pub async fn insert_order_items(
        &self,
        conn: &mut PgConnection,
        items: &[GeneratedOrderItem],
    ) -> Result<Vec<i32>, SeedError> {
        info!("Seeding {} order items...", items.len());

        let ids = self
            .insert_rows(
                conn,
                &schema::ORDER_ITEMS,
                &["order_id", "product_id", "quantity", "unit_price"],
                items,
                |mut b, item| {
                    b.push_bind(item.order_id)
                        .push_bind(item.product_id)
                        .push_bind(item.quantity)
                        .push_bind(item.unit_price)
                        .push_unseparated("::numeric");
                },
            )
            .await?;

        info!("Seeded {} order items", ids.len());
        Ok(ids)
    }

    pub async fn insert_payments(
        &self,
        conn: &mut PgConnection,
        payments: &[GeneratedPayment],
    ) -> Result<Vec<i32>, SeedError> {
        info!("Seeding {} payments...", payments.len());

        let ids = self
            .insert_rows(
                conn,
                &schema::PAYMENTS,
                &[
                    "order_id",
                    "amount",
                    "payment_method",
                    "status",
                    "transaction_id",
                ],
                payments,
                |mut b, payment| {
                    b.push_bind(payment.order_id)
                        .push_bind(payment.amount)
                        .push_unseparated("::numeric")
                        .push_bind(payment.payment_method.as_str())
                        .push_bind(payment.status.as_str())
                        .push_bind(&payment.transaction_id);
                },
            )
            .await?;

        info!("Seeded {} payments", ids.len());
        Ok(ids)
    }

    pub async fn insert_reviews(
        &self,
        conn: &mut PgConnection,
        reviews: &[GeneratedReview],
    ) -> Result<Vec<i32>, SeedError> {
        info!("Seeding {} reviews...", reviews.len());

        let ids = self
            .insert_rows(
                conn,
                &schema::REVIEWS,
                &["product_id", "user_id", "rating", "comment"],
                reviews,
                |mut b, review| {
                    b.push_bind(review.product_id)
                        .push_bind(review.user_id)
                        .push_bind(review.rating)
                        .push_bind(&review.comment);
                },
            )
            .await?;

        info!("Seeded {} reviews", ids.len());
        Ok(ids)
    }

    pub async fn insert_shipping(
        &self,
        conn: &mut PgConnection,
        records: &[GeneratedShipping],
    ) -> Result<Vec<i32>, SeedError> {
        info!("Seeding {} shipping records...", records.len());

        let ids = self
            .insert_rows(
                conn,
                &schema::SHIPPING_INFO,
                &[
                    "order_id",
                    "address_line1",
                    "address_line2",
                    "city",
                    "state",
                    "postal_code",
                    "country",
                    "tracking_number",
                    "shipping_method",
                ],
                records,
                |mut b, record| {
                    b.push_bind(record.order_id)
                        .push_bind(&record.address_line1)
                        .push_bind(record.address_line2.as_deref())
                        .push_bind(&record.city)
                        .push_bind(&record.state)
                        .push_bind(&record.postal_code)
                        .push_bind(&record.country)
                        .push_bind(&record.tracking_number)
                        .push_bind(record.shipping_method.as_str());
                },
            )
            .await?;

        info!("Seeded {} shipping records", ids.len());
        Ok(ids)
    }

    pub async fn insert_discounts(
        &self,
        conn: &mut PgConnection,
        discounts: &[GeneratedDiscount],
    ) -> Result<Vec<i32>, SeedError> {
        info!("Seeding {} discounts...", discounts.len());

        let ids = self
            .insert_rows(
                conn,
                &schema::DISCOUNTS,
                &[
                    "code",
                    "description",
                    "discount_type",
                    "discount_value",
                    "start_date",
                    "end_date",
                    "minimum_purchase",
                    "usage_limit",
                ],
                discounts,
                |mut b, discount| {
                    b.push_bind(&discount.code)
                        .push_bind(&discount.description)
                        .push_bind(discount.discount_type.as_str())
                        .push_bind(discount.discount_value)
                        .push_unseparated("::numeric")
                        .push_bind(discount.start_date)
                        .push_bind(discount.end_date)
                        .push_bind(discount.minimum_purchase)
                        .push_unseparated("::numeric")
                        .push_bind(discount.usage_limit);
                },
            )
            .await?;

        info!("Seeded {} discounts", ids.len());
        Ok(ids)
    }

    /// Inserts `rows` with one multi-row statement per chunk, returning the
    /// assigned primary keys in row order.
    async fn insert_rows<'a, T, F>(
        &self,
        conn: &mut PgConnection,
        table: &TableSchema,
        columns: &[&str],
        rows: &'a [T],
        mut push_row: F,
    ) -> Result<Vec<i32>, SeedError>
    where
        F: FnMut(Separated<'_, 'a, Postgres, &'static str>, &'a T),
    {
        let mut ids = Vec::with_capacity(rows.len());

        for chunk in rows.chunks(self.rows_per_statement(columns.len())) {
            let mut builder: QueryBuilder<'a, Postgres> = QueryBuilder::new(format!(
                "INSERT INTO {} ({}) ",
                table.name,
                columns.join(", ")
            ));
            builder.push_values(chunk, &mut push_row);
            builder.push(format_args!(" RETURNING {}", table.primary_key));

            let chunk_ids: Vec<i32> = builder
                .build_query_scalar()
                .fetch_all(&mut *conn)
                .await?;

            if chunk_ids.len() != chunk.len() {
                return Err(SeedError::RowCount {
                    table: table.name,
                    expected: chunk.len(),
                    returned: chunk_ids.len(),
                });
            }
            ids.extend(chunk_ids);
        }

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_batch_covers_largest_table() {
        let seeder = Seeder::new();
        assert!(seeder.rows_per_statement(4) >= 500);
    }

    #[test]
    fn test_rows_per_statement_respects_param_limit() {
        let seeder = Seeder::new().with_batch_size(100_000);
        assert_eq!(seeder.rows_per_statement(9), MAX_BIND_PARAMS / 9);

        let seeder = Seeder::new().with_batch_size(0);
        assert_eq!(seeder.rows_per_statement(5), 1);
    }
}
