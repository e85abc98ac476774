//! Table catalog for the marketplace schema.
//!
//! Tables are listed parents-first so that executing [`creation_order`] front to
//! back never references a table that does not exist yet.

use crate::errors::DbError;

/// Longest identifier Postgres keeps without truncation (NAMEDATALEN - 1).
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// A table in the marketplace schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    /// SERIAL primary key column.
    pub primary_key: &'static str,
    /// Tables referenced by foreign keys (excluding self references).
    pub depends_on: &'static [&'static str],
    pub ddl: &'static str,
}

// =============================================================================
// Independent tables
// =============================================================================

pub static USERS: TableSchema = TableSchema {
    name: "users",
    primary_key: "user_id",
    depends_on: &[],
    ddl: r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id SERIAL PRIMARY KEY,
            username VARCHAR(50) UNIQUE NOT NULL,
            email VARCHAR(255) UNIQUE NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            first_name VARCHAR(50),
            last_name VARCHAR(50),
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
};

pub static CATEGORIES: TableSchema = TableSchema {
    name: "categories",
    primary_key: "category_id",
    depends_on: &[],
    ddl: r#"
        CREATE TABLE IF NOT EXISTS categories (
            category_id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            description TEXT,
            parent_category_id INTEGER REFERENCES categories(category_id)
        )
    "#,
};

pub static DISCOUNTS: TableSchema = TableSchema {
    name: "discounts",
    primary_key: "discount_id",
    depends_on: &[],
    ddl: r#"
        CREATE TABLE IF NOT EXISTS discounts (
            discount_id SERIAL PRIMARY KEY,
            code VARCHAR(50) UNIQUE NOT NULL,
            description TEXT,
            discount_type VARCHAR(20) NOT NULL,
            discount_value DECIMAL(10,2) NOT NULL,
            start_date TIMESTAMP NOT NULL,
            end_date TIMESTAMP NOT NULL,
            minimum_purchase DECIMAL(10,2),
            usage_limit INTEGER
        )
    "#,
};

// =============================================================================
// Dependent tables
// =============================================================================

pub static PRODUCTS: TableSchema = TableSchema {
    name: "products",
    primary_key: "product_id",
    depends_on: &["users", "categories"],
    ddl: r#"
        CREATE TABLE IF NOT EXISTS products (
            product_id SERIAL PRIMARY KEY,
            seller_id INTEGER REFERENCES users(user_id),
            category_id INTEGER REFERENCES categories(category_id),
            name VARCHAR(255) NOT NULL,
            description TEXT,
            price DECIMAL(10,2) NOT NULL,
            stock_quantity INTEGER NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
};

pub static ORDERS: TableSchema = TableSchema {
    name: "orders",
    primary_key: "order_id",
    depends_on: &["users"],
    ddl: r#"
        CREATE TABLE IF NOT EXISTS orders (
            order_id SERIAL PRIMARY KEY,
            user_id INTEGER REFERENCES users(user_id),
            status VARCHAR(50) NOT NULL,
            total_amount DECIMAL(10,2) NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
};

pub static ORDER_ITEMS: TableSchema = TableSchema {
    name: "order_items",
    primary_key: "order_item_id",
    depends_on: &["orders", "products"],
    ddl: r#"
        CREATE TABLE IF NOT EXISTS order_items (
            order_item_id SERIAL PRIMARY KEY,
            order_id INTEGER REFERENCES orders(order_id),
            product_id INTEGER REFERENCES products(product_id),
            quantity INTEGER NOT NULL,
            unit_price DECIMAL(10,2) NOT NULL
        )
    "#,
};

pub static PAYMENTS: TableSchema = TableSchema {
    name: "payments",
    primary_key: "payment_id",
    depends_on: &["orders"],
    ddl: r#"
        CREATE TABLE IF NOT EXISTS payments (
            payment_id SERIAL PRIMARY KEY,
            order_id INTEGER REFERENCES orders(order_id),
            amount DECIMAL(10,2) NOT NULL,
            payment_method VARCHAR(50) NOT NULL,
            status VARCHAR(50) NOT NULL,
            transaction_id VARCHAR(255),
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
};

pub static REVIEWS: TableSchema = TableSchema {
    name: "reviews",
    primary_key: "review_id",
    depends_on: &["products", "users"],
    ddl: r#"
        CREATE TABLE IF NOT EXISTS reviews (
            review_id SERIAL PRIMARY KEY,
            product_id INTEGER REFERENCES products(product_id),
            user_id INTEGER REFERENCES users(user_id),
            rating INTEGER CHECK (rating >= 1 AND rating <= 5),
            comment TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
};

pub static SHIPPING_INFO: TableSchema = TableSchema {
    name: "shipping_info",
    primary_key: "shipping_id",
    depends_on: &["orders"],
    ddl: r#"
        CREATE TABLE IF NOT EXISTS shipping_info (
            shipping_id SERIAL PRIMARY KEY,
            order_id INTEGER REFERENCES orders(order_id),
            address_line1 VARCHAR(255) NOT NULL,
            address_line2 VARCHAR(255),
            city VARCHAR(100) NOT NULL,
            state VARCHAR(100) NOT NULL,
            postal_code VARCHAR(20) NOT NULL,
            country VARCHAR(100) NOT NULL,
            tracking_number VARCHAR(100),
            shipping_method VARCHAR(50) NOT NULL
        )
    "#,
};

static CREATION_ORDER: [&TableSchema; 9] = [
    &USERS,
    &CATEGORIES,
    &PRODUCTS,
    &ORDERS,
    &ORDER_ITEMS,
    &PAYMENTS,
    &REVIEWS,
    &SHIPPING_INFO,
    &DISCOUNTS,
];

/// All tables, parents before children.
pub fn creation_order() -> &'static [&'static TableSchema] {
    &CREATION_ORDER
}

/// Looks up a table by name.
pub fn table(name: &str) -> Option<&'static TableSchema> {
    CREATION_ORDER.iter().copied().find(|t| t.name == name)
}

/// Checks that every dependency of a table appears earlier in `tables`.
///
/// Returns the first `(table, missing_parent)` pair that violates the ordering.
pub fn validate_order(tables: &[&TableSchema]) -> Result<(), (&'static str, &'static str)> {
    for (idx, table) in tables.iter().enumerate() {
        for parent in table.depends_on {
            let created_before = tables[..idx].iter().any(|t| t.name == *parent);
            if !created_before {
                return Err((table.name, *parent));
            }
        }
    }
    Ok(())
}

/// Validates `name` as a plain SQL identifier and returns it double-quoted.
///
/// Only `[A-Za-z_][A-Za-z0-9_$]*` is accepted, so the quoted form never needs
/// escaping. Used where Postgres cannot take the name as a bind parameter.
pub fn quote_identifier(name: &str) -> Result<String, DbError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if !valid_start || !valid_rest || name.len() > MAX_IDENTIFIER_LEN {
        return Err(DbError::InvalidIdentifier(name.to_string()));
    }

    Ok(format!("\"{name}\""))
}
