//! Product listing generation.

use fake::{Fake, faker::lorem::en::Paragraph};
use rand::Rng;

use super::{GenerateError, money, pick_id};

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Ergonomic",
    "Rustic",
    "Sleek",
    "Durable",
    "Lightweight",
    "Handcrafted",
    "Refurbished",
    "Compact",
    "Premium",
    "Wireless",
    "Vintage",
    "Smart",
];

const PRODUCT_MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Cotton", "Leather", "Granite", "Rubber", "Bamboo", "Aluminum", "Ceramic",
    "Plastic",
];

const PRODUCT_NOUNS: &[&str] = &[
    "Chair",
    "Headphones",
    "Backpack",
    "Lamp",
    "Keyboard",
    "Water Bottle",
    "Jacket",
    "Notebook",
    "Blender",
    "Yoga Mat",
    "Phone Case",
    "Watch",
    "Tent",
    "Skillet",
];

/// Generated product data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedProduct {
    pub seller_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i32,
}

/// Configuration for product generation.
#[derive(Debug, Clone)]
pub struct ProductGenConfig {
    /// Inclusive price range.
    pub price_range: (f64, f64),
    /// Inclusive stock range.
    pub stock_range: (i32, i32),
}

impl Default for ProductGenConfig {
    fn default() -> Self {
        Self {
            price_range: (10.0, 1000.0),
            stock_range: (0, 100),
        }
    }
}

/// Generates product listings for existing sellers and categories.
#[derive(Debug, Default)]
pub struct ProductGenerator {
    config: ProductGenConfig,
}

impl ProductGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProductGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single product sold by one of `seller_ids` in one of `category_ids`.
    pub fn generate(
        &self,
        seller_ids: &[i32],
        category_ids: &[i32],
        rng: &mut impl Rng,
    ) -> Result<GeneratedProduct, GenerateError> {
        let (min_price, max_price) = self.config.price_range;
        let (min_stock, max_stock) = self.config.stock_range;

        Ok(GeneratedProduct {
            seller_id: pick_id(seller_ids, "users", rng)?,
            category_id: pick_id(category_ids, "categories", rng)?,
            name: self.generate_name(rng),
            description: Paragraph(1..3).fake_with_rng(rng),
            price: money(min_price, max_price, rng),
            stock_quantity: rng.gen_range(min_stock..=max_stock),
        })
    }

    /// Generates multiple products.
    pub fn generate_batch(
        &self,
        count: usize,
        seller_ids: &[i32],
        category_ids: &[i32],
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedProduct>, GenerateError> {
        (0..count)
            .map(|_| self.generate(seller_ids, category_ids, rng))
            .collect()
    }

    fn generate_name(&self, rng: &mut impl Rng) -> String {
        let adjective = PRODUCT_ADJECTIVES[rng.gen_range(0..PRODUCT_ADJECTIVES.len())];
        let material = PRODUCT_MATERIALS[rng.gen_range(0..PRODUCT_MATERIALS.len())];
        let noun = PRODUCT_NOUNS[rng.gen_range(0..PRODUCT_NOUNS.len())];
        format!("{adjective} {material} {noun}")
    }
}
