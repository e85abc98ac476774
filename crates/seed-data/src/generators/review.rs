//! Product review generation.

use fake::{Fake, faker::lorem::en::Paragraph};
use rand::Rng;

use super::{GenerateError, pick_id};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Generated review data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedReview {
    pub product_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Default)]
pub struct ReviewGenerator;

impl ReviewGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        product_ids: &[i32],
        user_ids: &[i32],
        rng: &mut impl Rng,
    ) -> Result<GeneratedReview, GenerateError> {
        Ok(GeneratedReview {
            product_id: pick_id(product_ids, "products", rng)?,
            user_id: pick_id(user_ids, "users", rng)?,
            rating: rng.gen_range(MIN_RATING..=MAX_RATING),
            comment: Paragraph(1..3).fake_with_rng(rng),
        })
    }

    pub fn generate_batch(
        &self,
        count: usize,
        product_ids: &[i32],
        user_ids: &[i32],
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedReview>, GenerateError> {
        (0..count)
            .map(|_| self.generate(product_ids, user_ids, rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::ordinal_ids;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_ratings_in_range() {
        let mut rng = StdRng::seed_from_u64(12345);
        let reviews = ReviewGenerator::new()
            .generate_batch(300, &ordinal_ids(100), &ordinal_ids(50), &mut rng)
            .unwrap();

        assert_eq!(reviews.len(), 300);
        for review in &reviews {
            assert!((MIN_RATING..=MAX_RATING).contains(&review.rating));
            assert!((1..=100).contains(&review.product_id));
            assert!((1..=50).contains(&review.user_id));
        }
        assert!(reviews.iter().any(|r| r.rating == MIN_RATING));
        assert!(reviews.iter().any(|r| r.rating == MAX_RATING));
    }
}
