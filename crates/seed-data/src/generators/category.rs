//! The fixed product category tree.

use super::GenerateError;

/// A main category and its sub-categories as `(name, description)` pairs.
pub struct CategoryNode {
    pub name: &'static str,
    pub description: &'static str,
    pub children: &'static [(&'static str, &'static str)],
}

pub const CATEGORY_TREE: &[CategoryNode] = &[
    CategoryNode {
        name: "Electronics",
        description: "Electronic devices and accessories",
        children: &[
            ("Smartphones", "Mobile phones and accessories"),
            ("Laptops", "Portable computers"),
        ],
    },
    CategoryNode {
        name: "Fashion",
        description: "Clothing, shoes, and accessories",
        children: &[
            ("Men's Clothing", "Clothing for men"),
            ("Women's Clothing", "Clothing for women"),
        ],
    },
    CategoryNode {
        name: "Home & Garden",
        description: "Home improvement and garden supplies",
        children: &[
            ("Kitchen", "Kitchen appliances and accessories"),
            ("Garden Tools", "Tools for gardening"),
        ],
    },
    CategoryNode {
        name: "Books",
        description: "Books and publications",
        children: &[
            ("Fiction", "Fiction books"),
            ("Non-Fiction", "Non-fiction books"),
        ],
    },
    CategoryNode {
        name: "Sports",
        description: "Sports equipment and accessories",
        children: &[
            ("Fitness", "Fitness equipment"),
            ("Outdoor Sports", "Outdoor sports equipment"),
        ],
    },
];

/// Generated category data ready for database insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCategory {
    pub name: String,
    pub description: String,
    pub parent_category_id: Option<i32>,
}

/// Produces the category tree in two passes: main categories, then
/// sub-categories once the main categories' keys are known.
#[derive(Debug, Default)]
pub struct CategoryGenerator;

impl CategoryGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Top-level categories, in tree order.
    pub fn main_categories(&self) -> Vec<GeneratedCategory> {
        CATEGORY_TREE
            .iter()
            .map(|node| GeneratedCategory {
                name: node.name.to_string(),
                description: node.description.to_string(),
                parent_category_id: None,
            })
            .collect()
    }

    /// Sub-categories linked to `main_ids`, which must be the keys of
    /// [`Self::main_categories`] in the same order.
    pub fn sub_categories(&self, main_ids: &[i32]) -> Result<Vec<GeneratedCategory>, GenerateError> {
        if main_ids.len() != CATEGORY_TREE.len() {
            return Err(GenerateError::ParentCount {
                table: "categories",
                expected: CATEGORY_TREE.len(),
                found: main_ids.len(),
            });
        }

        Ok(CATEGORY_TREE
            .iter()
            .zip(main_ids)
            .flat_map(|(node, &parent_id)| {
                node.children.iter().map(move |(name, description)| GeneratedCategory {
                    name: name.to_string(),
                    description: description.to_string(),
                    parent_category_id: Some(parent_id),
                })
            })
            .collect())
    }

    /// Number of rows the tree produces across both passes.
    pub fn total_count(&self) -> usize {
        CATEGORY_TREE.iter().map(|node| 1 + node.children.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::ordinal_ids;

    #[test]
    fn test_fifteen_categories() {
        let category_gen = CategoryGenerator::new();
        let mains = category_gen.main_categories();
        let subs = category_gen.sub_categories(&ordinal_ids(mains.len())).unwrap();

        assert_eq!(mains.len(), 5);
        assert_eq!(subs.len(), 10);
        assert_eq!(category_gen.total_count(), 15);
        assert!(mains.iter().all(|c| c.parent_category_id.is_none()));
    }

    #[test]
    fn test_sub_categories_reference_main_ids() {
        let category_gen = CategoryGenerator::new();
        let subs = category_gen.sub_categories(&ordinal_ids(5)).unwrap();

        for sub in &subs {
            let parent = sub.parent_category_id.unwrap();
            assert!((1..=5).contains(&parent), "{}: {parent}", sub.name);
        }

        let laptops = subs.iter().find(|c| c.name == "Laptops").unwrap();
        assert_eq!(laptops.parent_category_id, Some(1));
        let fitness = subs.iter().find(|c| c.name == "Fitness").unwrap();
        assert_eq!(fitness.parent_category_id, Some(5));
    }

    #[test]
    fn test_sub_categories_follow_actual_keys() {
        let category_gen = CategoryGenerator::new();
        let subs = category_gen.sub_categories(&[16, 17, 18, 19, 20]).unwrap();

        assert_eq!(subs[0].parent_category_id, Some(16));
        assert_eq!(subs[9].parent_category_id, Some(20));
    }

    #[test]
    fn test_sub_categories_need_every_main_id() {
        let category_gen = CategoryGenerator::new();
        assert!(category_gen.sub_categories(&[1, 2]).is_err());
    }
}
