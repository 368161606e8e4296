//! The fixed mapping between food-group names and integer class codes.
//!
//! The mapping is a closed bijection over 21 categories. It is built once,
//! validated on construction and shared read-only through [`LABEL_MAPPING`].
//!
//! ```
//! use pantry::labels::LABEL_MAPPING;
//!
//! assert_eq!(LABEL_MAPPING.code_for("Fruits"), Some(15));
//! assert_eq!(LABEL_MAPPING.name_for(8), Some("Meats"));
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{PantryError, Result};

/// Food-group names paired with their class codes.
pub const FOOD_GROUPS: &[(&str, usize)] = &[
    ("Baked Foods", 0),
    ("Snacks", 1),
    ("Sweets", 2),
    ("Vegetables", 3),
    ("American Indian", 4),
    ("Restaurant Foods", 5),
    ("Beverages", 6),
    ("Fats and Oils", 7),
    ("Meats", 8),
    ("Dairy and Egg Products", 9),
    ("Baby Foods", 10),
    ("Breakfast Cereals", 11),
    ("Soups and Sauces", 12),
    ("Beans and Lentils", 13),
    ("Fish", 14),
    ("Fruits", 15),
    ("Grains and Pasta", 16),
    ("Nuts and Seeds", 17),
    ("Prepared Meals", 18),
    ("Fast Foods", 19),
    ("Spices and Herbs", 20),
];

/// The built-in food-group mapping.
pub static LABEL_MAPPING: LazyLock<LabelMapping> = LazyLock::new(|| {
    LabelMapping::new(FOOD_GROUPS).expect("built-in food group table must be a bijection")
});

/// Bidirectional name <-> code lookup.
#[derive(Debug, Clone)]
pub struct LabelMapping {
    by_name: HashMap<&'static str, usize>,
    by_code: Vec<&'static str>,
}

impl LabelMapping {
    /// Build a mapping, rejecting duplicate names, duplicate codes and gaps.
    ///
    /// Codes must cover `0..pairs.len()` exactly once each.
    pub fn new(pairs: &[(&'static str, usize)]) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(pairs.len());
        let mut by_code: Vec<Option<&'static str>> = vec![None; pairs.len()];

        for &(name, code) in pairs {
            if code >= pairs.len() {
                return Err(PantryError::invalid_config(format!(
                    "food group code {code} for '{name}' is outside 0..{}",
                    pairs.len()
                )));
            }
            if by_name.insert(name, code).is_some() {
                return Err(PantryError::invalid_config(format!(
                    "food group '{name}' is listed twice"
                )));
            }
            if let Some(existing) = by_code[code].replace(name) {
                return Err(PantryError::invalid_config(format!(
                    "food groups '{existing}' and '{name}' share code {code}"
                )));
            }
        }

        // With in-range, unique codes and pairs.len() slots every slot is filled.
        let by_code = by_code.into_iter().flatten().collect();

        Ok(Self { by_name, by_code })
    }

    /// Code for an exact (case-sensitive) category name.
    pub fn code_for(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Category name for a code.
    pub fn name_for(&self, code: usize) -> Option<&'static str> {
        self.by_code.get(code).copied()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Category names ordered by code.
    pub fn names(&self) -> &[&'static str] {
        &self.by_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_mapping_is_bijective() {
        assert_eq!(LABEL_MAPPING.len(), 21);
        for code in 0..21 {
            let name = LABEL_MAPPING.name_for(code).unwrap();
            assert_eq!(LABEL_MAPPING.code_for(name), Some(code));
        }
        for &(name, code) in FOOD_GROUPS {
            assert_eq!(LABEL_MAPPING.name_for(LABEL_MAPPING.code_for(name).unwrap()), Some(name));
            assert_eq!(LABEL_MAPPING.code_for(name), Some(code));
        }
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(LABEL_MAPPING.code_for("Fruits"), Some(15));
        assert_eq!(LABEL_MAPPING.code_for("Meats"), Some(8));
        assert_eq!(LABEL_MAPPING.code_for("Snacks"), Some(1));
        assert_eq!(LABEL_MAPPING.name_for(20), Some("Spices and Herbs"));
        assert_eq!(LABEL_MAPPING.name_for(21), None);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(LABEL_MAPPING.code_for("fruits"), None);
        assert_eq!(LABEL_MAPPING.code_for("Not A Real Category"), None);
    }

    #[test]
    fn test_rejects_shared_code() {
        let result = LabelMapping::new(&[("A", 0), ("B", 0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let result = LabelMapping::new(&[("A", 0), ("A", 1)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_gap() {
        let result = LabelMapping::new(&[("A", 0), ("B", 2)]);
        assert!(result.is_err());
    }
}
