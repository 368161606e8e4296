//! Food dataset handling: CSV loading, cleaning and catalog search.

pub mod catalog;
pub mod loader;
pub mod preprocess;

pub use catalog::{CatalogPage, CatalogQuery, FoodCatalog, FoodRecord, NutrientProfile};
pub use loader::{FoodTable, load_data};
pub use preprocess::{FoodItem, preprocess_data};

/// Column holding the item name.
pub const NAME_COLUMN: &str = "name";
/// Column holding the food-group category name.
pub const GROUP_COLUMN: &str = "Food Group";
