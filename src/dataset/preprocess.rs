//! Cleaning raw dataset rows into labeled training items.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::dataset::loader::FoodTable;
use crate::dataset::{GROUP_COLUMN, NAME_COLUMN};
use crate::error::{PantryError, Result};
use crate::labels::LABEL_MAPPING;

/// A cleaned training example: lowercased name plus food-group code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub food_group: usize,
}

impl FoodItem {
    pub fn new<S: Into<String>>(name: S, food_group: usize) -> Self {
        FoodItem {
            name: name.into(),
            food_group,
        }
    }
}

/// Clean a raw table.
///
/// Rows missing a name or a food group are dropped, as are rows whose food
/// group is not a known category (matched exactly). Names are lowercased and
/// row order is kept.
pub fn preprocess_data(table: &FoodTable) -> Result<Vec<FoodItem>> {
    let name_col = table
        .column_index(NAME_COLUMN)
        .ok_or_else(|| PantryError::dataset(format!("missing column '{NAME_COLUMN}'")))?;
    let group_col = table
        .column_index(GROUP_COLUMN)
        .ok_or_else(|| PantryError::dataset(format!("missing column '{GROUP_COLUMN}'")))?;

    let mut items = Vec::with_capacity(table.len());
    let mut missing = 0;
    let mut unmapped = 0;

    for row in 0..table.len() {
        let (Some(name), Some(group)) = (table.value(row, name_col), table.value(row, group_col))
        else {
            missing += 1;
            continue;
        };

        match LABEL_MAPPING.code_for(group) {
            Some(code) => items.push(FoodItem::new(name.to_lowercase(), code)),
            None => {
                debug!("dropping row {row}: unknown food group '{group}'");
                unmapped += 1;
            }
        }
    }

    info!(
        "kept {} of {} rows ({missing} missing values, {unmapped} unknown groups)",
        items.len(),
        table.len()
    );
    Ok(items)
}
