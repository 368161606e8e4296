//! Name search over the food dataset with per-item nutrient profiles.
//!
//! Nutrient values come from fixed column positions of the food data file,
//! not from header names, so the catalog works with the dataset's raw layout.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dataset::loader::FoodTable;

const NAME: usize = 1;
const GROUP: usize = 2;
const CALORIES: usize = 3;
const FAT: usize = 4;
const PROTEIN: usize = 5;
const CARBOHYDRATES: usize = 6;
const SUGARS: usize = 7;
const FIBER: usize = 8;
const CHOLESTEROL: usize = 9;
const SATURATED_FATS: usize = 10;
const CALCIUM: usize = 11;
const IRON: usize = 12;
const POTASSIUM: usize = 13;
const MAGNESIUM: usize = 14;
const VITAMIN_A: usize = 15;
const VITAMIN_C: usize = 17;
const VITAMIN_D: usize = 19;
const OMEGA_3: usize = 24;
const OMEGA_6: usize = 25;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Nutrient amounts for one food item. Missing values are `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    /// kcal
    pub calories: f64,
    /// g
    pub fat: f64,
    /// g
    pub protein: f64,
    /// g
    pub carbohydrates: f64,
    /// g
    pub sugars: f64,
    /// g
    pub fiber: f64,
    /// mg
    pub cholesterol: f64,
    /// g
    pub saturated_fats: f64,
    /// mg
    pub calcium: f64,
    /// mg
    pub iron: f64,
    /// mg
    pub potassium: f64,
    /// mg
    pub magnesium: f64,
    /// IU
    pub vitamin_a: f64,
    /// mg
    pub vitamin_c: f64,
    /// mcg
    pub vitamin_d: f64,
    /// mg
    pub omega_3: f64,
    /// mg
    pub omega_6: f64,
}

/// One searchable food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub name: String,
    /// Category name as written in the dataset (may be empty).
    pub food_group: String,
    pub nutrients: NutrientProfile,
}

/// Search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    /// Case-insensitive substring to match against names. Empty matches all.
    pub term: String,
    /// Category names whose records are left out.
    pub excluded_groups: Vec<String>,
    pub offset: usize,
    pub limit: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        CatalogQuery {
            term: String::new(),
            excluded_groups: Vec::new(),
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogQuery {
    pub fn new<S: Into<String>>(term: S) -> Self {
        CatalogQuery {
            term: term.into(),
            ..Default::default()
        }
    }

    pub fn exclude<S: Into<String>>(mut self, group: S) -> Self {
        self.excluded_groups.push(group.into());
        self
    }

    pub fn page(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage<'a> {
    pub records: Vec<&'a FoodRecord>,
    /// Number of matches across all pages.
    pub total: usize,
    /// True if matches remain after this page.
    pub has_more: bool,
}

/// In-memory collection of food records.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    records: Vec<FoodRecord>,
}

impl FoodCatalog {
    pub fn new(records: Vec<FoodRecord>) -> Self {
        FoodCatalog { records }
    }

    /// Build the catalog from a raw food table. Rows without a name are skipped.
    pub fn from_table(table: &FoodTable) -> Self {
        let records: Vec<FoodRecord> = (0..table.len())
            .filter_map(|row| {
                let name = table.value(row, NAME)?;
                let number = |column: usize| {
                    table
                        .value(row, column)
                        .and_then(|v| v.trim().parse::<f64>().ok())
                        .filter(|v| v.is_finite())
                        .unwrap_or(0.0)
                };

                Some(FoodRecord {
                    name: name.to_string(),
                    food_group: table.value(row, GROUP).unwrap_or_default().to_string(),
                    nutrients: NutrientProfile {
                        calories: number(CALORIES),
                        fat: number(FAT),
                        protein: number(PROTEIN),
                        carbohydrates: number(CARBOHYDRATES),
                        sugars: number(SUGARS),
                        fiber: number(FIBER),
                        cholesterol: number(CHOLESTEROL),
                        saturated_fats: number(SATURATED_FATS),
                        calcium: number(CALCIUM),
                        iron: number(IRON),
                        potassium: number(POTASSIUM),
                        magnesium: number(MAGNESIUM),
                        vitamin_a: number(VITAMIN_A),
                        vitamin_c: number(VITAMIN_C),
                        vitamin_d: number(VITAMIN_D),
                        omega_3: number(OMEGA_3),
                        omega_6: number(OMEGA_6),
                    },
                })
            })
            .collect();

        debug!("catalog holds {} records", records.len());
        FoodCatalog { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FoodRecord] {
        &self.records
    }

    /// Find records by name, shortest names first, ties broken alphabetically.
    pub fn search(&self, query: &CatalogQuery) -> CatalogPage<'_> {
        let term = query.term.to_lowercase();
        let mut matches: Vec<&FoodRecord> = self
            .records
            .iter()
            .filter(|r| !query.excluded_groups.contains(&r.food_group))
            .filter(|r| r.name.to_lowercase().contains(&term))
            .collect();

        matches.sort_by(|a, b| {
            a.name
                .chars()
                .count()
                .cmp(&b.name.chars().count())
                .then_with(|| a.name.cmp(&b.name))
        });

        let total = matches.len();
        let records: Vec<&FoodRecord> = matches
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();
        let has_more = query.offset.saturating_add(records.len()) < total;

        CatalogPage {
            records,
            total,
            has_more,
        }
    }
}
