//! CSV loading into an in-memory table.
//!
//! The dataset is expected to have a header row. Every field is kept as text.
//! A field counts as missing when it is empty or one of the usual NA tokens,
//! and that is decided once while parsing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use log::{debug, info};

use crate::dataset::preprocess::FoodItem;
use crate::dataset::{GROUP_COLUMN, NAME_COLUMN};
use crate::error::Result;
use crate::labels::LABEL_MAPPING;

/// Field values treated as missing, in addition to the empty string.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true if `value` represents a missing field.
pub fn is_missing(value: &str) -> bool {
    value.is_empty() || NA_TOKENS.contains(&value)
}

/// A header plus rows of text fields, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl FoodTable {
    /// Build a table from fields whose missingness is already known.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        FoodTable { headers, rows }
    }

    /// Parse CSV data from any reader.
    ///
    /// Records may have fewer or more fields than the header; absent fields
    /// read as missing.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|field| (!is_missing(field)).then(|| field.to_string()))
                    .collect(),
            );
        }

        debug!("parsed {} columns: {:?}", headers.len(), headers);
        Ok(FoodTable { headers, rows })
    }

    /// Build a two-column table (`name`, `Food Group`) from cleaned items.
    ///
    /// Codes are written back as category names, so cleaning the result
    /// yields the same items again. Names are stored as present even when
    /// they spell an NA token.
    pub fn from_items(items: &[FoodItem]) -> Self {
        let headers = vec![NAME_COLUMN.to_string(), GROUP_COLUMN.to_string()];
        let rows = items
            .iter()
            .map(|item| {
                let group = LABEL_MAPPING.name_for(item.food_group).unwrap_or_default();
                vec![Some(item.name.clone()), Some(group.to_string())]
            })
            .collect();
        FoodTable { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Field at (`row`, `column`), or `None` when absent or missing.
    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(Option::as_deref)
    }

    /// Rows in file order, with `None` for missing fields.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<String>]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// Read the food dataset at `path`.
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<FoodTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = FoodTable::from_reader(file)?;
    info!("loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::error::PantryError;

    #[test]
    fn test_from_reader_keeps_order_and_columns() {
        let csv = ",name,Food Group,Calories\n0,Apple,Fruits,52\n1,Milk,Dairy and Egg Products,42\n";
        let table = FoodTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.headers(), &["", "name", "Food Group", "Calories"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_index("name"), Some(1));
        assert_eq!(table.column_index("missing"), None);
        assert_eq!(table.value(0, 1), Some("Apple"));
        assert_eq!(table.value(1, 2), Some("Dairy and Egg Products"));
    }

    #[test]
    fn test_missing_values() {
        let csv = "name,Food Group\n,Fruits\nNaN,Fruits\nApple,NA\nPear\n";
        let table = FoodTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.value(0, 0), None);
        assert_eq!(table.value(1, 0), None);
        assert_eq!(table.value(2, 1), None);
        assert_eq!(table.value(3, 0), Some("Pear"));
        assert_eq!(table.value(3, 1), None);
        assert_eq!(table.value(10, 0), None);
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(""));
        assert!(is_missing("null"));
        assert!(is_missing("#N/A"));
        assert!(!is_missing("Nan bread"));
        assert!(!is_missing("0"));
    }

    #[test]
    fn test_load_data_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,Food Group").unwrap();
        writeln!(file, "\"Beef, ground\",Meats").unwrap();
        file.flush().unwrap();

        let table = load_data(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.value(0, 0), Some("Beef, ground"));
    }

    #[test]
    fn test_load_data_missing_file() {
        let result = load_data("/nonexistent/food_data.csv");
        assert!(matches!(result, Err(PantryError::Io(_))));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_from_items_writes_category_names() {
        let items = vec![FoodItem::new("apple", 15), FoodItem::new("milk", 9)];
        let table = FoodTable::from_items(&items);

        assert_eq!(table.headers(), &["name", "Food Group"]);
        assert_eq!(table.value(0, 1), Some("Fruits"));
        assert_eq!(table.value(1, 1), Some("Dairy and Egg Products"));
    }

    #[test]
    fn test_from_items_keeps_na_spelled_names() {
        let items = vec![FoodItem::new("nan", 0), FoodItem::new("null", 0)];
        let table = FoodTable::from_items(&items);

        assert_eq!(table.value(0, 0), Some("nan"));
        assert_eq!(table.value(1, 0), Some("null"));
        assert!(table.rows().all(|row| row.iter().all(Option::is_some)));
    }
}
