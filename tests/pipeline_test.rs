//! End-to-end tests for training, persistence and prediction.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use pantry::classifier::{ArtifactStore, FoodClassifier, predict_food_groups, train_and_save_model};
use pantry::config::PipelineConfig;
use pantry::dataset::{load_data, preprocess_data};
use pantry::error::{PantryError, Result};
use pantry::labels::LABEL_MAPPING;
use pantry::ml::MLError;

const ROWS: &[(&str, &str)] = &[
    ("Apple, raw", "Fruits"),
    ("Apple, red delicious", "Fruits"),
    ("Apple, fuji, with skin", "Fruits"),
    ("Apple, granny smith", "Fruits"),
    ("Apple, gala", "Fruits"),
    ("Apples, dried, sulfured", "Fruits"),
    ("Apple, baked", "Fruits"),
    ("Apple, canned, sweetened slices", "Fruits"),
    ("Pear, raw", "Fruits"),
    ("Banana, raw", "Fruits"),
    ("Chicken, breast, roasted", "Meats"),
    ("Chicken, thigh, meat only", "Meats"),
    ("Chicken, wing, fried", "Meats"),
    ("Chicken, breast, skinless, boneless", "Meats"),
    ("Chicken, leg, stewed", "Meats"),
    ("Chicken, drumstick, roasted", "Meats"),
    ("Chicken breast, grilled", "Meats"),
    ("Beef, steak, broiled", "Meats"),
    ("Pork, loin, roasted", "Meats"),
    ("Turkey, breast, roasted", "Meats"),
    ("Potato chips, salted", "Snacks"),
    ("Potato chips, barbecue flavor", "Snacks"),
    ("Potato chips, reduced fat", "Snacks"),
    ("Potato chips, sour cream and onion", "Snacks"),
    ("Tortilla chips, plain", "Snacks"),
    ("Corn chips, plain", "Snacks"),
    ("Potato sticks", "Snacks"),
    ("Chips, kettle cooked", "Snacks"),
    ("Pretzels, hard", "Snacks"),
    ("Popcorn, air popped", "Snacks"),
    ("Milk, whole", "Dairy and Egg Products"),
    ("Milk, skim", "Dairy and Egg Products"),
    ("Milk, reduced fat", "Dairy and Egg Products"),
    ("Cheese, cheddar", "Dairy and Egg Products"),
    ("Cheese, swiss", "Dairy and Egg Products"),
    ("Yogurt, plain", "Dairy and Egg Products"),
    ("Egg, whole, boiled", "Dairy and Egg Products"),
    ("Butter, salted", "Dairy and Egg Products"),
    ("Cream, heavy", "Dairy and Egg Products"),
    ("Milk, goat", "Dairy and Egg Products"),
];

/// Write the sample dataset plus rows the cleaner must drop.
fn write_dataset(dir: &Path) -> PathBuf {
    let mut csv = String::from(",name,Food Group,Calories\n");
    for (i, (name, group)) in ROWS.iter().enumerate() {
        csv.push_str(&format!("{i},\"{name}\",{group},100\n"));
    }
    csv.push_str("40,Gravel,Rocks,0\n");
    csv.push_str("41,,Fruits,0\n");
    csv.push_str("42,Mystery meat,,0\n");

    let path = dir.join("food_data.csv");
    fs::write(&path, csv).unwrap();
    path
}

fn config(dir: &TempDir) -> PipelineConfig {
    let dataset = write_dataset(dir.path());
    PipelineConfig::new(dataset, dir.path().join("artifacts"))
}

#[test]
fn test_train_then_predict() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let store = ArtifactStore::new(&config.artifact_dir);
    assert!(!store.model_exists());

    let outcome = train_and_save_model(&config)?;
    assert!(store.model_exists());
    assert!(store.vectorizer_path().is_file());
    assert!(outcome.report.to_string().contains("precision"));

    let codes = predict_food_groups(&store, &["Apple", "Chicken Breast", "Potato Chips"])?;
    assert_eq!(codes, vec![15, 8, 1]);

    Ok(())
}

#[test]
fn test_split_covers_cleaned_items() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let outcome = train_and_save_model(&config(&dir))?;

    // 43 raw rows, 3 dropped by cleaning.
    let n = ROWS.len();
    assert_eq!(outcome.test_indices.len(), 8);
    assert_eq!(outcome.train_indices.len(), n - 8);

    let mut all: Vec<usize> = outcome
        .train_indices
        .iter()
        .chain(&outcome.test_indices)
        .copied()
        .collect();
    all.sort_unstable();
    assert_eq!(all, (0..n).collect::<Vec<_>>());

    assert_eq!(outcome.report.support(), 8);
    assert_eq!(outcome.metadata.training_examples, n - 8);

    Ok(())
}

#[test]
fn test_training_is_deterministic() -> Result<()> {
    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();
    let first_config = config(&first_dir);
    let second_config = config(&second_dir);

    let first = train_and_save_model(&first_config)?;
    let second = train_and_save_model(&second_config)?;
    assert_eq!(first.train_indices, second.train_indices);
    assert_eq!(first.test_indices, second.test_indices);

    let items = ["Milk Cake", "Pork Chips", "Chicken Salad"];
    assert_eq!(
        predict_food_groups(&ArtifactStore::new(&first_config.artifact_dir), &items)?,
        predict_food_groups(&ArtifactStore::new(&second_config.artifact_dir), &items)?
    );

    Ok(())
}

#[test]
fn test_out_of_vocabulary_items() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    train_and_save_model(&config)?;

    let classifier = FoodClassifier::load(&ArtifactStore::new(&config.artifact_dir))?;
    let codes = classifier.predict(&["xyzzy plugh", "", "the and of"])?;
    assert_eq!(codes.len(), 3);
    for code in codes {
        assert!(classifier.model().classes().contains(&code));
        assert!(LABEL_MAPPING.name_for(code).is_some());
    }

    Ok(())
}

#[test]
fn test_retraining_overwrites_artifacts() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let store = ArtifactStore::new(&config.artifact_dir);

    let first = train_and_save_model(&config)?;
    let second = train_and_save_model(&config)?;
    assert!(second.metadata.trained_at >= first.metadata.trained_at);

    let saved = store.load_model()?;
    assert_eq!(saved.metadata().trained_at, second.metadata.trained_at);
    Ok(())
}

#[test]
fn test_cleaning_drops_bad_rows() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let table = load_data(write_dataset(dir.path()))?;
    assert_eq!(table.len(), ROWS.len() + 3);

    let items = preprocess_data(&table)?;
    assert_eq!(items.len(), ROWS.len());
    assert_eq!(items[0].name, "apple, raw");
    assert_eq!(items[0].food_group, 15);
    assert!(items.iter().all(|item| item.name != "gravel"));

    Ok(())
}

#[test]
fn test_predict_without_artifacts() {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path());

    let error = predict_food_groups(&store, &["Apple"]).unwrap_err();
    assert!(matches!(error, PantryError::NotFound(_)));
}

#[test]
fn test_missing_dataset() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig::new(dir.path().join("absent.csv"), dir.path());

    let error = train_and_save_model(&config).unwrap_err();
    assert!(matches!(error, PantryError::Io(_)));
    assert!(!ArtifactStore::new(dir.path()).model_exists());
}

#[test]
fn test_single_category_dataset() {
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("fruit.csv");
    fs::write(
        &dataset,
        "name,Food Group\nApple,Fruits\nPear,Fruits\nPlum,Fruits\nFig,Fruits\nKiwi,Fruits\n",
    )
    .unwrap();

    let error = train_and_save_model(&PipelineConfig::new(dataset, dir.path())).unwrap_err();
    assert!(matches!(
        error,
        PantryError::Ml(MLError::InsufficientClasses { actual: 1 })
    ));
}

#[test]
fn test_small_dataset_round_trip() -> Result<()> {
    use pantry::classifier::extract_features;
    use pantry::dataset::FoodItem;
    use pantry::ml::{Classifier, LogisticRegression};

    let items = vec![
        FoodItem::new("green apple", 15),
        FoodItem::new("apple slices", 15),
        FoodItem::new("baked apple", 15),
        FoodItem::new("chicken breast", 8),
        FoodItem::new("fried chicken", 8),
        FoodItem::new("chicken wing", 8),
    ];
    let (features, labels, vectorizer) = extract_features(&items)?;
    let mut model = LogisticRegression::new();
    model.fit(&features, &labels)?;

    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path());
    store.save_model(&model)?;
    store.save_vectorizer(&vectorizer)?;

    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(predict_food_groups(&store, &names)?, labels);
    Ok(())
}
