//! Seeded train/test partitioning.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::MLError;

/// Row indices of a hold-out split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n_samples` with `seed` and hold out `ceil(n_samples * test_size)` rows.
///
/// The first shuffled indices form the test partition and the remainder the
/// training partition. Identical arguments always give identical partitions.
///
/// ```
/// use pantry::ml::train_test_split;
///
/// let split = train_test_split(10, 0.2, 42).unwrap();
/// assert_eq!(split.test.len(), 2);
/// assert_eq!(split.train.len(), 8);
/// assert_eq!(split, train_test_split(10, 0.2, 42).unwrap());
/// ```
pub fn train_test_split(n_samples: usize, test_size: f64, seed: u64) -> Result<SplitIndices> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(MLError::InvalidSplit {
            message: format!("test_size must be between 0 and 1, got {test_size}"),
        }
        .into());
    }

    let n_test = (n_samples as f64 * test_size).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);

    if n_test == 0 || n_train == 0 {
        return Err(MLError::InvalidSplit {
            message: format!(
                "{n_samples} samples with test_size={test_size} would leave an empty partition \
                 (n_train={n_train}, n_test={n_test})"
            ),
        }
        .into());
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    debug!("split {n_samples} rows into {} train / {} test", train.len(), indices.len());

    Ok(SplitIndices {
        train,
        test: indices,
    })
}
