//! On-disk storage of the fitted model and vectorizer.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{PantryError, Result};
use crate::ml::{LogisticRegression, TfIdfVectorizer};

/// File name of the serialized classifier.
pub const MODEL_FILE: &str = "food_model.bin";
/// File name of the serialized vectorizer.
pub const VECTORIZER_FILE: &str = "vectorizer.bin";

/// Directory holding the two artifacts. Saving overwrites existing files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        ArtifactStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.dir.join(VECTORIZER_FILE)
    }

    /// Whether a trained model has been saved here.
    pub fn model_exists(&self) -> bool {
        self.model_path().is_file()
    }

    pub fn save_model(&self, model: &LogisticRegression) -> Result<()> {
        self.write(&self.model_path(), model)
    }

    pub fn save_vectorizer(&self, vectorizer: &TfIdfVectorizer) -> Result<()> {
        self.write(&self.vectorizer_path(), vectorizer)
    }

    pub fn load_model(&self) -> Result<LogisticRegression> {
        read(&self.model_path())
    }

    pub fn load_vectorizer(&self) -> Result<TfIdfVectorizer> {
        read(&self.vectorizer_path())
    }

    /// Serialize to a sibling temp file, then rename over `path` so readers
    /// never see a partial artifact. The temp file is removed on failure.
    fn write<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let tmp_path = path.with_extension("bin.tmp");
        let file = File::create(&tmp_path)?;

        let written = write_to(file, value)
            .and_then(|()| fs::rename(&tmp_path, path).map_err(PantryError::from));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                warn!("failed to remove {}: {cleanup}", tmp_path.display());
            }
            return Err(e);
        }

        info!("wrote {}", path.display());
        Ok(())
    }
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(".")
    }
}

fn write_to<T: Serialize>(file: File, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            PantryError::not_found(format!("artifact {} does not exist", path.display()))
        }
        _ => PantryError::Io(e),
    })?;
    let value = bincode::deserialize_from(BufReader::new(file))?;
    info!("read {}", path.display());
    Ok(value)
}
