use super::document::DecodedTransaction;
use crate::types::is_valid_txid;
use std::fs;
use std::path::{Path, PathBuf};

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Output-specific error types
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    #[error("Refusing to name output after non-txid hash {0:?}")]
    InvalidHash(String),
}

/// Writes decoded transactions as pretty-printed JSON
///
/// Creates: <base_dir>/<txid>.json
pub struct OutputManager {
    base_dir: PathBuf,
}

impl OutputManager {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Write `decoded` to `<base_dir>/<hash>.json`
    ///
    /// The hash must be a 64-character hex txid so the file stays inside
    /// `base_dir`.
    pub fn write_decoded(&self, decoded: &DecodedTransaction) -> OutputResult<PathBuf> {
        if !is_valid_txid(&decoded.tx.hash) {
            return Err(OutputError::InvalidHash(decoded.tx.hash.clone()));
        }
        fs::create_dir_all(&self.base_dir)?;

        let filepath = self.base_dir.join(format!("{}.json", decoded.tx.hash));
        let json = serde_json::to_vec_pretty(decoded)?;
        fs::write(&filepath, json)?;
        Ok(filepath)
    }
}
