use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

/// Serializes portfolios to the persisted JSON document and back.
///
/// The export/backup document and the persisted document are the same
/// serialization — byte-identical field set. Holdings and prices are
/// kept in BTreeMaps, so repeated exports of the same state are
/// byte-identical too.
pub struct StorageManager;

impl StorageManager {
    /// Render the persisted JSON document (pretty-printed).
    pub fn to_json(portfolio: &Portfolio) -> Result<String, CoreError> {
        serde_json::to_string_pretty(portfolio)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))
    }

    /// Parse a persisted or backup document. Fields an older document
    /// is missing are default-filled; malformed JSON or wrongly typed
    /// fields are a deserialization error.
    pub fn from_json(json: &str) -> Result<Portfolio, CoreError> {
        serde_json::from_str(json).map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse portfolio document: {e}"))
        })
    }

    /// Save a portfolio document to disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(
        portfolio: &Portfolio,
        path: impl AsRef<std::path::Path>,
    ) -> Result<(), CoreError> {
        std::fs::write(path, Self::to_json(portfolio)?)?;
        Ok(())
    }

    /// Load a portfolio document from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Portfolio, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
