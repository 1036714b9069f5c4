use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

use super::manager::StorageManager;

/// Collaborator boundary for identity-keyed persistence: "load/save the
/// Portfolio for identity X". The actual backend (flat file, database,
/// cloud document store) lives behind this trait.
pub trait PortfolioStore {
    /// Load a named portfolio for a user. `Ok(None)` when it doesn't
    /// exist yet.
    fn load(&self, user_id: &str, name: &str) -> Result<Option<Portfolio>, CoreError>;

    /// Save a named portfolio for a user, creating it if needed.
    fn save(&self, user_id: &str, name: &str, portfolio: &Portfolio) -> Result<(), CoreError>;

    /// Portfolio names stored for a user, sorted.
    fn list(&self, user_id: &str) -> Result<Vec<String>, CoreError>;
}

/// Directory-backed store: one JSON document per portfolio at
/// `<root>/<user_id>/<name>.json`.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStore {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, user_id: &str, name: &str) -> Result<std::path::PathBuf, CoreError> {
        let user = sanitize_component(user_id)?;
        let name = sanitize_component(name)?;
        Ok(self.root.join(user).join(format!("{name}.json")))
    }
}

/// User ids and portfolio names become path components; reject anything
/// that could escape the store root.
#[cfg(not(target_arch = "wasm32"))]
fn sanitize_component(part: &str) -> Result<&str, CoreError> {
    let trimmed = part.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
    {
        return Err(CoreError::Validation(format!(
            "Invalid store key: {part:?}"
        )));
    }
    Ok(trimmed)
}

#[cfg(not(target_arch = "wasm32"))]
impl PortfolioStore for FileStore {
    fn load(&self, user_id: &str, name: &str) -> Result<Option<Portfolio>, CoreError> {
        let path = self.path_for(user_id, name)?;
        if !path.exists() {
            return Ok(None);
        }
        StorageManager::load_from_file(&path).map(Some)
    }

    fn save(&self, user_id: &str, name: &str, portfolio: &Portfolio) -> Result<(), CoreError> {
        let path = self.path_for(user_id, name)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        StorageManager::save_to_file(portfolio, &path)
    }

    fn list(&self, user_id: &str) -> Result<Vec<String>, CoreError> {
        let dir = self.root.join(sanitize_component(user_id)?);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
