//! JSON persistence for the policy store.

use std::fs;
use std::path::Path;

use karma_core::MemoryStore;

/// Load the store from disk. A missing file is an empty store, so every
/// command works against a fresh path.
pub fn load(path: &Path) -> Result<MemoryStore, String> {
    if !path.exists() {
        return Ok(MemoryStore::new());
    }
    let content =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("malformed store {}: {e}", path.display()))
}

/// Write the store back as pretty JSON.
pub fn save(path: &Path, store: &MemoryStore) -> Result<(), String> {
    let json = serde_json::to_string_pretty(store)
        .map_err(|e| format!("cannot serialize store: {e}"))?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))
}
