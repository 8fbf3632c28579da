use std::{fs, path::Path};

use spendview_domain::ExpenseRecord;
use tracing::debug;

use crate::errors::SpendError;

/// Writes the snapshot to disk atomically by staging to a temporary file.
pub fn save_snapshot_to_file(records: &[ExpenseRecord], path: &Path) -> Result<(), SpendError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(records)?;
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), records = records.len(), "snapshot saved");
    Ok(())
}

/// Loads a snapshot file (a JSON array of expense records).
pub fn load_snapshot_from_file(path: &Path) -> Result<Vec<ExpenseRecord>, SpendError> {
    let data = fs::read_to_string(path)?;
    let records: Vec<ExpenseRecord> = serde_json::from_str(&data)?;
    debug!(path = %path.display(), records = records.len(), "snapshot loaded");
    Ok(records)
}
