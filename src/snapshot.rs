//! JSON persistence for [`GroupSnapshot`] documents.

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use split_domain::GroupSnapshot;
use tracing::{debug, info};

use crate::errors::Result;

/// Loads a group snapshot, returning structured errors on failure.
pub fn load_snapshot(path: &Path) -> Result<GroupSnapshot> {
    let data = fs::read_to_string(path)?;
    let snapshot: GroupSnapshot = serde_json::from_str(&data)?;
    debug!(
        path = %path.display(),
        expenses = snapshot.expenses.len(),
        settlements = snapshot.settlements.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Writes the snapshot atomically by staging to a sibling `.tmp` file.
/// The staging file is removed again if the write or rename fails.
pub fn save_snapshot(snapshot: &GroupSnapshot, path: &Path) -> Result<()> {
    let tmp = staging_path(path);
    let json = serde_json::to_string_pretty(snapshot)?;
    if let Err(err) = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    info!(path = %path.display(), group = %snapshot.group_id, "snapshot saved");
    Ok(())
}

/// `group.json` stages as `group.json.tmp`, so a snapshot already named
/// `*.tmp` never collides with its own staging file.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
