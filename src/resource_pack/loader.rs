//! Loading bundled resources from ZIP files and directories.

use super::ResourceStore;
use crate::error::{BridgeError, Result};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Load bundled resources from a file path.
///
/// Supports both ZIP files (mod jars, resource packs) and directories.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ResourceStore> {
    let path = path.as_ref();

    if path.is_dir() {
        load_from_directory(path)
    } else {
        let data = std::fs::read(path)?;
        load_from_bytes(&data)
    }
}

/// Load bundled resources from ZIP bytes.
///
/// Only entries under `assets/` are kept; everything else in a mod jar is code.
pub fn load_from_bytes(data: &[u8]) -> Result<ResourceStore> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut store = ResourceStore::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        let file_path = file.name().replace('\\', "/");
        if parse_asset_path(&file_path).is_none() {
            continue;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        store.insert(file_path, contents);
    }

    debug!(files = store.len(), "loaded bundled resources from archive");
    Ok(store)
}

/// Load bundled resources from a directory containing `assets/`.
fn load_from_directory(path: &Path) -> Result<ResourceStore> {
    let assets_path = path.join("assets");
    if !assets_path.exists() {
        return Err(BridgeError::InvalidResources(format!(
            "No assets directory found in {}",
            path.display()
        )));
    }

    let mut store = ResourceStore::new();
    load_files_recursive(path, &assets_path, &mut |relative, data| {
        store.insert(relative, data);
    })?;

    debug!(files = store.len(), "loaded bundled resources from directory");
    Ok(store)
}

/// Parse an asset path from an archive entry.
/// Returns (namespace, asset_type, asset_path) if valid.
fn parse_asset_path(file_path: &str) -> Option<(&str, &str, &str)> {
    // Expected format: assets/{namespace}/{type}/{path}
    let parts: Vec<&str> = file_path.splitn(4, '/').collect();

    if parts.len() >= 4 && parts[0] == "assets" {
        Some((parts[1], parts[2], parts[3]))
    } else {
        None
    }
}

/// Visit every file under `dir`, passing its path relative to `base`.
fn load_files_recursive<F>(base: &Path, dir: &Path, handler: &mut F) -> Result<()>
where
    F: FnMut(String, Vec<u8>),
{
    let mut entries = std::fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            load_files_recursive(base, &path, handler)?;
        } else {
            let relative = path
                .strip_prefix(base)
                .map_err(|e| BridgeError::InvalidResources(e.to_string()))?
                .to_string_lossy()
                .replace('\\', "/");

            let data = std::fs::read(&path)?;
            handler(relative, data);
        }
    }
    Ok(())
}
