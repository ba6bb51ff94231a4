//! Packaging a pack directory into a `.mcpack` archive.

use super::Manifest;
use crate::error::{BridgeError, Result};
use crate::translator::BridgeConfig;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Finishes a pack directory and zips it.
pub struct PackAssembler {
    config: BridgeConfig,
}

impl PackAssembler {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    /// Write the manifest and icon into `pack_root`, then zip the whole tree
    /// to `output`. Returns the number of archived files.
    pub fn assemble(&self, pack_root: &Path, output: &Path, icon: Option<&Path>) -> Result<usize> {
        if !pack_root.is_dir() {
            return Err(BridgeError::Pack(format!(
                "Pack root is not a directory: {}",
                pack_root.display()
            )));
        }

        let manifest = Manifest::for_config(&self.config);
        std::fs::write(
            pack_root.join("manifest.json"),
            serde_json::to_string_pretty(&manifest)?,
        )?;

        if let Some(icon) = icon {
            std::fs::copy(icon, pack_root.join("pack_icon.png"))?;
        }

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(output)?;
        let count = zip_directory(pack_root, file)?;

        info!(output = %output.display(), files = count, "assembled pack");
        Ok(count)
    }
}

/// Zip every file under `root` in sorted path order, forward-slash paths.
pub fn zip_directory<W: Write + std::io::Seek>(root: &Path, writer: W) -> Result<usize> {
    let mut files = Vec::new();
    collect_files(root, root, &mut files)?;
    files.sort();

    let mut zip = zip::ZipWriter::new(writer);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, path) in &files {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(&std::fs::read(path)?)?;
    }
    zip.finish()?;
    Ok(files.len())
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<(String, PathBuf)>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(root, &path, files)?;
        } else {
            let relative = path.strip_prefix(root).map_err(|_| {
                BridgeError::Pack(format!("{} is outside the pack root", path.display()))
            })?;
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.push((name, path));
        }
    }
    Ok(())
}
