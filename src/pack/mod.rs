//! Writing translated contents into a pack directory.
//!
//! Layout of a generated pack:
//!
//! ```text
//! manifest.json
//! pack_icon.png
//! models/blocks/<stem>.geo.json
//! textures/blocks/**.png
//! textures/items/**.png
//! textures/terrain_texture.json
//! textures/item_texture.json
//! texts/en_US.lang
//! texts/languages.json
//! ```

pub mod assembler;
pub mod manifest;

pub use assembler::PackAssembler;
pub use manifest::{Manifest, ManifestHeader, ManifestModule};

use crate::error::Result;
use crate::geometry::GeometryFile;
use crate::resource_pack::AssetSource;
use crate::translator::{TextureCopy, TextureKind, TranslationUnit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Language every translation is written for.
pub const DEFAULT_LANGUAGE: &str = "en_US";

/// A texture atlas file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasFile {
    pub resource_pack_name: String,
    pub texture_name: String,
    pub texture_data: BTreeMap<String, AtlasEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasEntry {
    pub textures: String,
}

impl AtlasFile {
    pub fn new(pack_name: &str, kind: TextureKind, entries: Option<&BTreeMap<String, String>>) -> Self {
        let texture_data = entries
            .into_iter()
            .flatten()
            .map(|(name, path)| {
                (
                    name.clone(),
                    AtlasEntry {
                        textures: path.clone(),
                    },
                )
            })
            .collect();
        Self {
            resource_pack_name: pack_name.to_string(),
            texture_name: kind.atlas_name().to_string(),
            texture_data,
        }
    }
}

/// What [`PackWriter::write_contents`] wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub geometries: usize,
    pub textures_copied: usize,
    pub textures_missing: usize,
}

/// Writes files into a pack directory.
pub struct PackWriter {
    root: PathBuf,
}

impl PackWriter {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write everything in `contents`, reading textures from `source`.
    pub fn write_contents(
        &self,
        contents: &TranslationUnit,
        source: &dyn AssetSource,
        pack_name: &str,
    ) -> Result<WriteStats> {
        let mut stats = WriteStats::default();

        for (stem, document) in &contents.geometries {
            self.write_geometry(stem, document)?;
            stats.geometries += 1;
        }

        for copy in &contents.textures {
            if self.copy_texture(copy, source)? {
                stats.textures_copied += 1;
            } else {
                stats.textures_missing += 1;
            }
        }

        for kind in [TextureKind::Block, TextureKind::Item] {
            self.write_atlas(&AtlasFile::new(pack_name, kind, contents.atlas(kind)), kind)?;
        }

        self.write_translations(&contents.translations)?;

        debug!(
            geometries = stats.geometries,
            textures = stats.textures_copied,
            missing = stats.textures_missing,
            "wrote pack contents"
        );
        Ok(stats)
    }

    /// Write `models/blocks/<stem>.geo.json`.
    pub fn write_geometry(&self, stem: &str, document: &GeometryFile) -> Result<PathBuf> {
        let path = self.root.join("models").join("blocks").join(format!("{}.geo.json", stem));
        self.write_json(&path, document)?;
        Ok(path)
    }

    /// Copy a texture unless the destination already exists. Returns
    /// whether the destination now holds the texture.
    pub fn copy_texture(&self, copy: &TextureCopy, source: &dyn AssetSource) -> Result<bool> {
        let path = self.root.join(format!("{}.png", copy.target));
        if path.exists() {
            return Ok(true);
        }

        let Some(data) = source.read(&copy.source) else {
            warn!(texture = %copy.source, "texture not found, not copied");
            return Ok(false);
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, data)?;
        Ok(true)
    }

    pub fn write_atlas(&self, atlas: &AtlasFile, kind: TextureKind) -> Result<()> {
        self.write_json(&self.root.join(kind.atlas_file()), atlas)
    }

    /// Write `texts/en_US.lang` and `texts/languages.json`.
    pub fn write_translations(&self, translations: &BTreeMap<String, String>) -> Result<()> {
        let texts = self.root.join("texts");
        std::fs::create_dir_all(&texts)?;

        let lang: String = translations
            .iter()
            .map(|(key, value)| format!("{}={}\n", key, value))
            .collect();
        std::fs::write(texts.join(format!("{}.lang", DEFAULT_LANGUAGE)), lang)?;
        self.write_json(&texts.join("languages.json"), &[DEFAULT_LANGUAGE])
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_pack::ResourceStore;
    use crate::types::ResourceLocation;

    fn contents() -> TranslationUnit {
        let mut unit = TranslationUnit::new();
        unit.add_texture(
            "mymod:block/ruby_block",
            &ResourceLocation::parse("mymod:block/ruby_block"),
            TextureKind::Block,
        );
        unit.add_texture(
            "mymod:ruby",
            &ResourceLocation::parse("mymod:item/ruby"),
            TextureKind::Item,
        );
        unit.add_translation("tile.mymod:ruby_block.name", "Block of Ruby");
        unit.add_translation("item.mymod:ruby.name", "Ruby");
        unit
    }

    #[test]
    fn test_write_contents() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PackWriter::new(dir.path()).unwrap();

        let mut source = ResourceStore::new();
        source.insert("assets/mymod/textures/block/ruby_block.png", b"block png".to_vec());

        let stats = writer.write_contents(&contents(), &source, "ruby").unwrap();
        assert_eq!(stats.textures_copied, 1);
        assert_eq!(stats.textures_missing, 1);

        let copied = std::fs::read(dir.path().join("textures/blocks/ruby_block.png")).unwrap();
        assert_eq!(copied, b"block png");
        assert!(!dir.path().join("textures/items/ruby.png").exists());

        let terrain: serde_json::Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("textures/terrain_texture.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(terrain["resource_pack_name"], "ruby");
        assert_eq!(terrain["texture_name"], "atlas.terrain");
        assert_eq!(
            terrain["texture_data"]["mymod:block/ruby_block"]["textures"],
            "textures/blocks/ruby_block"
        );

        let items: serde_json::Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("textures/item_texture.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(items["texture_name"], "atlas.items");
        assert_eq!(items["texture_data"]["mymod:ruby"]["textures"], "textures/items/ruby");

        let lang = std::fs::read_to_string(dir.path().join("texts/en_US.lang")).unwrap();
        assert_eq!(
            lang,
            "item.mymod:ruby.name=Ruby\ntile.mymod:ruby_block.name=Block of Ruby\n"
        );
        let languages = std::fs::read_to_string(dir.path().join("texts/languages.json")).unwrap();
        assert!(languages.contains("en_US"));
    }

    #[test]
    fn test_copy_texture_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PackWriter::new(dir.path()).unwrap();
        let target = dir.path().join("textures/blocks/ruby_block.png");
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, b"existing").unwrap();

        let mut source = ResourceStore::new();
        source.insert("assets/mymod/textures/block/ruby_block.png", b"new".to_vec());
        let copy = TextureCopy {
            source: "assets/mymod/textures/block/ruby_block.png".to_string(),
            target: "textures/blocks/ruby_block".to_string(),
        };

        assert!(writer.copy_texture(&copy, &source).unwrap());
        assert_eq!(std::fs::read(&target).unwrap(), b"existing");
    }

    #[test]
    fn test_write_geometry_path() {
        use crate::geometry::{Geometry, GeometryDescription};

        let dir = tempfile::tempdir().unwrap();
        let writer = PackWriter::new(dir.path()).unwrap();
        let document = GeometryFile::single(
            "1.16.0",
            Geometry {
                description: GeometryDescription {
                    identifier: "geometry.mymod.block.ruby_block".to_string(),
                    texture_width: 16,
                    texture_height: 16,
                },
                bones: Vec::new(),
            },
        );

        let path = writer.write_geometry("mymod.block.ruby_block", &document).unwrap();
        assert_eq!(path, dir.path().join("models/blocks/mymod.block.ruby_block.geo.json"));

        let written: GeometryFile = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(written, document);
    }
}
