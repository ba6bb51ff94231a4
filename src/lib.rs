//! # Blockbridge
//!
//! A Rust library for translating Java Edition block and item models into a
//! Bedrock resource pack.
//!
//! ## Overview
//!
//! Given a catalog of blocks and items plus the mod's bundled resources,
//! the library resolves model inheritance, converts cuboid elements into
//! Bedrock bone geometry, derives per-state permutations and item metadata,
//! and packages the resulting textures, atlases and geometry into a
//! `.mcpack` archive.
//!
//! ## Quick Start
//!
//! ```ignore
//! use blockbridge::{load_resources, Bridge, BridgeConfig, RecordingRegistry, ResourceStore, StaticCatalog};
//!
//! let bundled = load_resources("path/to/mod.jar")?;
//! let overlay = ResourceStore::new();
//! let catalog = StaticCatalog::from_path("catalog.json")?;
//!
//! let bridge = Bridge::new(&overlay, &bundled, BridgeConfig::default());
//! let mut registry = RecordingRegistry::new();
//! let output = bridge.translate(&catalog, &mut registry);
//! ```
//!
//! ## Host Integration
//!
//! Hosts with a live registry implement [`Catalog`] for their blocks and
//! items and [`TargetRegistry`] for their registration API, then call
//! [`build_pack`] or drive [`Bridge`] and [`PackWriter`] themselves.

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod pack;
pub mod registry;
pub mod resolver;
pub mod resource_pack;
pub mod translator;
pub mod types;

// Re-export main types for convenience
pub use catalog::{BlockEntry, Catalog, ItemEntry, Property, PropertySpace, StateEntry, StaticCatalog};
pub use error::{BridgeError, Result};
pub use geometry::{ConversionResult, GeometryFile, GeometryTransformer};
pub use pack::{Manifest, PackAssembler, PackWriter, WriteStats};
pub use registry::{RecordingRegistry, TargetRegistry};
pub use resolver::{resolve_texture_alias, ModelResolver};
pub use resource_pack::{AssetSource, LayeredSource, ResourceStore};
pub use translator::{Bridge, BridgeConfig, TexturedItems, TranslationOutput, TranslationStats};
pub use types::{Direction, ResourceLocation};

use std::path::Path;

/// Load bundled resources from a file path (ZIP or directory).
pub fn load_resources<P: AsRef<Path>>(path: P) -> Result<ResourceStore> {
    resource_pack::loader::load_from_path(path)
}

/// Load bundled resources from ZIP bytes.
pub fn load_resources_from_bytes(data: &[u8]) -> Result<ResourceStore> {
    resource_pack::loader::load_from_bytes(data)
}

/// Paths used by [`build_pack`].
#[derive(Debug, Clone, Copy)]
pub struct PackPaths<'p> {
    /// Directory the pack tree is built in.
    pub work_dir: &'p Path,
    /// The `.mcpack` archive to write.
    pub output: &'p Path,
    pub icon: Option<&'p Path>,
}

/// Summary of a [`build_pack`] run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub translation: TranslationStats,
    pub written: WriteStats,
    pub archived_files: usize,
    pub textured_items: TexturedItems,
}

/// Translate `catalog`, write the pack tree and zip it.
pub fn build_pack(
    catalog: &dyn Catalog,
    overlay: &dyn AssetSource,
    bundled: &dyn AssetSource,
    registry: &mut dyn TargetRegistry,
    config: BridgeConfig,
    paths: PackPaths<'_>,
) -> Result<BuildReport> {
    let bridge = Bridge::new(overlay, bundled, config.clone());
    let output = bridge.translate(catalog, registry);

    let writer = PackWriter::new(paths.work_dir)?;
    let written = writer.write_contents(&output.contents, bridge.source(), &config.pack_name)?;

    let archived_files =
        PackAssembler::new(config).assemble(paths.work_dir, paths.output, paths.icon)?;

    Ok(BuildReport {
        translation: output.stats,
        written,
        archived_files,
        textured_items: output.textured_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_pack::texture::encode_test_png;
    use std::io::Read;

    #[test]
    fn test_build_pack_end_to_end() {
        let mut bundled = ResourceStore::new();
        bundled.insert(
            "assets/mymod/models/block/ruby_block.json",
            br##"{ "textures": { "all": "mymod:block/ruby_block" },
                   "elements": [ { "from": [0, 0, 0], "to": [16, 16, 16], "faces": {
                       "north": { "texture": "#all" }, "south": { "texture": "#all" } } } ] }"##
                .to_vec(),
        );
        bundled.insert("assets/mymod/textures/block/ruby_block.png", encode_test_png(16, 16));
        bundled.insert(
            "assets/mymod/items/ruby_block.json",
            br#"{ "model": { "type": "minecraft:model", "model": "mymod:block/ruby_block" } }"#.to_vec(),
        );

        let catalog = StaticCatalog::from_json(
            br#"{
                "blocks": [ { "id": "mymod:ruby_block", "translation_key": "block.mymod.ruby_block",
                              "states": [ { "models": [ { "model": "mymod:block/ruby_block" } ] } ] } ],
                "items": [ { "id": "mymod:ruby_block", "translation_key": "block.mymod.ruby_block",
                             "display_model": "mymod:ruby_block", "block": "mymod:ruby_block" } ]
            }"#,
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let work_dir = dir.path().join("pack");
        let output = dir.path().join("ruby.mcpack");
        let overlay = ResourceStore::new();
        let mut registry = RecordingRegistry::new();

        let report = build_pack(
            &catalog,
            &overlay,
            &bundled,
            &mut registry,
            BridgeConfig::default().with_pack_name("ruby"),
            PackPaths {
                work_dir: &work_dir,
                output: &output,
                icon: None,
            },
        )
        .unwrap();

        assert_eq!(report.translation.blocks_translated, 1);
        assert_eq!(report.translation.items_translated, 1);
        assert_eq!(report.written.geometries, 1);
        assert_eq!(report.written.textures_copied, 1);

        let block = registry.block("mymod:ruby_block").unwrap();
        assert!(block.permutations.is_empty());
        assert_eq!(block.components.as_ref().unwrap().material_instances.len(), 2);

        let item = registry.item("mymod:ruby_block").unwrap();
        assert_eq!(item.block.as_deref(), Some("mymod:ruby_block"));
        assert!(item.icon.is_empty());

        let mut archive = zip::ZipArchive::new(std::fs::File::open(&output).unwrap()).unwrap();
        assert_eq!(archive.len(), report.archived_files);
        let mut geometry = String::new();
        archive
            .by_name("models/blocks/mymod.block.ruby_block.geo.json")
            .unwrap()
            .read_to_string(&mut geometry)
            .unwrap();
        let geometry: GeometryFile = serde_json::from_str(&geometry).unwrap();
        assert_eq!(geometry.format_version, "1.16.0");
        assert_eq!(geometry.geometry[0].bones.len(), 1);

        let mut items_atlas = String::new();
        archive
            .by_name("textures/item_texture.json")
            .unwrap()
            .read_to_string(&mut items_atlas)
            .unwrap();
        let items_atlas: serde_json::Value = serde_json::from_str(&items_atlas).unwrap();
        assert!(items_atlas["texture_data"].as_object().unwrap().is_empty());
        assert!(archive.by_name("manifest.json").is_ok());
    }
}
