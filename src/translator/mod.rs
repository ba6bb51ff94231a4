//! Catalog translation.
//!
//! [`Bridge`] walks a [`Catalog`], converts every block and item it can and
//! registers the results with a [`TargetRegistry`]. Files destined for the
//! pack are collected in a [`TranslationUnit`] returned at the end; nothing
//! is written to disk here.

mod block;
mod item;

use crate::catalog::Catalog;
use crate::geometry::{GeometryFile, GeometryTransformer};
use crate::registry::TargetRegistry;
use crate::resolver::ModelResolver;
use crate::resource_pack::{texture_path, AssetSource, LayeredSource};
use crate::types::ResourceLocation;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{error, info};

/// Translation and pack settings.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Pack name, also written into atlas files.
    pub pack_name: String,
    pub pack_description: String,
    pub pack_version: [u32; 3],
    pub min_engine_version: [u32; 3],
    /// Render method of every material instance.
    pub render_method: String,
    /// Use random manifest UUIDs instead of name-derived ones.
    pub randomize_uuids: bool,
    /// `format_version` of generated geometry files.
    pub geometry_format_version: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            pack_name: "blockbridge".to_string(),
            pack_description: "Translated block and item resources".to_string(),
            pack_version: [1, 0, 0],
            min_engine_version: [1, 21, 70],
            render_method: "alpha_test_single_sided".to_string(),
            randomize_uuids: false,
            geometry_format_version: "1.16.0".to_string(),
        }
    }
}

impl BridgeConfig {
    pub fn with_pack_name(mut self, name: impl Into<String>) -> Self {
        self.pack_name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.pack_description = description.into();
        self
    }

    pub fn with_version(mut self, version: [u32; 3]) -> Self {
        self.pack_version = version;
        self
    }

    pub fn with_render_method(mut self, render_method: impl Into<String>) -> Self {
        self.render_method = render_method.into();
        self
    }

    pub fn with_random_uuids(mut self, randomize: bool) -> Self {
        self.randomize_uuids = randomize;
        self
    }
}

/// Which texture atlas a texture belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureKind {
    Block,
    Item,
}

impl TextureKind {
    /// Path segment the origin uses for this kind.
    pub fn source_segment(self) -> &'static str {
        match self {
            TextureKind::Block => "block",
            TextureKind::Item => "item",
        }
    }

    /// Path segment the target uses for this kind.
    pub fn target_segment(self) -> &'static str {
        match self {
            TextureKind::Block => "blocks",
            TextureKind::Item => "items",
        }
    }

    pub fn atlas_name(self) -> &'static str {
        match self {
            TextureKind::Block => "atlas.terrain",
            TextureKind::Item => "atlas.items",
        }
    }

    /// Atlas file, relative to the pack root.
    pub fn atlas_file(self) -> &'static str {
        match self {
            TextureKind::Block => "textures/terrain_texture.json",
            TextureKind::Item => "textures/item_texture.json",
        }
    }
}

/// Pack-relative path (without extension) a texture is copied to.
///
/// `block/...` and `item/...` map to `textures/blocks/...` and
/// `textures/items/...`; anything else is placed under `kind`'s directory.
pub fn target_texture_path(texture: &ResourceLocation, kind: TextureKind) -> String {
    let path = texture.path();
    let rebased = match path.split_once('/') {
        Some((segment, rest)) if segment == TextureKind::Block.source_segment() => {
            format!("{}/{}", TextureKind::Block.target_segment(), rest)
        }
        Some((segment, rest)) if segment == TextureKind::Item.source_segment() => {
            format!("{}/{}", TextureKind::Item.target_segment(), rest)
        }
        _ => format!("{}/{}", kind.target_segment(), path),
    };
    format!("textures/{}", rebased)
}

/// A texture to copy into the pack.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextureCopy {
    /// Full asset path of the source PNG.
    pub source: String,
    /// Pack-relative destination without extension.
    pub target: String,
}

/// Everything one translation contributes to the pack.
#[derive(Debug, Clone, Default)]
pub struct TranslationUnit {
    pub textures: BTreeSet<TextureCopy>,
    /// Atlas entries per atlas: texture name to pack path.
    pub atlases: BTreeMap<TextureKind, BTreeMap<String, String>>,
    /// Target translation key to display text.
    pub translations: BTreeMap<String, String>,
    /// Geometry documents keyed by file stem.
    pub geometries: BTreeMap<String, GeometryFile>,
}

impl TranslationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `texture` for copying and register it in `kind`'s atlas under `name`.
    pub fn add_texture(&mut self, name: impl Into<String>, texture: &ResourceLocation, kind: TextureKind) {
        let target = target_texture_path(texture, kind);
        self.textures.insert(TextureCopy {
            source: texture_path(texture),
            target: target.clone(),
        });
        self.atlases
            .entry(kind)
            .or_default()
            .insert(name.into(), target);
    }

    pub fn add_translation(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.translations.insert(key.into(), value.into());
    }

    pub fn add_geometry(&mut self, stem: impl Into<String>, document: GeometryFile) {
        self.geometries.insert(stem.into(), document);
    }

    pub fn atlas(&self, kind: TextureKind) -> Option<&BTreeMap<String, String>> {
        self.atlases.get(&kind)
    }

    /// Fold `other` into this unit. Existing keys are overwritten.
    pub fn merge(&mut self, other: TranslationUnit) {
        self.textures.extend(other.textures);
        for (kind, entries) in other.atlases {
            self.atlases.entry(kind).or_default().extend(entries);
        }
        self.translations.extend(other.translations);
        self.geometries.extend(other.geometries);
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
            && self.atlases.is_empty()
            && self.translations.is_empty()
            && self.geometries.is_empty()
    }
}

/// Items whose real stack target clients can render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TexturedItems {
    items: BTreeSet<ResourceLocation>,
}

impl TexturedItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: ResourceLocation) {
        self.items.insert(item);
    }

    pub fn contains(&self, item: &ResourceLocation) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceLocation> {
        self.items.iter()
    }
}

/// Counters for one translation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationStats {
    pub blocks_translated: usize,
    pub blocks_failed: usize,
    pub states_skipped: usize,
    pub items_translated: usize,
    pub items_skipped: usize,
    pub items_failed: usize,
}

/// Result of a full catalog pass.
#[derive(Debug, Clone, Default)]
pub struct TranslationOutput {
    pub contents: TranslationUnit,
    pub textured_items: TexturedItems,
    pub stats: TranslationStats,
}

/// Drives block and item translation over one set of assets.
pub struct Bridge<'a> {
    source: LayeredSource<'a>,
    bundled: &'a dyn AssetSource,
    config: BridgeConfig,
}

impl<'a> Bridge<'a> {
    /// `overlay` is the in-progress pack store, checked before `bundled`.
    pub fn new(
        overlay: &'a dyn AssetSource,
        bundled: &'a dyn AssetSource,
        config: BridgeConfig,
    ) -> Self {
        Self {
            source: LayeredSource::new(overlay, bundled),
            bundled,
            config,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The layered asset view translation reads from.
    pub fn source(&self) -> &LayeredSource<'a> {
        &self.source
    }

    fn resolver(&self) -> ModelResolver<'_> {
        ModelResolver::new(&self.source)
    }

    fn transformer(&self) -> GeometryTransformer<'_> {
        GeometryTransformer::new(&self.source, self.config.geometry_format_version.clone())
    }

    /// Translate every block, then every item.
    ///
    /// A failing entity is logged and skipped; the pass always completes.
    pub fn translate(
        &self,
        catalog: &dyn Catalog,
        registry: &mut dyn TargetRegistry,
    ) -> TranslationOutput {
        let mut output = TranslationOutput::default();

        for entry in catalog.blocks() {
            match self.translate_block(entry, registry, &mut output.stats) {
                Ok(unit) => {
                    output.contents.merge(unit);
                    output.stats.blocks_translated += 1;
                }
                Err(e) => {
                    error!(block = %entry.id, error = %e, "couldn't translate block");
                    output.stats.blocks_failed += 1;
                }
            }
        }

        for entry in catalog.items() {
            match self.translate_item(entry, registry) {
                Ok(Some(unit)) => {
                    output.contents.merge(unit);
                    output.textured_items.insert(entry.id.clone());
                    output.stats.items_translated += 1;
                }
                Ok(None) => output.stats.items_skipped += 1,
                Err(e) => {
                    error!(item = %entry.id, error = %e, "couldn't translate item");
                    output.stats.items_failed += 1;
                }
            }
        }

        info!(
            blocks = output.stats.blocks_translated,
            blocks_failed = output.stats.blocks_failed,
            states_skipped = output.stats.states_skipped,
            items = output.stats.items_translated,
            items_skipped = output.stats.items_skipped,
            items_failed = output.stats.items_failed,
            "translation finished"
        );
        output
    }
}

/// Display text for a translation key: the host's name if known.
fn display_text(display_name: Option<&String>, translation_key: &str) -> String {
    display_name
        .cloned()
        .unwrap_or_else(|| translation_key.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::resource_pack::texture::encode_test_png;
    use crate::resource_pack::ResourceStore;

    /// A bundled store with a cube model family and some textures.
    pub fn bundled_store() -> ResourceStore {
        let mut store = ResourceStore::new();
        store.insert(
            "assets/minecraft/models/block/cube.json",
            br##"{
                "elements": [ { "from": [0, 0, 0], "to": [16, 16, 16], "faces": {
                    "down": { "texture": "#down" }, "up": { "texture": "#up" },
                    "north": { "texture": "#north" }, "south": { "texture": "#south" },
                    "east": { "texture": "#east" }, "west": { "texture": "#west" } } } ]
            }"##
            .to_vec(),
        );
        store.insert(
            "assets/minecraft/models/block/cube_all.json",
            br##"{
                "parent": "block/cube",
                "textures": { "particle": "#all", "down": "#all", "up": "#all",
                              "north": "#all", "south": "#all", "east": "#all", "west": "#all" }
            }"##
            .to_vec(),
        );
        store.insert(
            "assets/mymod/models/block/ruby_block.json",
            br#"{ "parent": "minecraft:block/cube_all", "textures": { "all": "mymod:block/ruby_block" } }"#
                .to_vec(),
        );
        store.insert("assets/mymod/textures/block/ruby_block.png", encode_test_png(16, 16));
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BlockEntry, ItemEntry, StaticCatalog};
    use crate::registry::RecordingRegistry;
    use crate::resource_pack::ResourceStore;

    #[test]
    fn test_target_texture_path() {
        let block = ResourceLocation::parse("mymod:block/ruby_block");
        assert_eq!(target_texture_path(&block, TextureKind::Block), "textures/blocks/ruby_block");
        assert_eq!(target_texture_path(&block, TextureKind::Item), "textures/blocks/ruby_block");

        let item = ResourceLocation::parse("mymod:item/ruby");
        assert_eq!(target_texture_path(&item, TextureKind::Item), "textures/items/ruby");

        let other = ResourceLocation::parse("mymod:machines/press_front");
        assert_eq!(
            target_texture_path(&other, TextureKind::Block),
            "textures/blocks/machines/press_front"
        );
        assert_eq!(
            target_texture_path(&other, TextureKind::Item),
            "textures/items/machines/press_front"
        );

        // Only the leading segment is rewritten.
        let nested = ResourceLocation::parse("mymod:block/item/thing");
        assert_eq!(target_texture_path(&nested, TextureKind::Block), "textures/blocks/item/thing");
    }

    #[test]
    fn test_unit_merge() {
        let texture = ResourceLocation::parse("mymod:block/a");

        let mut first = TranslationUnit::new();
        first.add_texture("mymod:block/a", &texture, TextureKind::Block);
        first.add_translation("tile.mymod:a.name", "A");

        let mut second = TranslationUnit::new();
        second.add_texture("mymod:block/a", &texture, TextureKind::Block);
        second.add_translation("item.mymod:b.name", "B");

        first.merge(second);
        assert_eq!(first.textures.len(), 1);
        assert_eq!(first.atlas(TextureKind::Block).unwrap().len(), 1);
        assert_eq!(first.translations.len(), 2);

        let copy = first.textures.iter().next().unwrap();
        assert_eq!(copy.source, "assets/mymod/textures/block/a.png");
        assert_eq!(copy.target, "textures/blocks/a");
    }

    #[test]
    fn test_failures_are_isolated() {
        let bundled = test_support::bundled_store();
        let overlay = ResourceStore::new();
        let bridge = Bridge::new(&overlay, &bundled, BridgeConfig::default());

        let mut good = BlockEntry::new(ResourceLocation::parse("mymod:ruby_block"), "block.mymod.ruby_block");
        good.expand_states();
        good.states[0].models = vec![crate::catalog::ModelEntry::new(ResourceLocation::parse(
            "mymod:block/ruby_block",
        ))];

        let mut catalog = StaticCatalog::new();
        // Registered twice: the second registration fails on its own.
        catalog.blocks = vec![good.clone(), good];
        let mut item = ItemEntry::new(ResourceLocation::parse("mymod:ghost"), "item.mymod.ghost");
        item.display_model = Some(ResourceLocation::parse("mymod:ghost"));
        catalog.items = vec![item];

        let mut registry = RecordingRegistry::new();
        let output = bridge.translate(&catalog, &mut registry);

        assert_eq!(output.stats.blocks_translated, 1);
        assert_eq!(output.stats.blocks_failed, 1);
        assert_eq!(output.stats.items_skipped, 1);
        assert_eq!(registry.blocks.len(), 1);
        assert!(output.textured_items.is_empty());
        assert_eq!(output.contents.geometries.len(), 1);
    }
}
