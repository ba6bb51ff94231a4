//! Raw asset access for Java resources.
//!
//! Assets are fetched as raw bytes by their full `assets/<namespace>/...`
//! path. Two stores are layered: the in-progress pack (which may override
//! bundled defaults with already-generated content) and the mod-bundled
//! resources loaded from a ZIP archive or directory.

pub mod item_asset;
pub mod loader;
pub mod model;
pub mod texture;

pub use item_asset::{ItemAsset, ItemModel};
pub use model::{ModelDefinition, ModelElement, ModelFace, TextureRefMap};
pub use texture::texture_dimensions;

use crate::types::ResourceLocation;
use std::collections::BTreeMap;

/// Byte-level access to resources keyed by full asset path.
pub trait AssetSource {
    /// Read the bytes at `path`, or `None` if this source does not provide it.
    fn read(&self, path: &str) -> Option<Vec<u8>>;

    /// Whether this source provides `path`.
    fn contains(&self, path: &str) -> bool {
        self.read(path).is_some()
    }
}

/// An in-memory path to bytes store.
///
/// Used for mod-bundled resources once loaded and for the pack under
/// construction.
#[derive(Debug, Default, Clone)]
pub struct ResourceStore {
    files: BTreeMap<String, Vec<u8>>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a file.
    pub fn insert(&mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), data.into());
    }

    /// Total number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|p| p.as_str())
    }

    /// Count files of one asset kind ("models", "textures", "items", ...).
    pub fn count_kind(&self, kind: &str) -> usize {
        self.paths()
            .filter(|path| {
                path.splitn(4, '/')
                    .nth(2)
                    .map(|segment| segment == kind)
                    .unwrap_or(false)
            })
            .count()
    }

    /// All namespaces present under `assets/`.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<_> = self
            .paths()
            .filter_map(|path| path.strip_prefix("assets/"))
            .filter_map(|rest| rest.split('/').next())
            .collect();
        namespaces.dedup();
        namespaces
    }
}

impl AssetSource for ResourceStore {
    fn read(&self, path: &str) -> Option<Vec<u8>> {
        self.files.get(path).cloned()
    }

    fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

/// Checks an overlay source before falling back to the bundled one.
pub struct LayeredSource<'a> {
    overlay: &'a dyn AssetSource,
    bundled: &'a dyn AssetSource,
}

impl<'a> LayeredSource<'a> {
    pub fn new(overlay: &'a dyn AssetSource, bundled: &'a dyn AssetSource) -> Self {
        Self { overlay, bundled }
    }
}

impl AssetSource for LayeredSource<'_> {
    fn read(&self, path: &str) -> Option<Vec<u8>> {
        self.overlay.read(path).or_else(|| self.bundled.read(path))
    }

    fn contains(&self, path: &str) -> bool {
        self.overlay.contains(path) || self.bundled.contains(path)
    }
}

/// Asset path for a model: `assets/<ns>/models/<path>.json`.
pub fn model_path(location: &ResourceLocation) -> String {
    asset_path(location, "models", "json")
}

/// Asset path for a texture: `assets/<ns>/textures/<path>.png`.
pub fn texture_path(location: &ResourceLocation) -> String {
    asset_path(location, "textures", "png")
}

/// Asset path for an item asset: `assets/<ns>/items/<path>.json`.
pub fn item_asset_path(location: &ResourceLocation) -> String {
    asset_path(location, "items", "json")
}

fn asset_path(location: &ResourceLocation, kind: &str, extension: &str) -> String {
    format!(
        "assets/{}/{}/{}.{}",
        location.namespace(),
        kind,
        location.path(),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_paths() {
        let location = ResourceLocation::parse("mymod:block/ruby");
        assert_eq!(model_path(&location), "assets/mymod/models/block/ruby.json");
        assert_eq!(texture_path(&location), "assets/mymod/textures/block/ruby.png");

        let item = ResourceLocation::parse("ruby");
        assert_eq!(item_asset_path(&item), "assets/minecraft/items/ruby.json");
    }

    #[test]
    fn test_layered_source_prefers_overlay() {
        let mut overlay = ResourceStore::new();
        overlay.insert("assets/a/models/x.json", b"overlay".to_vec());

        let mut bundled = ResourceStore::new();
        bundled.insert("assets/a/models/x.json", b"bundled".to_vec());
        bundled.insert("assets/a/models/y.json", b"only bundled".to_vec());

        let layered = LayeredSource::new(&overlay, &bundled);
        assert_eq!(layered.read("assets/a/models/x.json"), Some(b"overlay".to_vec()));
        assert_eq!(layered.read("assets/a/models/y.json"), Some(b"only bundled".to_vec()));
        assert!(layered.read("assets/a/models/z.json").is_none());
        assert!(layered.contains("assets/a/models/y.json"));
    }

    #[test]
    fn test_store_counts() {
        let mut store = ResourceStore::new();
        store.insert("assets/a/models/block/x.json", Vec::new());
        store.insert("assets/a/models/item/y.json", Vec::new());
        store.insert("assets/b/textures/block/x.png", Vec::new());
        store.insert("pack.mcmeta", Vec::new());

        assert_eq!(store.len(), 4);
        assert_eq!(store.count_kind("models"), 2);
        assert_eq!(store.count_kind("textures"), 1);
        assert_eq!(store.count_kind("items"), 0);
        assert_eq!(store.namespaces(), vec!["a", "b"]);
    }
}
