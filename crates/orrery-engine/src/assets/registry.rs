use std::collections::HashMap;
use crate::assets::manifest::AssetManifest;

/// Index of a texture in the manifest, written into render instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Registry of named textures, built from an AssetManifest.
/// Textures the host failed to load stay registered but resolve to `None`,
/// so meshes fall back to their plain tint.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    ids: HashMap<String, TextureId>,
    urls: Vec<String>,
    failed: Vec<bool>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut ids = HashMap::with_capacity(manifest.textures.len());
        let mut urls = Vec::with_capacity(manifest.textures.len());
        for (i, desc) in manifest.textures.iter().enumerate() {
            ids.insert(desc.name.clone(), TextureId(i as u32));
            urls.push(desc.url.clone());
        }
        let failed = vec![false; urls.len()];
        Self { ids, urls, failed }
    }

    /// Look up a usable texture by name.
    pub fn resolve(&self, name: &str) -> Option<TextureId> {
        let id = *self.ids.get(name)?;
        (!self.failed[id.0 as usize]).then_some(id)
    }

    pub fn url(&self, id: TextureId) -> Option<&str> {
        self.urls.get(id.0 as usize).map(String::as_str)
    }

    /// Record a load failure reported by the host. Returns false for unknown ids.
    pub fn mark_failed(&mut self, id: TextureId) -> bool {
        match self.failed.get_mut(id.0 as usize) {
            Some(slot) => {
                *slot = true;
                log::warn!("Failed to load texture: {}", self.urls[id.0 as usize]);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
