use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use anyhow::{bail, Context, Result};

/// Asset manifest listing the textures the host page should fetch.
/// Loaded from JSON; texture ids follow declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    pub textures: Vec<TextureDescriptor>,
    /// Six cube-map face URLs for the background (+x, -x, +y, -y, +z, -z).
    #[serde(default)]
    pub skybox: Vec<String>,
}

/// Describes a single texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Name meshes refer to (e.g., "earth").
    pub name: String,
    pub url: String,
}

impl AssetManifest {
    /// Parse and validate a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json).context("malformed asset manifest")?;
        let mut seen = HashSet::with_capacity(manifest.textures.len());
        for tex in &manifest.textures {
            if !seen.insert(tex.name.as_str()) {
                bail!("texture `{}` is declared more than once", tex.name);
            }
        }
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "textures": [
                { "name": "sun", "url": "sun.jpg" },
                { "name": "earth", "url": "earth.jpg" }
            ]
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.textures.len(), 2);
        assert_eq!(manifest.textures[1].name, "earth");
        assert!(manifest.skybox.is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let json = r#"{
            "textures": [
                { "name": "moon", "url": "a.jpg" },
                { "name": "moon", "url": "b.jpg" }
            ]
        }"#;
        let err = AssetManifest::from_json(json).unwrap_err();
        assert_eq!(err.to_string(), "texture `moon` is declared more than once");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = AssetManifest::from_json("{ \"textures\": 3 }").unwrap_err();
        assert_eq!(err.to_string(), "malformed asset manifest");
        assert!(err.downcast_ref::<serde_json::Error>().is_some());
    }
}
