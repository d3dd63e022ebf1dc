/// Educational facts shown in the info panel, keyed by body name.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../assets/bodies.json");

/// One labelled data row ("Diameter", "12,742 km").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub data: Vec<InfoRow>,
    #[serde(default)]
    pub facts: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InfoCatalog {
    entries: HashMap<String, BodyInfo>,
}

impl InfoCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, BodyInfo> =
            serde_json::from_str(json).context("malformed body info catalog")?;
        Ok(Self { entries })
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn get(&self, name: &str) -> Option<&BodyInfo> {
        self.entries.get(name)
    }

    /// Entry serialized for the host page, with the body name included.
    pub fn to_json(&self, name: &str) -> Option<String> {
        #[derive(Serialize)]
        struct Entry<'a> {
            name: &'a str,
            #[serde(flatten)]
            info: &'a BodyInfo,
        }

        let info = self.get(name)?;
        match serde_json::to_string(&Entry { name, info }) {
            Ok(json) => Some(json),
            Err(e) => {
                log::error!("failed to serialize info for {name}: {e}");
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
