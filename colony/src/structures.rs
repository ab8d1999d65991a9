use log::{error, info, warn};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Known structure templates addressed by name and by content hash.
#[derive(Debug, Default, Clone)]
pub struct StructureCatalog {
    hashes: HashMap<String, String>,
    names: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Relocation {
    Known,
    Relocated { name: String },
    Broken,
}

impl StructureCatalog {
    pub fn structure_name(style: &str, schematic: &str, level: u8) -> String {
        format!("schematics/{}/{}{}", style, schematic, level)
    }

    pub fn content_hash(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        hex::encode(hasher.finalize())
    }

    pub fn register(&mut self, name: &str, content: &[u8]) -> String {
        let hash = Self::content_hash(content);
        if let Some(previous) = self.names.get(&hash) {
            if previous != name {
                info!("Structure {} has same content as {}", name, previous);
            }
        }
        self.hashes.insert(name.to_string(), hash.clone());
        self.names.insert(hash.clone(), name.to_string());
        hash
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.hashes.contains_key(name)
    }

    pub fn hash_of(&self, name: &str) -> Option<&str> {
        self.hashes.get(name).map(String::as_str)
    }

    pub fn find_by_hash(&self, hash: &str) -> Option<&str> {
        self.names.get(hash).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Resolves persisted structure reference, renamed templates are found by hash.
    pub fn relocate(&self, name: &str, hash: &str) -> Relocation {
        if self.contains(name) {
            return Relocation::Known;
        }
        match self.find_by_hash(hash) {
            Some(found) if !hash.is_empty() => {
                warn!(
                    "Structure {} not found, replaced by {} with the same hash {}",
                    name, found, hash
                );
                Relocation::Relocated {
                    name: found.to_string(),
                }
            }
            _ => {
                error!(
                    "Structure {} not found by name nor by hash {:?}, work order is broken",
                    name, hash
                );
                Relocation::Broken
            }
        }
    }
}
