//! Cross-species alias tables
//!
//! Two fixed tables translate human and mouse canonical keys into fly
//! orthologs. They are built offline, shipped as bincode artifacts, and
//! loaded once at service start-up; lookups never touch disk afterwards.

use cellarium_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::candidate::Species;

/// Artifact file name of the human→fly table
pub const HUMAN_TO_FLY_ARTIFACT: &str = "hsap_to_dmel.bin";

/// Artifact file name of the mouse→fly table
pub const MOUSE_TO_FLY_ARTIFACT: &str = "mmus_to_dmel.bin";

/// One ortholog mapping entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrthologMapping {
    /// The ortholog symbol in the target species
    pub alias: String,
    /// Percent sequence identity of the mapping
    pub identity_pct: f64,
}

impl OrthologMapping {
    /// Create a mapping entry
    pub fn new(alias: impl Into<String>, identity_pct: f64) -> Self {
        OrthologMapping {
            alias: alias.into(),
            identity_pct,
        }
    }
}

/// Canonical key → ordered ortholog mappings
///
/// The per-key order is fixed by the artifact and drives the fan-out order
/// of cross-species search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrthologyTable {
    map: HashMap<String, Vec<OrthologMapping>>,
}

impl OrthologyTable {
    /// Create an empty table
    pub fn new() -> Self {
        OrthologyTable {
            map: HashMap::new(),
        }
    }

    /// Register the mappings for a canonical key
    pub fn insert(&mut self, canonical: impl Into<String>, mappings: Vec<OrthologMapping>) {
        self.map.insert(canonical.into(), mappings);
    }

    /// Mappings for a canonical key, in artifact order
    pub fn mappings(&self, canonical: &str) -> Option<&[OrthologMapping]> {
        self.map.get(canonical).map(Vec::as_slice)
    }

    /// Number of canonical keys
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Decode a table from its pre-built artifact
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        bincode::deserialize(&bytes).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Encode the table into an artifact file
    ///
    /// Used by the offline mapping-table build, and by tests.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = bincode::serialize(self).map_err(|e| Error::Decode(e.to_string()))?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// The two alias tables, loaded once at start-up
#[derive(Debug, Clone, Default)]
pub struct OrthologySet {
    human_to_fly: OrthologyTable,
    mouse_to_fly: OrthologyTable,
}

impl OrthologySet {
    /// Assemble a set from already-loaded tables
    pub fn from_tables(human_to_fly: OrthologyTable, mouse_to_fly: OrthologyTable) -> Self {
        OrthologySet {
            human_to_fly,
            mouse_to_fly,
        }
    }

    /// Load both artifacts from a directory
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(OrthologySet {
            human_to_fly: OrthologyTable::load(&dir.join(HUMAN_TO_FLY_ARTIFACT))?,
            mouse_to_fly: OrthologyTable::load(&dir.join(MOUSE_TO_FLY_ARTIFACT))?,
        })
    }

    /// The human→fly table
    pub fn human_to_fly(&self) -> &OrthologyTable {
        &self.human_to_fly
    }

    /// The mouse→fly table
    pub fn mouse_to_fly(&self) -> &OrthologyTable {
        &self.mouse_to_fly
    }

    /// The table selected by a cross-species namespace, if any
    pub fn table_for(&self, species: Species) -> Option<&OrthologyTable> {
        match species {
            Species::Native => None,
            Species::Human => Some(&self.human_to_fly),
            Species::Mouse => Some(&self.mouse_to_fly),
        }
    }
}
