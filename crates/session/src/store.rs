//! Per-identity storage areas
//!
//! Every non-permanent identity owns one directory under each of three
//! fixed category roots: uploaded matrices, gene sets, and cached rankings.
//! Directories are created on first contact and removed when the identity
//! is reaped. The store also keeps the in-memory upload ledger: which
//! dataset files each client finished uploading.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use cellarium_core::{Result, SessionId};

/// File extensions a client may delete from its own areas
const DELETABLE_EXTENSIONS: [&str; 2] = ["loom", "txt"];

/// The three per-identity storage categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileCategory {
    /// Uploaded expression matrices
    Matrix,
    /// Uploaded gene-set files
    GeneSet,
    /// Cached enrichment rankings
    Ranking,
}

impl FileCategory {
    /// All categories, in root-creation order
    pub const ALL: [FileCategory; 3] = [
        FileCategory::Matrix,
        FileCategory::GeneSet,
        FileCategory::Ranking,
    ];

    /// Directory name of the category root
    pub fn dir_name(&self) -> &'static str {
        match self {
            FileCategory::Matrix => "matrices",
            FileCategory::GeneSet => "gene-sets",
            FileCategory::Ranking => "rankings",
        }
    }
}

/// On-disk layout of per-identity data plus the upload ledger
#[derive(Debug)]
pub struct UserStore {
    root: PathBuf,
    uploads: Mutex<HashMap<SessionId, HashSet<String>>>,
}

impl UserStore {
    /// Open a store under `root`, creating the category roots if absent
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for category in FileCategory::ALL {
            fs::create_dir_all(root.join(category.dir_name()))?;
        }
        Ok(UserStore {
            root,
            uploads: Mutex::new(HashMap::new()),
        })
    }

    /// Root directory of a category
    pub fn category_dir(&self, category: FileCategory) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// An identity's directory within a category
    pub fn identity_dir(&self, category: FileCategory, id: &SessionId) -> PathBuf {
        self.category_dir(category).join(id.as_str())
    }

    /// Create all category directories for a new identity
    pub fn create_identity_dirs(&self, id: &SessionId) -> Result<()> {
        for category in FileCategory::ALL {
            fs::create_dir_all(self.identity_dir(category, id))?;
        }
        Ok(())
    }

    /// Remove an identity's directories and forget its uploads
    ///
    /// Best effort: a missing directory is not an error, and removal
    /// failures are logged rather than propagated so a reap can continue
    /// with the remaining identities.
    pub fn remove_identity_dirs(&self, id: &SessionId) {
        for category in FileCategory::ALL {
            let dir = self.identity_dir(category, id);
            if !dir.exists() {
                continue;
            }
            if let Err(e) = fs::remove_dir_all(&dir) {
                warn!(id = %id, dir = %dir.display(), error = %e, "failed to remove identity directory");
            }
        }
        self.uploads.lock().remove(id);
    }

    /// Record a finished dataset upload for an identity
    pub fn record_upload(&self, id: &SessionId, filename: impl Into<String>) {
        self.uploads
            .lock()
            .entry(id.clone())
            .or_default()
            .insert(filename.into());
    }

    /// The identity's finished uploads, sorted
    pub fn uploads(&self, id: &SessionId) -> Vec<String> {
        let mut names: Vec<String> = self
            .uploads
            .lock()
            .get(id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Delete one file from an identity's category directory
    ///
    /// Only the basename of `name` is honored, and only files with an
    /// allowed extension are removed. Returns whether a file was deleted.
    pub fn delete_user_file(&self, id: &SessionId, category: FileCategory, name: &str) -> bool {
        let Some(basename) = Path::new(name).file_name() else {
            return false;
        };
        let allowed = Path::new(basename)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| DELETABLE_EXTENSIONS.contains(&e));
        if !allowed {
            return false;
        }

        let path = self.identity_dir(category, id).join(basename);
        if !path.is_file() {
            return false;
        }
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to delete user file");
                false
            }
        }
    }
}
