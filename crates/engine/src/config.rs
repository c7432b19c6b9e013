//! Service configuration
//!
//! One root directory holds everything the core persists: the session
//! config files, audit logs, per-identity user data, and the pre-built
//! gene-mapping artifacts. Deployments override individual paths and
//! limits through the builder-style setters.

use std::path::PathBuf;

use cellarium_core::{SearchLimits, SessionLimits};

/// Configuration of a [`crate::Service`]
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory of the persisted session tables
    pub config_dir: PathBuf,
    /// Directory the audit log is written into
    pub log_dir: PathBuf,
    /// Root of the per-identity storage areas
    pub data_root: PathBuf,
    /// Directory of the pre-built orthology artifacts
    pub mappings_dir: PathBuf,
    /// Restricted deployment: hand out only the provisioned identity
    pub restricted_mode: bool,
    /// Session lifecycle policy
    pub session_limits: SessionLimits,
    /// Search policy
    pub search_limits: SearchLimits,
}

impl ServiceConfig {
    /// Standard layout under one root directory
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        ServiceConfig {
            config_dir: root.join("config"),
            log_dir: root.join("logs"),
            data_root: root.join("user-data"),
            mappings_dir: root.join("gene-mappings"),
            restricted_mode: false,
            session_limits: SessionLimits::default(),
            search_limits: SearchLimits::default(),
        }
    }

    /// Toggle restricted deployment mode
    pub fn with_restricted_mode(mut self, restricted: bool) -> Self {
        self.restricted_mode = restricted;
        self
    }

    /// Override the session lifecycle policy
    pub fn with_session_limits(mut self, limits: SessionLimits) -> Self {
        self.session_limits = limits;
        self
    }

    /// Override the search policy
    pub fn with_search_limits(mut self, limits: SearchLimits) -> Self {
        self.search_limits = limits;
        self
    }
}
