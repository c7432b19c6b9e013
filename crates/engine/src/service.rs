//! The service facade
//!
//! One `Service` instance owns the whole core state for the process
//! lifetime: the search index (with its result cache and loaded alias
//! tables) and the session registry (with its persisted tables, audit log,
//! and user storage areas). The enclosing transport holds it behind an
//! `Arc` and dispatches each deserialized call to one method.

use std::sync::Arc;

use tracing::info;

use cellarium_core::{Result, SessionId};
use cellarium_search::{CandidateSource, OrthologySet, RankedResult, SearchIndex};
use cellarium_session::{AuditLog, SessionRegistry, SessionTables, SessionTicket, UserStore};

use crate::config::ServiceConfig;
use crate::request::{FeatureQuery, FileRemoval, SessionHello, UploadNotice};

/// The request-serving core behind the transport
pub struct Service {
    search: SearchIndex,
    sessions: SessionRegistry,
    store: Arc<UserStore>,
}

impl Service {
    /// Start the service, loading the orthology artifacts from disk
    pub fn open(config: ServiceConfig, source: Arc<dyn CandidateSource>) -> Result<Self> {
        let orthology = OrthologySet::load(&config.mappings_dir)?;
        Self::with_orthology(config, source, orthology)
    }

    /// Start the service with already-loaded alias tables
    pub fn with_orthology(
        config: ServiceConfig,
        source: Arc<dyn CandidateSource>,
        orthology: OrthologySet,
    ) -> Result<Self> {
        let store = Arc::new(UserStore::open(&config.data_root)?);
        let audit = AuditLog::open_in(&config.log_dir)?;
        let tables = SessionTables::new(&config.config_dir);
        let sessions = SessionRegistry::open(
            tables,
            audit,
            Arc::clone(&store),
            config.session_limits.clone(),
            config.restricted_mode,
        )?;
        let search = SearchIndex::new(source, Arc::new(orthology), &config.search_limits)?;

        info!(
            restricted = config.restricted_mode,
            data_root = %config.data_root.display(),
            "service ready"
        );
        Ok(Service {
            search,
            sessions,
            store,
        })
    }

    /// Resolve a feature query to ranked, described result rows
    pub fn find_features(&self, req: &FeatureQuery) -> Result<Arc<Vec<RankedResult>>> {
        self.search.search(&req.dataset, &req.query)
    }

    /// Issue or renew the caller's identity and track its activity
    pub fn acquire_session(&self, req: &SessionHello) -> Result<SessionTicket> {
        let ticket = self
            .sessions
            .issue_or_renew(req.candidate_id.as_deref(), &req.origin)?;
        self.sessions.touch_activity(&ticket.id, req.activity_signal);
        Ok(ticket)
    }

    /// Record a finished dataset upload
    pub fn record_upload(&self, notice: &UploadNotice) {
        self.store.record_upload(&notice.session, &notice.filename);
    }

    /// The identity's finished uploads, sorted
    pub fn uploads(&self, id: &SessionId) -> Vec<String> {
        self.store.uploads(id)
    }

    /// Delete one file from the caller's own storage area
    pub fn delete_user_file(&self, req: &FileRemoval) -> bool {
        self.store
            .delete_user_file(&req.session, req.category, &req.filename)
    }

    /// Drop expired identities and stale active sessions now
    pub fn reap_expired(&self) {
        self.sessions.reap_expired();
    }

    /// Flush session state to the persisted tables
    pub fn persist(&self) -> Result<()> {
        self.sessions.persist()
    }

    /// Persist session state and stop
    pub fn shutdown(self) -> Result<()> {
        info!("service shutting down");
        self.sessions.persist()
    }

    /// The session registry
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// The search index
    pub fn search_index(&self) -> &SearchIndex {
        &self.search
    }
}
