//! Service facade for the Cellarium server core
//!
//! Wires the search index and the session registry into one owned state
//! object the enclosing transport dispatches into. No wire format lives
//! here; request parameters arrive already deserialized as the structured
//! types in [`request`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod request;
pub mod service;

pub use config::ServiceConfig;
pub use request::{FeatureQuery, FileRemoval, SessionHello, UploadNotice};
pub use service::Service;

// Re-export the types callers handle directly.
pub use cellarium_core::{
    DatasetHandle, Error, Result, SearchLimits, SessionId, SessionLimits, Timestamp,
    PERMANENT_ID_PREFIX,
};
pub use cellarium_search::{
    CandidateEntry, CandidateSource, CandidateSpace, OrthologMapping, OrthologySet,
    OrthologyTable, RankedResult, SearchIndex, Species,
};
pub use cellarium_session::{
    AuditLog, FileCategory, SessionRegistry, SessionTables, SessionTicket, UserStore,
    PERMANENT_IDS_FILE, TIMEOUTS_FILE,
};
