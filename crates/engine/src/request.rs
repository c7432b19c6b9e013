//! Structured request parameters
//!
//! Every operation takes an explicit parameter struct with enumerated
//! fields; the transport deserializes into these before dispatch.

use serde::{Deserialize, Serialize};

use cellarium_core::{DatasetHandle, SessionId};
use cellarium_session::FileCategory;

/// Parameters of a feature search call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureQuery {
    /// Dataset to resolve against
    pub dataset: DatasetHandle,
    /// Raw query text, optionally prefixed with a namespace marker
    pub query: String,
}

/// Parameters of a session issue/renew call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHello {
    /// Identity presented by the caller, if any
    pub candidate_id: Option<String>,
    /// Interaction counter since the caller's last hello
    pub activity_signal: u32,
    /// Caller origin recorded in the audit log
    pub origin: String,
}

/// Notification that a client finished uploading a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadNotice {
    /// Uploading identity
    pub session: SessionId,
    /// Name of the uploaded file
    pub filename: String,
}

/// Request to delete a file from a client's own storage area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRemoval {
    /// Owning identity
    pub session: SessionId,
    /// Storage category the file lives in
    pub category: FileCategory,
    /// File name; only the basename is honored
    pub filename: String,
}
