//! Identity and time types
//!
//! This module defines the foundational types:
//! - SessionId: opaque per-client identity token
//! - DatasetHandle: identifier of an open dataset, used as a cache key
//! - Timestamp: float epoch seconds, the unit of the persisted timeout table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Reserved prefix marking application-issued permanent identities.
///
/// Identities carrying this prefix are provisioned out-of-band through the
/// permanent-identity file; they never expire and are exempt from the
/// active-session cap.
pub const PERMANENT_ID_PREFIX: &str = "CellariumApp__";

/// Opaque per-client identity token
///
/// Ephemeral identities are random UUIDs; permanent identities carry the
/// [`PERMANENT_ID_PREFIX`] tag followed by a UUID. Anything else fails
/// [`SessionId::is_well_formed`] and is treated as unknown by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a new random ephemeral identity (UUID v4)
    pub fn new_random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Mint a new tagged permanent identity
    ///
    /// Used when seeding an absent permanent-identity file.
    pub fn new_permanent() -> Self {
        Self(format!("{}{}", PERMANENT_ID_PREFIX, Uuid::new_v4()))
    }

    /// Wrap a raw identity string as presented by a caller
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Basic format validation: a parseable UUID or a tagged permanent id
    pub fn is_well_formed(&self) -> bool {
        self.has_permanent_prefix() || Uuid::parse_str(&self.0).is_ok()
    }

    /// Whether the token carries the permanent-identity tag
    pub fn has_permanent_prefix(&self) -> bool {
        self.0.starts_with(PERMANENT_ID_PREFIX)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an open dataset
///
/// The enclosing service resolves this to an actual matrix file; the core
/// only uses it to key candidate spaces and the search result cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetHandle(String);

impl DatasetHandle {
    /// Create a handle from the dataset's path-like identifier
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seconds since the Unix epoch, fractional
///
/// Backed by `f64` so values round-trip through the tab-separated timeout
/// table unchanged. Never used as a map key.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Timestamp(f64);

impl Timestamp {
    /// The current wall-clock time
    pub fn now() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        Self(since_epoch.as_secs_f64())
    }

    /// Construct from raw epoch seconds
    pub fn from_secs_f64(secs: f64) -> Self {
        Self(secs)
    }

    /// Raw epoch seconds
    pub fn as_secs_f64(&self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self`
    ///
    /// Negative when `earlier` lies in the future (permanent identities are
    /// recorded with a far-future creation time).
    pub fn seconds_since(&self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }

    /// This timestamp shifted forward by `d`
    pub fn plus(&self, d: Duration) -> Timestamp {
        Self(self.0 + d.as_secs_f64())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
