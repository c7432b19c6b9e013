//! Timeouts, caps, and cache sizes
//!
//! This module defines the policy constants of the session and search
//! components. Defaults match the deployed service; tests and restricted
//! deployments override them at construction time.

use std::time::Duration;

const ONE_DAY: Duration = Duration::from_secs(60 * 60 * 24);

/// Session lifecycle policy
///
/// Two independent timeout regimes apply to every client: the identity TTL
/// (how long an issued identity stays valid, measured from creation) and the
/// active-session timeout (how long an identity may idle before it drops out
/// of the active set).
#[derive(Debug, Clone)]
pub struct SessionLimits {
    /// How long an issued identity stays valid, measured from creation
    /// (default: 5 days)
    pub identity_ttl: Duration,

    /// How long an active session may idle before eviction (default: 300 s)
    pub active_session_timeout: Duration,

    /// Maximum simultaneously active non-permanent sessions (default: 25)
    pub max_active_sessions: usize,

    /// Minimum activity signal that counts as interaction (default: 1)
    pub activity_threshold: u32,

    /// Far-future creation offset applied to permanent identities when they
    /// are merged into the registry (default: 365 days)
    pub permanent_lease: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        SessionLimits {
            identity_ttl: 5 * ONE_DAY,
            active_session_timeout: Duration::from_secs(60 * 5),
            max_active_sessions: 25,
            activity_threshold: 1,
            permanent_lease: 365 * ONE_DAY,
        }
    }
}

/// Search component policy
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Capacity of the per-(dataset, query) result cache (default: 256)
    pub cache_capacity: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            cache_capacity: 256,
        }
    }
}
