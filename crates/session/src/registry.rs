//! Identity lifecycle and admission control
//!
//! The registry owns two maps: known identities with their creation times
//! (bounded by the identity TTL) and the active set with last-activity
//! stamps (bounded by the shorter active-session timeout and capped in
//! size).
//! Expiry is checked opportunistically at the start of every
//! `issue_or_renew` call; there is no background timer.
//!
//! # Thread Safety
//!
//! All state sits behind one mutex so the read-modify-write sequences
//! (reap + renewal, capacity check + admission) are atomic: two callers
//! racing on admission can never both pass the capacity cap.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use cellarium_core::{Result, SessionId, SessionLimits, Timestamp};

use crate::audit::AuditLog;
use crate::persist::SessionTables;
use crate::store::UserStore;

/// Outcome of an `issue_or_renew` call
#[derive(Debug, Clone)]
pub struct SessionTicket {
    /// The issued or renewed identity
    pub id: SessionId,
    /// Remaining identity TTL, zero when already elapsed
    pub time_remaining: Duration,
    /// Whether the identity was refused entry into the active set
    pub capacity_exceeded: bool,
}

#[derive(Debug, Clone)]
struct IdentityRecord {
    created_at: Timestamp,
    renewed_at: Timestamp,
    permanent: bool,
}

#[derive(Debug, Default)]
struct RegistryInner {
    identities: HashMap<SessionId, IdentityRecord>,
    active: HashMap<SessionId, Timestamp>,
}

/// Session/UUID admission and lifecycle manager
pub struct SessionRegistry {
    inner: Mutex<RegistryInner>,
    tables: SessionTables,
    audit: AuditLog,
    store: Arc<UserStore>,
    limits: SessionLimits,
    restricted: bool,
}

impl SessionRegistry {
    /// Open a registry, loading persisted state
    ///
    /// Reads the timeout table and the permanent-identity list (seeding the
    /// latter when absent). Restricted deployments hand out the permanent
    /// list's first identity instead of minting random ones.
    pub fn open(
        tables: SessionTables,
        audit: AuditLog,
        store: Arc<UserStore>,
        limits: SessionLimits,
        restricted: bool,
    ) -> Result<Self> {
        let mut identities = HashMap::new();
        for (id, created_at) in tables.read_timeouts()? {
            identities.insert(
                id,
                IdentityRecord {
                    created_at,
                    renewed_at: created_at,
                    permanent: false,
                },
            );
        }

        let now = Timestamp::now();
        let permanent_ids = tables.read_or_seed_permanent()?;
        for id in permanent_ids {
            identities.insert(id, Self::permanent_record(now, &limits));
        }
        info!(identities = identities.len(), "session registry loaded");

        Ok(SessionRegistry {
            inner: Mutex::new(RegistryInner {
                identities,
                active: HashMap::new(),
            }),
            tables,
            audit,
            store,
            limits,
            restricted,
        })
    }

    /// Renew a known identity or mint a new one, then evaluate admission
    ///
    /// Runs the opportunistic reap first. An empty, malformed, or unknown
    /// candidate never fails the call; a fresh identity is minted instead
    /// (random, or the restricted deployment's sole identity). `origin`
    /// only feeds the audit log.
    pub fn issue_or_renew(&self, candidate: Option<&str>, origin: &str) -> Result<SessionTicket> {
        let now = Timestamp::now();
        let mut inner = self.inner.lock();
        self.reap_locked(&mut inner, now);

        let candidate_id = candidate
            .filter(|s| !s.is_empty())
            .map(SessionId::from_string)
            .filter(SessionId::is_well_formed);

        let (id, time_remaining) = match candidate_id {
            Some(id) if inner.identities.contains_key(&id) => {
                let remaining = self.renew_locked(&mut inner, &id, now);
                self.audit.renewed(origin, &id, remaining.as_secs());
                (id, remaining)
            }
            _ => {
                let id = self.mint_identity()?;
                if inner.identities.contains_key(&id) {
                    // Restricted deployments renew their permanent identity.
                    let remaining = self.renew_locked(&mut inner, &id, now);
                    self.audit.renewed(origin, &id, remaining.as_secs());
                    (id, remaining)
                } else {
                    let permanent = id.has_permanent_prefix();
                    inner.identities.insert(
                        id.clone(),
                        IdentityRecord {
                            created_at: now,
                            renewed_at: now,
                            permanent,
                        },
                    );
                    if !permanent {
                        if let Err(e) = self.store.create_identity_dirs(&id) {
                            warn!(id = %id, error = %e, "failed to create identity directories");
                        }
                    }
                    self.audit.assigned(origin, &id);
                    (id, self.limits.identity_ttl)
                }
            }
        };

        let capacity_exceeded = !self.admissible_locked(&inner, &id);
        if !capacity_exceeded && !inner.active.contains_key(&id) {
            inner.active.insert(id.clone(), now);
        }

        Ok(SessionTicket {
            id,
            time_remaining,
            capacity_exceeded,
        })
    }

    /// Mark an identity as interacting
    ///
    /// Signals below the activity threshold are ignored. Entry into the
    /// active set is subject to the capacity cap; already-active and
    /// permanent identities always refresh. Returns whether the activity
    /// stamp was (re)set.
    pub fn touch_activity(&self, id: &SessionId, signal: u32) -> bool {
        if signal < self.limits.activity_threshold {
            return false;
        }
        let now = Timestamp::now();
        let mut inner = self.inner.lock();
        if inner.active.contains_key(id) || self.admissible_locked(&inner, id) {
            inner.active.insert(id.clone(), now);
            true
        } else {
            false
        }
    }

    /// Drop expired identities and stale active sessions
    ///
    /// Also runs at the start of every `issue_or_renew` call. Storage
    /// cleanup failures are logged and skipped, never propagated.
    pub fn reap_expired(&self) {
        let now = Timestamp::now();
        let mut inner = self.inner.lock();
        self.reap_locked(&mut inner, now);
    }

    /// Rewrite the timeout table and re-merge the permanent-identity list
    ///
    /// Identities appended to the permanent file externally become valid
    /// here, without a restart.
    pub fn persist(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        self.tables.write_timeouts(
            inner
                .identities
                .iter()
                .filter(|(_, record)| !record.permanent)
                .map(|(id, record)| (id, record.created_at)),
        )?;

        let now = Timestamp::now();
        for id in self.tables.read_permanent()? {
            inner
                .identities
                .insert(id, Self::permanent_record(now, &self.limits));
        }
        Ok(())
    }

    /// Whether an identity is currently known
    pub fn is_known(&self, id: &SessionId) -> bool {
        self.inner.lock().identities.contains_key(id)
    }

    /// Whether an identity is currently in the active set
    pub fn is_active(&self, id: &SessionId) -> bool {
        self.inner.lock().active.contains_key(id)
    }

    /// Whether an identity is registered as permanent
    pub fn is_permanent(&self, id: &SessionId) -> bool {
        self.inner
            .lock()
            .identities
            .get(id)
            .is_some_and(|record| record.permanent)
    }

    /// When an identity last renewed, if it is known
    pub fn last_renewal(&self, id: &SessionId) -> Option<Timestamp> {
        self.inner
            .lock()
            .identities
            .get(id)
            .map(|record| record.renewed_at)
    }

    /// Number of known identities
    pub fn identity_count(&self) -> usize {
        self.inner.lock().identities.len()
    }

    /// Number of active sessions, permanent ones included
    pub fn active_session_count(&self) -> usize {
        self.inner.lock().active.len()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn permanent_record(now: Timestamp, limits: &SessionLimits) -> IdentityRecord {
        // Far-future creation keeps the TTL arithmetic uniform.
        IdentityRecord {
            created_at: now.plus(limits.permanent_lease),
            renewed_at: now,
            permanent: true,
        }
    }

    fn mint_identity(&self) -> Result<SessionId> {
        if self.restricted {
            self.tables.restricted_identity()
        } else {
            Ok(SessionId::new_random())
        }
    }

    fn renew_locked(&self, inner: &mut RegistryInner, id: &SessionId, now: Timestamp) -> Duration {
        match inner.identities.get_mut(id) {
            Some(record) => {
                record.renewed_at = now;
                let elapsed = now.seconds_since(record.created_at);
                let remaining = (self.limits.identity_ttl.as_secs_f64() - elapsed).max(0.0);
                Duration::from_secs_f64(remaining)
            }
            None => Duration::ZERO,
        }
    }

    /// Capacity verdict for an identity that wants into the active set
    fn admissible_locked(&self, inner: &RegistryInner, id: &SessionId) -> bool {
        if inner.active.contains_key(id) {
            return true;
        }
        if inner
            .identities
            .get(id)
            .is_some_and(|record| record.permanent)
        {
            return true;
        }
        self.active_nonpermanent_locked(inner) < self.limits.max_active_sessions
    }

    fn active_nonpermanent_locked(&self, inner: &RegistryInner) -> usize {
        inner
            .active
            .keys()
            .filter(|id| {
                !inner
                    .identities
                    .get(*id)
                    .is_some_and(|record| record.permanent)
            })
            .count()
    }

    fn reap_locked(&self, inner: &mut RegistryInner, now: Timestamp) {
        let ttl = self.limits.identity_ttl.as_secs_f64();
        let expired: Vec<SessionId> = inner
            .identities
            .iter()
            .filter(|(_, record)| !record.permanent && now.seconds_since(record.created_at) > ttl)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            info!(id = %id, "removing expired session identity");
            inner.identities.remove(id);
            self.store.remove_identity_dirs(id);
        }

        let idle_limit = self.limits.active_session_timeout.as_secs_f64();
        let RegistryInner { identities, active } = &mut *inner;
        active.retain(|id, last_activity| {
            now.seconds_since(*last_activity) <= idle_limit && identities.contains_key(id)
        });
    }
}
