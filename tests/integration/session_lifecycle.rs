//! End-to-end session lifecycle tests
//!
//! Drives identity issue/renew/expiry, admission control, and persistence
//! through the public facade against real temporary directories.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cellarium::{
    FileCategory, Service, ServiceConfig, SessionLimits, PERMANENT_IDS_FILE, TIMEOUTS_FILE,
};

use crate::common::{fixture_orthology, hello, hello_with, FixtureSource};

fn service_with_limits(dir: &std::path::Path, limits: SessionLimits) -> Service {
    crate::common::init_tracing();
    Service::with_orthology(
        ServiceConfig::under(dir).with_session_limits(limits),
        Arc::new(FixtureSource::fly_brain()),
        fixture_orthology(),
    )
    .unwrap()
}

fn short_ttl_limits() -> SessionLimits {
    SessionLimits {
        identity_ttl: Duration::from_millis(50),
        active_session_timeout: Duration::from_millis(50),
        permanent_lease: Duration::from_secs(3600),
        ..SessionLimits::default()
    }
}

#[test]
fn first_contact_issues_identity_and_storage() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_with_limits(dir.path(), SessionLimits::default());

    let ticket = service.acquire_session(&hello(1)).unwrap();
    assert!(!ticket.capacity_exceeded);
    assert_eq!(
        ticket.time_remaining,
        SessionLimits::default().identity_ttl
    );

    // All three category directories exist for the fresh identity.
    for name in ["matrices", "gene-sets", "rankings"] {
        assert!(dir
            .path()
            .join("user-data")
            .join(name)
            .join(ticket.id.as_str())
            .is_dir());
    }
}

#[test]
fn expired_identity_is_reaped_with_its_storage() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_with_limits(dir.path(), short_ttl_limits());

    let ticket = service.acquire_session(&hello(1)).unwrap();
    let matrix_dir = dir
        .path()
        .join("user-data")
        .join("matrices")
        .join(ticket.id.as_str());
    assert!(matrix_dir.is_dir());

    thread::sleep(Duration::from_millis(80));

    // The next hello runs the opportunistic reap; the old identity is gone
    // and the caller receives a fresh one.
    let next = service
        .acquire_session(&hello_with(ticket.id.as_str(), 1))
        .unwrap();
    assert_ne!(next.id, ticket.id);
    assert!(!service.sessions().is_known(&ticket.id));
    assert!(!matrix_dir.exists());
}

#[test]
fn admission_cap_refuses_only_the_excess_caller() {
    let dir = tempfile::tempdir().unwrap();
    let limits = SessionLimits {
        max_active_sessions: 3,
        ..SessionLimits::default()
    };
    let service = service_with_limits(dir.path(), limits);

    let admitted: Vec<_> = (0..3)
        .map(|_| service.acquire_session(&hello(1)).unwrap())
        .collect();
    for ticket in &admitted {
        assert!(!ticket.capacity_exceeded);
    }

    let refused = service.acquire_session(&hello(1)).unwrap();
    assert!(refused.capacity_exceeded);
    assert!(service.sessions().is_known(&refused.id));
    assert!(!service.sessions().is_active(&refused.id));

    // The admitted callers keep renewing while the cap holds.
    for ticket in &admitted {
        let renewed = service
            .acquire_session(&hello_with(ticket.id.as_str(), 1))
            .unwrap();
        assert_eq!(renewed.id, ticket.id);
        assert!(!renewed.capacity_exceeded);
    }
}

#[test]
fn idle_session_frees_its_capacity_slot() {
    let dir = tempfile::tempdir().unwrap();
    let limits = SessionLimits {
        identity_ttl: Duration::from_secs(3600),
        active_session_timeout: Duration::from_millis(50),
        max_active_sessions: 1,
        ..SessionLimits::default()
    };
    let service = service_with_limits(dir.path(), limits);

    let first = service.acquire_session(&hello(1)).unwrap();
    let refused = service.acquire_session(&hello(1)).unwrap();
    assert!(refused.capacity_exceeded);

    thread::sleep(Duration::from_millis(80));

    // The idle slot is reclaimed; the refused identity renews into it.
    let retry = service
        .acquire_session(&hello_with(refused.id.as_str(), 1))
        .unwrap();
    assert_eq!(retry.id, refused.id);
    assert!(!retry.capacity_exceeded);
    assert!(service.sessions().is_known(&first.id));
}

#[test]
fn permanent_identity_survives_expiry_and_ignores_the_cap() {
    let dir = tempfile::tempdir().unwrap();
    let limits = SessionLimits {
        identity_ttl: Duration::from_millis(50),
        max_active_sessions: 1,
        permanent_lease: Duration::from_secs(3600),
        ..SessionLimits::default()
    };
    let service = service_with_limits(dir.path(), limits);

    let permanent = std::fs::read_to_string(dir.path().join("config").join(PERMANENT_IDS_FILE))
        .unwrap()
        .lines()
        .next()
        .unwrap()
        .to_string();

    // Fill the single slot, then wait out the identity TTL.
    service.acquire_session(&hello(1)).unwrap();
    thread::sleep(Duration::from_millis(80));

    let ticket = service
        .acquire_session(&hello_with(&permanent, 1))
        .unwrap();
    assert_eq!(ticket.id.as_str(), permanent);
    assert!(!ticket.capacity_exceeded);
    assert!(service.sessions().is_permanent(&ticket.id));
}

#[test]
fn session_state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let id = {
        let service = service_with_limits(dir.path(), SessionLimits::default());
        let ticket = service.acquire_session(&hello(1)).unwrap();
        service.shutdown().unwrap();
        ticket.id
    };

    // The timeout table holds the identity with its creation stamp.
    let table = std::fs::read_to_string(dir.path().join("config").join(TIMEOUTS_FILE)).unwrap();
    assert!(table.lines().any(|line| line.starts_with(id.as_str())));

    let service = service_with_limits(dir.path(), SessionLimits::default());
    let renewed = service
        .acquire_session(&hello_with(id.as_str(), 1))
        .unwrap();
    assert_eq!(renewed.id, id);
    assert!(renewed.time_remaining <= SessionLimits::default().identity_ttl);
}

#[test]
fn audit_log_traces_the_whole_exchange() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_with_limits(dir.path(), SessionLimits::default());

    let ticket = service.acquire_session(&hello(1)).unwrap();
    service
        .acquire_session(&hello_with(ticket.id.as_str(), 1))
        .unwrap();

    let logs_dir = dir.path().join("logs");
    let log_path = std::fs::read_dir(&logs_dir)
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    let body = std::fs::read_to_string(log_path).unwrap();

    assert!(body.contains(&format!("New UUID ({}) assigned.", ticket.id)));
    assert!(body.contains(&format!("Old UUID ({}) connected", ticket.id)));
    assert!(body.contains("10.0.0.1"));
}

#[test]
fn uploads_are_scoped_per_identity() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_with_limits(dir.path(), SessionLimits::default());

    let a = service.acquire_session(&hello(1)).unwrap();
    let b = service.acquire_session(&hello(1)).unwrap();

    service.record_upload(&cellarium::UploadNotice {
        session: a.id.clone(),
        filename: "mine.loom".to_string(),
    });

    assert_eq!(service.uploads(&a.id), vec!["mine.loom"]);
    assert!(service.uploads(&b.id).is_empty());
}

#[test]
fn user_file_removal_respects_the_allowlist() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_with_limits(dir.path(), SessionLimits::default());
    let ticket = service.acquire_session(&hello(1)).unwrap();

    let identity_dir = dir
        .path()
        .join("user-data")
        .join("gene-sets")
        .join(ticket.id.as_str());
    std::fs::write(identity_dir.join("set.txt"), b"genes").unwrap();
    std::fs::write(identity_dir.join("keep.bin"), b"blob").unwrap();

    assert!(service.delete_user_file(&cellarium::FileRemoval {
        session: ticket.id.clone(),
        category: FileCategory::GeneSet,
        filename: "set.txt".to_string(),
    }));
    assert!(!service.delete_user_file(&cellarium::FileRemoval {
        session: ticket.id.clone(),
        category: FileCategory::GeneSet,
        filename: "keep.bin".to_string(),
    }));
    assert!(identity_dir.join("keep.bin").exists());
}
