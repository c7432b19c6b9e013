//! Session lifecycle for the Cellarium server
//!
//! This crate provides:
//! - SessionRegistry: identity issue/renew/expire with admission control
//! - SessionTables: the persisted timeout table and permanent-identity list
//! - AuditLog: append-only record of every issuance and renewal
//! - UserStore: per-identity storage areas and the upload ledger
//!
//! The registry is the sole mutator of identity and active-session state
//! for the process lifetime; expiry is checked opportunistically on traffic
//! rather than by a background timer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod audit;
pub mod persist;
pub mod registry;
pub mod store;

pub use audit::AuditLog;
pub use persist::{SessionTables, PERMANENT_IDS_FILE, TIMEOUTS_FILE};
pub use registry::{SessionRegistry, SessionTicket};
pub use store::{FileCategory, UserStore};
