//! Core types for the Cellarium server
//!
//! This crate defines the foundational pieces shared by every other crate:
//! - SessionId: opaque per-client identity token
//! - DatasetHandle: identifier of an open dataset
//! - Timestamp: epoch-seconds time type matching the on-disk session table
//! - Limits: frozen default timeouts, caps, and cache sizes
//! - Error/Result: the one error type the whole workspace propagates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod types;

pub use error::{Error, Result};
pub use limits::{SearchLimits, SessionLimits};
pub use types::{DatasetHandle, SessionId, Timestamp, PERMANENT_ID_PREFIX};
