//! Cellarium - feature search and session lifecycle server core
//!
//! Cellarium is the request-serving backend core of a genomics-data
//! visualization tool. It answers ranked feature-search queries over
//! dynamically built symbol spaces and manages client identities with
//! TTL expiry, activity tracking, and admission control.
//!
//! # Quick Start
//!
//! ```ignore
//! use cellarium::{Service, ServiceConfig, FeatureQuery, DatasetHandle};
//!
//! // Start the service over a dataset accessor
//! let service = Service::open(ServiceConfig::under("/srv/cellarium"), accessor)?;
//!
//! // Resolve a query
//! let rows = service.find_features(&FeatureQuery {
//!     dataset: DatasetHandle::new("public/brain.loom"),
//!     query: "hsap\\TP53".into(),
//! })?;
//! ```
//!
//! # Architecture
//!
//! All calls go through the [`Service`] facade, which owns the search
//! index and the session registry for the process lifetime. The matrix
//! accessor, enrichment algorithm, and wire transport are external
//! collaborators; the accessor plugs in through the `CandidateSource`
//! trait and the transport dispatches already-deserialized request
//! structs.

// Re-export the public API from cellarium-engine
pub use cellarium_engine::*;
