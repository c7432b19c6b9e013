//! Ranked feature search for the Cellarium server
//!
//! This crate provides:
//! - CandidateSpace / CandidateSource for dynamically built symbol spaces
//! - Promotion-tier ranking of substring matches
//! - Cross-namespace alias collapsing with synonym / orthology descriptions
//! - SearchIndex with a bounded per-(dataset, query) result cache
//!
//! # Usage
//!
//! ```ignore
//! use cellarium_search::{SearchIndex, OrthologySet};
//!
//! let index = SearchIndex::new(source, Arc::new(orthology), &limits)?;
//! let rows = index.search(&dataset, "hsap\\TP53")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod collapse;
pub mod index;
pub mod orthology;
pub mod ranking;

pub use candidate::{CandidateEntry, CandidateSource, CandidateSpace, Species};
pub use collapse::RankedResult;
pub use index::SearchIndex;
pub use orthology::{OrthologMapping, OrthologySet, OrthologyTable};
pub use ranking::{rank_candidates, MatchTier};
