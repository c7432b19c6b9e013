//! Candidate spaces and the namespace marker
//!
//! A candidate space is the full set of searchable symbols for one
//! `(dataset, species)` pair: gene symbols, regulon names, metrics, and
//! clustering-derived entries, each already mapped to the canonical key it
//! collapses onto. Spaces are built fresh by an external accessor and are
//! immutable afterwards; iteration order is the discovery order and feeds
//! directly into ranking.

use cellarium_core::{DatasetHandle, Result};

/// Query prefix selecting the human→fly alias table
pub const HUMAN_MARKER: &str = "hsap\\";

/// Query prefix selecting the mouse→fly alias table
pub const MOUSE_MARKER: &str = "mmus\\";

/// Namespace a query resolves against
///
/// Absence of a recognized marker selects the dataset's native symbol
/// space. Anything that is not exactly a recognized marker is literal query
/// text; markers are never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// The dataset's own symbol space
    Native,
    /// Human symbols, translated to fly orthologs
    Human,
    /// Mouse symbols, translated to fly orthologs
    Mouse,
}

impl Species {
    /// Split a recognized namespace marker off the front of a raw query
    ///
    /// Returns the selected namespace and the remaining query text.
    pub fn split_marker(query: &str) -> (Species, &str) {
        if let Some(rest) = query.strip_prefix(HUMAN_MARKER) {
            (Species::Human, rest)
        } else if let Some(rest) = query.strip_prefix(MOUSE_MARKER) {
            (Species::Mouse, rest)
        } else {
            (Species::Native, query)
        }
    }
}

/// One row of a candidate space
///
/// Invariant: `folded` is the case-folded form of `display`; both are fixed
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    /// Case-folded matching key
    pub folded: String,
    /// Original-case symbol shown to the user
    pub display: String,
    /// Classification tag (gene, regulon, metric, clustering-derived)
    pub category: String,
    /// Canonical key duplicates of this symbol collapse onto
    pub canonical: String,
}

impl CandidateEntry {
    /// Create an entry; the matching key is derived by case-folding `display`
    pub fn new(
        display: impl Into<String>,
        category: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Self {
        let display = display.into();
        CandidateEntry {
            folded: display.to_lowercase(),
            display,
            category: category.into(),
            canonical: canonical.into(),
        }
    }
}

/// The searchable symbol space for one `(dataset, species)` pair
///
/// Entries keep their discovery order; that order is the tie-break for
/// ranking and the first-seen order for collapsing.
#[derive(Debug, Clone, Default)]
pub struct CandidateSpace {
    entries: Vec<CandidateEntry>,
}

impl CandidateSpace {
    /// Create an empty space
    pub fn new() -> Self {
        CandidateSpace { entries: vec![] }
    }

    /// Append an entry in discovery order
    pub fn push(&mut self, entry: CandidateEntry) {
        self.entries.push(entry);
    }

    /// The entries in discovery order
    pub fn entries(&self) -> &[CandidateEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the space is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CandidateEntry> for CandidateSpace {
    fn from_iter<I: IntoIterator<Item = CandidateEntry>>(iter: I) -> Self {
        CandidateSpace {
            entries: iter.into_iter().collect(),
        }
    }
}

/// External builder of candidate spaces
///
/// Implemented by the matrix-file accessor of the enclosing service. Must be
/// deterministic for a fixed `(dataset, species)` pair within a single call;
/// the search index treats construction cost as amortized by its result
/// cache and may call `build` once per uncached query.
pub trait CandidateSource: Send + Sync {
    /// Build the candidate space for `dataset` under `species`
    fn build(&self, dataset: &DatasetHandle, species: Species) -> Result<CandidateSpace>;
}
