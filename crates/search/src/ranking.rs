//! Promotion-tier ranking
//!
//! Matching is substring containment over the case-folded key; ordering is
//! user-visible relevance. Four promotion conditions lift a match above the
//! plain substring tier, strongest first:
//!
//! 1. display name equals the raw query exactly
//! 2. folded key equals the folded query exactly
//! 3. folded key starts with the folded query
//! 4. display name contains the raw query as a substring
//!
//! The historical implementation expressed this as four passes of repeated
//! front-insertion over a mutable list. Here it is a stable two-key sort
//! (tier descending, discovery order ascending) that yields the same
//! observable ordering: stronger matches first, discovery order among ties.

use crate::candidate::{CandidateEntry, CandidateSpace};

/// Strength of a single match, weakest first
///
/// Derived ordering makes stronger tiers compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// Folded key contains the folded query
    Substring,
    /// Display name contains the raw query
    RawSubstring,
    /// Folded key starts with the folded query
    FoldedPrefix,
    /// Folded key equals the folded query
    FoldedExact,
    /// Display name equals the raw query
    DisplayExact,
}

impl MatchTier {
    /// Classify a matching entry against the raw and folded query forms
    ///
    /// Callers guarantee the entry already passed the substring filter.
    pub fn classify(entry: &CandidateEntry, raw: &str, folded: &str) -> MatchTier {
        if entry.display == raw {
            MatchTier::DisplayExact
        } else if entry.folded == folded {
            MatchTier::FoldedExact
        } else if entry.folded.starts_with(folded) {
            MatchTier::FoldedPrefix
        } else if entry.display.contains(raw) {
            MatchTier::RawSubstring
        } else {
            MatchTier::Substring
        }
    }
}

/// Filter a candidate space by substring containment and rank the matches
///
/// Returns references into the space, strongest tier first, discovery order
/// within a tier. An empty query matches nothing.
pub fn rank_candidates<'a>(space: &'a CandidateSpace, raw_query: &str) -> Vec<&'a CandidateEntry> {
    if raw_query.is_empty() {
        return Vec::new();
    }

    let folded = raw_query.to_lowercase();
    let mut matches: Vec<(MatchTier, &CandidateEntry)> = space
        .entries()
        .iter()
        .filter(|entry| entry.folded.contains(&folded))
        .map(|entry| (MatchTier::classify(entry, raw_query, &folded), entry))
        .collect();

    // Stable sort: discovery order survives within a tier.
    matches.sort_by(|a, b| b.0.cmp(&a.0));
    matches.into_iter().map(|(_, entry)| entry).collect()
}
