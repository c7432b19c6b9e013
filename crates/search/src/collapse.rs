//! Alias collapsing and result descriptions
//!
//! Ranked matches are collapsed into one row per distinct
//! `(canonical key, category)` pair. In the native namespace duplicates
//! merge into a synonym list; in a cross-species namespace each match fans
//! out across its ortholog mappings and duplicates keep only the first
//! occurrence in ranked order. Insertion order of the collapse is the final
//! output order.

use indexmap::IndexMap;

use crate::candidate::CandidateEntry;
use crate::orthology::OrthologyTable;

/// One search result row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedResult {
    /// The collapsed key shown as the result name
    pub name: String,
    /// Classification tag carried over from the candidate
    pub category: String,
    /// Human-readable synonym or orthology description, possibly empty
    pub description: String,
}

/// Collapse ranked matches within the dataset's native namespace
pub(crate) fn collapse_native(ranked: &[&CandidateEntry]) -> Vec<RankedResult> {
    let mut groups: IndexMap<(String, String), Vec<String>> = IndexMap::new();
    for entry in ranked {
        groups
            .entry((entry.canonical.clone(), entry.category.clone()))
            .or_default()
            .push(entry.display.clone());
    }

    groups
        .into_iter()
        .map(|((canonical, category), displays)| {
            let mut synonyms = displays;
            synonyms.sort();
            // The group's own key is not a synonym of itself.
            if let Some(pos) = synonyms.iter().position(|s| *s == canonical) {
                synonyms.remove(pos);
            }
            let description = if synonyms.is_empty() {
                String::new()
            } else {
                format!("Synonym of: {}", synonyms.join(", "))
            };
            RankedResult {
                name: canonical,
                category,
                description,
            }
        })
        .collect()
}

/// Collapse ranked matches through a cross-species alias table
///
/// `source` names the query species for the description text. Canonical
/// keys absent from the table contribute no rows.
pub(crate) fn collapse_orthology(
    ranked: &[&CandidateEntry],
    table: &OrthologyTable,
    source: &str,
) -> Vec<RankedResult> {
    let mut groups: IndexMap<(String, String), (String, f64)> = IndexMap::new();
    for entry in ranked {
        let Some(mappings) = table.mappings(&entry.canonical) else {
            continue;
        };
        for mapping in mappings {
            groups
                .entry((mapping.alias.clone(), entry.category.clone()))
                .or_insert_with(|| (entry.display.clone(), mapping.identity_pct));
        }
    }

    groups
        .into_iter()
        .map(|((alias, category), (display, identity_pct))| RankedResult {
            name: alias,
            category,
            description: format!(
                "Orthologue of {}, {:.2}% identity ({} -> Drosophila)",
                display, identity_pct, source
            ),
        })
        .collect()
}
