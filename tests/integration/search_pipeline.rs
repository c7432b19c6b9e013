//! End-to-end search pipeline tests
//!
//! Drives ranking, collapsing, and the result cache through the public
//! facade with a realistic fixture dataset.

use std::sync::Arc;

use cellarium::{DatasetHandle, FeatureQuery, RankedResult};

use crate::common::{fixture_service, FixtureSource};

fn query(dataset: &str, text: &str) -> FeatureQuery {
    FeatureQuery {
        dataset: DatasetHandle::new(dataset),
        query: text.to_string(),
    }
}

fn names(rows: &[RankedResult]) -> Vec<&str> {
    rows.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn ranking_is_idempotent_across_cache_states() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(FixtureSource::fly_brain());
    let service = fixture_service(dir.path(), Arc::clone(&source));

    let cold = service.find_features(&query("brain.loom", "dpn")).unwrap();
    let warm = service.find_features(&query("brain.loom", "dpn")).unwrap();

    assert_eq!(cold, warm);
    assert_eq!(source.build_count(), 1);
}

#[test]
fn exact_match_outranks_prefix_and_substring() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(FixtureSource::new(vec![
        ("xabc", "gene", "xabc"),
        ("abcd", "gene", "abcd"),
        ("abc", "gene", "abc"),
    ]));
    let service = fixture_service(dir.path(), source);

    let rows = service.find_features(&query("d.loom", "abc")).unwrap();
    assert_eq!(names(&rows), vec!["abc", "abcd", "xabc"]);
}

#[test]
fn synonyms_collapse_into_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(FixtureSource::fly_brain());
    let service = fixture_service(dir.path(), source);

    let rows = service.find_features(&query("brain.loom", "dp")).unwrap();

    // "dpn" and "deadpan" share the canonical key "dpn"; the regulon and
    // dpr1 stay separate rows.
    let dpn_gene = rows
        .iter()
        .find(|r| r.name == "dpn" && r.category == "gene")
        .unwrap();
    assert_eq!(dpn_gene.description, "Synonym of: deadpan");
    assert_eq!(
        rows.iter()
            .filter(|r| r.name == "dpn" && r.category == "gene")
            .count(),
        1
    );
}

#[test]
fn exact_gene_outranks_its_regulon_and_near_matches() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(FixtureSource::fly_brain());
    let service = fixture_service(dir.path(), source);

    let rows = service.find_features(&query("brain.loom", "dpn")).unwrap();
    assert_eq!(rows[0].name, "dpn");
    assert_eq!(rows[0].category, "gene");
}

#[test]
fn cross_species_query_fans_out_per_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(FixtureSource::fly_brain());
    let service = fixture_service(dir.path(), source);

    let rows = service
        .find_features(&query("brain.loom", "hsap\\TP53"))
        .unwrap();

    assert_eq!(names(&rows), vec!["p53", "p53-like"]);
    assert_eq!(
        rows[0].description,
        "Orthologue of TP53, 31.25% identity (Human -> Drosophila)"
    );
    assert_eq!(
        rows[1].description,
        "Orthologue of TP53, 12.50% identity (Human -> Drosophila)"
    );
}

#[test]
fn mouse_marker_selects_mouse_table() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(FixtureSource::new(vec![("Trp53", "gene", "trp53")]));
    let service = fixture_service(dir.path(), source);

    let rows = service
        .find_features(&query("brain.loom", "mmus\\Trp53"))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].description,
        "Orthologue of Trp53, 29.00% identity (Mouse -> Drosophila)"
    );
}

#[test]
fn empty_and_non_matching_queries_yield_empty_results() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(FixtureSource::fly_brain());
    let service = fixture_service(dir.path(), source);

    assert!(service
        .find_features(&query("brain.loom", ""))
        .unwrap()
        .is_empty());
    assert!(service
        .find_features(&query("brain.loom", "zzzz"))
        .unwrap()
        .is_empty());
}

#[test]
fn cache_distinguishes_datasets_and_queries() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(FixtureSource::fly_brain());
    let service = fixture_service(dir.path(), Arc::clone(&source));

    service.find_features(&query("a.loom", "dpn")).unwrap();
    service.find_features(&query("b.loom", "dpn")).unwrap();
    service.find_features(&query("a.loom", "dpr")).unwrap();
    service.find_features(&query("a.loom", "dpn")).unwrap();

    assert_eq!(source.build_count(), 3);
    assert_eq!(service.search_index().cached_queries(), 3);
}
