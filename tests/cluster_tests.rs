use header_footer_cutter::{
    count_similar_regions, frequent_sequences, min_repeating_docs, similarity_cutoff, ClusterSet, CutterError, Document, EmptySequencePolicy, Region,
};

#[test]
fn cutoff_tightens_for_short_strings() {
    assert_eq!(similarity_cutoff(3, 100).unwrap(), 97.0);
    assert_eq!(similarity_cutoff(3, 10).unwrap(), 70.0);
    assert_eq!(similarity_cutoff(0, 5).unwrap(), 100.0);
}

#[test]
fn cutoff_rejects_empty_string() {
    assert_eq!(similarity_cutoff(3, 0), Err(CutterError::EmptyComparison));
}

#[test]
fn min_repeating_docs_has_floor_of_two() {
    assert_eq!(min_repeating_docs(1, 0.0), 2);
    assert_eq!(min_repeating_docs(4, 0.5), 2);
    assert_eq!(min_repeating_docs(10, 0.5), 5);
    assert_eq!(min_repeating_docs(5, 0.5), 3);
    assert_eq!(min_repeating_docs(0, 1.0), 2);
}

#[test]
fn candidate_uses_partial_region_for_short_documents() {
    let content = "one\ntwo\nthree";
    assert_eq!(Region::Header.candidate(content, 2), "one\ntwo");
    assert_eq!(Region::Footer.candidate(content, 2), "two\nthree");
    assert_eq!(Region::Header.candidate(content, 10), content);
    assert_eq!(Region::Footer.candidate("", 3), "");
}

#[test]
fn observe_groups_similar_candidates_under_first_seen_key() {
    let mut set = ClusterSet::new();
    set.observe("Annual Report 2023", 3, EmptySequencePolicy::Skip).unwrap();
    set.observe("Annual Report 2024", 3, EmptySequencePolicy::Skip).unwrap();
    set.observe("Something else entirely", 3, EmptySequencePolicy::Skip).unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(set.count_of("Annual Report 2023"), Some(2));
    assert_eq!(set.count_of("Annual Report 2024"), None);
    assert_eq!(set.count_of("Something else entirely"), Some(1));
}

#[test]
fn observe_prefers_first_cluster_on_equal_scores() {
    let mut set = ClusterSet::new();
    set.observe("abcX", 0, EmptySequencePolicy::Skip).unwrap();
    set.observe("abcY", 0, EmptySequencePolicy::Skip).unwrap();
    // Scores tie against both keys; with a loose cutoff the first one absorbs it.
    set.observe("abcZ", 2, EmptySequencePolicy::Skip).unwrap();

    assert_eq!(set.count_of("abcX"), Some(2));
    assert_eq!(set.count_of("abcY"), Some(1));
}

#[test]
fn empty_candidates_are_skipped_or_fail() {
    let mut skip = ClusterSet::new();
    skip.observe("", 3, EmptySequencePolicy::Skip).unwrap();
    skip.observe("", 3, EmptySequencePolicy::Skip).unwrap();
    assert!(skip.is_empty());

    let mut fail = ClusterSet::new();
    // The first empty candidate has nothing to compare against and seeds a cluster.
    fail.observe("", 3, EmptySequencePolicy::Fail).unwrap();
    assert_eq!(fail.observe("", 3, EmptySequencePolicy::Fail), Err(CutterError::EmptyComparison));
}

#[test]
fn regions_are_unioned_across_line_counts() {
    let docs = vec![
        Document::new("Header line\nfirst body text about apples"),
        Document::new("Header line\nsecond body text about trains"),
    ];
    let headers = count_similar_regions(&docs, 2, 3, Region::Header, EmptySequencePolicy::Skip).unwrap();
    assert_eq!(headers.count_of("Header line"), Some(2));
    assert_eq!(headers.count_of("Header line\nfirst body text about apples"), Some(1));
    assert_eq!(headers.len(), 3);

    let frequent = frequent_sequences(&headers, 2);
    assert_eq!(frequent.len(), 1);
    assert_eq!(frequent[0].sequence, "Header line");
    assert_eq!(frequent[0].count, 2);
}

#[test]
fn frequent_sequences_sorted_longest_first_and_stable() {
    let mut set = ClusterSet::new();
    for s in ["bb", "aaaa", "cc", "aaaa", "bb", "cc", "zzzzzzzz"] {
        set.observe(s, 0, EmptySequencePolicy::Skip).unwrap();
    }
    let frequent = frequent_sequences(&set, 2);
    let order: Vec<&str> = frequent.iter().map(|f| f.sequence.as_str()).collect();
    assert_eq!(order, vec!["aaaa", "bb", "cc"]);
}

#[test]
fn identical_candidates_never_duplicate_a_cluster() {
    let mut set = ClusterSet::new();
    for candidate in ["Page header", "Page header", "Other line", "Page header"] {
        set.observe(candidate, 0, EmptySequencePolicy::Skip).unwrap();
    }
    assert_eq!(set.len(), 2);
    assert_eq!(set.count_of("Page header"), Some(3));
    assert_eq!(set.iter().filter(|c| c.sequence == "Page header").count(), 1);
}
