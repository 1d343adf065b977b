use ssjoin::io::{read_flattened_raw_sets, write_pairs_csv};
use ssjoin::{all_pairs, transform::frequency_order_transform, SearchIndex};

const FLAT_FILE: &str = "\
1 apple
1 banana
1 cherry
2 apple
2 banana
2 date
3 fig
3 grape
4 apple
4 banana
4 cherry
4 date";

#[test]
fn flat_file_through_transform_to_search_index() {
    let (set_ids, raw_sets) = read_flattened_raw_sets(FLAT_FILE.as_bytes(), false).unwrap();
    assert_eq!(set_ids, vec!["1", "2", "3", "4"]);

    let (sets, _dict) = frequency_order_transform(&raw_sets);
    let index = SearchIndex::new(&sets, "jaccard", 0.3).unwrap();

    // Set "1" = {apple, banana, cherry}; set "4" = {apple, banana, cherry, date}
    // share 3 of a 4-token union: jaccard = 0.75.
    let query_idx = set_ids.iter().position(|id| id == "1").unwrap();
    let hits = index.query(&sets[query_idx]);

    let hit_on = |id: &str| {
        let i = set_ids.iter().position(|s| s == id).unwrap();
        hits.iter().find(|h| h.x == i)
    };

    assert!(hit_on("1").is_some(), "self-match expected");
    assert!((hit_on("1").unwrap().similarity - 1.0).abs() < 1e-9);
    let four = hit_on("4").expect("set 4 should exceed the 0.3 threshold");
    assert!((four.similarity - 0.75).abs() < 1e-9);
    assert!(hit_on("3").is_none(), "set 3 shares nothing with set 1");
}

#[test]
fn flat_file_through_transform_to_all_pairs_to_csv() {
    let (set_ids, raw_sets) = read_flattened_raw_sets(FLAT_FILE.as_bytes(), false).unwrap();
    assert_eq!(set_ids, vec!["1", "2", "3", "4"]);
    let (sets, _dict) = frequency_order_transform(&raw_sets);

    let pairs = all_pairs(&sets, "jaccard", 0.3).unwrap();

    let mut csv_bytes = Vec::new();
    write_pairs_csv(&mut csv_bytes, pairs).unwrap();
    let csv_text = String::from_utf8(csv_bytes).unwrap();

    // "1"-"2" share {apple,banana} (0.5), "1"-"4" and "2"-"4" each share three
    // of four tokens (0.75); "3" overlaps with nothing and drops out entirely.
    assert!(csv_text.contains("1,0,0.5000"));
    assert!(csv_text.contains("3,0,0.7500"));
    assert!(csv_text.contains("3,1,0.7500"));
    assert_eq!(csv_text.lines().count(), 3, "unexpected pair set:\n{csv_text}");
}

#[test]
fn containment_and_jaccard_agree_on_identical_sets() {
    let (_set_ids, raw_sets) = read_flattened_raw_sets(FLAT_FILE.as_bytes(), false).unwrap();
    let (sets, _dict) = frequency_order_transform(&raw_sets);

    let jaccard_index = SearchIndex::new(&sets, "jaccard", 0.5).unwrap();
    let containment_index = SearchIndex::new(&sets, "containment", 0.5).unwrap();

    let self_query = &sets[0];
    let j = jaccard_index
        .query(self_query)
        .into_iter()
        .find(|r| r.x == 0)
        .unwrap();
    let c = containment_index
        .query(self_query)
        .into_iter()
        .find(|r| r.x == 0)
        .unwrap();

    assert_eq!(j.similarity, 1.0);
    assert_eq!(c.similarity, 1.0);
}
