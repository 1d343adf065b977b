use ssjoin::{all_pairs, transform::frequency_order_transform, SearchIndex};

fn docs() -> Vec<Vec<&'static str>> {
    vec![
        vec!["the", "quick", "brown", "fox"],
        vec!["the", "quick", "brown", "dog"],
        vec!["the", "lazy", "cat"],
        vec!["quick", "brown", "fox", "jumps"],
    ]
}

#[test]
fn transform_is_deterministic_across_runs() {
    let raw = docs();
    let (sets_a, dict_a) = frequency_order_transform(&raw);
    let (sets_b, dict_b) = frequency_order_transform(&raw);

    assert_eq!(sets_a, sets_b);
    for set in &raw {
        for tok in set {
            assert_eq!(dict_a.rank(tok), dict_b.rank(tok));
        }
    }
}

#[test]
fn all_pairs_output_is_order_independent_of_input_order() {
    let raw = docs();
    let (sets, _dict) = frequency_order_transform(&raw);

    let forward: Vec<_> = all_pairs(&sets, "jaccard", 0.2).unwrap().collect();

    let mut reversed_sets = sets.clone();
    reversed_sets.reverse();
    let remap = |i: usize| sets.len() - 1 - i;

    // Re-express every reversed-order pair as a (original-id, original-id)
    // pair with the canonical x > y ordering, so it's directly comparable to
    // `forward` regardless of which index space it was discovered in.
    let mut backward: Vec<(usize, usize, f64)> = all_pairs(&reversed_sets, "jaccard", 0.2)
        .unwrap()
        .map(|p| {
            let (a, b) = (remap(p.x), remap(p.y));
            let (x, y) = if a > b { (a, b) } else { (b, a) };
            (x, y, p.similarity)
        })
        .collect();
    let mut forward: Vec<(usize, usize, f64)> =
        forward.into_iter().map(|p| (p.x, p.y, p.similarity)).collect();

    forward.sort_by_key(|p| (p.0, p.1));
    backward.sort_by_key(|p| (p.0, p.1));

    assert_eq!(forward.len(), backward.len());
    for (f, b) in forward.iter().zip(backward.iter()) {
        assert_eq!((f.0, f.1), (b.0, b.1));
        assert!((f.2 - b.2).abs() < 1e-9);
    }
}

#[test]
fn search_index_query_is_deterministic_across_builds() {
    let raw = docs();
    let (sets, _dict) = frequency_order_transform(&raw);

    let idx_a = SearchIndex::new(&sets, "jaccard", 0.2).unwrap();
    let idx_b = SearchIndex::new(&sets, "jaccard", 0.2).unwrap();

    let mut results_a = idx_a.query(&sets[0]);
    let mut results_b = idx_b.query(&sets[0]);
    results_a.sort_by_key(|r| r.x);
    results_b.sort_by_key(|r| r.x);

    assert_eq!(results_a.len(), results_b.len());
    for (a, b) in results_a.iter().zip(results_b.iter()) {
        assert_eq!(a.x, b.x);
        assert!((a.similarity - b.similarity).abs() < 1e-9);
    }
}
