mod common;

use oefen_curate::{rebalance_items, target_positions};
use proptest::prelude::*;
use serde_json::Value;

use common::{correct_option, histogram, mcq};

fn pack_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..5).prop_flat_map(|k| {
        let item = (k..k + 3).prop_flat_map(|count| (Just(count), 0..count));
        (Just(k), proptest::collection::vec(item, 1..24))
    })
}

fn build(shape: &[(usize, usize)]) -> Vec<Value> {
    const TEXTS: [&str; 6] = ["een", "twee", "drie", "vier", "vijf", "zes"];
    shape
        .iter()
        .enumerate()
        .map(|(idx, (count, correct))| mcq(&format!("q{idx}"), &TEXTS[..*count], *correct))
        .collect()
}

fn sorted_options(item: &Value) -> Vec<String> {
    let mut options: Vec<String> = item["options"]
        .as_array()
        .expect("options")
        .iter()
        .map(Value::to_string)
        .collect();
    options.sort();
    options
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn payloads_are_conserved((k, shape) in pack_strategy(), seed in "[a-z/]{1,24}") {
        let original = build(&shape);
        let mut items = original.clone();
        rebalance_items(&mut items, Some(k), &seed).expect("rebalance");

        for (before, after) in original.iter().zip(&items) {
            prop_assert_eq!(sorted_options(before), sorted_options(after));
            prop_assert_eq!(correct_option(before), correct_option(after));
        }
        let mut expected = vec![0; k];
        for position in target_positions(items.len(), k) {
            expected[position] += 1;
        }
        prop_assert_eq!(histogram(&items, k), expected);
    }

    #[test]
    fn same_seed_same_output((k, shape) in pack_strategy(), seed in "[a-z/]{1,24}") {
        let mut first = build(&shape);
        let mut second = build(&shape);
        rebalance_items(&mut first, Some(k), &seed).expect("first");
        rebalance_items(&mut second, Some(k), &seed).expect("second");
        prop_assert_eq!(
            serde_json::to_vec_pretty(&first).expect("encode"),
            serde_json::to_vec_pretty(&second).expect("encode")
        );
    }
}
