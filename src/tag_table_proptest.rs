#![cfg(test)]

// Property tests for TagTable kept inside the crate so they can reach
// the table's test-only knobs (bucket count) without feature gates.

use crate::tag_table::{RemoveError, TagTable};
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to
// earlier tags, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize),
    Get(usize),
    Remove(usize),
    IterForward,
    IterBackward,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            idx.clone().prop_map(OpI::Put),
            idx.clone().prop_map(OpI::Get),
            idx.clone().prop_map(OpI::Remove),
            Just(OpI::IterForward),
            Just(OpI::IterBackward),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Shared body: run a scenario against a table with the given bucket
// count, modeling counts with a HashMap and insertion order with a Vec.
fn run_scenario(buckets: usize, pool: &[String], ops: &[OpI]) -> Result<(), TestCaseError> {
    let mut sut = TagTable::with_buckets(buckets);
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for op in ops {
        match op {
            OpI::Put(i) => {
                let tag = &pool[*i];
                let returned = sut.put(tag);
                let model = counts.entry(tag.clone()).or_insert(0);
                *model += 1;
                prop_assert_eq!(returned, *model, "put must return the updated count");
                if *model == 1 {
                    order.push(tag.clone());
                }
            }
            OpI::Get(i) => {
                let tag = &pool[*i];
                prop_assert_eq!(sut.get(tag), counts.get(tag).copied());
            }
            OpI::Remove(i) => {
                let tag = &pool[*i];
                match counts.remove(tag) {
                    Some(model_count) => {
                        prop_assert_eq!(sut.remove(tag), Ok(model_count));
                        order.retain(|t| t != tag);
                        prop_assert_eq!(sut.get(tag), None, "removed tag must be gone");
                    }
                    None => {
                        prop_assert_eq!(sut.remove(tag), Err(RemoveError::NotFound));
                    }
                }
            }
            OpI::IterForward => {
                let walked: Vec<String> =
                    sut.iter().map(|(t, _)| t.to_owned()).collect();
                prop_assert_eq!(&walked, &order);
            }
            OpI::IterBackward => {
                let walked: Vec<String> =
                    sut.iter().rev().map(|(t, _)| t.to_owned()).collect();
                let mut expected = order.clone();
                expected.reverse();
                prop_assert_eq!(walked, expected);
            }
        }

        // Post-conditions after each op.
        prop_assert_eq!(sut.len(), counts.len());
        prop_assert_eq!(sut.is_empty(), counts.is_empty());
        // Forward traversal carries counts matching the model.
        for (tag, count) in sut.iter() {
            prop_assert_eq!(Some(&count), counts.get(tag));
        }
    }
    Ok(())
}

// Property: state-machine equivalence against HashMap + insertion-order
// Vec across random op sequences. Invariants exercised:
// - `put` returns the updated count; first put appends to the order.
// - `get` parity with the model; removal reports NotFound exactly when
//   the model lacks the tag.
// - Forward/backward traversals equal the model order and its reverse.
// - `len`/`is_empty` parity after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(100, &pool, &ops)?;
    }
}

// Collision variant: a single bucket forces every tag into one chain,
// stressing chain-scan equality and the delete-time chain splice.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_single_bucket((pool, ops) in arb_scenario()) {
        run_scenario(1, &pool, &ops)?;
    }
}
