#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can check
// structural invariants that the public API does not expose.

use crate::chained_hash_map::{ChainedHashMap, Handle};
use crate::hash::{Fnv1a, KeyHasher, PolynomialRollingHash, StdHasher};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::cmp::Reverse;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;

// Pool-indexed operations: indices shrink toward earlier keys and op lists
// shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    GetOrDefault(usize),
    Erase(usize),
    EraseAt(usize),
    Find(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
    Clear,
    CloneIsolated,
    Take,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z0-9.]{0,6}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            1 => idx.clone().prop_map(Op::GetOrDefault),
            2 => idx.clone().prop_map(Op::Erase),
            1 => idx.clone().prop_map(Op::EraseAt),
            2 => idx.clone().prop_map(Op::Find),
            1 => "[a-z0-9.]{0,6}".prop_map(Op::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => Just(Op::Iterate),
            1 => Just(Op::Clear),
            1 => Just(Op::CloneIsolated),
            1 => Just(Op::Take),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Every key hashes to bucket 0.
#[derive(Clone, Default)]
struct Zero;
impl<Q: ?Sized> KeyHasher<Q> for Zero {
    fn hash_key(&self, _key: &Q) -> u64 {
        0
    }
}

// Traversal order the table must produce: ascending bucket, then newest
// insertion first.
fn expected_order<H>(
    sut: &ChainedHashMap<String, i32, H>,
    model: &HashMap<String, (i32, u64)>,
) -> Vec<String>
where
    H: KeyHasher<String> + KeyHasher<str>,
{
    let mut keys: Vec<&String> = model.keys().collect();
    keys.sort_by_key(|k| (sut.bucket(k.as_str()), Reverse(model[*k].1)));
    keys.into_iter().cloned().collect()
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - First insert wins; the flag reports whether the key was new.
// - `find`/`contains_key`/`get` parity with the model; handles are stable.
// - `erase` returns 1/0 and `erase_at` returns the following position.
// - Iteration visits every entry once, bucket ascending, newest first.
// - The traversal start is exact and `load_factor == len / bucket_count`.
// - Clones are isolated; `take` leaves an empty table of the same size.
// - Stale handles never resolve.
fn run_state_machine<H>(
    hasher: H,
    capacity: usize,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError>
where
    H: KeyHasher<String> + KeyHasher<str> + Clone,
{
    let mut sut: ChainedHashMap<String, i32, H> =
        ChainedHashMap::with_capacity_and_hasher(capacity, hasher);
    // key -> (value, insertion sequence number)
    let mut model: HashMap<String, (i32, u64)> = HashMap::new();
    let mut live: HashMap<String, Handle> = HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();
    let mut seq = 0u64;

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i].clone();
                let already = model.contains_key(&k);
                let (h, inserted) = sut.insert(k.clone(), v);
                prop_assert_eq!(inserted, !already);
                if inserted {
                    seq += 1;
                    model.insert(k.clone(), (v, seq));
                    live.insert(k.clone(), h);
                } else {
                    prop_assert_eq!(Some(&h), live.get(&k));
                }
                prop_assert_eq!(sut.get(k.as_str()), Some(&model[&k].0));
            }
            Op::GetOrDefault(i) => {
                let k = pool[i].clone();
                let v = *sut.get_or_insert_default(k.clone());
                match model.get(&k) {
                    Some(&(mv, _)) => prop_assert_eq!(v, mv),
                    None => {
                        prop_assert_eq!(v, 0);
                        seq += 1;
                        model.insert(k.clone(), (0, seq));
                        let h = sut.find(k.as_str()).expect("just inserted");
                        live.insert(k, h);
                    }
                }
            }
            Op::Erase(i) => {
                let k = &pool[i];
                let removed = sut.erase(k.as_str());
                prop_assert_eq!(removed, usize::from(model.remove(k).is_some()));
                if let Some(h) = live.remove(k) {
                    stale.push(h);
                }
                prop_assert!(sut.find(k.as_str()).is_none());
            }
            Op::EraseAt(i) => {
                let k = &pool[i];
                if let Some(h) = live.remove(k) {
                    let order = expected_order(&sut, &model);
                    let pos = order.iter().position(|o| o == k).expect("model key in order");
                    let next = sut.erase_at(h);
                    prop_assert_eq!(
                        next.and_then(|n| n.key(&sut)).cloned(),
                        order.get(pos + 1).cloned()
                    );
                    model.remove(k);
                    stale.push(h);
                } else {
                    for &h in &stale {
                        prop_assert_eq!(sut.erase_at(h), None);
                    }
                }
            }
            Op::Find(i) => {
                let k = &pool[i];
                let found = sut.find(k.as_str());
                prop_assert_eq!(found.is_some(), model.contains_key(k));
                prop_assert_eq!(found, live.get(k).copied());
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            Op::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(&h) = live.get(k) {
                    let vr = h.value_mut(&mut sut).expect("live handle resolves");
                    *vr = vr.wrapping_add(d);
                    if let Some(mv) = model.get_mut(k) {
                        mv.0 = mv.0.wrapping_add(d);
                    }
                }
            }
            Op::Iterate => {
                let expected = expected_order(&sut, &model);
                let seen: Vec<String> = sut.keys().cloned().collect();
                prop_assert_eq!(&seen, &expected);
                let seen_mut: Vec<String> = sut.iter_mut().map(|(k, _)| k.clone()).collect();
                prop_assert_eq!(&seen_mut, &expected);
                let per_bucket: usize = (0..sut.bucket_count()).map(|b| sut.bucket_len(b)).sum();
                prop_assert_eq!(per_bucket, sut.len());
            }
            Op::Clear => {
                sut.clear();
                model.clear();
                stale.extend(live.drain().map(|(_, h)| h));
            }
            Op::CloneIsolated => {
                let before: Vec<(String, i32)> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                let mut copy = sut.clone();
                copy.assert_invariants();
                prop_assert!(copy == sut);
                let first = copy.first().and_then(|h| h.key(&copy)).cloned();
                if let Some(k) = first {
                    copy.erase(k.as_str());
                }
                copy.insert("\u{0}clone-only".to_string(), 1);
                let after: Vec<(String, i32)> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(before, after);
            }
            Op::Take => {
                let moved = sut.take();
                moved.assert_invariants();
                prop_assert_eq!(moved.len(), model.len());
                prop_assert_eq!(moved.bucket_count(), sut.bucket_count());
                prop_assert!(sut.is_empty());
                // Move it back so the remaining ops keep exercising the contents.
                sut = moved;
            }
        }

        sut.assert_invariants();
        for &h in &stale {
            prop_assert!(h.value(&sut).is_none());
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.load_factor(), model.len() as f64 / sut.bucket_count() as f64);
        match sut.first() {
            Some(h) => prop_assert_eq!(
                h.key(&sut).cloned(),
                expected_order(&sut, &model).into_iter().next()
            ),
            None => prop_assert!(model.is_empty()),
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_fnv1a((pool, ops) in arb_scenario(), capacity in 1usize..40) {
        run_state_machine(Fnv1a, capacity, &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_polynomial((pool, ops) in arb_scenario(), capacity in 1usize..40) {
        run_state_machine(PolynomialRollingHash, capacity, &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_std((pool, ops) in arb_scenario()) {
        run_state_machine(StdHasher::<RandomState>::default(), 7, &pool, ops)?;
    }

    // Worst-case collisions: one chain holds everything.
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(Zero, 5, &pool, ops)?;
    }
}
