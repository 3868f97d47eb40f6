use std::cmp::Ordering;
use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::compare::{Compare, FnCmp, Natural};
use crate::list::BlockList;

// Case-insensitive total order, byte order breaking ties, so that the
// prefix probe below is a lawful coarsening of it.
#[derive(Clone, Copy)]
struct CaselessCmp;

impl Compare<String> for CaselessCmp {
    fn compare(&self, a: &String, b: &String) -> Ordering {
        match a.to_lowercase().cmp(&b.to_lowercase()) {
            Ordering::Equal => a.cmp(b),
            ord => ord,
        }
    }
}

// Equal whenever the stored value starts with the probe,
// case-insensitively.
#[derive(Clone, Copy)]
struct CaselessPrefixCmp;

impl Compare<String> for CaselessPrefixCmp {
    fn compare(&self, a: &String, b: &String) -> Ordering {
        let (la, lb) = (a.to_lowercase(), b.to_lowercase());
        if la.starts_with(&lb) {
            Ordering::Equal
        } else {
            la.cmp(&lb)
        }
    }
}

#[test]
fn test_id() {
    let list: BlockList<i64, Natural> = BlockList::new("test-list", Natural, 0, 16);
    assert_eq!(list.id(), "test-list".to_string());
}

#[test]
fn test_len() {
    let list: BlockList<i64, Natural> = BlockList::new("test-list", Natural, 0, 16);
    assert_eq!(list.len(), 0);
    assert!(list.is_empty());
    assert_eq!(list.block_capacity(), 16);
}

#[test]
fn test_empty() {
    let list: BlockList<i64, Natural> = BlockList::new("test-empty", Natural, 8, 16);
    assert!(!list.contains(&1));
    assert_eq!(list.get(&1), None);
    assert!(list.iter().next().is_none());
    assert!(list.range(&0, &10).next().is_none());
    assert!(list.matching(&1, Natural).next().is_none());
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(list.random(&mut rng), None);
    assert!(list.validate().is_ok());
}

#[test]
fn test_insert() {
    let mut list: BlockList<i64, Natural> = BlockList::new("test-list", Natural, 0, 4);
    let mut refns = RefSet::new(Natural);

    for value in [2, 1, 3, 6, 5, 4, 8, 0, 9, 7].iter() {
        assert!(list.insert(*value));
        assert!(refns.insert(*value));
        assert!(list.validate().is_ok());
    }
    // duplicates report false, with no structural change.
    for value in 0..10 {
        assert!(!list.insert(value));
        assert!(!refns.insert(value));
    }

    assert_eq!(list.len(), 10);
    assert!(list.validate().is_ok());

    for value in 0..10 {
        assert_eq!(list.get(&value), refns.get(&value));
        assert_eq!(list.contains(&value), refns.contains(&value));
    }
    assert_eq!(list.iter().collect::<Vec<i64>>(), refns.items());
}

#[test]
fn test_insert_or_get() {
    let by_key = FnCmp(|a: &(i64, char), b: &(i64, char)| a.0.cmp(&b.0));
    let mut list = BlockList::new("test-list", by_key, 0, 4);

    assert_eq!(list.insert_or_get((1, 'a')), None);
    assert_eq!(list.insert_or_get((2, 'b')), None);
    // equal under the comparator, identity preserved by the store.
    assert_eq!(list.insert_or_get((1, 'z')), Some((1, 'a')));
    assert_eq!(list.len(), 2);
    assert_eq!(list.get(&(2, '?')), Some((2, 'b')));
}

#[test]
fn test_delete() {
    let mut list: BlockList<i64, Natural> = BlockList::new("test-list", Natural, 0, 2);
    let mut refns = RefSet::new(Natural);

    for value in [1, 2, 3, 4].iter() {
        list.insert(*value);
        refns.insert(*value);
    }

    // delete a missing element.
    assert!(!list.delete(&10));
    assert!(!refns.delete(&10));
    assert_eq!(list.len(), 4);

    // empty out one block, the directory compacts.
    assert!(list.delete(&3));
    assert!(list.delete(&4));
    assert!(refns.delete(&3));
    assert!(refns.delete(&4));
    let stats = list.validate().unwrap();
    assert_eq!(stats.blocks(), 1);
    assert_eq!(list.iter().collect::<Vec<i64>>(), refns.items());

    // delete all entries, then insert anew.
    assert!(list.delete(&1));
    assert!(list.delete(&2));
    assert_eq!(list.len(), 0);
    assert!(list.validate().is_ok());
    assert!(list.iter().next().is_none());
    assert!(list.insert(42));
    assert_eq!(list.iter().collect::<Vec<i64>>(), vec![42]);
}

#[test]
fn test_crud() {
    let size = 1000;
    let mut rng = StdRng::seed_from_u64(99);
    let mut list: BlockList<i64, Natural> = BlockList::new("test-list", Natural, 0, 16);
    let mut refns = RefSet::new(Natural);

    for _i in 0..20_000 {
        let value = rng.gen_range(0..size);
        match rng.gen_range(0..3) {
            0 | 1 => assert_eq!(list.insert(value), refns.insert(value)),
            2 => assert_eq!(list.delete(&value), refns.delete(&value)),
            op => panic!("unreachable {}", op),
        };
        assert_eq!(list.contains(&value), refns.contains(&value));
        assert!(list.validate().is_ok());
    }

    assert_eq!(list.len(), refns.len());
    assert_eq!(list.iter().collect::<Vec<i64>>(), refns.items());

    // ranges, closed interval on both ends.
    for _i in 0..1000 {
        let (lo, hi) = (rng.gen_range(0..size), rng.gen_range(0..size));
        let items: Vec<i64> = list.range(&lo, &hi).collect();
        assert_eq!(items, refns.range(&lo, &hi, &Natural));
    }
    // backward intervals yield nothing.
    assert!(list.range(&700, &100).next().is_none());

    // exact-match probes through the matching iterator.
    for _i in 0..100 {
        let value = rng.gen_range(0..size);
        let items: Vec<i64> = list.matching(&value, Natural).collect();
        assert_eq!(items, refns.matching(&value, &Natural));
    }
}

#[test]
fn test_random_members() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut list: BlockList<i64, Natural> = BlockList::new("test-list", Natural, 0, 8);
    for value in 0..100 {
        list.insert(value * 2);
    }
    for _i in 0..1000 {
        let value = list.random(&mut rng).unwrap();
        assert!(list.contains(&value));
    }
}

#[test]
fn test_matching_prefix() {
    let words = [
        "qwerty",
        "qwert",
        "qwe",
        "qwe",
        "qazwwsx",
        "xzxzxz",
        "zaqwsx",
        "XZZZZZYYYY",
        "xyzxyz",
    ];
    let mut list: BlockList<String, CaselessCmp> =
        BlockList::new("test-prefix", CaselessCmp, 0, 4);
    let mut dups = 0;
    for word in words.iter() {
        if !list.insert(word.to_string()) {
            dups += 1;
        }
    }
    assert_eq!(dups, 1); // the second "qwe"
    assert_eq!(list.len(), 8);
    assert!(list.validate().is_ok());

    let (lo, hi) = ("qwer".to_string(), "xz".to_string());
    let items: Vec<String> = list.range_by(&lo, &hi, CaselessPrefixCmp).collect();
    assert_eq!(
        items,
        vec!["qwert", "qwerty", "xyzxyz", "xzxzxz", "XZZZZZYYYY"]
    );

    let probe = "qwe".to_string();
    let items: Vec<String> = list.matching(&probe, CaselessPrefixCmp).collect();
    assert_eq!(items, vec!["qwe", "qwert", "qwerty"]);

    let refns = {
        let mut refns = RefSet::new(CaselessCmp);
        for word in words.iter() {
            refns.insert(word.to_string());
        }
        refns
    };
    assert_eq!(
        list.range_by(&lo, &hi, CaselessPrefixCmp).collect::<Vec<String>>(),
        refns.range(&lo, &hi, &CaselessPrefixCmp)
    );
    assert_eq!(
        list.matching(&probe, CaselessPrefixCmp).collect::<Vec<String>>(),
        refns.matching(&probe, &CaselessPrefixCmp)
    );
}

#[test]
fn test_small_block_splits() {
    let sorted = [
        "ant", "bat", "cat", "dog", "eel", "fox", "gnu", "hen", "ibis", "jay", "kit", "lark",
        "mole", "newt", "owl", "pig", "quail", "rat", "swan",
    ];
    let scrambled = [
        "mole", "ant", "rat", "eel", "swan", "cat", "pig", "gnu", "jay", "bat", "owl", "dog",
        "kit", "quail", "fox", "newt", "hen", "lark", "ibis",
    ];
    let mut list: BlockList<String, Natural> = BlockList::new("test-small", Natural, 0, 7);
    for word in scrambled.iter() {
        assert!(list.insert(word.to_string()));
    }
    assert_eq!(list.len(), 19);
    let stats = list.validate().unwrap();
    assert!(stats.blocks() >= 3);
    assert_eq!(list.iter().collect::<Vec<String>>(), sorted.to_vec());
}

#[test]
fn test_random_load() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut list: BlockList<i64, Natural> =
        BlockList::with_expected("test-load", Natural, 100_000, 1000);
    let mut model: BTreeSet<i64> = BTreeSet::new();

    for _i in 0..100_000 {
        let value = rng.gen_range(0..100_000);
        assert_eq!(list.insert(value), model.insert(value));
    }

    assert_eq!(list.len(), model.len());
    assert!(list.validate().is_ok());
    let items: Vec<i64> = list.iter().collect();
    let expect: Vec<i64> = model.iter().cloned().collect();
    assert_eq!(items, expect);

    let items: Vec<i64> = list.range(&10, &77).collect();
    let expect: Vec<i64> = model.range(10..=77).cloned().collect();
    assert_eq!(items, expect);
}

#[test]
fn test_monotone_load() {
    let mut list: BlockList<i64, Natural> =
        BlockList::with_expected("test-asc", Natural, 100_000, 1000);
    for value in 0..100_000 {
        assert!(list.insert(value));
    }
    assert_eq!(list.len(), 100_000);
    let stats = list.validate().unwrap();
    // ascending loads pack every block to capacity.
    assert_eq!(stats.blocks(), 100);
    assert_eq!(stats.fill().unwrap().min(), 100);
    assert!(list.iter().eq(0..100_000));
}

#[test]
fn test_reverse_monotone_load() {
    let mut list: BlockList<i64, Natural> = BlockList::new("test-desc", Natural, 0, 100);
    for value in (0..10_000).rev() {
        assert!(list.insert(value));
    }
    assert_eq!(list.len(), 10_000);
    let stats = list.validate().unwrap();
    assert_eq!(stats.blocks(), 100);
    assert!(list.iter().eq(0..10_000));
}

#[test]
fn test_block_cap_one() {
    let mut list: BlockList<i64, Natural> = BlockList::new("test-b1", Natural, 0, 1);
    for value in [5, 1, 9, 3, 7].iter() {
        assert!(list.insert(*value));
    }
    assert!(!list.insert(3));
    let stats = list.validate().unwrap();
    assert_eq!(stats.blocks(), 5);
    assert_eq!(list.iter().collect::<Vec<i64>>(), vec![1, 3, 5, 7, 9]);
    assert!(list.delete(&5));
    assert!(list.validate().is_ok());
    assert_eq!(list.iter().collect::<Vec<i64>>(), vec![1, 3, 7, 9]);
}

#[test]
fn test_trim() {
    let mut list: BlockList<i64, Natural> = BlockList::new("test-trim", Natural, 1000, 16);
    for value in 0..100 {
        list.insert(value);
    }
    list.trim();
    assert_eq!(list.len(), 100);
    assert!(list.validate().is_ok());
    assert!(list.insert(1000));
    assert!(list.iter().eq((0..100).chain(1000..1001)));
}

#[test]
#[should_panic]
fn test_zero_block_capacity() {
    BlockList::<i64, Natural>::new("test-zero", Natural, 0, 0);
}

include!("./ref_test.rs");
