use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest_derive::Arbitrary;

use crate::compare::Natural;
use crate::list::BlockList;
use crate::set::BlockSet;

/// Actions to run against both variants and the model. The narrow
/// element domain forces duplicate hits, delete hits and block
/// compactions.
#[derive(Arbitrary, Debug, Clone)]
enum Action {
    Insert(u8),
    Delete(u8),
    Contains(u8),
}

/// Test harness that executes actions on both variants and a
/// `BTreeSet` model.
struct Test {
    list: BlockList<u8, Natural>,
    set: BlockSet<u8, Natural>,
    model: BTreeSet<u8>,
}

impl Test {
    fn new() -> Test {
        Test {
            list: BlockList::new("prop-list", Natural, 0, 8),
            set: BlockSet::new("prop-set", Natural, 8),
            model: BTreeSet::new(),
        }
    }

    fn apply(&mut self, action: &Action) {
        match action {
            Action::Insert(value) => {
                let expect = self.model.insert(*value);
                assert_eq!(self.list.insert(*value), expect);
                assert_eq!(self.set.insert(*value), expect);
            }
            Action::Delete(value) => {
                let expect = self.model.remove(value);
                assert_eq!(self.list.delete(value), expect);
                assert_eq!(self.set.delete(value), expect);
            }
            Action::Contains(value) => {
                let expect = self.model.contains(value);
                assert_eq!(self.list.contains(value), expect);
                assert_eq!(self.set.contains(value), expect);
            }
        }
    }

    fn check(&self) {
        assert_eq!(self.list.len(), self.model.len());
        assert_eq!(self.set.len(), self.model.len());
        let expect: Vec<u8> = self.model.iter().cloned().collect();
        assert_eq!(self.list.iter().collect::<Vec<u8>>(), expect);
        assert_eq!(self.set.iter().collect::<Vec<u8>>(), expect);
        assert!(self.list.validate().is_ok());
        assert!(self.set.validate().is_ok());
    }
}

proptest! {
    #[test]
    fn prop_actions(actions in proptest::collection::vec(any::<Action>(), 1..400)) {
        let mut test = Test::new();
        for action in actions.iter() {
            test.apply(action);
        }
        test.check();
    }

    #[test]
    fn prop_ranges(
        values in proptest::collection::btree_set(any::<u8>(), 0..64),
        lo in any::<u8>(),
        hi in any::<u8>(),
    ) {
        let mut list: BlockList<u8, Natural> = BlockList::new("prop-range", Natural, 0, 4);
        for value in values.iter() {
            list.insert(*value);
        }
        let expect: Vec<u8> = values.iter().cloned().filter(|v| *v >= lo && *v <= hi).collect();
        let items: Vec<u8> = list.range(&lo, &hi).collect();
        prop_assert_eq!(items, expect);
    }
}
