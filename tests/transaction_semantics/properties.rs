//! Property tests against a reference store
//!
//! The reference keeps a full copy of the visible map per open
//! transaction: begin clones the top copy, commit replaces the parent copy
//! with the top one, rollback drops the top copy. The overlay store must
//! agree with it after every operation.

use std::collections::BTreeMap;

use layerkv::{Key, TransactionalStore, Value};
use proptest::prelude::*;

const KEYS: &[&str] = &["a", "b", "c", "d", "e"];

#[derive(Debug, Clone)]
enum Op {
    Set(usize, String),
    Delete(usize),
    Begin,
    Commit,
    Rollback,
}

fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9]{0,4}",
        Just("NULL".to_string()),
        Just("__DELETED__".to_string()),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..KEYS.len(), value_strategy()).prop_map(|(k, v)| Op::Set(k, v)),
        2 => (0..KEYS.len()).prop_map(Op::Delete),
        2 => Just(Op::Begin),
        1 => Just(Op::Commit),
        1 => Just(Op::Rollback),
    ]
}

/// Copy-per-transaction reference implementation
struct Reference {
    states: Vec<BTreeMap<String, String>>,
}

impl Reference {
    fn new() -> Self {
        Self {
            states: vec![BTreeMap::new()],
        }
    }

    fn top(&mut self) -> &mut BTreeMap<String, String> {
        self.states.last_mut().unwrap()
    }

    fn apply(&mut self, op: &Op) -> Option<bool> {
        match op {
            Op::Set(k, v) => {
                self.top().insert(KEYS[*k].to_string(), v.clone());
                None
            }
            Op::Delete(k) => {
                self.top().remove(KEYS[*k]);
                None
            }
            Op::Begin => {
                let copy = self.states.last().unwrap().clone();
                self.states.push(copy);
                None
            }
            Op::Commit => {
                if self.states.len() == 1 {
                    return Some(false);
                }
                let top = self.states.pop().unwrap();
                *self.top() = top;
                Some(true)
            }
            Op::Rollback => {
                if self.states.len() == 1 {
                    return Some(false);
                }
                self.states.pop();
                Some(true)
            }
        }
    }

    fn visible(&self) -> BTreeMap<Key, Value> {
        self.states
            .last()
            .unwrap()
            .iter()
            .map(|(k, v)| (Key::from(k), Value::from(v)))
            .collect()
    }

    fn depth(&self) -> usize {
        self.states.len() - 1
    }
}

fn apply(store: &mut TransactionalStore, op: &Op) -> Option<bool> {
    match op {
        Op::Set(k, v) => {
            store.set(KEYS[*k], v.as_str());
            None
        }
        Op::Delete(k) => {
            store.delete(KEYS[*k]);
            None
        }
        Op::Begin => {
            store.begin();
            None
        }
        Op::Commit => Some(store.commit()),
        Op::Rollback => Some(store.rollback()),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_matches_reference(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut store = TransactionalStore::new();
        let mut reference = Reference::new();

        for op in &ops {
            let got = apply(&mut store, op);
            let want = reference.apply(op);
            prop_assert_eq!(got, want, "status mismatch on {:?}", op);
            prop_assert_eq!(store.depth(), reference.depth());

            let visible = reference.visible();
            for key in KEYS {
                prop_assert_eq!(store.get(key), visible.get(*key));
            }
            prop_assert_eq!(store.snapshot(), visible);
        }
    }

    #[test]
    fn prop_rollback_restores_pre_begin_state(
        setup in proptest::collection::vec(op_strategy(), 0..32),
        body in proptest::collection::vec(op_strategy(), 0..32),
    ) {
        let mut store = TransactionalStore::new();
        for op in &setup {
            apply(&mut store, op);
        }
        let depth = store.depth();
        let before = store.snapshot();

        store.begin();
        for op in &body {
            // Keep body operations inside the transaction opened above
            if matches!(op, Op::Commit | Op::Rollback) && store.depth() == depth + 1 {
                continue;
            }
            apply(&mut store, op);
        }
        while store.depth() > depth + 1 {
            store.rollback();
        }
        prop_assert!(store.rollback());

        prop_assert_eq!(store.depth(), depth);
        prop_assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn prop_commit_equals_direct_application(
        writes in proptest::collection::vec((0..KEYS.len(), proptest::option::of(value_strategy())), 0..32),
    ) {
        let mut direct = TransactionalStore::new();
        let mut transacted = TransactionalStore::new();
        for key in KEYS {
            direct.set(*key, "seed");
            transacted.set(*key, "seed");
        }

        transacted.begin();
        for (k, v) in &writes {
            match v {
                Some(v) => {
                    direct.set(KEYS[*k], v.as_str());
                    transacted.set(KEYS[*k], v.as_str());
                }
                None => {
                    direct.delete(KEYS[*k]);
                    transacted.delete(KEYS[*k]);
                }
            }
        }
        prop_assert!(transacted.commit());

        prop_assert_eq!(direct.committed(), transacted.committed());
    }
}
