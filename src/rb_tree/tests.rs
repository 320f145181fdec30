use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::*;

std::thread_local! {
    static CAPTURED: RefCell<Option<Vec<(log::Level, String)>>> = const { RefCell::new(None) };
}

/// Records log lines emitted on the current thread while capturing is on.
struct ThreadLogger;

impl log::Log for ThreadLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED.with(|captured| {
            if let Some(lines) = captured.borrow_mut().as_mut() {
                lines.push((record.level(), format!("{}", record.args())));
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: ThreadLogger = ThreadLogger;

/// Runs `f` and returns its result with every log line it emitted.
pub(super) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(log::Level, String)>) {
    static INSTALL: std::sync::Once = std::sync::Once::new();
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });

    CAPTURED.with(|captured| *captured.borrow_mut() = Some(Vec::new()));
    let result = f();
    let lines = CAPTURED.with(|captured| captured.borrow_mut().take().unwrap_or_default());
    (result, lines)
}

fn assert_matches_model(tree: &RbTree<i32>, model: &BTreeMap<i32, usize>) {
    if let Err(reason) = tree.audit() {
        panic!("invariant broken: {reason}\n{tree}");
    }

    let expected: Vec<i32> = model
        .iter()
        .flat_map(|(&key, &count)| core::iter::repeat_n(key, count))
        .collect();
    assert_eq!(tree.in_order_visit(), expected);
    assert_eq!(tree.size(), expected.len());
    assert_eq!(tree.number_of_nodes(), model.len());

    if tree.is_empty() {
        assert_eq!(tree.black_height(), -1);
    } else {
        assert!(tree.black_height() >= 1);
    }
}

#[test]
fn test_random_operations_against_model() {
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tree = RbTree::<i32>::new();
        let mut model = BTreeMap::new();

        for _ in 0..1500 {
            let key: i32 = rng.gen_range(0..120);
            if rng.gen_bool(0.6) {
                tree.insert(key).unwrap();
                *model.entry(key).or_insert(0) += 1;
            } else {
                let expected = match model.get_mut(&key) {
                    Some(count) if *count > 1 => {
                        *count -= 1;
                        true
                    }
                    Some(_) => {
                        model.remove(&key);
                        true
                    }
                    None => false,
                };
                assert_eq!(tree.remove(&key), Ok(expected));
            }
            assert_matches_model(&tree, &model);
        }

        for key in 0..120 {
            let count = model.get(&key).copied().unwrap_or(0);
            assert_eq!(tree.count(&key), Ok(count));
            assert_eq!(tree.contains(&key), Ok(count > 0));
        }
    }
}

#[test]
fn test_random_neighbours_against_model() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut tree = RbTree::<i32>::new();
    let mut model = BTreeMap::new();

    for _ in 0..400 {
        let key: i32 = rng.gen_range(-500..500);
        tree.insert(key).unwrap();
        *model.entry(key).or_insert(0usize) += 1;
    }

    let keys: Vec<i32> = model.keys().copied().collect();
    for (i, key) in keys.iter().enumerate() {
        let predecessor = i.checked_sub(1).map(|j| &keys[j]);
        let successor = keys.get(i + 1);
        assert_eq!(tree.predecessor(key), Ok(predecessor));
        assert_eq!(tree.successor(key), Ok(successor));
    }
    assert_eq!(tree.minimum(), keys.first());
    assert_eq!(tree.maximum(), keys.last());
}

#[test]
fn test_random_order_statistics_against_model() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut tree = RbTree::<i32>::new();
    let mut sorted = Vec::new();

    for _ in 0..300 {
        let key: i32 = rng.gen_range(0..50);
        tree.insert(key).unwrap();
        sorted.push(key);
    }
    for _ in 0..100 {
        let victim = sorted[rng.gen_range(0..sorted.len())];
        tree.remove(&victim).unwrap();
        if let Some(pos) = sorted.iter().position(|&key| key == victim) {
            sorted.remove(pos);
        }
    }
    sorted.sort_unstable();

    for (k, key) in sorted.iter().enumerate() {
        assert_eq!(tree.select(k), Some(key));
    }
    for key in 0..50 {
        let smaller = sorted.iter().filter(|&&other| other < key).count();
        assert_eq!(tree.rank(&key), Ok(smaller));
    }
}

#[test]
fn test_insert_then_remove_restores_tree() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut tree = RbTree::<i32>::new();
    for _ in 0..200 {
        let key: i32 = rng.gen_range(0..100);
        tree.insert(key).unwrap();
    }

    for key in [-1, 0, 50, 99, 100, 1000] {
        let before = tree.in_order_visit();
        let size = tree.size();
        let nodes = tree.number_of_nodes();
        let count = tree.count(&key).unwrap();

        tree.insert(key).unwrap();
        assert_eq!(tree.remove(&key), Ok(true));

        assert_eq!(tree.in_order_visit(), before);
        assert_eq!(tree.size(), size);
        assert_eq!(tree.number_of_nodes(), nodes);
        assert_eq!(tree.count(&key), Ok(count));
        assert!(tree.audit().is_ok());
    }
}

/// Shuffles `inserts` and `removes` together into one sequence in which every
/// removal comes after enough insertions of its key to succeed.
fn random_interleaving(rng: &mut StdRng, inserts: &[i32], removes: &[i32]) -> Vec<(bool, i32)> {
    let mut pending_inserts = inserts.to_vec();
    pending_inserts.shuffle(rng);
    let mut pending_removes = removes.to_vec();
    let mut live: BTreeMap<i32, usize> = BTreeMap::new();
    let mut operations = Vec::with_capacity(inserts.len() + removes.len());

    while !pending_inserts.is_empty() || !pending_removes.is_empty() {
        let ready: Vec<usize> = (0..pending_removes.len())
            .filter(|&i| live.get(&pending_removes[i]).is_some_and(|&count| count > 0))
            .collect();

        if !ready.is_empty() && (pending_inserts.is_empty() || rng.gen_bool(0.4)) {
            let key = pending_removes.swap_remove(ready[rng.gen_range(0..ready.len())]);
            if let Some(count) = live.get_mut(&key) {
                *count -= 1;
            }
            operations.push((false, key));
        } else if let Some(key) = pending_inserts.pop() {
            *live.entry(key).or_insert(0) += 1;
            operations.push((true, key));
        } else {
            break;
        }
    }
    operations
}

fn apply(operations: &[(bool, i32)]) -> RbTree<i32> {
    let mut tree = RbTree::<i32>::new();
    for &(is_insert, key) in operations {
        if is_insert {
            tree.insert(key).unwrap();
        } else {
            assert_eq!(tree.remove(&key), Ok(true), "remove {key}");
        }
    }
    tree
}

#[test]
fn test_interleavings_agree() {
    let mut rng = StdRng::seed_from_u64(5);
    let inserts: Vec<i32> = (0..300).map(|i| i % 40).collect();
    let removes: Vec<i32> = (0..100).map(|i| (i * 7) % 40).collect();

    let mut model: BTreeMap<i32, usize> = BTreeMap::new();
    for &key in &inserts {
        *model.entry(key).or_insert(0) += 1;
    }
    for key in &removes {
        if let Some(count) = model.get_mut(key) {
            *count -= 1;
        }
    }
    model.retain(|_, count| *count > 0);

    let reference = apply(&random_interleaving(&mut rng, &inserts, &removes));
    assert_matches_model(&reference, &model);

    for _ in 0..20 {
        let operations = random_interleaving(&mut rng, &inserts, &removes);
        assert_eq!(operations.len(), inserts.len() + removes.len());

        // Removals are mixed in with insertions, not queued behind them.
        let first_remove = operations.iter().position(|&(is_insert, _)| !is_insert);
        let last_insert = operations.iter().rposition(|&(is_insert, _)| is_insert);
        assert!(first_remove < last_insert);

        let tree = apply(&operations);
        assert_matches_model(&tree, &model);
        assert!(tree == reference);
    }
}

#[test]
fn test_boundary_scenarios() {
    let empty = RbTree::<i32>::new();
    assert_eq!(empty.minimum(), None);
    assert_eq!(empty.maximum(), None);
    assert_eq!(empty.black_height(), -1);
    assert!(empty.in_order_visit().is_empty());

    let mut tree = RbTree::<i32>::new();
    for key in [10, 5, 15, 3, 7, 12, 20, 1] {
        tree.insert(key).unwrap();
    }
    assert_eq!(tree.in_order_visit(), vec![1, 3, 5, 7, 10, 12, 15, 20]);
    assert!(tree.black_height() >= 0);

    let mut triple = RbTree::<i32>::new();
    for _ in 0..3 {
        triple.insert(5).unwrap();
    }
    assert_eq!(triple.size(), 3);
    assert_eq!(triple.number_of_nodes(), 1);
    assert_eq!(triple.remove(&5), Ok(true));
    assert_eq!(triple.count(&5), Ok(2));

    let mut ascending = RbTree::<i32>::new();
    for key in 1..=1000 {
        ascending.insert(key).unwrap();
    }
    assert!((5..=20).contains(&ascending.black_height()));
    assert!(ascending.audit().is_ok());
    ascending.remove(&500).unwrap();
    let expected: Vec<i32> = (1..=499).chain(501..=1000).collect();
    assert_eq!(ascending.in_order_visit(), expected);

    let mut balanced = RbTree::<i32>::new();
    for key in [20, 10, 30, 5, 15, 25, 35] {
        balanced.insert(key).unwrap();
    }
    balanced.remove(&20).unwrap();
    assert!(balanced.audit().is_ok());
    assert_eq!(balanced.successor(&15), Ok(Some(&25)));

    let mut small = RbTree::<i32>::new();
    for key in [10, 5, 15] {
        small.insert(key).unwrap();
    }
    assert_eq!(small.predecessor(&10), Ok(Some(&5)));
    assert_eq!(small.successor(&10), Ok(Some(&15)));
    assert_eq!(small.predecessor(&5), Ok(None));
}

#[test]
fn test_singleton() {
    let tree = RbTree::<i32>::singleton(9).unwrap();
    assert_eq!(tree.size(), 1);
    assert_eq!(tree.number_of_nodes(), 1);
    assert_eq!(tree.minimum(), Some(&9));
    assert_eq!(tree.black_height(), 1);
    assert!(tree.audit().is_ok());

    assert_eq!(RbTree::<i32>::singleton(None), Err(TreeError::InvalidInput));
}

#[test]
fn test_clear_and_reuse() {
    let mut tree = RbTree::<i32>::with_capacity(16);
    for key in 1..=5 {
        tree.insert(key).unwrap();
    }
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert!(tree.capacity() >= 16);

    tree.insert(42).unwrap();
    assert_eq!(tree.in_order_visit(), vec![42]);
    tree.shrink_to_fit();
    assert!(tree.audit().is_ok());
}

#[test]
fn test_clear_logs_at_debug() {
    let mut tree = RbTree::<i32>::new();
    for key in 1..=3 {
        tree.insert(key).unwrap();
    }

    let ((), logs) = capture_logs(|| tree.clear());
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].0, log::Level::Debug);
    assert!(logs[0].1.contains("clearing 3 nodes"));
}

#[test]
fn test_equality_ignores_shape() {
    let mut ascending = RbTree::<i32>::new();
    let mut descending = RbTree::<i32>::new();
    for key in 0..64 {
        ascending.insert(key).unwrap();
        descending.insert(63 - key).unwrap();
    }
    assert!(ascending == descending);

    descending.insert(0).unwrap();
    assert!(ascending != descending);
}

#[test]
fn test_string_keys() {
    let mut tree = RbTree::<&str>::new();
    for word in ["pear", "apple", "fig", "apple"] {
        tree.insert(word).unwrap();
    }
    assert_eq!(tree.in_order_visit(), vec!["apple", "apple", "fig", "pear"]);
    assert_eq!(tree.successor(&"fig"), Ok(Some(&"pear")));
    assert_eq!(tree.count(&"apple"), Ok(2));
}
