use arbitrary::{self, unstructured::Unstructured, Arbitrary};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use std::collections::BTreeMap;

use super::*;
use crate::{util::ToJson, Error};

// +new +to_name +len +is_empty +clear +to_stats +root +dump +dump_with_values
// +get +get_mut +contains +update +insert +delete +validate

#[test]
fn test_rbt_insert_rotate_left() {
    let mut index: Index<i32, &str> = Index::new("test_rotate_left");
    for (key, value) in [(10, "ten"), (20, "twenty"), (30, "thirty")].iter() {
        assert_eq!(index.insert(*key, *value), None);
    }

    let root = index.root().unwrap();
    assert_eq!(*root.as_key(), 20);
    assert_eq!(root.to_color(), Color::Black);
    let (left, right) = (root.left().unwrap(), root.right().unwrap());
    assert_eq!((*left.as_key(), left.to_color()), (10, Color::Red));
    assert_eq!((*right.as_key(), right.to_color()), (30, Color::Red));
    assert!(left.left().is_none() && left.right().is_none());
    assert!(right.left().is_none() && right.right().is_none());

    let stats = index.validate().unwrap();
    assert_eq!(stats.n_count, 3);
    assert_eq!(stats.blacks, Some(1));
}

#[test]
fn test_rbt_insert_zigzag() {
    // descending, left-left, and both zig-zag orders shall end up with the
    // same shape.
    let orders = [[30, 20, 10], [10, 30, 20], [30, 10, 20], [20, 10, 30]];
    for order in orders.iter() {
        let mut index: Index<i32, i32> = Index::new("test_zigzag");
        for key in order.iter() {
            index.insert(*key, key * 10);
        }
        let root = index.root().unwrap();
        assert_eq!(*root.as_key(), 20, "{:?}", order);
        assert!(root.is_black());
        assert_eq!(*root.left().unwrap().as_key(), 10);
        assert_eq!(*root.right().unwrap().as_key(), 30);
        assert_eq!(root.left().unwrap().to_color(), Color::Red);
        assert_eq!(root.right().unwrap().to_color(), Color::Red);
        for key in order.iter() {
            assert_eq!(*index.get(key).unwrap(), key * 10);
        }
        index.validate().unwrap();
    }
}

#[test]
fn test_rbt_recolor_root() {
    // 4th insert finds a red uncle, recolors and leaves root black.
    let mut index: Index<i32, ()> = Index::new("test_recolor");
    for key in [10, 20, 30, 40].iter() {
        index.insert(*key, ());
    }
    let root = index.root().unwrap();
    assert_eq!((*root.as_key(), root.to_color()), (20, Color::Black));
    assert!(root.left().unwrap().is_black());
    assert!(root.right().unwrap().is_black());
    let leaf = root.right().unwrap().right().unwrap();
    assert_eq!((*leaf.as_key(), leaf.to_color()), (40, Color::Red));

    let stats = index.validate().unwrap();
    assert_eq!(stats.blacks, Some(2));
}

#[test]
fn test_rbt_delete_two_children() {
    let mut index: Index<i32, String> = Index::new("test_delete_two");
    for key in [50, 30, 70, 20, 40, 60, 80].iter() {
        index.insert(*key, format!("value-{}", key));
    }
    index.validate().unwrap();

    assert_eq!(index.delete(&50), Some("value-50".to_string()));
    index.validate().unwrap();

    assert_eq!(index.contains(&50), false);
    assert_eq!(index.contains(&60), true);
    assert_eq!(index.get(&60).unwrap(), "value-60");
    assert_eq!(index.len(), 6);
    assert_eq!(in_order(&index), vec![20, 30, 40, 60, 70, 80]);

    // successor took over the root position.
    let root = index.root().unwrap();
    assert_eq!(*root.as_key(), 60);
    assert!(root.is_black());
}

#[test]
fn test_rbt_delete_root_moves_handle() {
    let mut index: Index<i32, i32> = Index::new("test_delete_root");
    index.insert(1, 10);
    index.insert(2, 20);
    assert_eq!(index.delete(&1), Some(10));

    let root = index.root().unwrap();
    assert_eq!((*root.as_key(), root.to_color()), (2, Color::Black));
    assert_eq!(*index.get(&2).unwrap(), 20);
    index.validate().unwrap();

    assert_eq!(index.delete(&2), Some(20));
    assert!(index.is_empty());
    assert!(index.root().is_none());
    assert_eq!(index.len(), 0);
    index.validate().unwrap();
}

#[test]
fn test_rbt_delete_black_leaf() {
    // deleting black leaves, exercise every sibling case.
    for n in 1..64 {
        for start in 0..n {
            let mut index: Index<i32, i32> = Index::new("test_black_leaf");
            let mut keys: Vec<i32> = (0..n).collect();
            for key in keys.iter() {
                index.insert(*key, -key);
            }
            keys.rotate_left(start as usize);
            let mut remaining: Vec<i32> = (0..n).collect();
            for key in keys.iter() {
                assert_eq!(index.delete(key), Some(-key));
                remaining.retain(|k| k != key);
                index.validate().unwrap();
                assert_eq!(in_order(&index), remaining);
            }
            assert!(index.is_empty());
        }
    }
}

#[test]
fn test_rbt_overwrite() {
    let mut index: Index<&str, u64> = Index::new("test_overwrite");
    assert_eq!(index.insert("key", 1), None);
    assert_eq!(index.insert("other", 2), None);
    let before = index.dump().to_string();

    assert_eq!(index.insert("key", 100), Some(1));
    assert_eq!(*index.get("key").unwrap(), 100);
    assert_eq!(index.len(), 2);
    // structure and colors unchanged.
    assert_eq!(index.dump().to_string(), before);
    index.validate().unwrap();
}

#[test]
fn test_rbt_missing_key() {
    let mut index: Index<u64, u64> = Index::new("test_missing");
    match index.get(&10) {
        Err(Error::KeyNotFound(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    assert_eq!(index.delete(&10), None);

    for key in (0..100).step_by(2) {
        index.insert(key, key);
    }
    let (dump, len) = (index.dump_with_values().to_string(), index.len());

    match index.update(&11, 1000) {
        Err(Error::KeyNotFound(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    match index.get_mut(&11) {
        Err(Error::KeyNotFound(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    assert_eq!(index.delete(&11), None);
    assert_eq!(index.delete(&1000), None);
    assert_eq!(index.contains(&11), false);

    assert_eq!(index.len(), len);
    assert_eq!(index.dump_with_values().to_string(), dump);
    index.validate().unwrap();
}

#[test]
fn test_rbt_update() {
    let mut index: Index<String, u64> = Index::new("test_update");
    for i in 0..10 {
        index.insert(format!("key-{}", i), i);
    }
    assert_eq!(index.update("key-5", 500).unwrap(), 5);
    assert_eq!(*index.get("key-5").unwrap(), 500);

    *index.get_mut("key-6").unwrap() += 600;
    assert_eq!(*index.get("key-6").unwrap(), 606);
    assert_eq!(index.len(), 10);
    index.validate().unwrap();
}

#[test]
fn test_rbt_clear() {
    let mut index: Index<u32, u32> = Index::default();
    assert_eq!(index.to_name(), "rbt");
    assert!(index.is_empty());

    for key in 0..1000 {
        index.insert(key, key);
    }
    assert_eq!(index.len(), 1000);
    assert!(!index.is_empty());

    index.clear();
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert!(index.root().is_none());
    assert!(!index.contains(&10));
    assert_eq!(index.dump().to_string(), "Tree is empty\n");
    index.validate().unwrap();

    index.insert(10, 10);
    assert_eq!(*index.get(&10).unwrap(), 10);
    index.validate().unwrap();
}

#[test]
fn test_rbt_dump() {
    let mut index: Index<i32, char> = Index::new("test_dump");
    assert_eq!(index.dump_with_values().to_string(), "Tree is empty\n");

    for (key, value) in [(10, 'a'), (20, 'b'), (30, 'c'), (40, 'd')].iter() {
        index.insert(*key, *value);
    }
    let dump = concat!(
        "Tree Structure:\n",
        "└──20(Black)\n",
        "    ├──10(Black)\n",
        "    └──30(Black)\n",
        "        └──40(Red)\n",
    );
    assert_eq!(index.dump().to_string(), dump);

    index.insert(5, 'e');
    let dump = concat!(
        "Tree Structure:\n",
        "└──20(Black) [b]\n",
        "    ├──10(Black) [a]\n",
        "    │   ├──5(Red) [e]\n",
        "    └──30(Black) [c]\n",
        "        └──40(Red) [d]\n",
    );
    assert_eq!(index.dump_with_values().to_string(), dump);
}

#[test]
fn test_rbt_height_bound() {
    let n = 100_000_u64;
    let mut index: Index<u64, u64> = Index::new("test_height");
    for key in 0..n {
        index.insert(key, key);
    }
    let stats = index.validate().unwrap();
    let height = stats.depths.as_ref().unwrap().to_max() as f64;
    assert!(height <= 2.0 * ((n + 1) as f64).log2(), "{}", height);

    for key in (0..n).filter(|k| k % 3 != 0) {
        index.delete(&key);
    }
    let stats = index.validate().unwrap();
    let n = index.len() as f64;
    let height = stats.depths.as_ref().unwrap().to_max() as f64;
    assert!(height <= 2.0 * (n + 1.0).log2(), "{}", height);

    let json = stats.to_json();
    assert!(json.contains(r#""name": "test_height""#), "{}", json);
    assert!(stats.to_string().contains("rbt.name = test_height"));
}

#[test]
fn test_rbt_stats() {
    let mut index: Index<u64, u64> = Index::new("test_stats");
    let stats = index.to_stats();
    assert_eq!(stats.n_count, 0);
    assert!(stats.blacks.is_none() && stats.depths.is_none());
    assert!(stats.to_json().contains(r#""blacks": null"#));

    for key in 0..10 {
        index.insert(key, key);
    }
    let stats = index.to_stats();
    assert_eq!(stats.n_count, 10);
    assert_eq!(stats.node_size, std::mem::size_of::<Node<u64, u64>>());
    assert!(stats.blacks.is_none());

    let stats = index.validate().unwrap();
    assert!(stats.blacks.is_some());
    assert_eq!(stats.depths.as_ref().unwrap().to_min() >= 1, true);
}

#[test]
fn test_rbt_random() {
    let seed: u64 = random();
    // let seed: u64 = 15361406011430946421;
    println!("test_rbt_random seed:{}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    do_test_random("test_rbt_random_16", &mut rng, 10_000, 16);
    do_test_random("test_rbt_random_256", &mut rng, 20_000, 256);
    do_test_random("test_rbt_random_4096", &mut rng, 50_000, 4096);
}

fn do_test_random(prefix: &str, rng: &mut SmallRng, n_ops: usize, key_max: u16) {
    let mut index: Index<u16, u64> = Index::new(prefix);
    let mut btmap: BTreeMap<u16, u64> = BTreeMap::new();
    let mut counts = [0_usize; 6];

    for i in 0..n_ops {
        let bytes = rng.gen::<[u8; 32]>();
        let mut uns = Unstructured::new(&bytes);

        let op: Op<u16, u64> = uns.arbitrary().unwrap();
        // println!("{} {}-op -- {:?}", prefix, i, op);
        match op {
            Op::Insert(key, val) | Op::Upsert(key, val) => {
                let key = key % key_max;
                assert_eq!(index.insert(key, val), btmap.insert(key, val));
                counts[0] += 1;
            }
            Op::Delete(key) => {
                let key = key % key_max;
                assert_eq!(index.delete(&key), btmap.remove(&key));
                counts[1] += 1;
            }
            Op::Get(key) => {
                let key = key % key_max;
                match (index.get(&key), btmap.get(&key)) {
                    (Ok(a), Some(b)) => assert_eq!(a, b),
                    (Err(Error::KeyNotFound(_, _)), None) => (),
                    (a, b) => panic!("{} {:?} {:?}", prefix, a, b),
                }
                counts[2] += 1;
            }
            Op::Contains(key) => {
                let key = key % key_max;
                assert_eq!(index.contains(&key), btmap.contains_key(&key));
                counts[3] += 1;
            }
            Op::Update(key, val) => {
                let key = key % key_max;
                match (index.update(&key, val), btmap.get_mut(&key)) {
                    (Ok(old), Some(v)) => {
                        assert_eq!(old, *v);
                        *v = val;
                    }
                    (Err(Error::KeyNotFound(_, _)), None) => (),
                    (a, b) => panic!("{} {:?} {:?}", prefix, a, b),
                }
                counts[4] += 1;
            }
            Op::Validate => {
                index.validate().unwrap();
                counts[5] += 1;
            }
        }

        assert_eq!(index.len(), btmap.len());
        if i % 100 == 0 {
            index.validate().unwrap();
        }
    }

    println!("{} len:{:06} counts:{:?}", prefix, index.len(), counts);

    index.validate().unwrap();
    let keys: Vec<u16> = btmap.keys().cloned().collect();
    assert_eq!(in_order(&index), keys);
    for (key, val) in btmap.iter() {
        assert_eq!(index.get(key).unwrap(), val);
    }
}

#[derive(Clone, Debug, Arbitrary)]
enum Op<K, V> {
    Insert(K, V),
    Upsert(K, V),
    Delete(K),
    Get(K),
    Contains(K),
    Update(K, V),
    Validate,
}

fn in_order<K, V>(index: &Index<K, V>) -> Vec<K>
where
    K: Clone,
{
    fn walk<K: Clone, V>(node: Option<NodeRef<K, V>>, keys: &mut Vec<K>) {
        if let Some(node) = node {
            walk(node.left(), keys);
            keys.push(node.as_key().clone());
            walk(node.right(), keys);
        }
    }

    let mut keys = vec![];
    walk(index.root(), &mut keys);
    keys
}
