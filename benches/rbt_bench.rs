#![feature(test)]
extern crate test;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use test::Bencher;

use rbtree::{rbt::Index, set::CountSet};

fn load_index(n: usize) -> Index<u64, u64> {
    let mut index = Index::new("bench");
    for key in 0..(n as u64) {
        index.insert(key, key);
    }
    index
}

#[bench]
fn bench_rbt_insert(b: &mut Bencher) {
    let mut rng = SmallRng::seed_from_u64(0x1234);
    let mut index: Index<u64, u64> = Index::new("bench");
    b.iter(|| index.insert(rng.gen::<u64>(), 0));
}

#[bench]
fn bench_rbt_get(b: &mut Bencher) {
    let mut rng = SmallRng::seed_from_u64(0x1234);
    let index = load_index(1_000_000);
    b.iter(|| index.get(&(rng.gen::<u64>() % 1_000_000)).ok());
}

#[bench]
fn bench_rbt_delete_insert(b: &mut Bencher) {
    let mut rng = SmallRng::seed_from_u64(0x1234);
    let mut index = load_index(1_000_000);
    b.iter(|| {
        let key = rng.gen::<u64>() % 1_000_000;
        index.delete(&key);
        index.insert(key, key);
    });
}

#[bench]
fn bench_count_set_insert(b: &mut Bencher) {
    let mut rng = SmallRng::seed_from_u64(0x1234);
    let mut set: CountSet<u16> = CountSet::new("bench");
    b.iter(|| set.insert(rng.gen::<u16>()));
}
