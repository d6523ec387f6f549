use rand::{rngs::SmallRng, SeedableRng};

use std::{collections::BTreeMap, time};

use rbtree::Result;

use crate::cmd_perf::{Mix, Op, Opt, Profile};

pub fn perf(opts: Opt, p: Profile) -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(opts.seed);

    let mut index: BTreeMap<u64, u64> = BTreeMap::new();

    let start = time::Instant::now();
    for _i in 0..p.loads {
        index.insert(p.gen_key(&mut rng), p.gen_value(&mut rng));
    }
    println!("btree-map: loaded {} items in {:?}", p.loads, start.elapsed());

    let (mut sets, mut dels, mut gets, mut hits) = (0, 0, 0, 0);
    let mut mix = Mix::new(&p);

    let start = time::Instant::now();
    while let Some(op) = mix.next(&mut rng) {
        let key = p.gen_key(&mut rng);
        match op {
            Op::Set => {
                index.insert(key, p.gen_value(&mut rng));
                sets += 1;
            }
            Op::Del => {
                index.remove(&key);
                dels += 1;
            }
            Op::Get => {
                hits += index.get(&key).map(|_| 1).unwrap_or(0);
                gets += 1;
            }
        }
    }
    println!(
        "btree-map: sets:{} dels:{} gets:{} (hits:{}) took {:?}",
        sets,
        dels,
        gets,
        hits,
        start.elapsed()
    );
    println!("btree-map: index has {} items", index.len());

    Ok(())
}
