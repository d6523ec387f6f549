use rand::{rngs::SmallRng, SeedableRng};

use std::time;

use rbtree::{rbt::Index, util::ToJson, Result};

use crate::cmd_perf::{Mix, Op, Opt, Profile};

pub fn perf(opts: Opt, p: Profile) -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(opts.seed);

    let mut index: Index<u64, u64> = Index::new("rbt-perf");

    let start = time::Instant::now();
    for _i in 0..p.loads {
        index.insert(p.gen_key(&mut rng), p.gen_value(&mut rng));
    }
    println!("rbt-perf: loaded {} items in {:?}", p.loads, start.elapsed());

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
                index.delete(&key);
                dels += 1;
            }
            Op::Get => {
                hits += index.get(&key).map(|_| 1).unwrap_or(0);
                gets += 1;
            }
        }
    }
    println!(
        "rbt-perf: sets:{} dels:{} gets:{} (hits:{}) took {:?}",
        sets,
        dels,
        gets,
        hits,
        start.elapsed()
    );

    println!("rbt-perf: index has {} items", index.len());
    if p.validate {
        print!("rbt-perf: validating {} items in index ... ", index.len());
        let stats = index.validate()?;
        println!("ok");
        println!("rbt-perf: stats {}", stats.to_json());
    } else {
        println!("rbt-perf: stats {}", index.to_stats().to_json());
    }

    Ok(())
}
