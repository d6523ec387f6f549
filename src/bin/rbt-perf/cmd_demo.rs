use rand::{rngs::SmallRng, Rng, SeedableRng};

use std::cmp;

use rbtree::{rbt::Index, set::CountSet, Result};

use crate::SubCommand;

/// Options for `demo` subcommand.
#[derive(Clone)]
pub struct Opt {
    pub nodes: usize,
    pub seed: u64,
    pub deletes: usize,
    pub start: usize,
    pub set: bool,
}

impl From<SubCommand> for Opt {
    fn from(subcmd: SubCommand) -> Opt {
        match subcmd {
            SubCommand::Demo {
                nodes,
                seed,
                deletes,
                start,
                set,
            } => Opt {
                nodes,
                seed,
                deletes,
                start,
                set,
            },
            _ => unreachable!(),
        }
    }
}

/// Keys drawn for the demo, and the subset picked for deletion.
struct Draw {
    keys: Vec<i32>,
    deletes: Vec<i32>,
}

impl Draw {
    fn new(opts: &Opt) -> Draw {
        let mut rng = SmallRng::seed_from_u64(opts.seed);

        let start = cmp::min(opts.start, opts.nodes.saturating_sub(1));
        let mut n_deletes = cmp::min(opts.deletes, opts.nodes.saturating_sub(start));

        let (mut keys, mut deletes) = (vec![], vec![]);
        for i in 0..opts.nodes {
            let key: i32 = rng.gen_range(1..=100);
            if n_deletes > 0 && i >= start {
                n_deletes -= 1;
                if !deletes.contains(&key) {
                    deletes.push(key);
                }
            }
            keys.push(key);
        }

        Draw { keys, deletes }
    }

    fn print_keys(&self) {
        let keys: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        println!("{}", keys.join(" "));
    }
}

pub fn demo(opts: Opt) -> Result<()> {
    let draw = Draw::new(&opts);

    if opts.set {
        println!("CountSet demo");
        println!("==================================");
        demo_set(draw)
    } else {
        println!("Index demo");
        println!("==================================");
        demo_index(draw)
    }
}

fn demo_index(mut draw: Draw) -> Result<()> {
    let mut index: Index<i32, String> = Index::new("rbt-demo");
    for key in draw.keys.iter() {
        index.insert(*key, key.to_string());
    }
    draw.print_keys();
    print!("{}", index.dump());

    while let Some(key) = draw.deletes.pop() {
        index.delete(&key);
        println!("After Delete {}:", key);
        print!("{}", index.dump());
    }

    index.validate()?;
    Ok(())
}

fn demo_set(mut draw: Draw) -> Result<()> {
    let mut set: CountSet<i32> = CountSet::new("rbt-demo-set");
    for key in draw.keys.iter() {
        set.insert(*key);
    }
    if draw.keys.len() <= 1024 {
        draw.print_keys();
    }
    print!("{}", set.dump());

    while let Some(key) = draw.deletes.pop() {
        set.delete(&key);
        println!("After Delete {}:", key);
        print!("{}", set.dump());
    }

    set.as_index().validate()?;
    Ok(())
}
