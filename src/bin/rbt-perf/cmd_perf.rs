use log::info;
use rand::{prelude::random, rngs::SmallRng, Rng};
use serde::Deserialize;

use rbtree::{err_at, util, Result};

use crate::SubCommand;

/// Options for `perf` subcommand.
#[derive(Clone)]
pub struct Opt {
    pub seed: u64,
    pub profile: String,
    pub module: String,
}

impl From<SubCommand> for Opt {
    fn from(subcmd: SubCommand) -> Opt {
        match subcmd {
            SubCommand::Perf {
                seed,
                profile,
                module,
            } => Opt {
                seed,
                profile,
                module,
            },
            _ => unreachable!(),
        }
    }
}

/// Workload description, loaded from a toml file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub loads: usize,
    pub sets: usize,
    pub dels: usize,
    pub gets: usize,
    pub key_max: u64, // ZERO for full u64 range
    pub validate: bool,
}

impl Default for Profile {
    fn default() -> Profile {
        Profile {
            loads: 1_000_000,
            sets: 1_000_000,
            dels: 100_000,
            gets: 1_000_000,
            key_max: 0,
            validate: true,
        }
    }
}

impl Profile {
    pub fn gen_key(&self, rng: &mut SmallRng) -> u64 {
        match self.key_max {
            0 => rng.gen::<u64>(),
            n => rng.gen::<u64>() % n,
        }
    }

    pub fn gen_value(&self, rng: &mut SmallRng) -> u64 {
        rng.gen::<u64>()
    }
}

/// Operation picked for every step of the incremental load.
pub enum Op {
    Set,
    Del,
    Get,
}

/// Countdown of remaining operations, picks the next op weighted by the
/// number of operations left in each kind.
pub struct Mix {
    sets: usize,
    dels: usize,
    gets: usize,
}

impl Mix {
    pub fn new(p: &Profile) -> Mix {
        Mix {
            sets: p.sets,
            dels: p.dels,
            gets: p.gets,
        }
    }

    pub fn next(&mut self, rng: &mut SmallRng) -> Option<Op> {
        let total = self.sets + self.dels + self.gets;
        if total == 0 {
            return None;
        }
        match rng.gen::<usize>() % total {
            op if op < self.sets => {
                self.sets -= 1;
                Some(Op::Set)
            }
            op if op < (self.sets + self.dels) => {
                self.dels -= 1;
                Some(Op::Del)
            }
            _ => {
                self.gets -= 1;
                Some(Op::Get)
            }
        }
    }
}

pub fn perf(mut opts: Opt) -> Result<()> {
    if opts.seed == 0 {
        opts.seed = random();
    }

    let profile: Profile = match opts.profile.as_str() {
        "" => Profile::default(),
        loc => util::files::load_toml(loc)?,
    };
    info!(target: "rbt-perf", "seed:{} profile:{:?}", opts.seed, profile);
    println!("rbt-perf: seed {}", opts.seed);

    match opts.module.as_str() {
        "btree" | "btree_map" | "btree-map" => crate::perf_btree_map::perf(opts, profile),
        "rbt" => crate::perf_rbt::perf(opts, profile),
        module => err_at!(InvalidInput, msg: "invalid module {}", module),
    }
}
