use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use structopt::StructOpt;

mod cmd_demo;
mod cmd_perf;

mod perf_btree_map;
mod perf_rbt;

/// Options for rbt-perf
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "log", default_value = "warn")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    subcmd: SubCommand,
}

#[derive(Clone, StructOpt)]
pub enum SubCommand {
    /// Insert random keys into a tree and print it, optionally deleting
    /// some of them afterwards.
    Demo {
        #[structopt(long = "nodes", default_value = "32")]
        nodes: usize,

        #[structopt(long = "seed", default_value = "50")]
        seed: u64,

        #[structopt(long = "deletes", default_value = "0")]
        deletes: usize,

        #[structopt(long = "start", default_value = "0")]
        start: usize,

        #[structopt(long = "set")]
        set: bool,
    },
    /// Load and exercise an index using a random mix of operations.
    Perf {
        #[structopt(long = "seed", default_value = "0")]
        seed: u64,

        #[structopt(long = "profile", default_value = "")]
        profile: String,

        #[structopt(short = "m", long = "module", default_value = "rbt")]
        module: String,
    },
}

fn main() {
    let opts = Opt::from_iter(std::env::args_os());

    TermLogger::init(
        opts.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .map_err(|e| println!("Error: logger {}", e))
    .ok();

    let res = match opts.subcmd.clone() {
        c @ SubCommand::Demo { .. } => cmd_demo::demo(cmd_demo::Opt::from(c)),
        c @ SubCommand::Perf { .. } => cmd_perf::perf(cmd_perf::Opt::from(c)),
    };

    res.map_err(|e| println!("Error: {}", e)).ok();
}
