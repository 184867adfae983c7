use clap::Parser;
use env_logger::Env;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use loadout_core::{check_builtin_catalog, generate_loadout, Loadout, Result};

#[derive(Debug, Parser)]
#[command(name = "loadout-randomizer", version, about = "Random class, perk and weapon loadouts")]
struct Args {
    /// Seed for the random stream. A random one is used and logged when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// How many loadouts to draw from the stream.
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Print loadouts as JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log every class, perk and weapon draw.
    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn run(args: Args) -> Result<()> {
    check_builtin_catalog()?;

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen::<u64>());
    info!("Generating {} loadout(s) with seed {}", args.count, seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let loadouts: Vec<Loadout> = (0..args.count)
        .map(|_| generate_loadout(&mut rng))
        .collect();

    if args.json {
        match loadouts.as_slice() {
            [single] => println!("{}", single.to_json()?),
            many => println!("{}", serde_json::to_string_pretty(many)?),
        }
    } else {
        for (idx, loadout) in loadouts.iter().enumerate() {
            if idx > 0 {
                println!();
            }
            println!("{loadout}");
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
