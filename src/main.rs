use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use life_history::config::{DEFAULT_DENSITY, DEFAULT_GENERATIONS};
use life_history::simulation::{ClassicRule, ClassicSimulation, Fuzzy5Rule, Fuzzy5Simulation, FuzzyConway};
use life_history::{CellSimulation, Result, SimulationSettings};

/// Runs a cellular automaton headless and logs its progress.
#[derive(Parser, Debug)]
#[command(name = "life-history", version)]
struct Args {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Number of generations kept in history
    #[arg(long)]
    history: Option<usize>,

    /// Treat cells past the edge as dead instead of wrapping around
    #[arg(long)]
    no_wrap: bool,

    /// Record the life sum of every generation
    #[arg(long)]
    stats: bool,

    /// Use the five-level rule instead of Conway's
    #[arg(long)]
    fuzzy: bool,

    #[arg(short, long, default_value_t = DEFAULT_GENERATIONS)]
    generations: u64,

    /// RNG seed for the initial population
    #[arg(long)]
    seed: Option<u64>,

    /// Probability of a cell starting alive
    #[arg(long, default_value_t = DEFAULT_DENSITY)]
    density: f64,
}

impl Args {
    fn settings(&self) -> Result<SimulationSettings> {
        let mut settings = match &self.config {
            Some(path) => SimulationSettings::load(path)?,
            None => SimulationSettings::default(),
        };
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(history) = self.history {
            settings.history_capacity = history;
        }
        if self.no_wrap {
            settings.wrap = false;
        }
        if self.stats {
            settings.track_life_stats = true;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = args.settings()?;
    let mut sim: Box<dyn CellSimulation> = if args.fuzzy {
        Box::new(Fuzzy5Simulation::<FuzzyConway>::new(Fuzzy5Rule::default(), settings)?)
    } else {
        Box::new(ClassicSimulation::new(ClassicRule::new(), settings)?)
    };
    log::info!("{}", sim.info());

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    sim.randomize(&mut rng, args.density)?;
    log::info!("Generation 0: life sum {}", sim.life_sum()?);

    for _ in 0..args.generations {
        if !sim.advance()? {
            log::info!("History full, stopped at generation {}", sim.current_generation());
            break;
        }
        log::info!(
            "Generation {}: life sum {} ({} retained)",
            sim.current_generation(),
            sim.life_sum()?,
            sim.num_generations()
        );
    }

    if let Some(stats) = sim.life_stats() {
        let peak = stats.iter().fold(0.0_f64, f64::max);
        log::info!("Recorded {} life sums, peak {}", stats.len(), peak);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_caller_error() => {
            log::error!("Invalid input: {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
