//! Principality - command-line driver
//!
//! Runs seeded self-play games and prints the card catalog.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use principality::{
    core::CardName,
    game::{
        GameEngine, GameLogger, GameOptions, OutputFormat, PlayerController, RandomController, Simulation,
        VerbosityLevel,
    },
};

/// Verbosity level for game output (accepts names or numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl From<LogFormat> for OutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Text => OutputFormat::Text,
            LogFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "principality")]
#[command(about = "Principality - deterministic deck-building game engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play seeded games between random controllers and print the log
    Simulate {
        /// Number of players (1-6)
        #[arg(long, short = 'p', default_value = "2")]
        players: usize,

        /// Seed for the first game; game N uses seed + N
        #[arg(long, short = 's', default_value = "1")]
        seed: u64,

        /// Number of games to play
        #[arg(long, short = 'g', default_value = "1")]
        games: usize,

        /// Comma-separated kingdom cards (default: seeded random selection)
        #[arg(long, value_delimiter = ',')]
        kingdom: Option<Vec<String>>,

        /// Verbosity level (silent/0, minimal/1, normal/2, verbose/3)
        #[arg(long, short = 'v', default_value = "normal")]
        verbosity: VerbosityArg,

        /// Output format for log lines
        #[arg(long, value_enum, default_value = "text")]
        log_format: LogFormat,

        /// Stop a game after this many turns
        #[arg(long, default_value = "500")]
        max_turns: u32,
    },

    /// List every card with its cost, types and text
    Cards,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            players,
            seed,
            games,
            kingdom,
            verbosity,
            log_format,
            max_turns,
        } => {
            let options = match kingdom {
                Some(names) => GameOptions::default().with_kingdom(parse_kingdom(&names)?),
                None => GameOptions::default(),
            };
            run_simulate(players, seed, games, options, verbosity.0, log_format.into(), max_turns)
        }
        Commands::Cards => {
            print_cards();
            Ok(())
        }
    }
}

fn parse_kingdom(names: &[String]) -> anyhow::Result<Vec<CardName>> {
    names
        .iter()
        .map(|name| {
            name.trim()
                .parse::<CardName>()
                .with_context(|| format!("invalid --kingdom entry '{name}'"))
        })
        .collect()
}

fn run_simulate(
    players: usize,
    seed: u64,
    games: usize,
    options: GameOptions,
    verbosity: VerbosityLevel,
    format: OutputFormat,
    max_turns: u32,
) -> anyhow::Result<()> {
    let mut wins = vec![0usize; players];

    for game in 0..games {
        let game_seed = seed.wrapping_add(game as u64);
        let engine = GameEngine::with_options(game_seed, options.clone());
        let state = engine
            .initialize_game(players)
            .with_context(|| format!("failed to set up game with seed {game_seed}"))?;

        let mut logger = GameLogger::with_verbosity(verbosity);
        logger.set_output_format(format);
        logger.minimal(&format!("=== Game {} (seed {game_seed}) ===", game + 1));

        let mut controllers: Vec<Box<dyn PlayerController>> = (0..players)
            .map(|p| {
                let controller_seed = game_seed.wrapping_mul(31).wrapping_add(p as u64);
                Box::new(RandomController::with_seed(p, controller_seed)) as Box<dyn PlayerController>
            })
            .collect();

        let mut sim = Simulation::new(&engine, state).with_logger(logger).with_max_turns(max_turns);
        let result = sim.run_game(&mut controllers)?;
        if let Some(winner) = result.winner {
            wins[winner] += 1;
            sim.logger.minimal(&format!("Winner: Player {}", winner + 1));
        }
    }

    if games > 1 && verbosity > VerbosityLevel::Silent {
        println!("\n=== Summary over {games} games ===");
        for (player, count) in wins.iter().enumerate() {
            println!("  Player {}: {count} wins", player + 1);
        }
    }
    Ok(())
}

fn print_cards() {
    for card in CardName::ALL {
        let def = card.def();
        let types: Vec<String> = def.types.iter().map(|t| t.to_string()).collect();
        println!("{:<13} ${:<2} {:<18} {}", def.display_name, def.cost, types.join("-"), def.text);
    }
}
