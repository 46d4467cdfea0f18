use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use thousands::Separable;
use tracing::info;

use munchman::app::{self, RunOptions};
use munchman::crash;
use munchman::game::Game;
use munchman::input_source::{Idle, InputSource, Wander};
use munchman::logging;
use munchman::map::designer::LevelDesigner;
use munchman::map::layout::LevelLayout;
use munchman::session::Session;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputMode {
    /// Press random open directions every so often
    Wander,
    /// Never press anything
    Idle,
}

/// Headless Munch Man: plays one level and prints how it went.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Level file (.lvl) to play; the built-in level is used otherwise
    level: Option<PathBuf>,
    /// Seed for the pursuers and the wandering input
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Simulated seconds after which the level is abandoned
    #[arg(long, default_value_t = 120.0)]
    max_seconds: f32,
    #[arg(long, value_enum, default_value_t = InputMode::Wander)]
    input: InputMode,
    /// Pace the simulation against the wall clock
    #[arg(long)]
    realtime: bool,
    #[arg(long)]
    mute: bool,
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Write the built-in level to PATH through the level designer, then exit
    #[arg(long, value_name = "PATH")]
    design_demo: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);
    crash::install_panic_hook();

    match crash::catch_panic(|| run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(fault) => {
            match crash::report(&fault) {
                Ok(path) => {
                    if let Err(error) = crash::offer_log(&path) {
                        eprintln!("Could not show {}: {error}", path.display());
                    }
                }
                Err(error) => eprintln!("Could not write {}: {error}\n{fault:?}", crash::CRASH_LOG),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.design_demo {
        let designer = LevelDesigner::new(LevelLayout::default_level()?);
        designer
            .save(path)
            .with_context(|| format!("Could not write level to {}", path.display()))?;
        info!(path = %path.display(), "Wrote built-in level");
        return Ok(());
    }

    let layout = match &cli.level {
        Some(path) => LevelLayout::load(path).with_context(|| format!("Could not load level {}", path.display()))?,
        None => LevelLayout::default_level()?,
    };

    let mut game = Game::new(&layout, cli.seed)?;
    game.set_muted(cli.mute);

    let mut input: Box<dyn InputSource> = match cli.input {
        InputMode::Wander => Box::new(Wander::new(cli.seed)),
        InputMode::Idle => Box::new(Idle),
    };

    let summary = app::run(
        &mut game,
        input.as_mut(),
        RunOptions {
            max_seconds: cli.max_seconds,
            realtime: cli.realtime,
        },
    );

    let mut session = Session::new();
    session.record_level(summary.score, summary.outcome);

    let outcome: &str = summary.outcome.as_ref();
    println!("Outcome:    {outcome}");
    println!("Score:      {}", summary.score.separate_with_commas());
    println!("High score: {}", session.high_score().separate_with_commas());
    println!("Simulated:  {:.2?} ({} ticks)", summary.simulated(), summary.ticks.separate_with_commas());

    Ok(())
}
