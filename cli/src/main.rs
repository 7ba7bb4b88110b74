use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use crossterm::event::KeyEvent;
use crossterm::tty::IsTty;
use minegrid_core::{
    DEFAULT_HAZARD_DENSITY, DEFAULT_SNAKE_FIELD, DEFAULT_SNAKE_LENGTH, Grid, GridConfig,
    RandomHazardGenerator, SnakeConfig, SnakeGame, entropy_seed,
};

use logging::init_logging;
use render::Renderer;
use session::{Command, Session, SessionState, parse_line};
use terminal::{RawTerminal, key_presses};

mod logging;
mod render;
mod session;
mod snake;
mod terminal;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    game: Option<Game>,

    #[command(flatten)]
    mines: MinesArgs,

    /// Gap around the board, border included
    #[arg(short, long, global = true, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..))]
    padding: u8,

    /// Plain text output without colors
    #[arg(long, global = true)]
    no_color: bool,

    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

#[derive(Subcommand, Debug)]
enum Game {
    /// Steer a growing snake into food without hitting the walls or itself
    Snake(SnakeArgs),
}

#[derive(ClapArgs, Debug)]
struct MinesArgs {
    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = 20, value_parser = clap::value_parser!(u8).range(1..))]
    width: u8,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..))]
    height: u8,

    /// Share of cells holding a hazard, strictly between 0 and 1
    #[arg(short, long, default_value_t = DEFAULT_HAZARD_DENSITY)]
    density: f64,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(ClapArgs, Debug)]
struct SnakeArgs {
    /// Field width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_SNAKE_FIELD.0, value_parser = clap::value_parser!(u8).range(1..))]
    width: u8,

    /// Field height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_SNAKE_FIELD.1, value_parser = clap::value_parser!(u8).range(1..))]
    height: u8,

    /// Starting length of the snake
    #[arg(short, long, default_value_t = DEFAULT_SNAKE_LENGTH)]
    length: u8,

    /// Force a seed for food placement instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());

    let interactive = io::stdin().is_tty() && io::stdout().is_tty();
    let renderer = Renderer::new(args.padding, !args.no_color);
    match &args.game {
        Some(Game::Snake(snake)) => play_snake(snake, renderer, interactive),
        None => play_mines(&args.mines, renderer, interactive),
    }
}

fn play_mines(args: &MinesArgs, renderer: Renderer, interactive: bool) -> anyhow::Result<()> {
    let config = GridConfig::with_density((args.width, args.height), args.density)
        .context("invalid grid configuration")?;
    let generator = match args.seed {
        Some(seed) => RandomHazardGenerator::new(seed),
        None => RandomHazardGenerator::from_entropy(),
    };
    log::debug!("seed: {}", generator.seed());
    let grid = Grid::generate(config, generator).context("could not set up the grid")?;

    let mut session = Session::new(grid);
    let state = if interactive {
        let _terminal = RawTerminal::enter().context("could not set up the terminal")?;
        run_keys(
            &mut session,
            &renderer.for_terminal(),
            key_presses(),
            &mut io::stdout().lock(),
        )?
    } else {
        run_lines(&mut session, &renderer, io::stdin().lock(), &mut io::stdout().lock())?
    };
    log::info!("Session ended: {:?}", state);
    Ok(())
}

fn play_snake(args: &SnakeArgs, renderer: Renderer, interactive: bool) -> anyhow::Result<()> {
    anyhow::ensure!(interactive, "snake needs an interactive terminal");

    let config = SnakeConfig::new((args.width, args.height), args.length)
        .context("invalid snake configuration")?;
    let seed = args.seed.unwrap_or_else(entropy_seed);
    log::debug!("seed: {}", seed);
    let mut game = SnakeGame::new(config, seed).context("could not set up the field")?;

    {
        let _terminal = RawTerminal::enter().context("could not set up the terminal")?;
        snake::play(&mut game, &renderer.for_terminal(), &mut io::stdout().lock())?;
    }
    log::info!("Snake ended with score {}", game.score());
    Ok(())
}

/// Draws the board, then applies one key press at a time and redraws after
/// each, until the session ends. A won or lost board stays up until one more
/// key arrives.
fn run_keys(
    session: &mut Session,
    renderer: &Renderer,
    keys: impl IntoIterator<Item = io::Result<KeyEvent>>,
    output: &mut impl Write,
) -> anyhow::Result<SessionState> {
    draw(session, renderer, output)?;

    let mut keys = keys.into_iter();
    while session.state().is_running() {
        let Some(key) = keys.next() else {
            log::debug!("Input closed, leaving unfinished session");
            return Ok(session.state());
        };
        let key = key.context("could not read key")?;
        match Command::from_key_event(key) {
            Some(command) => {
                session.apply(command);
                draw(session, renderer, output)?;
            }
            None => log::debug!("Ignoring key {:?}", key.code),
        }
    }

    if session.state() != SessionState::Quit {
        keys.next().transpose().context("could not read key")?;
    }
    Ok(session.state())
}

/// Draws the board, then applies one input line at a time and redraws after
/// each, until the session ends or input runs out.
fn run_lines(
    session: &mut Session,
    renderer: &Renderer,
    input: impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<SessionState> {
    draw(session, renderer, output)?;

    for line in input.lines() {
        let line = line.context("could not read command")?;
        for command in parse_line(&line) {
            if !session.apply(command).is_running() {
                break;
            }
        }

        draw(session, renderer, output)?;
        if !session.state().is_running() {
            break;
        }
    }

    if session.state().is_running() {
        log::debug!("Input closed, leaving unfinished session");
    }
    Ok(session.state())
}

fn draw(session: &Session, renderer: &Renderer, output: &mut impl Write) -> anyhow::Result<()> {
    renderer
        .draw_mines(session, output)
        .context("could not draw the board")
}
