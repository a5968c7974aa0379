//! Tournament CLI
//!
//! Run matches between engines, track Elo ratings, inspect the MCTS search
//! and play against it.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use chess_core::{divide, perft, Board, Color, Game};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mcts_engine::{MctsConfig, MctsEngine};
use tournament::{
    create_engine, play_session, render_board, ConfigFile, EloTracker, MatchConfig, MatchRunner,
    TournamentConfig, TournamentResults,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tournament", version, about = "MCTS chess agent: matches, analysis and play")]
struct Cli {
    /// TOML file with [match] and [mcts] sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Where Elo ratings are kept
    #[arg(long, global = true, default_value = "tournament_elo.json")]
    elo: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a match between two engines (mcts, mcts:SEED, random, random:SEED)
    Match {
        engine1: String,
        engine2: String,
        #[command(flatten)]
        args: MatchArgs,
    },
    /// Play one engine against a list of opponents
    Gauntlet {
        challenger: String,
        #[arg(long, value_delimiter = ',', default_value = "random,mcts")]
        opponents: Vec<String>,
        #[command(flatten)]
        args: MatchArgs,
    },
    /// Search one position and print the statistics of every root move
    Think {
        #[arg(long)]
        fen: Option<String>,
        /// Root moves to show
        #[arg(long, default_value_t = 10)]
        top: usize,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Play against the MCTS engine on the terminal
    Play {
        #[arg(long, value_enum, default_value_t = Side::White)]
        color: Side,
        #[arg(long)]
        fen: Option<String>,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        depth: u8,
        #[arg(long)]
        fen: Option<String>,
        /// Show the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Show stored Elo ratings
    Leaderboard,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// MCTS iterations per move
    #[arg(long, short = 'n')]
    iterations: Option<u32>,
    /// Wall-clock cap per move
    #[arg(long)]
    move_time_ms: Option<u64>,
    /// Exploration constant of the UCT score
    #[arg(long)]
    exploration: Option<f64>,
    /// Parallel search trees
    #[arg(long)]
    threads: Option<usize>,
    /// RNG seed for search and random openings
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct MatchArgs {
    #[arg(long, short = 'g')]
    games: Option<u32>,
    /// Half-moves before a game is drawn
    #[arg(long)]
    max_moves: Option<u32>,
    /// Random plies played before the engines take over
    #[arg(long)]
    opening_plies: Option<u32>,
    /// Save the match table as JSON
    #[arg(long)]
    results: Option<PathBuf>,
    /// Only print the final result
    #[arg(long)]
    quiet: bool,
    #[command(flatten)]
    search: SearchArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// File settings with command line overrides applied.
struct Settings {
    match_config: MatchConfig,
    mcts: MctsConfig,
}

impl Settings {
    fn load(path: Option<&Path>, search: &SearchArgs) -> Result<Self> {
        let file = ConfigFile::load_or_default(path).context("loading config")?;
        let mut settings = Settings {
            match_config: file.match_config,
            mcts: file.mcts,
        };
        settings.apply_search(search);
        Ok(settings)
    }

    fn apply_search(&mut self, search: &SearchArgs) {
        if let Some(n) = search.iterations {
            self.match_config.iterations = n;
        }
        if let Some(ms) = search.move_time_ms {
            self.match_config.time_per_move_ms = Some(ms);
        }
        if let Some(c) = search.exploration {
            self.mcts.exploration = c;
        }
        if let Some(threads) = search.threads {
            self.mcts.threads = threads;
        }
        if let Some(seed) = search.seed {
            self.mcts.seed = Some(seed);
            self.match_config.seed = Some(seed);
        }
    }

    fn apply_match(&mut self, args: &MatchArgs) {
        if let Some(games) = args.games {
            self.match_config.num_games = games;
        }
        if let Some(max_moves) = args.max_moves {
            self.match_config.max_moves = max_moves;
        }
        if let Some(plies) = args.opening_plies {
            self.match_config.opening_plies = plies;
        }
        if args.quiet {
            self.match_config.verbose = false;
        }
    }
}

fn board_from(fen: Option<&str>) -> Result<Board> {
    match fen {
        Some(fen) => Board::from_fen(fen).with_context(|| format!("bad --fen `{fen}`")),
        None => Ok(Board::startpos()),
    }
}

fn run_match(cli: &Cli, engine1_spec: &str, engine2_spec: &str, args: &MatchArgs) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref(), &args.search)?;
    settings.apply_match(args);
    let config = settings.match_config;

    println!("=== Match: {} vs {} ===", engine1_spec, engine2_spec);
    println!("Games: {}, Iterations: {}", config.num_games, config.iterations);
    println!();

    let mut engine1 = create_engine(engine1_spec, &settings.mcts)?;
    let mut engine2 = create_engine(engine2_spec, &settings.mcts)?;

    let runner = MatchRunner::new(config.clone());
    let result = runner.run_match(engine1.as_mut(), engine2.as_mut());

    println!();
    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} draws",
        engine1_spec, result.wins, result.losses, result.draws
    );
    println!("Score: {:.1}%", result.score() * 100.0);

    let mut tracker = EloTracker::load_or_new(&cli.elo)?;
    let change = tracker.update_ratings(engine1_spec, engine2_spec, &result);
    info!(engine1 = engine1_spec, engine2 = engine2_spec, elo_change = change, "ratings updated");
    tracker.print_leaderboard();
    tracker.save(&cli.elo)?;

    if let Some(path) = &args.results {
        let mut results = TournamentResults::new(
            &format!("Match: {engine1_spec} vs {engine2_spec}"),
            vec![engine1_spec.to_string(), engine2_spec.to_string()],
            TournamentConfig::from(&config),
        );
        results.add_match(engine1_spec, engine2_spec, result);
        results.save(path)?;
    }
    Ok(())
}

fn run_gauntlet(cli: &Cli, challenger_spec: &str, opponents: &[String], args: &MatchArgs) -> Result<()> {
    if opponents.is_empty() {
        bail!("gauntlet needs at least one opponent");
    }
    let mut settings = Settings::load(cli.config.as_deref(), &args.search)?;
    settings.apply_match(args);
    let config = settings.match_config;

    println!("=== Gauntlet: {} vs all ===", challenger_spec);
    println!("Opponents: {:?}", opponents);
    println!("Games per match: {}, Iterations: {}", config.num_games, config.iterations);
    println!();

    let mut tracker = EloTracker::load_or_new(&cli.elo)?;
    let mut results = TournamentResults::new(
        &format!("Gauntlet: {}", challenger_spec),
        std::iter::once(challenger_spec.to_string())
            .chain(opponents.iter().cloned())
            .collect(),
        TournamentConfig::from(&config),
    );
    let runner = MatchRunner::new(config);

    for opponent in opponents {
        println!("\n--- {} vs {} ---", challenger_spec, opponent);

        let mut challenger = create_engine(challenger_spec, &settings.mcts)?;
        let mut opp_engine = create_engine(opponent, &settings.mcts)?;
        let result = runner.run_match(challenger.as_mut(), opp_engine.as_mut());

        println!(
            "Result: {}-{}-{} (Score: {:.1}%)",
            result.wins,
            result.losses,
            result.draws,
            result.score() * 100.0
        );

        tracker.update_ratings(challenger_spec, opponent, &result);
        results.add_match(challenger_spec, opponent, result);
    }

    println!();
    tracker.print_leaderboard();
    results.print_report();
    tracker.save(&cli.elo)?;

    if let Some(path) = &args.results {
        results.save(path)?;
    }
    Ok(())
}

fn run_think(cli: &Cli, fen: Option<&str>, top: usize, search: &SearchArgs) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref(), search)?;
    let board = board_from(fen)?;
    let mut engine = MctsEngine::new(settings.mcts);

    println!("{}", render_board(&board));
    let started = Instant::now();
    let Some(analysis) = engine.analyse(&board, settings.match_config.search_limits()) else {
        println!("Game over: {}", board.outcome());
        return Ok(());
    };
    let elapsed = started.elapsed();

    let mut moves = analysis.moves.clone();
    moves.sort_by(|a, b| b.visits.cmp(&a.visits).then(b.mean_value().total_cmp(&a.mean_value())));

    println!("{:<8} {:>10} {:>8}", "Move", "Visits", "Mean");
    println!("{}", "-".repeat(28));
    for stats in moves.iter().take(top) {
        println!("{:<8} {:>10} {:>8.3}", stats.mv.to_string(), stats.visits, stats.mean_value());
    }
    println!();

    let rate = analysis.iterations as f64 / elapsed.as_secs_f64().max(1e-9);
    println!(
        "{} iterations, {} nodes in {:.2?} ({:.0} iterations/s){}",
        analysis.iterations,
        analysis.nodes,
        elapsed,
        rate,
        if analysis.stopped { ", stopped by the clock" } else { "" }
    );
    if let Some(best) = analysis.best() {
        println!("Best move: {}", best.mv);
    }
    Ok(())
}

fn run_play(cli: &Cli, side: Side, fen: Option<&str>, search: &SearchArgs) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref(), search)?;
    let mut game = Game::from_board(board_from(fen)?);
    let mut engine = MctsEngine::new(settings.mcts);
    let match_config = settings.match_config;

    println!("You play {}. Type help for commands.", Color::from(side));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play_session(
        &mut game,
        &mut engine,
        side.into(),
        || match_config.search_limits(),
        stdin.lock(),
        &mut stdout,
    )?;
    Ok(())
}

fn run_perft(depth: u8, fen: Option<&str>, show_divide: bool) -> Result<()> {
    let board = board_from(fen)?;
    let started = Instant::now();
    let nodes = if show_divide {
        let counts = divide(&board, depth);
        for (mv, count) in &counts {
            println!("{mv}: {count}");
        }
        counts.iter().map(|(_, count)| count).sum()
    } else {
        perft(&board, depth)
    };
    let elapsed = started.elapsed().max(Duration::from_micros(1));
    println!(
        "\nNodes: {} in {:.2?} ({:.0} nodes/s)",
        nodes,
        elapsed,
        nodes as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}

fn show_leaderboard(path: &Path) -> Result<()> {
    if !path.exists() {
        println!("No tournament data found. Run some matches first!");
        return Ok(());
    }
    EloTracker::load(path)?.print_leaderboard();
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Match { engine1, engine2, args } => run_match(&cli, engine1, engine2, args),
        Command::Gauntlet {
            challenger,
            opponents,
            args,
        } => run_gauntlet(&cli, challenger, opponents, args),
        Command::Think { fen, top, search } => run_think(&cli, fen.as_deref(), *top, search),
        Command::Play { color, fen, search } => run_play(&cli, *color, fen.as_deref(), search),
        Command::Perft {
            depth,
            fen,
            divide: show_divide,
        } => run_perft(*depth, fen.as_deref(), *show_divide),
        Command::Leaderboard => show_leaderboard(&cli.elo),
    }
}
