//! Wordfall - headless host
//!
//! Drives one match from line commands on stdin and prints the engine's
//! events. Useful for replaying a recorded game or poking at the rules.
//!
//! Commands:
//!   c ROW COL        click a tile
//!   p R,C R,C ...    submit a whole path
//!   i                inactivity timeout (commit the current path)
//!   x                clear the current selection
//!   t MS             advance the clock
//!   r                reshuffle the board
//!   b                print the board
//!   q                quit

use clap::Parser;
use log::{debug, warn};
use std::io::{self, BufRead};
use std::path::PathBuf;
use wordfall::app::{GameEvent, MatchSession, SessionConfig};
use wordfall::game::{Coordinate, Dictionary};
use wordfall::stats::{StatsSink, StatsTracker};
use wordfall::storage::Storage;

/// Play a wordfall match from stdin commands.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
struct Opts {
    /// Newline-separated word list used to validate words.
    #[arg(short = 'w', long)]
    words: PathBuf,

    /// Seed for a reproducible board.
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Match history database (defaults to the OS data directory).
    #[arg(short = 'd', long)]
    database: Option<PathBuf>,

    /// Do not record the finished match.
    #[arg(long)]
    no_stats: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let opts = Opts::parse();
    debug!("Command line options: {:?}", opts);

    let config = SessionConfig {
        seed: opts.seed,
        ..SessionConfig::default()
    };
    // Start right away; words cannot be judged until the list is loaded.
    let mut session = MatchSession::new(Dictionary::unloaded(), config);
    print!("{}", session.board());
    *session.oracle_mut() = Dictionary::from_file(&opts.words)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("c") => match parse_coordinate(parts.next(), parts.next()) {
                Some(at) => session.on_tile_click(at),
                None => eprintln!("usage: c ROW COL"),
            },
            Some("p") => {
                let coords: Option<Vec<Coordinate>> = parts
                    .map(|pair| {
                        let (r, c) = pair.split_once(',')?;
                        parse_coordinate(Some(r), Some(c))
                    })
                    .collect();
                match coords {
                    Some(coords) => {
                        if let Err(e) = session.submit_path(&coords) {
                            eprintln!("path refused: {}", e);
                        }
                    }
                    None => eprintln!("usage: p R,C R,C ..."),
                }
            }
            Some("i") => session.on_inactivity_timeout(),
            Some("x") => session.clear_selection(),
            Some("t") => match parts.next().and_then(|ms| ms.parse().ok()) {
                Some(ms) => session.on_tick(ms),
                None => eprintln!("usage: t MS"),
            },
            Some("r") => session.reshuffle(),
            Some("b") => print!("{}", session.board()),
            Some("q") => break,
            Some(other) => eprintln!("unknown command: {}", other),
            None => {}
        }

        for event in session.drain_events() {
            print_event(&event);
        }
        if session.is_terminal() {
            break;
        }
    }

    let stats = session.final_stats();
    if !opts.no_stats {
        record(&stats, opts.database)?;
    }
    Ok(())
}

fn parse_coordinate(row: Option<&str>, col: Option<&str>) -> Option<Coordinate> {
    let row = row?.parse().ok()?;
    let col = col?.parse().ok()?;
    Coordinate::new(row, col)
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::WordAccepted {
            word,
            points,
            time_bonus,
        } => println!("OK +{} ({}) +{}s", points, word, time_bonus),
        GameEvent::WordRejected { word, reason } => println!("{}: {}", word, reason.message()),
        GameEvent::LevelUp { new_level } => println!("LEVEL {}", new_level),
        GameEvent::BoardChanged { board } => print!("{}", board),
        GameEvent::SessionTerminal { stats } => println!(
            "GAME OVER: {} points, {} words, level {}",
            stats.final_score,
            stats.word_count(),
            stats.highest_level
        ),
    }
}

/// Store the match and print lifetime totals.
fn record(
    stats: &wordfall::app::FinalStats,
    database: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut storage = match database {
        Some(path) => Storage::open_at(&path)?,
        None => Storage::open()?,
    };
    if let Err(e) = storage.submit(stats) {
        warn!("could not record match: {}", e);
        return Ok(());
    }

    let mut tracker = StatsTracker::new();
    tracker.rebuild_from_matches(&mut storage.matches()?);
    let lifetime = tracker.stats();
    println!(
        "{} matches, best {}, average {:.1}, highest level {}, longest word {}",
        lifetime.matches_played,
        lifetime.best_score,
        lifetime.average_score(),
        lifetime.highest_level,
        lifetime.longest_word
    );
    Ok(())
}
