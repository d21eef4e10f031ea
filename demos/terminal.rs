extern crate ttt_engine;

use std::io::{self, BufRead, Write};
use std::thread;
use ttt_engine::game::Game;
use ttt_engine::search::SearchEngine;
use ttt_engine::strategy::Strategy;
use ttt_engine::Outcome;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .init();

    // Pass "random" for the random opponent; anything else plays full-depth minimax
    let strategy = match std::env::args().nth(1).as_deref() {
        Some("random") => Strategy::random(Default::default()),
        _ => Strategy::minimax(SearchEngine::default()),
    };
    let mut game: Game = Game::builder(strategy).build();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if game.is_over() {
            println!("{}\n", game.board());
            match game.outcome() {
                Outcome::Win(mark) if mark == game.human_mark() => println!("WINNER : {mark} (you)"),
                Outcome::Win(mark) => println!("WINNER : {mark}"),
                _ => println!("DRAW"),
            }
            thread::sleep(game.config().restart_delay);
            game.restart();
            continue;
        }

        if game.is_engine_turn() {
            thread::sleep(game.config().engine_delay);
            if let Err(e) = game.engine_move() {
                eprintln!("engine failed to move: {e}");
            }
            continue;
        }

        println!("{}\n", game.board());
        print!("You are {}. Enter \"row col\" (0-2) or q to quit: ", game.human_mark());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!("bye~");
            return Ok(());
        };
        let line = line?;
        let input = line.trim();
        if input == "q" {
            println!("bye~");
            return Ok(());
        }

        let Some((row, col)) = parse_cell(input) else {
            println!("could not read \"{input}\"");
            continue;
        };
        if let Err(e) = game.human_move(row, col) {
            println!("{e}");
        }
    }
}

fn parse_cell(input: &str) -> Option<(usize, usize)> {
    let mut parts = input.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((row, col))
}
