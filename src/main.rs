//! Console front end for the caro engine
//!
//! Thin I/O wrapper over the library: renders the grid as text, reads
//! human moves, asks the engine for replies, and stops on a terminal
//! game state. No rule or search logic lives here.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::Parser;

use caro::{
    check_game_state, validate_move, AIEngine, Board, Difficulty, GameStatus, Mark, MoveResult,
    PlayStyle,
};

#[derive(Parser)]
#[command(name = "caro", about = "Play caro (five-in-a-row) against the engine")]
struct Args {
    /// Board side, 15..=100
    #[arg(long, default_value_t = 15)]
    size: i32,

    /// Engine strength: beginner, easy, medium, hard, expert
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Engine style: aggressive, defensive, positional, balanced
    #[arg(long, default_value = "balanced")]
    style: PlayStyle,

    /// RNG seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Per-move wall-clock budget in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,

    /// Print per-move thinking stats as JSON lines
    #[arg(long)]
    json_stats: bool,

    /// Let the engine play both sides
    #[arg(long)]
    self_play: bool,
}

fn main() {
    let args = Args::parse();

    let mut board = match Board::try_new(args.size) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if args.self_play {
        self_play(&mut board, &args);
    } else {
        interactive(&mut board, &args);
    }
}

fn make_engine(mark: Mark, args: &Args, seed_offset: u64) -> AIEngine {
    let mut engine = match args.seed {
        Some(seed) => AIEngine::with_seed(mark, args.difficulty, args.style, seed + seed_offset),
        None => AIEngine::new(mark, args.difficulty, args.style),
    };
    engine.set_time_limit(args.time_ms.map(Duration::from_millis));
    engine
}

/// Human plays X and moves first; the engine answers as O.
fn interactive(board: &mut Board, args: &Args) {
    let mut engine = make_engine(Mark::O, args, 0);
    let stdin = io::stdin();

    println!(
        "caro {}x{} — you are X. Enter moves as `row col`; `undo` and `quit` work too.",
        board.size(),
        board.size()
    );

    loop {
        render(board);
        let (row, col) = match read_human_action(board, &stdin) {
            None => return,
            Some(HumanAction::Undo) => {
                // revert both the engine's reply and the human's move
                if !board.undo_moves(2) {
                    println!("cannot undo, no moves yet");
                }
                continue;
            }
            Some(HumanAction::Move(row, col)) => (row, col),
        };

        board.make_move(row, col, Mark::X);
        if announce_if_over(board) {
            return;
        }

        let result = engine.find_best_move(board.grid());
        let Some(pos) = result.best_move else {
            println!("No move left for the engine — game over.");
            return;
        };
        board.make_move(pos.row as i32, pos.col as i32, Mark::O);
        println!(
            "engine plays ({}, {})  [{:?}, score {}]",
            pos.row, pos.col, result.search_type, result.score
        );
        report_stats(&result, args);
        if announce_if_over(board) {
            return;
        }
    }
}

/// Engine vs. engine until the game ends.
fn self_play(board: &mut Board, args: &Args) {
    let mut engines = [make_engine(Mark::X, args, 0), make_engine(Mark::O, args, 1)];
    let mut turn = 0usize;

    loop {
        let engine = &mut engines[turn % 2];
        let result = engine.find_best_move(board.grid());
        let Some(pos) = result.best_move else {
            println!("no move available, stopping");
            break;
        };

        let mark = engine.ai_player();
        board.make_move(pos.row as i32, pos.col as i32, mark);
        println!(
            "move {:3}: {:?} plays ({}, {})  [{:?}, score {}]",
            turn + 1,
            mark,
            pos.row,
            pos.col,
            result.search_type,
            result.score
        );
        report_stats(&result, args);

        if announce_if_over(board) {
            break;
        }
        turn += 1;
    }

    render(board);
}

enum HumanAction {
    Move(i32, i32),
    Undo,
}

/// Read and validate one human action. Returns `None` when the player
/// quits or input ends.
fn read_human_action(board: &Board, stdin: &io::Stdin) -> Option<HumanAction> {
    loop {
        print!("your move> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            return None;
        }

        match line.trim() {
            "quit" | "exit" => return None,
            "undo" => return Some(HumanAction::Undo),
            input => {
                let mut parts = input.split_whitespace();
                let parsed = (
                    parts.next().and_then(|s| s.parse::<i32>().ok()),
                    parts.next().and_then(|s| s.parse::<i32>().ok()),
                );
                let (Some(row), Some(col)) = parsed else {
                    println!("expected `row col`, e.g. `7 7`");
                    continue;
                };
                if let Err(rejection) = validate_move(board.grid(), row, col, Mark::X) {
                    println!("illegal move: {rejection}");
                    continue;
                }
                return Some(HumanAction::Move(row, col));
            }
        }
    }
}

fn report_stats(result: &MoveResult, args: &Args) {
    if args.json_stats {
        if let Ok(line) = serde_json::to_string(result) {
            println!("{line}");
        }
    }
}

fn announce_if_over(board: &Board) -> bool {
    let last = board.last_move().map(|m| m.pos);
    match check_game_state(board.grid(), last) {
        GameStatus::Playing => false,
        GameStatus::Won(mark) => {
            render(board);
            println!("{mark:?} wins after {} moves.", board.move_history().len());
            true
        }
        GameStatus::Draw => {
            render(board);
            println!(
                "Draw — the board is full ({} moves, {:.0}% occupancy).",
                board.move_history().len(),
                board.occupancy_rate() * 100.0
            );
            true
        }
    }
}

/// Print the grid, windowed to the active area on large boards.
fn render(board: &Board) {
    let size = board.size() as i32;
    let (row_range, col_range) = if size > 25 {
        let (top_left, bottom_right) = board.active_bounds();
        let margin = 2;
        (
            (top_left.row as i32 - margin).max(0)..(bottom_right.row as i32 + margin + 1).min(size),
            (top_left.col as i32 - margin).max(0)..(bottom_right.col as i32 + margin + 1).min(size),
        )
    } else {
        (0..size, 0..size)
    };

    print!("    ");
    for col in col_range.clone() {
        print!("{col:3}");
    }
    println!();

    for row in row_range {
        print!("{row:3} ");
        for col in col_range.clone() {
            let cell = match board.cell(row, col) {
                Some(Mark::X) => " X ",
                Some(Mark::O) => " O ",
                _ => " . ",
            };
            print!("{cell}");
        }
        println!();
    }
    println!();
}
