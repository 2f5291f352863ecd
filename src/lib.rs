//! Caro (five-in-a-row) engine
//!
//! A game engine for caro/gomoku on boards from 15×15 up to 100×100:
//! board state with incremental undo, rule checking, and a heuristic
//! alpha-beta AI opponent.
//!
//! # Architecture
//!
//! - [`board`]: grid and board state with history, occupied-cell and
//!   active-region indices
//! - [`rules`]: move validation, win detection, threat detection —
//!   pure functions over a grid view
//! - [`eval`]: pattern classification and position scoring
//! - [`search`]: minimax with alpha-beta pruning over a scratch board
//! - [`engine`]: the AI facade tying it together, with difficulty
//!   levels, play styles and optional time budgets
//!
//! # Quick Start
//!
//! ```
//! use caro::{AIEngine, Board, Difficulty, Mark, PlayStyle};
//!
//! let mut board = Board::new(15);
//! board.make_move(7, 7, Mark::X);
//!
//! // O responds (low difficulty keeps the doc test fast)
//! let mut engine = AIEngine::with_seed(Mark::O, Difficulty::Beginner, PlayStyle::Balanced, 1);
//! let result = engine.find_best_move(board.grid());
//! if let Some(pos) = result.best_move {
//!     assert!(board.make_move(pos.row as i32, pos.col as i32, Mark::O));
//! }
//! ```
//!
//! # Move selection
//!
//! The engine picks moves by priority: center opening on an empty
//! board, then an immediate winning cell, then a forced block of the
//! opponent's win, then bounded alpha-beta search over candidate moves
//! near existing stones, and finally a random legal move if no
//! candidates exist. Search is single-threaded and deterministic apart
//! from that explicit random fallback.

pub mod board;
pub mod engine;
pub mod eval;
pub mod rules;
pub mod search;

// Re-exports: the surface external callers need
pub use board::{Board, BoardError, Grid, Mark, PlacedMove, Pos};
pub use board::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
pub use engine::{AIEngine, Difficulty, MoveResult, SearchType};
pub use eval::{evaluate_board, evaluate_position, PatternKind, PlayStyle};
pub use rules::{check_game_state, check_win_at, validate_move, GameStatus, MoveRejection};
pub use search::{Searcher, ThinkingStats};
