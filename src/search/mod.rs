//! Adversarial search
//!
//! Contains:
//! - Candidate generation bounded to the stone neighborhood
//! - Best-first move ordering from the single-ply heuristic
//! - Minimax with alpha-beta pruning over a scratch board

pub mod alphabeta;

pub use alphabeta::{Searcher, ThinkingStats, LOSE_SCORE, WIN_SCORE};
