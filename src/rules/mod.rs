//! Game rules for caro (five-in-a-row)
//!
//! Pure functions over a read-only grid view:
//! - Move validation with a typed rejection reason
//! - Win detection at a played cell and game-state classification
//! - Winning/blocking threat tests for empty cells

pub mod threat;
pub mod validate;
pub mod win;

// Re-exports for convenient access
pub use threat::{is_blocking_threat, is_winning_threat};
pub use validate::{validate_move, MoveRejection};
pub use win::{check_game_state, check_win_at, count_consecutive, GameStatus, WIN_LENGTH};
