//! Move validation

use crate::board::{Grid, Mark};

/// Why a move was rejected. Illegal moves are an expected part of
/// interactive use, so rejection is a typed value rather than a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("mark is not one of the two players")]
    InvalidPlayer,
    #[error("coordinate ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: i32, col: i32 },
}

/// Check a move against the rules.
///
/// Checks run in a fixed order — player identity, then bounds, then
/// occupancy — which decides the reported reason when several
/// conditions hold at once.
pub fn validate_move(grid: &Grid, row: i32, col: i32, mark: Mark) -> Result<(), MoveRejection> {
    if !mark.is_player() {
        return Err(MoveRejection::InvalidPlayer);
    }
    if !grid.in_bounds(row, col) {
        return Err(MoveRejection::OutOfBounds { row, col });
    }
    if grid.at(row, col) != Some(Mark::Empty) {
        return Err(MoveRejection::CellOccupied { row, col });
    }
    Ok(())
}
