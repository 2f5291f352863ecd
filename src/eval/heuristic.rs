//! Heuristic evaluation for the minimax search
//!
//! The per-cell evaluation asks "how strong would this cell be for a
//! player", summing the pattern tier of the line through the cell in
//! each of the four axes. The whole-board evaluation aggregates that
//! over the empty cells near existing stones — the only cells a
//! sensible move could land on — and applies the configured play-style
//! adjustment.

use std::str::FromStr;

use crate::board::{Board, Grid, Mark, Pos};
use crate::rules::count_consecutive;
use crate::rules::win::DIRECTIONS;

use super::patterns::PatternKind;

/// Only empty cells with a stone within this Chebyshev distance
/// contribute to the whole-board evaluation.
const ADJACENCY_RADIUS: i32 = 2;

/// Half-width of the center-control window for the positional style
const CENTER_WINDOW: i32 = 3;

/// How the evaluation is weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayStyle {
    /// Adds half the AI's own pattern strength
    Aggressive,
    /// Subtracts half the opponent's pattern strength
    Defensive,
    /// Adds a center-distance bonus
    Positional,
    /// No adjustment
    #[default]
    Balanced,
}

impl FromStr for PlayStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aggressive" | "aggro" => Ok(PlayStyle::Aggressive),
            "defensive" => Ok(PlayStyle::Defensive),
            "positional" => Ok(PlayStyle::Positional),
            "balanced" => Ok(PlayStyle::Balanced),
            _ => Err(format!("unknown play style `{s}`")),
        }
    }
}

/// Score of the line through `pos` in direction `(dr, dc)`, counting the
/// cell itself as `mark`'s. Open ends are the empty, in-bounds cells
/// immediately beyond each end of the run.
pub fn evaluate_line(grid: &Grid, pos: Pos, dr: i32, dc: i32, mark: Mark) -> i32 {
    let row = pos.row as i32;
    let col = pos.col as i32;

    let positive = count_consecutive(grid, row + dr, col + dc, dr, dc, mark);
    let negative = count_consecutive(grid, row - dr, col - dc, -dr, -dc, mark);
    let consecutive = positive + negative + 1;

    let mut open_ends = 0;
    if grid.at(row + dr * (positive + 1), col + dc * (positive + 1)) == Some(Mark::Empty) {
        open_ends += 1;
    }
    if grid.at(row - dr * (negative + 1), col - dc * (negative + 1)) == Some(Mark::Empty) {
        open_ends += 1;
    }

    PatternKind::classify(consecutive, open_ends).score()
}

/// Sum of the four per-direction line scores at `pos` for `mark`.
///
/// For an empty cell this is the single-ply value of moving there; for
/// an occupied cell it measures the strength of the stone's lines.
pub fn evaluate_position(grid: &Grid, pos: Pos, mark: Mark) -> i32 {
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| evaluate_line(grid, pos, dr, dc, mark))
        .sum()
}

/// True iff any stone lies within Chebyshev distance `radius` of `pos`.
pub fn has_adjacent_stone(grid: &Grid, pos: Pos, radius: i32) -> bool {
    let row = pos.row as i32;
    let col = pos.col as i32;
    for dr in -radius..=radius {
        for dc in -radius..=radius {
            if dr == 0 && dc == 0 {
                continue;
            }
            match grid.at(row + dr, col + dc) {
                Some(mark) if mark.is_player() => return true,
                _ => {}
            }
        }
    }
    false
}

/// Static evaluation of the whole position from the AI's perspective.
///
/// Base score: Σ `evaluate_position(·, ai)` − Σ `evaluate_position(·,
/// opponent)` over the empty cells with a stone nearby. The active
/// regions bound the scan — every cell within the adjacency radius of a
/// stone lies inside one, since regions are wider than the radius.
pub fn evaluate_board(board: &Board, ai: Mark, style: PlayStyle) -> i32 {
    let grid = board.grid();
    let opponent = ai.opponent();

    let mut base = 0;
    for &key in board.active_regions() {
        let (rows, cols) = board.region_span(key);
        for row in rows {
            for col in cols.clone() {
                let pos = Pos::new(row as u8, col as u8);
                if grid.get(pos) != Mark::Empty {
                    continue;
                }
                if !has_adjacent_stone(grid, pos, ADJACENCY_RADIUS) {
                    continue;
                }
                base += evaluate_position(grid, pos, ai);
                base -= evaluate_position(grid, pos, opponent);
            }
        }
    }

    match style {
        PlayStyle::Aggressive => base + pattern_strength(board, ai) / 2,
        PlayStyle::Defensive => base - pattern_strength(board, opponent) / 2,
        PlayStyle::Positional => base + center_control(board, ai),
        PlayStyle::Balanced => base,
    }
}

/// Pattern strength of a player's existing stones.
fn pattern_strength(board: &Board, mark: Mark) -> i32 {
    let grid = board.grid();
    board
        .occupied_cells()
        .filter(|&pos| grid.get(pos) == mark)
        .map(|pos| evaluate_position(grid, pos, mark))
        .sum()
}

/// Center-control bonus: stones in the 7×7 window around the center
/// score by their Manhattan distance to it.
fn center_control(board: &Board, mark: Mark) -> i32 {
    let grid = board.grid();
    let center = board.center();
    let mut score = 0;

    for dr in -CENTER_WINDOW..=CENTER_WINDOW {
        for dc in -CENTER_WINDOW..=CENTER_WINDOW {
            let row = center.row as i32 + dr;
            let col = center.col as i32 + dc;
            if grid.at(row, col) == Some(mark) {
                let distance = dr.abs() + dc.abs();
                score += (4 - distance) * 10;
            }
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_line_open_pair() {
        let mut board = Board::new(15);
        board.make_move(7, 7, Mark::X);
        board.make_move(7, 8, Mark::X);
        // evaluated at one of the pair's cells: run of 2, both ends open
        let score = evaluate_line(board.grid(), Pos::new(7, 7), 0, 1, Mark::X);
        assert_eq!(score, PatternKind::Pair.score());
    }

    #[test]
    fn test_line_open_vs_semi_three() {
        let mut board = Board::new(15);
        for c in 5..8 {
            board.make_move(7, c, Mark::X);
        }
        let open = evaluate_line(board.grid(), Pos::new(7, 6), 0, 1, Mark::X);
        assert_eq!(open, PatternKind::ThreeOpen.score());

        board.make_move(7, 8, Mark::O); // block one end
        let semi = evaluate_line(board.grid(), Pos::new(7, 6), 0, 1, Mark::X);
        assert_eq!(semi, PatternKind::ThreeSemi.score());

        board.make_move(7, 4, Mark::O); // block the other
        let dead = evaluate_line(board.grid(), Pos::new(7, 6), 0, 1, Mark::X);
        assert_eq!(dead, 0);
    }

    #[test]
    fn test_line_edge_is_closed_end() {
        let mut board = Board::new(15);
        for c in 0..3 {
            board.make_move(7, c, Mark::X);
        }
        // left end is the board edge, right end open
        let score = evaluate_line(board.grid(), Pos::new(7, 0), 0, 1, Mark::X);
        assert_eq!(score, PatternKind::ThreeSemi.score());
    }

    #[test]
    fn test_line_counts_through_empty_cell() {
        // X X _ X X evaluated at the gap: run counts 5 with the gap cell
        let mut board = Board::new(15);
        for c in [3, 4, 6, 7] {
            board.make_move(7, c, Mark::X);
        }
        let score = evaluate_line(board.grid(), Pos::new(7, 5), 0, 1, Mark::X);
        assert_eq!(score, PatternKind::Five.score());
    }

    #[test]
    fn test_evaluate_position_sums_directions() {
        let board = Board::new(15);
        // lone empty cell in open space: four directions of Single
        let score = evaluate_position(board.grid(), Pos::new(7, 7), Mark::X);
        assert_eq!(score, 4 * PatternKind::Single.score());
    }

    #[test]
    fn test_evaluate_position_crossing_lines() {
        let mut board = Board::new(15);
        // vertical pair and horizontal pair both through (7,7)
        board.make_move(6, 7, Mark::X);
        board.make_move(7, 6, Mark::X);
        let score = evaluate_position(board.grid(), Pos::new(7, 7), Mark::X);
        assert!(
            score >= 2 * PatternKind::Pair.score(),
            "two crossing pairs expected, got {score}"
        );
    }

    #[test]
    fn test_has_adjacent_stone() {
        let mut board = Board::new(15);
        board.make_move(7, 7, Mark::X);
        assert!(has_adjacent_stone(board.grid(), Pos::new(7, 8), 2));
        assert!(has_adjacent_stone(board.grid(), Pos::new(9, 9), 2));
        assert!(!has_adjacent_stone(board.grid(), Pos::new(11, 11), 2));
        assert!(!has_adjacent_stone(board.grid(), Pos::new(7, 7), 2));
    }

    #[test]
    fn test_board_eval_favors_stronger_side() {
        let mut board = Board::new(15);
        for c in 5..8 {
            board.make_move(7, c, Mark::X);
        }
        board.make_move(2, 2, Mark::O);

        let for_x = evaluate_board(&board, Mark::X, PlayStyle::Balanced);
        let for_o = evaluate_board(&board, Mark::O, PlayStyle::Balanced);
        assert!(for_x > 0, "X has the open three, got {for_x}");
        assert!(for_o < 0, "O is behind, got {for_o}");
    }

    #[test]
    fn test_board_eval_empty_is_zero() {
        let board = Board::new(15);
        assert_eq!(evaluate_board(&board, Mark::X, PlayStyle::Balanced), 0);
    }

    #[test]
    fn test_aggressive_style_boosts_own_patterns() {
        let mut board = Board::new(15);
        for c in 5..8 {
            board.make_move(7, c, Mark::X);
        }
        board.make_move(2, 2, Mark::O);

        let balanced = evaluate_board(&board, Mark::X, PlayStyle::Balanced);
        let aggressive = evaluate_board(&board, Mark::X, PlayStyle::Aggressive);
        assert!(aggressive > balanced);
    }

    #[test]
    fn test_defensive_style_discounts_opponent_patterns() {
        let mut board = Board::new(15);
        for c in 5..8 {
            board.make_move(7, c, Mark::O);
        }
        board.make_move(2, 2, Mark::X);

        let balanced = evaluate_board(&board, Mark::X, PlayStyle::Balanced);
        let defensive = evaluate_board(&board, Mark::X, PlayStyle::Defensive);
        assert!(defensive < balanced);
    }

    #[test]
    fn test_positional_style_rewards_center() {
        let mut board = Board::new(15);
        board.make_move(7, 7, Mark::X); // center
        board.make_move(0, 0, Mark::O);

        let balanced = evaluate_board(&board, Mark::X, PlayStyle::Balanced);
        let positional = evaluate_board(&board, Mark::X, PlayStyle::Positional);
        assert!(positional > balanced);
    }

    #[test]
    fn test_play_style_from_str() {
        assert_eq!("aggressive".parse(), Ok(PlayStyle::Aggressive));
        assert_eq!("Defensive".parse(), Ok(PlayStyle::Defensive));
        assert_eq!("positional".parse(), Ok(PlayStyle::Positional));
        assert_eq!("balanced".parse(), Ok(PlayStyle::Balanced));
        assert!("wild".parse::<PlayStyle>().is_err());
    }
}
