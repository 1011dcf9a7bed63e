use tracing::info;

use super::board::{Board, Point};
use super::error::MoveError;
use super::interaction::ActionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost
}

/// Turns per-tile outcomes into a win or a loss. The board itself never
/// decides that a game is over.
pub struct Game {
    board: Board,
    status: Status
}

impl Game {
    pub fn new(board: Board) -> Game {
        Game{board, status: Status::Playing}
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Opens the game with a safe reveal. A board with no safe tile stays
    /// in play until the first move.
    pub fn start(&mut self) -> Option<Point> {
        let start = self.board.expose_safe();
        if start.is_some() && self.board.is_won() {
            self.finish(Status::Won);
        }
        start
    }

    /// Applies one move. Refused moves only move the cursor and are handed
    /// back for the caller to report.
    pub fn apply(&mut self, action: ActionType) -> Result<Status, MoveError> {
        if self.status != Status::Playing {
            return Ok(self.status)
        }
        self.board.set_cursor(&action.point())?;
        match action {
            ActionType::Expose(point) => {
                if self.board.expose_tile(&point)?.is_mine() {
                    self.finish(Status::Lost);
                } else if self.board.is_won() {
                    self.finish(Status::Won);
                }
            }
            ActionType::Flag(point) => {
                self.board.flag_tile(&point)?;
            }
        }
        Ok(self.status)
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        self.board.expose_all();
        info!(?status, exposed = self.board.exposed_count(), "game over");
    }
}

#[cfg(test)]
mod game_tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game(width: usize, height: usize, mines: &[Point]) -> Game {
        Game::new(Board::with_mines(width, height, mines, StdRng::seed_from_u64(11)).unwrap())
    }

    #[test]
    fn losing_reveals_everything() {
        let mut game = game(3, 3, &[Point(1, 1)]);
        assert_eq!(game.apply(ActionType::Expose(Point(0, 0))), Ok(Status::Playing));
        assert_eq!(game.apply(ActionType::Expose(Point(1, 1))), Ok(Status::Lost));
        assert!(game.board().tiles().all(|tile| tile.is_exposed()));
    }

    #[test]
    fn winning_after_last_safe_tile() {
        let mut game = game(2, 1, &[Point(1, 0)]);
        assert_eq!(game.apply(ActionType::Flag(Point(1, 0))), Ok(Status::Playing));
        assert_eq!(game.apply(ActionType::Expose(Point(0, 0))), Ok(Status::Won));
        assert_eq!(game.board().cursor(), Point(0, 0));
    }

    #[test]
    fn refused_moves_are_reported() {
        let mut game = game(3, 3, &[Point(1, 1)]);
        game.apply(ActionType::Flag(Point(2, 2))).unwrap();
        assert_eq!(game.apply(ActionType::Expose(Point(2, 2))), Err(MoveError::FlaggedTile(Point(2, 2))));
        game.apply(ActionType::Expose(Point(0, 0))).unwrap();
        assert_eq!(game.apply(ActionType::Flag(Point(0, 0))), Err(MoveError::AlreadyExposed(Point(0, 0))));
        assert_eq!(game.apply(ActionType::Flag(Point(5, 0))), Err(MoveError::OutOfBounds(Point(5, 0))));
        assert_eq!(game.status(), Status::Playing);
    }

    #[test]
    fn moves_after_the_end_are_ignored() {
        let mut game = game(2, 2, &[Point(0, 0)]);
        game.apply(ActionType::Expose(Point(0, 0))).unwrap();
        assert_eq!(game.apply(ActionType::Flag(Point(1, 1))), Ok(Status::Lost));
        assert!(!game.board().tile(&Point(1, 1)).unwrap().is_flagged());
    }

    #[test]
    fn start_can_win_outright() {
        let mut game = game(4, 4, &[]);
        assert!(game.start().is_some());
        assert_eq!(game.status(), Status::Won);
    }

    #[test]
    fn all_mine_board_waits_for_a_move() {
        let mut game = game(1, 1, &[Point(0, 0)]);
        assert_eq!(game.start(), None);
        assert_eq!(game.status(), Status::Playing);
        assert_eq!(game.apply(ActionType::Expose(Point(0, 0))), Ok(Status::Lost));
    }

    #[test]
    fn start_on_open_board_keeps_playing() {
        let wall: Vec<Point> = (0..5).map(|y| Point(2, y)).collect();
        let mut game = game(5, 5, &wall);
        let start = game.start().expect("safe tile");
        assert_eq!(game.status(), Status::Playing);
        assert_eq!(game.board().cursor(), start);
        assert_eq!(game.board().exposed_count(), 10);
    }
}
