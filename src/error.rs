use std::io;
use thiserror::Error;

use super::board::Point;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("cannot place {mines} mines on a board of {area} tiles")]
    TooManyMines { mines: usize, area: usize },
    #[error("mine at {0} is outside the board")]
    MineOutOfBounds(Point),
}

/// A move the board refused. None of these change any state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("position {0} is out of bounds")]
    OutOfBounds(Point),
    #[error("tile at {0} is flagged, unflag it before exposing")]
    FlaggedTile(Point),
    #[error("tile at {0} is already exposed and cannot be flagged")]
    AlreadyExposed(Point),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no move entered")]
    Empty,
    #[error("unknown action '{0}', expected [E]xpose or [F]lag")]
    UnknownAction(char),
    #[error("could not read a column and row out of '{0}'")]
    Malformed(String),
    #[error("column {0} is off the board")]
    ColumnOutOfRange(String),
    #[error("row {0} is off the board")]
    RowOutOfRange(String),
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("problem reading input: {0}")]
    Input(#[from] io::Error),
    #[error("input closed before the game ended")]
    InputClosed,
}
