pub mod tile;
pub mod board;
pub mod error;
pub mod game;
pub mod config;
pub mod render;
pub mod interaction;
use std::io::{BufRead, Write};

use error::GameError;
use game::{Game, Status};

fn print_board<W: Write>(game: &Game, output: &mut W, colored: bool) -> Result<(), GameError> {
    let board = game.board();
    if colored {
        write!(output, "{}", render::render_colored(board))?;
    } else {
        write!(output, "{}", board)?;
    }
    writeln!(output, "{}", render::status_line(board))?;
    Ok(())
}

/// Plays one game to the end over the given input and output.
pub fn game_loop<R: BufRead, W: Write>(game: &mut Game, input: &mut R, output: &mut W,
                                       colored: bool) -> Result<Status, GameError> {
    game.start();
    let (width, height) = (game.board().width(), game.board().height());
    while game.status() == Status::Playing {
        print_board(game, output, colored)?;
        let action = interaction::read_command(input, output, width, height)?;
        if let Err(err) = game.apply(action) {
            writeln!(output, "{}", err)?;
        }
    }
    print_board(game, output, colored)?;
    match game.status() {
        Status::Won => writeln!(output, "You win!")?,
        _ => writeln!(output, "You lost!")?
    }
    Ok(game.status())
}
