use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::io;
use std::process::ExitCode;
use tracing::{error, info};

use termsweeper::board::Board;
use termsweeper::config::Config;
use termsweeper::game::Game;

fn main() -> ExitCode {
    let config = Config::parse();
    config.init_logging();

    let board = match Board::new(config.width as usize, config.height as usize,
                                 config.mines as usize, config.rng()) {
        Ok(board) => board,
        Err(err) => Config::command().error(ErrorKind::ValueValidation, err).exit()
    };
    info!(width = config.width, height = config.height, mines = config.mines, seed = ?config.seed, "starting game");

    let mut game = Game::new(board);
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    match termsweeper::game_loop(&mut game, &mut input, &mut output, !config.plain) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "game aborted");
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
