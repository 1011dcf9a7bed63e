use clap::{ArgAction, Parser};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

/// Minesweeper in the terminal. Moves look like `EB12` (expose column B,
/// row 12) or `FC3` (flag column C, row 3).
#[derive(Parser, Debug, Clone)]
#[command(name = "termsweeper", version)]
pub struct Config {
    /// Tiles across
    #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u16).range(1..))]
    pub width: u16,

    /// Tiles down
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub height: u16,

    /// Mines to place, at most width * height
    #[arg(long, default_value_t = 15)]
    pub mines: u32,

    /// Seed for a reproducible board
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the board without colors
    #[arg(long)]
    pub plain: bool,

    /// Log more to stderr (-v info, -vv debug, -vvv trace). RUST_LOG is used otherwise.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        }
    }

    fn log_filter(&self) -> EnvFilter {
        let level = match self.verbose {
            0 => return EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => "info",
            2 => "debug",
            _ => "trace"
        };
        EnvFilter::new(level)
    }

    /// Logs go to stderr so they never break up the board on stdout.
    pub fn init_logging(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(self.log_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}
