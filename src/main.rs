use std::{
    io::{stdout, BufWriter},
    process::ExitCode,
    time::{SystemTime, UNIX_EPOCH},
};

use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use utils::Pos;
mod utils;

pub use error::{Error, Result};
mod error;

pub use grid::Grid;
pub mod grid;

pub use config::Config;
mod config;

pub use view::TermionTerminal;
pub mod view;

mod signal;
mod sim;

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn run() -> Result<()> {
    // before anything else spawns a thread
    let shutdown = signal::listen()?;

    let config = Config::detect();
    let seed = time_seed();
    info!(
        "starting on a {}x{} grid with seed {seed}",
        config.grid_width, config.grid_height
    );

    let mut grid = Grid::new(config.grid_width, config.grid_height)?;
    grid.randomize(&mut ChaCha8Rng::seed_from_u64(seed), config.live_probability);

    let terminal = TermionTerminal::new(BufWriter::new(stdout().lock()));
    let generations = sim::run(&mut grid, terminal, &shutdown, config.tick)?;
    info!("exited after {generations} generations");
    Ok(())
}

pub fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}
