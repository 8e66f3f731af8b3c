use std::time::Duration;

use log::warn;

use crate::{
    grid::LIVE_PROBABILITY,
    view::{GLYPH_HEIGHT, GLYPH_WIDTH},
};

pub const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// grid size used when the terminal cannot be measured.
///
/// these are taken as cell counts and are not scaled by the glyph size.
pub const FALLBACK_WIDTH: usize = 80;
pub const FALLBACK_HEIGHT: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub grid_width: usize,
    pub grid_height: usize,
    pub tick: Duration,
    pub live_probability: f64,
}

impl Config {
    /// sizes the grid after the controlling terminal.
    pub fn detect() -> Self {
        match termion::terminal_size() {
            Ok((cols, rows)) => Self::for_terminal(cols, rows),
            Err(error) => {
                warn!("no terminal size ({error}), using {FALLBACK_WIDTH}x{FALLBACK_HEIGHT}");
                Self::fallback()
            }
        }
    }

    /// one glyph per terminal cell, so the grid is scaled by the glyph size.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self {
            grid_width: cols as usize * GLYPH_WIDTH,
            grid_height: rows as usize * GLYPH_HEIGHT,
            ..Self::fallback()
        }
    }

    pub fn fallback() -> Self {
        Self {
            grid_width: FALLBACK_WIDTH,
            grid_height: FALLBACK_HEIGHT,
            tick: TICK_INTERVAL,
            live_probability: LIVE_PROBABILITY,
        }
    }
}
