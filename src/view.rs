use std::io;

use crate::{pos, Grid, Pos};

pub use terminal::{HiddenCursor, TermionTerminal, Terminal};
mod terminal;

/// each glyph covers this many cells horizontally and vertically.
pub const GLYPH_WIDTH: usize = 2;
pub const GLYPH_HEIGHT: usize = 4;

const BRAILLE_BASE: u32 = 0x2800;

/// offset of each cell inside a glyph block, paired with its dot bit.
const DOTS: [(Pos, u8); 8] = [
    (pos!(0, 0), 0x01),
    (pos!(0, 1), 0x02),
    (pos!(0, 2), 0x04),
    (pos!(1, 0), 0x08),
    (pos!(1, 1), 0x10),
    (pos!(1, 2), 0x20),
    (pos!(0, 3), 0x40),
    (pos!(1, 3), 0x80),
];

/// number of glyph columns and rows needed to draw a grid.
pub fn display_dimensions(width: usize, height: usize) -> (usize, usize) {
    (width.div_ceil(GLYPH_WIDTH), height.div_ceil(GLYPH_HEIGHT))
}

pub fn glyph_at(grid: &Grid, col: usize, row: usize) -> char {
    let origin = pos!((col * GLYPH_WIDTH) as i32, (row * GLYPH_HEIGHT) as i32);
    let mask = DOTS
        .iter()
        .filter(|(offset, _)| grid.get(origin + *offset))
        .fold(0u8, |mask, (_, bit)| mask | bit);
    braille(mask)
}

fn braille(mask: u8) -> char {
    // every value in 0x2800..=0x28FF is a valid scalar
    char::from_u32(BRAILLE_BASE + u32::from(mask)).unwrap_or('\u{2800}')
}

/// the whole grid as glyph rows separated by newlines, without a trailing one.
pub fn frame(grid: &Grid) -> String {
    let (cols, rows) = display_dimensions(grid.width(), grid.height());
    let mut result = String::with_capacity((cols * 3 + 1) * rows);
    for row in 0..rows {
        if row > 0 {
            result.push('\n');
        }
        result.extend((0..cols).map(|col| glyph_at(grid, col, row)));
    }
    result
}

pub fn render<T>(grid: &Grid, terminal: &mut T) -> io::Result<()>
where
    T: Terminal + ?Sized,
{
    terminal.write(&frame(grid))
}
