use rand::Rng;

use crate::{pos, Error, Pos, Result};

/// chance for a cell to start alive when the grid is randomized.
pub const LIVE_PROBABILITY: f64 = 0.10;

/// a fixed-size toroidal field of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let cells = vec![false; width * height];
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[cfg(test)]
    /// builds a grid where exactly the listed positions are alive.
    pub fn from_actives(
        width: usize,
        height: usize,
        actives: impl IntoIterator<Item = Pos>,
    ) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        for pos in actives {
            grid.set(pos, true);
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, Pos { x, y }: Pos) -> Option<usize> {
        let inside = x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height;
        inside.then(|| y as usize * self.width + x as usize)
    }

    /// out of bounds positions read as dead, they are not wrapped.
    pub fn get(&self, pos: Pos) -> bool {
        self.index(pos).map_or(false, |index| self.cells[index])
    }

    pub fn set(&mut self, pos: Pos, alive: bool) {
        if let Some(index) = self.index(pos) {
            self.cells[index] = alive;
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| pos!(x, y)))
    }

    #[cfg(test)]
    /// live positions in row-major order.
    pub fn actives(&self) -> Vec<Pos> {
        self.positions().filter(|pos| self.get(*pos)).collect()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|alive| **alive).count()
    }

    pub fn randomize<R>(&mut self, rng: &mut R, probability: f64)
    where
        R: Rng + ?Sized,
    {
        for cell in self.cells.iter_mut() {
            *cell = rng.gen_bool(probability);
        }
    }

    pub fn count_neighbors(&self, pos: Pos) -> usize {
        pos.neighbors()
            .map(|neighbor| neighbor.wrap(self.width, self.height))
            .filter(|neighbor| self.get(*neighbor))
            .count()
    }

    /// steps one generation. every count is taken from the current cells and
    /// the result is swapped in only once the whole next state is built.
    pub fn advance(&mut self) {
        let next = self
            .positions()
            .map(|pos| next_state(self.get(pos), self.count_neighbors(pos)))
            .collect();
        self.cells = next;
    }
}

/// B3/S23.
pub fn next_state(alive: bool, neighbor_count: usize) -> bool {
    match (alive, neighbor_count) {
        (true, 2) | (true, 3) => true, // stay
        (false, 3) => true,            // becomes alive
        _ => false,                    // dies or stays dead
    }
}
