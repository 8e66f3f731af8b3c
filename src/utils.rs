use std::ops::Add;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        Pos { x: $x, y: $y }
    };
}

impl Pos {
    /// folds the position back onto a `width` by `height` torus.
    pub fn wrap(self, width: usize, height: usize) -> Self {
        let width = width as i32;
        let height = height as i32;
        pos!(self.x.rem_euclid(width), self.y.rem_euclid(height))
    }

    /// the eight positions surrounding this one, center excluded.
    pub fn neighbors(self) -> impl Iterator<Item = Pos> {
        (-1..=1)
            .flat_map(|y| (-1..=1).map(move |x| pos!(x, y)))
            .filter(|offset| *offset != pos!(0, 0))
            .map(move |offset| self + offset)
    }
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.x + rhs.x, self.y + rhs.y)
    }
}

#[test]
fn test_wrap() {
    assert_eq!(pos!(-1, -1).wrap(10, 5), pos!(9, 4));
    assert_eq!(pos!(10, 5).wrap(10, 5), pos!(0, 0));
    assert_eq!(pos!(3, 2).wrap(10, 5), pos!(3, 2));
    assert_eq!(pos!(-11, 12).wrap(10, 5), pos!(9, 2));
}

#[test]
fn test_neighbors() {
    let neighbors: Vec<_> = pos!(0, 0).neighbors().collect();
    assert_eq!(neighbors.len(), 8);
    assert!(!neighbors.contains(&pos!(0, 0)));
    assert!(neighbors.contains(&pos!(-1, -1)));
    assert!(neighbors.contains(&pos!(1, 1)));
}
