use std::ops::Index;

use arrayvec::ArrayVec;
use thiserror::Error;

mod fmt;
mod parse;
pub mod scramble;
pub mod solve;

pub use solve::{Round, Solver, Status};

/// Smallest supported dimension. A 1x1 grid has no twin.
pub const MIN_DIMENSION: usize = 2;
/// Largest supported dimension. Every tile label must fit into a `u8`.
pub const MAX_DIMENSION: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Empty grid")]
    Absent,
    #[error("Grid is not square: expecting {expect} cells, got {got}")]
    NotSquare { expect: usize, got: usize },
    #[error("Dimension {0} is out of range 2..=16")]
    DimensionOutOfRange(usize),
    #[error("Tile {tile} is out of range 0..={max}")]
    TileOutOfRange { tile: u32, max: u32 },
    #[error("Duplicate tile {0}")]
    DuplicateTile(u32),
    #[error("Missing blank")]
    MissingBlank,
}

/// An immutable n-by-n configuration of tiles. `0` is the blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    n: u8,
    blank: u8,
    tiles: Box<[u8]>,
}

/// Row and column of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vec2(pub u8, pub u8);

impl Index<Vec2> for Board {
    type Output = u8;
    fn index(&self, pos: Vec2) -> &Self::Output {
        &self.tiles[self.idx(pos)]
    }
}

impl Board {
    /// Deep-copies a grid given as rows.
    pub fn new<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, InvalidInput> {
        if rows.is_empty() {
            return Err(InvalidInput::Absent);
        }
        let n = rows.len();
        let mut tiles = Vec::with_capacity(n * n);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n {
                return Err(InvalidInput::NotSquare {
                    expect: n * n,
                    got: tiles.len() + row.len(),
                });
            }
            tiles.extend_from_slice(row);
        }
        Self::from_tiles(n, &tiles)
    }

    /// Validates a row-major slice of `n * n` tiles.
    pub fn from_tiles(n: usize, tiles: &[u32]) -> Result<Self, InvalidInput> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&n) {
            return Err(InvalidInput::DimensionOutOfRange(n));
        }
        if tiles.len() != n * n {
            return Err(InvalidInput::NotSquare {
                expect: n * n,
                got: tiles.len(),
            });
        }

        let max = (n * n - 1) as u32;
        let mut seen = vec![false; n * n];
        for &tile in tiles {
            if tile > max {
                return Err(InvalidInput::TileOutOfRange { tile, max });
            }
            if std::mem::replace(&mut seen[tile as usize], true) {
                return Err(InvalidInput::DuplicateTile(tile));
            }
        }
        let blank = tiles
            .iter()
            .position(|&tile| tile == 0)
            .ok_or(InvalidInput::MissingBlank)?;

        Ok(Self {
            n: n as u8,
            blank: blank as u8,
            tiles: tiles.iter().map(|&tile| tile as u8).collect(),
        })
    }

    /// The solved board of dimension `n`.
    pub fn goal(n: usize) -> Result<Self, InvalidInput> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&n) {
            return Err(InvalidInput::DimensionOutOfRange(n));
        }
        let cells = (n * n) as u32;
        let tiles = (1..cells).chain([0]).collect::<Vec<_>>();
        Self::from_tiles(n, &tiles)
    }

    pub fn dimension(&self) -> usize {
        self.n as usize
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn tile(&self, row: usize, col: usize) -> u8 {
        self[Vec2(row as u8, col as u8)]
    }

    pub fn blank(&self) -> Vec2 {
        self.pos(self.blank as usize)
    }

    fn idx(&self, pos: Vec2) -> usize {
        pos.0 as usize * self.n as usize + pos.1 as usize
    }

    fn pos(&self, idx: usize) -> Vec2 {
        let n = self.n as usize;
        Vec2((idx / n) as u8, (idx % n) as u8)
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = (Vec2, u8)> + '_ {
        let idx_iter = std::iter::successors(Some(Vec2(0, 0)), |&Vec2(x, y)| {
            Some(if y + 1 < self.n {
                Vec2(x, y + 1)
            } else {
                Vec2(x + 1, 0)
            })
        });
        idx_iter.zip(self.tiles.iter().copied())
    }

    fn goal_pos(&self, tile: u8) -> Vec2 {
        self.pos(tile as usize - 1)
    }

    /// Number of tiles out of place, blank excluded.
    pub fn hamming(&self) -> usize {
        self.cells()
            .filter(|&(pos, tile)| tile != 0 && self.goal_pos(tile) != pos)
            .count()
    }

    /// Sum of the grid distances of every tile from its goal cell, blank excluded.
    pub fn manhattan(&self) -> usize {
        self.cells()
            .filter(|&(_, tile)| tile != 0)
            .map(|(Vec2(x, y), tile)| {
                let Vec2(gx, gy) = self.goal_pos(tile);
                (x.abs_diff(gx) + y.abs_diff(gy)) as usize
            })
            .sum()
    }

    pub fn is_goal(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.blank as usize == last
            && self.tiles[..last]
                .iter()
                .zip(1usize..)
                .all(|(&tile, expect)| tile as usize == expect)
    }

    /// Swaps the first two tiles of row 0, or of row 1 if the blank is among the former.
    pub fn twin(&self) -> Self {
        let n = self.n as usize;
        let row = if self.tiles[0] != 0 && self.tiles[1] != 0 {
            0
        } else {
            1
        };
        let mut tiles = self.tiles.clone();
        tiles.swap(row * n, row * n + 1);
        Self {
            n: self.n,
            blank: self.blank,
            tiles,
        }
    }

    fn sibling_pos(&self, pos: Vec2, dir: Direction) -> Option<Vec2> {
        const DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
        let x = pos.0.checked_add_signed(DIRECTIONS[dir as usize].0)?;
        let y = pos.1.checked_add_signed(DIRECTIONS[dir as usize].1)?;
        if self.n <= x || self.n <= y {
            return None;
        }
        Some(Vec2(x, y))
    }

    /// Moves the blank one cell towards `dir`, swapping it with the tile there.
    pub fn slide(&self, dir: Direction) -> Option<Self> {
        let target = self.idx(self.sibling_pos(self.blank(), dir)?);
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank as usize, target);
        Some(Self {
            n: self.n,
            blank: target as u8,
            tiles,
        })
    }

    /// Boards one slide away, in the order of [`Direction::ALL`].
    pub fn neighbors(&self) -> ArrayVec<Self, 4> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.slide(dir))
            .collect()
    }

    /// The blank move turning `self` into `other`, if they are one slide apart.
    pub fn direction_to(&self, other: &Self) -> Option<Direction> {
        if self.n != other.n {
            return None;
        }
        Direction::ALL
            .into_iter()
            .find(|&dir| self.slide(dir).as_ref() == Some(other))
    }
}

/// Direction the blank moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    pub fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Right => 'R',
            Direction::Down => 'D',
            Direction::Left => 'L',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.letter() == ch)
    }
}
