use rand::rngs::StdRng;
use rand::Rng;
use std::fmt;
use itertools::iproduct;
use tracing::{debug, error, trace};

use super::error::{BoardError, MoveError};
use super::interaction::column_label;
use super::tile::{Adjacency, Tile};

/// Random draws per adjacency level when hunting for a starting tile.
const SAFE_START_ATTEMPTS: usize = 1000;

/// Column and row on the board, both 0-based.
#[derive(Debug, Eq, PartialEq, Clone, Hash, Copy)]
pub struct Point(pub usize, pub usize);

impl Point {
    pub fn x(&self) -> usize {
        self.0
    }

    pub fn y(&self) -> usize {
        self.1
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_label(self.0), self.1 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub width: usize,
    pub height: usize
}

impl BoardSize {
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.0 < self.width && point.1 < self.height
    }

    pub fn points(&self) -> Vec<Point> {
        (0..self.area()).filter_map(|i| self.point_from_integer(i)).collect()
    }

    /// Row-major: index `y * width + x`.
    pub fn point_from_integer(&self, i: usize) -> Option<Point> {
        if i >= self.area() {
            return None
        }
        Some(Point(i % self.width, i / self.width))
    }
}

/// Result of exposing a tile that the board accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposure {
    Safe,
    MineExposed
}

impl Exposure {
    pub fn is_mine(&self) -> bool {
        *self == Exposure::MineExposed
    }
}

pub struct Board {
    pub size: BoardSize,
    field: Vec<Vec<Tile>>,
    mine_count: usize,
    exposed_count: usize,
    cursor: Point,
    rng: StdRng
}

impl Board {
    /// Builds a board and scatters `mine_count` mines uniformly at random.
    pub fn new(width: usize, height: usize, mine_count: usize, rng: StdRng) -> Result<Board, BoardError> {
        let size = BoardSize{width, height};
        if mine_count > size.area() {
            return Err(BoardError::TooManyMines{mines: mine_count, area: size.area()})
        }
        let mut board = Board::empty(size, rng);
        board.place_random_mines(mine_count);
        debug!(width, height, mine_count, "board generated");
        Ok(board)
    }

    /// Builds a board with mines at exactly the given points. Duplicates count once.
    pub fn with_mines(width: usize, height: usize, mines: &[Point], rng: StdRng) -> Result<Board, BoardError> {
        let size = BoardSize{width, height};
        if let Some(point) = mines.iter().find(|point| !size.contains(point)) {
            return Err(BoardError::MineOutOfBounds(*point))
        }
        let mut board = Board::empty(size, rng);
        for point in mines {
            board.place_mine(point);
        }
        debug!(width, height, mine_count = board.mine_count, "board laid out");
        Ok(board)
    }

    fn empty(size: BoardSize, rng: StdRng) -> Board {
        let mut field = Vec::with_capacity(size.height);
        for y in 0..size.height {
            let mut row_vec = Vec::with_capacity(size.width);
            for x in 0..size.width {
                row_vec.push(Tile::new(x, y));
            }
            field.push(row_vec);
        }
        Board {size, field, mine_count: 0, exposed_count: 0, cursor: Point(0, 0), rng}
    }

    fn random_point(&mut self) -> Point {
        let x = self.rng.gen_range(0..self.size.width);
        let y = self.rng.gen_range(0..self.size.height);
        Point(x, y)
    }

    fn place_random_mines(&mut self, mine_count: usize) {
        while self.mine_count < mine_count {
            let point = self.random_point();
            if !self.place_mine(&point) {
                trace!(%point, "already mined, drawing again");
            }
        }
    }

    /// Returns false if the point already held a mine.
    fn place_mine(&mut self, point: &Point) -> bool {
        let tile = self.retrieve_tile_mut(point);
        if tile.is_mine() {
            return false
        }
        tile.adjacency = Adjacency::Mine;
        self.mine_count += 1;
        for neighbor in self.neighbor_points(point) {
            let tile = self.retrieve_tile_mut(&neighbor);
            if let Adjacency::Count(n) = tile.adjacency {
                tile.adjacency = Adjacency::Count(n + 1);
            }
        }
        true
    }

    pub fn width(&self) -> usize {
        self.size.width
    }

    pub fn height(&self) -> usize {
        self.size.height
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn exposed_count(&self) -> usize {
        self.exposed_count
    }

    pub fn safe_tile_count(&self) -> usize {
        self.size.area() - self.mine_count
    }

    /// Every non-mine tile has been exposed by play.
    pub fn is_won(&self) -> bool {
        self.exposed_count == self.safe_tile_count()
    }

    pub fn flags_placed(&self) -> usize {
        self.tiles().filter(|tile| tile.flagged).count()
    }

    pub fn remaining_flags(&self) -> i64 {
        self.mine_count as i64 - self.flags_placed() as i64
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Moves the highlight; nothing but rendering looks at it.
    pub fn set_cursor(&mut self, point: &Point) -> Result<(), MoveError> {
        self.check_bounds(point)?;
        self.cursor = *point;
        Ok(())
    }

    pub fn tile(&self, point: &Point) -> Option<&Tile> {
        self.field.get(point.1).and_then(|row| row.get(point.0))
    }

    fn retrieve_tile(&self, point: &Point) -> &Tile {
        &self.field[point.1][point.0]
    }

    fn retrieve_tile_mut(&mut self, point: &Point) -> &mut Tile {
        &mut self.field[point.1][point.0]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.field.iter().map(|row| row.as_slice())
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.field.iter().flatten()
    }

    fn check_bounds(&self, point: &Point) -> Result<(), MoveError> {
        match self.size.contains(point) {
            true => Ok(()),
            false => Err(MoveError::OutOfBounds(*point))
        }
    }

    /// In-bounds neighbors, row by row (`dy` outer, `dx` inner).
    pub fn neighbor_points(&self, point: &Point) -> Vec<Point> {
        iproduct!(-1i64..=1, -1i64..=1)
            .filter(|&(dy, dx)| dx != 0 || dy != 0)
            .map(|(dy, dx)| (point.0 as i64 + dx, point.1 as i64 + dy))
            .filter(|&(x, y)| x >= 0 && x < self.size.width as i64 && y >= 0 && y < self.size.height as i64)
            .map(|(x, y)| Point(x as usize, y as usize))
            .collect()
    }

    pub fn flagged_neighbor_count(&self, point: &Point) -> usize {
        self.neighbor_points(point).iter()
            .filter(|neighbor| self.retrieve_tile(neighbor).flagged)
            .count()
    }

    /// Neighbors that are neither exposed nor flagged.
    pub fn covered_neighbor_count(&self, point: &Point) -> usize {
        self.neighbor_points(point).iter()
            .map(|neighbor| self.retrieve_tile(neighbor))
            .filter(|tile| !tile.exposed && !tile.flagged)
            .count()
    }

    /// An exposed number with exactly that many flags around it.
    pub fn is_satisfied(&self, point: &Point) -> bool {
        match self.tile(point) {
            Some(tile) if tile.exposed => match tile.adjacency {
                Adjacency::Count(n) if n > 0 => self.flagged_neighbor_count(point) == n as usize,
                _ => false
            },
            _ => false
        }
    }

    /// Exposes one tile. Blank tiles flood outwards; exposing an already
    /// exposed, satisfied number clears its unflagged neighbors.
    pub fn expose_tile(&mut self, point: &Point) -> Result<Exposure, MoveError> {
        self.check_bounds(point)?;
        let tile = self.retrieve_tile(point);
        if tile.flagged {
            return Err(MoveError::FlaggedTile(*point))
        }
        if tile.exposed {
            return Ok(self.chord(point))
        }
        Ok(self.reveal_region(point))
    }

    fn chord(&mut self, point: &Point) -> Exposure {
        let expected = match self.retrieve_tile(point).adjacency {
            Adjacency::Count(n) if n > 0 => n as usize,
            _ => return Exposure::Safe
        };
        let flagged = self.flagged_neighbor_count(point);
        if flagged != expected {
            debug!(%point, expected, flagged, "flags do not match, nothing to clear");
            return Exposure::Safe
        }
        for neighbor in self.neighbor_points(point) {
            let tile = self.retrieve_tile(&neighbor);
            if tile.exposed || tile.flagged {
                continue
            }
            if self.reveal_region(&neighbor).is_mine() {
                debug!(%point, mine = %neighbor, "chord cleared onto a mine");
                return Exposure::MineExposed
            }
        }
        Exposure::Safe
    }

    // Only `start` can be a mine: everything pushed afterwards borders a blank.
    fn reveal_region(&mut self, start: &Point) -> Exposure {
        let mut pending = vec![*start];
        let mut revealed = 0;
        while let Some(point) = pending.pop() {
            let tile = self.retrieve_tile_mut(&point);
            if tile.exposed || tile.flagged {
                continue
            }
            tile.exposed = true;
            let adjacency = tile.adjacency;
            self.exposed_count += 1;
            revealed += 1;
            trace!(tile = %self.retrieve_tile(&point).to_debug_string(), "exposed");
            match adjacency {
                Adjacency::Mine => {
                    debug!(%point, "exposed a mine");
                    return Exposure::MineExposed
                }
                Adjacency::Count(0) => {
                    let next: Vec<Point> = self.neighbor_points(&point).into_iter()
                        .filter(|neighbor| {
                            let tile = self.retrieve_tile(neighbor);
                            !tile.exposed && !tile.flagged
                        })
                        .collect();
                    pending.extend(next);
                }
                Adjacency::Count(_) => {}
            }
        }
        debug!(%start, revealed, exposed = self.exposed_count, "exposed region");
        Exposure::Safe
    }

    /// Uncovers the whole board for the end-of-game view. Leaves the exposed count alone.
    pub fn expose_all(&mut self) {
        for tile in self.field.iter_mut().flatten() {
            tile.exposed = true;
        }
    }

    /// Exposes a random safe starting tile and puts the cursor on it,
    /// preferring blanks and settling for higher numbers when none turn up. Sampling is random, so a level that
    /// exists can still be skipped.
    pub fn expose_safe(&mut self) -> Option<Point> {
        if self.mine_count == self.size.area() {
            error!(mine_count = self.mine_count, "board is all mines, there is no safe tile to expose");
            return None
        }
        for target in 0..=8u8 {
            for _ in 0..SAFE_START_ATTEMPTS {
                let point = self.random_point();
                let tile = self.retrieve_tile(&point);
                if tile.flagged || tile.adjacency != Adjacency::Count(target) {
                    continue
                }
                debug!(%point, target, "exposing starting tile");
                return match self.expose_tile(&point) {
                    Ok(_) => {
                        self.cursor = point;
                        Some(point)
                    }
                    Err(err) => {
                        error!(%err, "starting tile was rejected");
                        None
                    }
                }
            }
            debug!(target, "no starting tile found at this level");
        }
        error!("no safe starting tile found even though the board is not all mines");
        None
    }

    /// Flips the flag on a covered tile, returning whether it is now flagged.
    pub fn flag_tile(&mut self, point: &Point) -> Result<bool, MoveError> {
        self.check_bounds(point)?;
        let tile = self.retrieve_tile_mut(point);
        if tile.exposed {
            return Err(MoveError::AlreadyExposed(*point))
        }
        tile.flagged = !tile.flagged;
        Ok(tile.flagged)
    }
}

#[cfg(test)]
use proptest::prelude::*;
