//! Neighborhoods on a bounded rectangular grid.

use crate::{cells::Coord, error::Error};

/// Relative positions of the eight neighbors, in enumeration order.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The in-bounds neighbors of every cell of a `width × height` grid.
///
/// Nothing wraps around: corner cells have 3 neighbors, other cells on
/// the edge have 5, interior cells have 8.
///
/// Computed once and never modified. A grid of another size needs a new
/// topology.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    width: usize,
    height: usize,
    /// Neighbor indices of all cells, concatenated.
    nbhd: Vec<usize>,
    /// The neighbors of cell `i` are `nbhd[start[i]..start[i + 1]]`.
    start: Vec<usize>,
}

impl Topology {
    /// Builds the topology of a `width × height` grid.
    pub(crate) fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        let mut nbhd = Vec::with_capacity(size * OFFSETS.len());
        let mut start = Vec::with_capacity(size + 1);
        start.push(0);
        for y in 0..height as isize {
            for x in 0..width as isize {
                for (dx, dy) in OFFSETS {
                    let (nx, ny) = (x + dx, y + dy);
                    if (0..width as isize).contains(&nx) && (0..height as isize).contains(&ny) {
                        nbhd.push(ny as usize * width + nx as usize);
                    }
                }
                start.push(nbhd.len());
            }
        }
        Topology {
            width,
            height,
            nbhd,
            start,
        }
    }

    /// Width of the grid.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the grid.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Index of a cell in row-major storage, if it is on the grid.
    #[inline]
    pub(crate) fn index(&self, (x, y): Coord) -> Option<usize> {
        if (0..self.width as isize).contains(&x) && (0..self.height as isize).contains(&y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Coordinates of the cell stored at `index`.
    #[inline]
    pub(crate) fn coord(&self, index: usize) -> Coord {
        ((index % self.width) as isize, (index / self.width) as isize)
    }

    /// Indices of the neighbors of the cell stored at `index`.
    #[inline]
    pub(crate) fn neighbors(&self, index: usize) -> &[usize] {
        &self.nbhd[self.start[index]..self.start[index + 1]]
    }

    /// The neighbors of a cell, in a fixed order.
    ///
    /// Returns an error if the cell is not on the grid.
    pub fn neighbors_of(&self, coord: Coord) -> Result<impl Iterator<Item = Coord> + '_, Error> {
        let index = self.index(coord).ok_or(Error::OutOfBounds(coord))?;
        Ok(self.neighbors(index).iter().map(move |&i| self.coord(i)))
    }
}
