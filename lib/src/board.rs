//! The board.

use crate::{
    cells::{Coord, Delta, Seeding, State},
    error::Error,
    rules::RuleTable,
    topology::Topology,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fmt::{self, Display, Formatter};

/// A read-only snapshot of the board's counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Info {
    /// Number of steps since the board was built or reset.
    pub generation: u64,
    /// Number of living cells.
    pub live_count: usize,
}

impl Display for Info {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generation: {} - Live cells: {}",
            self.generation, self.live_count
        )
    }
}

/// The board.
///
/// A `width × height` grid of cells, stored row by row,
/// together with the [`Topology`] of the grid.
///
/// The [`RuleTable`] is borrowed, not owned. Whoever owns it may edit it
/// between two steps.
pub struct Board<'a> {
    /// Neighborhoods of all cells.
    topology: Topology,

    /// The cells, indexed by `y * width + x`.
    cells: Vec<State>,

    /// The rule of the cellular automaton.
    rules: &'a RuleTable,

    /// Number of steps since the board was built or reset.
    generation: u64,

    /// Number of living cells.
    ///
    /// Kept up to date by every operation, never recounted except
    /// when the board is seeded.
    live_count: usize,

    /// The living cells right after the last seeding.
    initial: Vec<Delta>,

    /// Source of randomness for seeding.
    rng: StdRng,
}

/// Checks that both dimensions are positive.
fn dimensions(width: isize, height: isize) -> Result<(usize, usize), Error> {
    if width <= 0 || height <= 0 {
        Err(Error::InvalidDimension(width, height))
    } else {
        Ok((width as usize, height as usize))
    }
}

impl<'a> Board<'a> {
    /// Creates a randomly seeded board, using the system's entropy.
    pub fn new(width: isize, height: isize, rules: &'a RuleTable) -> Result<Self, Error> {
        Self::with_rng(width, height, rules, StdRng::from_entropy())
    }

    /// Creates a randomly seeded board, using the given random number generator.
    ///
    /// About one third of the cells start alive.
    pub fn with_rng(
        width: isize,
        height: isize,
        rules: &'a RuleTable,
        rng: StdRng,
    ) -> Result<Self, Error> {
        let mut board = Self::build(width, height, rules, rng)?;
        board.seed();
        Ok(board)
    }

    /// Creates a board where every cell is dead.
    pub fn empty(width: isize, height: isize, rules: &'a RuleTable) -> Result<Self, Error> {
        Self::build(width, height, rules, StdRng::from_entropy())
    }

    fn build(
        width: isize,
        height: isize,
        rules: &'a RuleTable,
        rng: StdRng,
    ) -> Result<Self, Error> {
        let (width, height) = dimensions(width, height)?;
        Ok(Board {
            topology: Topology::new(width, height),
            cells: vec![State::Dead; width * height],
            rules,
            generation: 0,
            live_count: 0,
            initial: Vec::new(),
            rng,
        })
    }

    /// Draws a fresh state for every cell, and records the living ones.
    fn seed(&mut self) {
        self.live_count = 0;
        self.initial.clear();
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = self.rng.sample(Seeding);
            if *cell == State::Alive {
                self.live_count += 1;
                self.initial
                    .push(Delta::new(self.topology.coord(i), State::Alive));
            }
        }
    }

    /// Width of the board.
    pub fn width(&self) -> usize {
        self.topology.width()
    }

    /// Height of the board.
    pub fn height(&self) -> usize {
        self.topology.height()
    }

    /// The topology of the board.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The rule table the board reads on every step.
    pub fn rules(&self) -> &'a RuleTable {
        self.rules
    }

    /// Generation and number of living cells.
    pub fn info(&self) -> Info {
        Info {
            generation: self.generation,
            live_count: self.live_count,
        }
    }

    /// The cells that were alive right after the board was last seeded,
    /// for drawing the first frame.
    pub fn initial_deltas(&self) -> &[Delta] {
        &self.initial
    }

    fn index(&self, coord: Coord) -> Result<usize, Error> {
        self.topology.index(coord).ok_or(Error::OutOfBounds(coord))
    }

    /// Gets the state of a cell.
    pub fn get_cell(&self, x: isize, y: isize) -> Result<State, Error> {
        Ok(self.cells[self.index((x, y))?])
    }

    /// Sets the state of a cell.
    ///
    /// Returns `None` if the cell already had this state.
    pub fn set_cell(&mut self, x: isize, y: isize, state: State) -> Result<Option<Delta>, Error> {
        let i = self.index((x, y))?;
        if self.cells[i] == state {
            return Ok(None);
        }
        self.cells[i] = state;
        match state {
            State::Alive => self.live_count += 1,
            State::Dead => self.live_count -= 1,
        }
        Ok(Some(Delta::new((x, y), state)))
    }

    /// Flips the state of a cell.
    pub fn toggle(&mut self, x: isize, y: isize) -> Result<Delta, Error> {
        let state = !self.get_cell(x, y)?;
        log::debug!("Toggling cell at ({}, {}).", x, y);
        let delta = self.set_cell(x, y, state)?;
        Ok(delta.unwrap_or(Delta::new((x, y), state)))
    }

    /// Positions of all living cells, in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == State::Alive)
            .map(move |(i, _)| self.topology.coord(i))
    }

    /// Number of living neighbors of the cell stored at `index`.
    fn live_neighbors(&self, index: usize) -> usize {
        self.topology
            .neighbors(index)
            .iter()
            .filter(|&&j| self.cells[j] == State::Alive)
            .count()
    }

    /// Advances the board by one generation.
    ///
    /// Every cell is updated at the same time: all neighbor counts are
    /// taken before any cell changes. Returns the cells that changed,
    /// in row-major order.
    ///
    /// If the rule table fails, the board is left as it was.
    pub fn step(&mut self) -> Result<Vec<Delta>, Error> {
        let mut deltas = Vec::new();
        let mut born = Vec::new();
        let mut dying = Vec::new();

        for (i, &state) in self.cells.iter().enumerate() {
            let count = self.live_neighbors(i);
            let next_state = self.rules.get_next_state(state, count)?;
            if next_state != state {
                deltas.push(Delta::new(self.topology.coord(i), next_state));
                match next_state {
                    State::Alive => born.push(i),
                    State::Dead => dying.push(i),
                }
            }
        }

        for &i in &born {
            self.cells[i] = State::Alive;
        }
        for &i in &dying {
            self.cells[i] = State::Dead;
        }
        self.live_count = self.live_count + born.len() - dying.len();
        self.generation += 1;

        log::debug!(
            "Generation {}: {} born, {} died.",
            self.generation,
            born.len(),
            dying.len()
        );
        Ok(deltas)
    }

    /// Kills every cell.
    ///
    /// The generation is kept. No deltas are returned, the whole board
    /// should be redrawn.
    pub fn clear(&mut self) {
        log::info!("Clearing board");
        self.cells.fill(State::Dead);
        self.live_count = 0;
    }

    /// Reseeds the board randomly, and sets the generation back to 0.
    pub fn reset(&mut self) {
        self.generation = 0;
        self.seed();
        log::info!(
            "Reset {}x{} board with {} living cells.",
            self.width(),
            self.height(),
            self.live_count
        );
    }

    /// Rebuilds the board with new dimensions, and seeds it randomly.
    ///
    /// On error the board is left as it was.
    pub fn resize(&mut self, width: isize, height: isize) -> Result<(), Error> {
        let (width, height) = dimensions(width, height)?;
        log::info!("Rebuilding - x: {} y: {}.", width, height);
        self.topology = Topology::new(width, height);
        self.cells = vec![State::Dead; width * height];
        self.generation = 0;
        self.seed();
        Ok(())
    }
}

/// Displays the board in [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
///
/// * **Dead** cells are represented by `.`;
/// * **Living** cells are represented by `o`.
impl Display for Board<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width()) {
            for &state in row {
                match state {
                    State::Dead => write!(f, ".")?,
                    State::Alive => write!(f, "o")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
