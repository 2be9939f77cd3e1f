//! Tape subsystem
//!
//! A row of 8-bit cells that starts as a single zero cell and grows to the
//! right on demand, up to a fixed limit. The pointer is always a valid
//! index into the cells that exist.

use crate::error::{Result, RuntimeError};
use brainshift_spec::{Cell, DEFAULT_TAPE_LEN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Cell>,
    pointer: usize,
    limit: usize,
}

impl Tape {
    /// Create a tape holding at most `limit` cells (at least one)
    pub fn new(limit: usize) -> Self {
        Tape {
            cells: vec![0],
            pointer: 0,
            limit: limit.max(1),
        }
    }

    /// Read the current cell
    #[inline]
    pub fn read(&self) -> Cell {
        self.cells[self.pointer]
    }

    /// Overwrite the current cell
    #[inline]
    pub fn write(&mut self, value: Cell) {
        self.cells[self.pointer] = value;
    }

    /// Move right, appending a zero cell when stepping past the end
    pub fn advance(&mut self) -> Result<()> {
        let next = self.pointer + 1;
        self.ensure(next)?;
        self.pointer = next;
        Ok(())
    }

    /// Move left
    pub fn retreat(&mut self) -> Result<()> {
        if self.pointer == 0 {
            return Err(RuntimeError::PointerUnderflow);
        }
        self.pointer -= 1;
        Ok(())
    }

    /// Read the cell right of the pointer without moving
    ///
    /// The tape grows to include that cell if it does not exist yet.
    pub fn peek_next(&mut self) -> Result<Cell> {
        let next = self.pointer + 1;
        self.ensure(next)?;
        Ok(self.cells[next])
    }

    #[inline]
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Number of cells allocated so far
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A tape always holds at least one cell
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn ensure(&mut self, index: usize) -> Result<()> {
        if index < self.cells.len() {
            return Ok(());
        }
        if index >= self.limit {
            return Err(RuntimeError::TapeOverflow { limit: self.limit });
        }
        self.cells.resize(index + 1, 0);
        Ok(())
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new(DEFAULT_TAPE_LEN)
    }
}
