//! This module defines `Tape`, the single tape of a Turing Machine: a cell sequence
//! that is conceptually unbounded in both directions plus the head position.

use crate::types::{Direction, Symbol};
use std::collections::VecDeque;

/// A tape that grows on demand in either direction.
///
/// Cells are kept in a `VecDeque`, so growth at either end is amortized O(1).
/// Cells that were never written read as the blank symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<Symbol>,
    head: usize,
    /// Number of cells prepended since construction.
    origin: usize,
    blank: Symbol,
}

impl Tape {
    /// Creates a tape holding `input` followed by one blank cell, with the head on
    /// the first cell.
    pub fn new(input: &str, blank: Symbol) -> Self {
        let mut cells: VecDeque<Symbol> = input.chars().collect();
        cells.push_back(blank);

        Self {
            cells,
            head: 0,
            origin: 0,
            blank,
        }
    }

    /// Returns the head's index into the current cell sequence.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the head's logical position relative to the first input cell.
    /// Negative once the head has moved left of the original input.
    pub fn position(&self) -> isize {
        self.head as isize - self.origin as isize
    }

    pub fn blank(&self) -> Symbol {
        self.blank
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reads the cell at `index`, or the blank symbol if it lies past the right end.
    pub fn read(&self, index: usize) -> Symbol {
        self.cells.get(index).copied().unwrap_or(self.blank)
    }

    /// Writes `symbol` at `index`, appending blanks first if the tape is too short.
    pub fn write(&mut self, index: usize, symbol: Symbol) {
        if index >= self.cells.len() {
            self.cells.resize(index + 1, self.blank);
        }
        self.cells[index] = symbol;
    }

    /// Reads the cell under the head.
    pub fn current(&self) -> Symbol {
        self.read(self.head)
    }

    /// Writes the cell under the head.
    pub fn set_current(&mut self, symbol: Symbol) {
        self.write(self.head, symbol);
    }

    /// Moves the head one cell.
    ///
    /// Moving left from index 0 prepends a blank cell and leaves the head on it, so
    /// every existing cell shifts one index to the right and keeps its content.
    pub fn move_head(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.head == 0 {
                    self.cells.push_front(self.blank);
                    self.origin += 1;
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => {
                self.head += 1;
                if self.head >= self.cells.len() {
                    self.cells.push_back(self.blank);
                }
            }
        }
    }

    /// Returns all cells, including surrounding blanks.
    pub fn cells(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.cells.iter().copied()
    }

    /// Renders the tape with leading and trailing blanks trimmed.
    pub fn contents(&self) -> String {
        let blank = self.blank;
        self.cells
            .iter()
            .collect::<String>()
            .trim_matches(blank)
            .to_string()
    }
}

impl std::fmt::Display for Tape {
    /// Renders every cell, with the cell under the head in brackets.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, symbol) in self.cells.iter().enumerate() {
            if i == self.head {
                write!(f, "[{}]", symbol)?;
            } else {
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}
