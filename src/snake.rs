//! Snake body and the per-tick movement/collision rules.

use std::collections::VecDeque;

use crate::grid::{Cell, Direction, Grid};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Cell, old_tail: Cell },
    Ate { new_head: Cell },
    Crashed(Collision),
}

/// Ordered body, tail at the front and head at the back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Straight snake of `length` cells whose head is `head`, trailing away
    /// from `direction`.
    pub fn new(head: Cell, length: usize, direction: Direction) -> Self {
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        for _ in 0..length.max(1) {
            body.push_front(cell);
            cell = cell.step(back);
        }
        Snake { body }
    }

    /// Body given tail-first. Returns `None` if it is empty, overlaps itself
    /// or is not a connected chain of adjacent cells.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        let connected = body.iter().zip(body.iter().skip(1)).all(|(a, b)| a.is_adjacent(*b));
        let distinct = body
            .iter()
            .enumerate()
            .all(|(i, c)| !body.iter().skip(i + 1).any(|other| other == c));
        if connected && distinct { Some(Snake { body }) } else { None }
    }

    pub fn head(&self) -> Cell {
        // The body is never empty.
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Tail-first.
    pub fn cells(&self) -> impl DoubleEndedIterator<Item = Cell> + ExactSizeIterator + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Advances one cell in `direction`.
    ///
    /// On a collision the body is left untouched. On a plain move the tail
    /// cell is vacated in the same tick, so the head may enter it; when the
    /// head lands on `food` the tail stays and the snake grows by one.
    pub fn advance(&mut self, direction: Direction, grid: &Grid, food: Option<Cell>) -> MoveResult {
        let new_head = self.head().step(direction);

        if !grid.contains(new_head) {
            return MoveResult::Crashed(Collision::Wall);
        }

        let eating = food == Some(new_head);
        let blocking = if eating { self.body.len() } else { self.body.len() - 1 };
        if self.body.iter().rev().take(blocking).any(|c| *c == new_head) {
            return MoveResult::Crashed(Collision::Body);
        }

        let old_tail = self.tail();
        self.body.push_back(new_head);
        if eating {
            MoveResult::Ate { new_head }
        } else {
            self.body.pop_front();
            MoveResult::Moved { new_head, old_tail }
        }
    }
}
