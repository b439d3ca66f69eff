//! 2D grid of cell occupants.

use crate::entity::EntityId;
use gridlife_core::Position;

/// A dense toroidal table holding at most one entity handle per cell
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Option<EntityId>>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![None; size],
        }
    }

    pub fn wrap(&self, pos: Position) -> Position {
        pos.wrap(self.width, self.height)
    }

    /// Occupant at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Option<EntityId> {
        self.cells[self.pos_to_index(pos)]
    }

    pub fn set(&mut self, pos: Position, occupant: Option<EntityId>) {
        let index = self.pos_to_index(pos);
        self.cells[index] = occupant;
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        let wrapped = self.wrap(pos);
        wrapped.y as usize * self.width as usize + wrapped.x as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Positions of every unoccupied cell
    pub fn free_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(move |(i, _)| self.index_to_pos(i))
    }

    /// Iterator over occupied cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, EntityId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|id| (self.index_to_pos(i), id)))
    }
}
