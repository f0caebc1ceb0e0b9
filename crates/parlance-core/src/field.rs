//! SpatialField: the grid agents wander on.
//!
//! Cells hold any number of agents. Movement is restricted to the four
//! orthogonal neighbours of a cell (Von Neumann neighbourhood). Whether
//! the edges wrap is a property of the field, not of the agents.

use crate::error::Result;
use crate::types::*;

/// The shared grid all agents are placed on.
pub trait SpatialField {
    /// Width in cells.
    fn width(&self) -> u32;

    /// Height in cells.
    fn height(&self) -> u32;

    /// Whether the field is toroidal.
    fn wraps(&self) -> bool;

    /// Whether the cell lies on the field.
    fn contains(&self, cell: &Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < i64::from(self.width())
            && cell.y < i64::from(self.height())
    }

    /// The orthogonally adjacent cells, excluding `cell` itself.
    ///
    /// On a bounded field edge cells have fewer than four neighbours.
    /// Rejects cells outside the field with a `BoundaryError`.
    fn neighbors(&self, cell: &Cell) -> Result<Vec<Cell>>;

    /// Put an agent on the field for the first time.
    fn place(&mut self, agent: AgentId, cell: Cell) -> Result<()>;

    /// Move an already placed agent.
    fn move_agent(&mut self, agent: AgentId, to: Cell) -> Result<()>;

    /// Where an agent currently is.
    fn position_of(&self, agent: AgentId) -> Option<Cell>;

    /// Agents currently on a cell, in arrival order.
    fn occupants(&self, cell: &Cell) -> &[AgentId];
}
