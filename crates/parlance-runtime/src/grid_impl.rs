//! Concrete implementation of the SpatialField trait.
//!
//! A rectangular grid with:
//! - cell occupancy stored as a BTreeMap keyed by cell (arrival order kept per cell)
//! - agent positions stored as a BTreeMap keyed by agent id
//! - optional toroidal wrapping of all four edges

use parlance_core::error::{BoundaryError, Result};
use parlance_core::field::SpatialField;
use parlance_core::types::*;
use std::collections::BTreeMap;

/// In-memory multi-occupancy grid.
#[derive(Debug, Clone)]
pub struct GridField {
    width: u32,
    height: u32,
    wrap: bool,
    cells: BTreeMap<Cell, Vec<AgentId>>,
    positions: BTreeMap<AgentId, Cell>,
}

impl GridField {
    pub fn new(width: u32, height: u32, wrap: bool) -> Self {
        Self {
            width,
            height,
            wrap,
            cells: BTreeMap::new(),
            positions: BTreeMap::new(),
        }
    }

    /// Number of agents on the field.
    pub fn agent_count(&self) -> usize {
        self.positions.len()
    }

    /// Cells holding at least one agent.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (&Cell, &[AgentId])> {
        self.cells.iter().map(|(cell, agents)| (cell, agents.as_slice()))
    }

    fn check(&self, cell: &Cell) -> Result<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(BoundaryError::OutOfBounds {
                cell: *cell,
                width: self.width,
                height: self.height,
            }
            .into())
        }
    }

    fn step(&self, cell: &Cell, heading: Heading) -> Option<Cell> {
        let x = cell.x + heading.dx;
        let y = cell.y + heading.dy;
        if self.wrap {
            Some(Cell::new(
                x.rem_euclid(i64::from(self.width)),
                y.rem_euclid(i64::from(self.height)),
            ))
        } else {
            let candidate = Cell::new(x, y);
            self.contains(&candidate).then_some(candidate)
        }
    }

    fn remove_from_cell(&mut self, agent: AgentId, cell: &Cell) {
        if let Some(agents) = self.cells.get_mut(cell) {
            agents.retain(|a| *a != agent);
            if agents.is_empty() {
                self.cells.remove(cell);
            }
        }
    }
}

impl SpatialField for GridField {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn wraps(&self) -> bool {
        self.wrap
    }

    fn neighbors(&self, cell: &Cell) -> Result<Vec<Cell>> {
        self.check(cell)?;
        let mut out = Vec::with_capacity(4);
        for heading in Heading::CARDINALS {
            // On narrow tori two headings can land on the same cell, or back on `cell`.
            if let Some(next) = self.step(cell, heading) {
                if next != *cell && !out.contains(&next) {
                    out.push(next);
                }
            }
        }
        Ok(out)
    }

    fn place(&mut self, agent: AgentId, cell: Cell) -> Result<()> {
        self.check(&cell)?;
        if self.positions.contains_key(&agent) {
            return Err(BoundaryError::AlreadyPlaced(agent).into());
        }
        self.positions.insert(agent, cell);
        self.cells.entry(cell).or_default().push(agent);
        Ok(())
    }

    fn move_agent(&mut self, agent: AgentId, to: Cell) -> Result<()> {
        self.check(&to)?;
        let from = self
            .positions
            .get(&agent)
            .copied()
            .ok_or(BoundaryError::UnknownAgent(agent))?;
        self.remove_from_cell(agent, &from);
        self.cells.entry(to).or_default().push(agent);
        self.positions.insert(agent, to);
        Ok(())
    }

    fn position_of(&self, agent: AgentId) -> Option<Cell> {
        self.positions.get(&agent).copied()
    }

    fn occupants(&self, cell: &Cell) -> &[AgentId] {
        self.cells.get(cell).map(Vec::as_slice).unwrap_or(&[])
    }
}
