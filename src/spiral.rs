use std::fmt::Write as _;

use log::{debug, info, trace, warn};
use serde::Serialize;

use crate::{
    config::SpiralConfig,
    error::SpiralError,
    grid::Grid,
    walker::{Direction, Position, Walker},
};

/// One cell written during generation, with the heading the walker leaves it on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub value: u32,
    pub row: isize,
    pub column: isize,
    pub direction: Direction,
}

#[derive(Serialize)]
struct SpiralDocument {
    matrix_size: usize,
    length: usize,
    rows: Vec<Vec<Option<u32>>>,
}

/// Fills a grid with `1..=length` along a square spiral starting at the center.
#[derive(Debug, Clone)]
pub struct SpiralGenerator {
    grid: Grid,
    walker: Walker,
    center: Position,
    length: usize,
}

impl SpiralGenerator {
    pub fn new(config: SpiralConfig) -> Result<SpiralGenerator, SpiralError> {
        let SpiralConfig {
            length,
            matrix_size,
        } = config;
        let grid = Grid::new(matrix_size, matrix_size)?;
        let half = (matrix_size / 2) as isize;
        let center = Position::new(half, half);

        let capacity = grid.capacity();
        let length = if length > capacity {
            warn!("length {length} exceeds grid capacity {capacity}, clamping");
            capacity
        } else {
            length
        };

        Ok(SpiralGenerator {
            grid,
            walker: Walker::new(center),
            center,
            length,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn center(&self) -> Position {
        self.center
    }

    /// Requested length after clamping to the grid capacity.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn generate(&mut self) -> Result<(), SpiralError> {
        self.generate_with(|_| Ok::<(), SpiralError>(()))
    }

    /// Fills the grid, calling `on_visit` after every write. Generation restarts from the center
    /// each time, so repeated calls produce the same grid.
    pub fn generate_with<E>(
        &mut self,
        mut on_visit: impl FnMut(&Visit) -> Result<(), E>,
    ) -> Result<(), E>
    where
        E: From<SpiralError>,
    {
        info!(
            "filling {} of {} cells on a {}x{} grid",
            self.length,
            self.grid.capacity(),
            self.grid.rows(),
            self.grid.columns()
        );
        let last = u32::try_from(self.length).map_err(|_| SpiralError::InvalidDimension {
            rows: self.grid.rows(),
            columns: self.grid.columns(),
        })?;
        self.walker = Walker::new(self.center);
        for value in 1..=last {
            let Position { row, column } = self.walker.position();
            self.grid.set(row, column, value)?;
            let visit = Visit {
                value,
                row,
                column,
                direction: self.walker.direction(),
            };
            trace!("{visit:?}");
            on_visit(&visit)?;
            self.walker.step();
        }
        debug!("final run length {}", self.walker.max_steps());
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in self.grid.iter_rows() {
            for &value in row {
                if value == 0 {
                    out.push_str(" XX ");
                } else {
                    let _ = write!(out, " {value:02} ");
                }
            }
            out.push_str("\n\n");
        }
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let rows = self
            .grid
            .iter_rows()
            .map(|row| {
                row.iter()
                    .map(|&value| (value != 0).then_some(value))
                    .collect()
            })
            .collect();
        serde_json::to_string_pretty(&SpiralDocument {
            matrix_size: self.grid.rows(),
            length: self.length,
            rows,
        })
    }
}
