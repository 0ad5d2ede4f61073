use crate::error::SpiralError;

/// Square, odd-sided grid of cell values stored row-major. A value of 0 marks an unvisited cell.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<u32>,
}

impl Grid {
    /// Fails with `InvalidDimension` unless the grid is square and odd-sided, and small enough that
    /// every cell value fits in a `u32`.
    pub fn new(rows: usize, columns: usize) -> Result<Grid, SpiralError> {
        let invalid = || SpiralError::InvalidDimension { rows, columns };
        if rows != columns || rows % 2 == 0 {
            return Err(invalid());
        }
        let capacity = rows
            .checked_mul(columns)
            .filter(|&capacity| u32::try_from(capacity).is_ok())
            .ok_or_else(invalid)?;
        Ok(Grid {
            rows,
            columns,
            cells: vec![0; capacity],
        })
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn row(&self, row: usize) -> Option<&[u32]> {
        self.iter_rows().nth(row)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks_exact(self.columns)
    }

    pub fn get(&self, row: isize, column: isize) -> Result<u32, SpiralError> {
        self.index(row, column).map(|i| self.cells[i])
    }

    pub fn set(&mut self, row: isize, column: isize, value: u32) -> Result<(), SpiralError> {
        let i = self.index(row, column)?;
        self.cells[i] = value;
        Ok(())
    }

    fn index(&self, row: isize, column: isize) -> Result<usize, SpiralError> {
        let out_of_bounds = || SpiralError::OutOfBounds {
            row,
            column,
            rows: self.rows,
            columns: self.columns,
        };
        let r = usize::try_from(row).map_err(|_| out_of_bounds())?;
        let c = usize::try_from(column).map_err(|_| out_of_bounds())?;
        if r >= self.rows || c >= self.columns {
            return Err(out_of_bounds());
        }
        Ok(r * self.columns + c)
    }
}
