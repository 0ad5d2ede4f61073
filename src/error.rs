use std::{error::Error, fmt::Display, io};

#[derive(Debug)]
pub enum SpiralError {
    InvalidDimension {
        rows: usize,
        columns: usize,
    },
    OutOfBounds {
        row: isize,
        column: isize,
        rows: usize,
        columns: usize,
    },
    Io(io::Error),
}

impl Display for SpiralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpiralError::InvalidDimension { rows, columns } => write!(
                f,
                "invalid grid dimension {rows}x{columns}: grid must be square with an odd, non-zero side"
            ),
            SpiralError::OutOfBounds {
                row,
                column,
                rows,
                columns,
            } => write!(
                f,
                "cell ({row}, {column}) is outside the {rows}x{columns} grid"
            ),
            SpiralError::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SpiralError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SpiralError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SpiralError {
    fn from(value: io::Error) -> Self {
        SpiralError::Io(value)
    }
}
