use serde::{Deserialize, Serialize};

pub const TURNS_BEFORE_STEP_INCREASE: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: isize,
    pub column: isize,
}

impl Position {
    pub fn new(row: isize, column: isize) -> Position {
        Position { row, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Quarter turn to the left.
    pub fn turn_left(self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Walks an outward square spiral: runs of 1, 1, 2, 2, 3, 3, ... cells, turning left after each run.
///
/// The walker never checks bounds; it keeps going for as long as it is stepped.
#[derive(Debug, Clone)]
pub struct Walker {
    current_position: Position,
    current_direction: Direction,
    current_direction_steps: usize,
    max_steps: usize,
    turns_until_step_increase: i32,
}

impl Walker {
    pub fn new(starting_position: Position) -> Walker {
        Walker {
            current_position: starting_position,
            current_direction: Direction::Right,
            current_direction_steps: 0,
            max_steps: 1,
            turns_until_step_increase: TURNS_BEFORE_STEP_INCREASE,
        }
    }

    pub fn position(&self) -> Position {
        self.current_position
    }

    pub fn direction(&self) -> Direction {
        self.current_direction
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn step(&mut self) -> Position {
        let (d_row, d_column) = self.current_direction.offset();
        self.current_position.row += d_row;
        self.current_position.column += d_column;

        self.current_direction_steps += 1;

        if self.current_direction_steps == self.max_steps {
            self.current_direction = self.current_direction.turn_left();
            self.current_direction_steps = 0;

            // decrement before checking, so the first increase lands after the second turn
            self.turns_until_step_increase -= 1;
            if self.turns_until_step_increase <= 0 {
                self.turns_until_step_increase = TURNS_BEFORE_STEP_INCREASE;
                self.max_steps += 1;
            }
        }

        self.current_position
    }
}

impl Iterator for Walker {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.current_position;
        self.step();
        Some(position)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Lengths and directions of consecutive runs over `steps` steps.
    fn runs(steps: usize) -> Vec<(Direction, usize)> {
        let mut walker = Walker::new(Position::default());
        let mut runs: Vec<(Direction, usize)> = Vec::new();
        for _ in 0..steps {
            let direction = walker.direction();
            walker.step();
            match runs.last_mut() {
                Some((last, len)) if *last == direction => *len += 1,
                _ => runs.push((direction, 1)),
            }
        }
        runs
    }

    #[test]
    fn first_step_moves_right() {
        let mut walker = Walker::new(Position::new(4, 4));
        assert_eq!(walker.step(), Position::new(4, 5));
        assert_eq!(walker.direction(), Direction::Up);
    }

    #[test]
    fn run_lengths_grow_every_two_turns() {
        // 1+1+2+2+...+10+10 = 110 steps covers exactly 20 complete runs
        let lengths: Vec<usize> = runs(110).into_iter().map(|(_, len)| len).collect();
        let expected: Vec<usize> = (1..=10).flat_map(|n| [n, n]).collect();
        assert_eq!(lengths, expected);
    }

    #[test]
    fn turns_cycle_counter_clockwise() {
        let directions: Vec<Direction> = runs(110).into_iter().map(|(d, _)| d).collect();
        let cycle = [
            Direction::Right,
            Direction::Up,
            Direction::Left,
            Direction::Down,
        ];
        for (i, direction) in directions.iter().enumerate() {
            assert_eq!(*direction, cycle[i % 4]);
        }
    }

    #[test]
    fn iterator_yields_start_first() {
        let path: Vec<Position> = Walker::new(Position::new(1, 1)).take(5).collect();
        assert_eq!(
            path,
            vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(0, 2),
                Position::new(0, 1),
                Position::new(0, 0),
            ]
        );
    }

    #[test]
    fn steps_never_exceed_max() {
        let mut walker = Walker::new(Position::default());
        for _ in 0..500 {
            walker.step();
            assert!(walker.current_direction_steps <= walker.max_steps);
            assert!(walker.turns_until_step_increase > 0);
        }
    }
}
