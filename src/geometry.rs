// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! Coordinates, directions and board dimensions.

use core::fmt::{Debug, Display, Formatter};
use core::ops::Neg;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, One, Unsigned, Zero};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An orientation for a vehicle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum Orientation {
    /// The vehicle may only move up and down.
    UpDown,
    /// The vehicle may only move left and right.
    LeftRight,
}

impl Orientation {
    /// The two directions this orientation permits, in the order they are offered to a player.
    pub fn directions(self) -> [Direction; 2] {
        match self {
            Orientation::UpDown => [Direction::Up, Direction::Down],
            Orientation::LeftRight => [Direction::Right, Direction::Left],
        }
    }

    /// The direction along which a vehicle's cells are laid out, from head to tail.
    pub fn forward(self) -> Direction {
        match self {
            Orientation::UpDown => Direction::Down,
            Orientation::LeftRight => Direction::Right,
        }
    }

    /// Whether a vehicle with this orientation may move in `dir`.
    pub fn allows(self, dir: Direction) -> bool {
        self.directions().contains(&dir)
    }
}

/// A direction for a move. A direction may be flipped with [`Neg`] (i.e. `-`).
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum Direction {
    /// Upward movement.
    Up,
    /// Downward movement.
    Down,
    /// Leftward movement.
    Left,
    /// Rightward movement.
    Right,
}

impl Direction {
    /// Every direction, in key order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The single-character key a player types for this direction.
    pub fn key(self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }

    /// Parse a direction key (`u`, `d`, `l` or `r`).
    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.key() == key)
    }

    /// Whether moving in this direction increases the coordinate along its axis.
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }

    /// A human-readable description of a one-step move in this direction.
    pub fn description(self) -> &'static str {
        match self {
            Direction::Up => "moves the vehicle one step up",
            Direction::Down => "moves the vehicle one step down",
            Direction::Left => "moves the vehicle one step to the left",
            Direction::Right => "moves the vehicle one step to the right",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

impl Neg for Direction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Marker trait: specifies that a value may be used for board definitions.
pub trait BoardValue:
    One
    + Ord
    + CheckedAdd
    + CheckedSub
    + Copy
    + Into<usize>
    + TryFrom<usize>
    + Zero
    + CheckedMul
    + Debug
    + Display
    + Unsigned
    + DeserializeOwned
    + Serialize
    + 'static
{
}

impl<V> BoardValue for V where
    V: One
        + Ord
        + CheckedAdd
        + CheckedSub
        + Copy
        + Into<usize>
        + TryFrom<usize>
        + Zero
        + CheckedMul
        + Debug
        + Display
        + Unsigned
        + DeserializeOwned
        + Serialize
        + 'static
{
}

/// A position in the board (eff., a coordinate pair).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Position<V> {
    row: V,
    column: V,
}

impl<V> Position<V> {
    /// The row of the position.
    pub fn row(&self) -> &V {
        &self.row
    }

    /// The column of the position.
    pub fn column(&self) -> &V {
        &self.column
    }
}

impl<V> Display for Position<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl<V> Position<V>
where
    V: BoardValue,
{
    /// The position encoded as an index into a grid with the provided dimensions, or `None` if
    /// it lies outside of it.
    pub fn as_index(&self, dim: &Dimensions<V>) -> Option<usize> {
        if self.row >= dim.rows || self.column >= dim.columns {
            return None;
        }
        let row = self.row.into();
        let column = self.column.into();
        Some(row * dim.columns.into() + column)
    }

    /// Get the position `by` units away from this position in the provided direction `dir`, or
    /// `None` if the position cannot be represented (e.g., it would have a negative coordinate).
    pub fn shift(&self, dir: Direction, by: V) -> Option<Self> {
        let Self { row, column } = *self;
        Some(match dir {
            Direction::Up => Self::from((row.checked_sub(&by)?, column)),
            Direction::Down => Self::from((row.checked_add(&by)?, column)),
            Direction::Left => Self::from((row, column.checked_sub(&by)?)),
            Direction::Right => Self::from((row, column.checked_add(&by)?)),
        })
    }
}

impl<V> From<(V, V)> for Position<V> {
    fn from((row, column): (V, V)) -> Self {
        Self { row, column }
    }
}

/// The dimensions of a board in terms of rows and columns.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Dimensions<V> {
    rows: V,
    columns: V,
}

impl<V> Dimensions<V> {
    /// The number of rows.
    pub fn rows(&self) -> &V {
        &self.rows
    }

    /// The number of columns.
    pub fn columns(&self) -> &V {
        &self.columns
    }
}

impl<V> Dimensions<V>
where
    V: BoardValue,
{
    /// The number of cells in the grid.
    pub fn area(&self) -> usize {
        self.rows.into() * self.columns.into()
    }
}

/// An error associated with the creation of the dimensions.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum DimensionError {
    /// The number of cells does not fit the coordinate type.
    #[error("dimensions could not be used: the dimensions were too large")]
    Overflow,
    /// Either side is zero.
    #[error("dimensions could not be used: the dimensions have zero area")]
    Zero,
}

impl<V> TryFrom<(V, V)> for Dimensions<V>
where
    V: BoardValue,
{
    type Error = DimensionError;

    fn try_from((rows, columns): (V, V)) -> Result<Self, Self::Error> {
        match rows.checked_mul(&columns) {
            Some(size) if size.is_zero() => Err(DimensionError::Zero),
            Some(_) => Ok(Self { rows, columns }),
            None => Err(DimensionError::Overflow),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{DimensionError, Dimensions, Direction, Orientation, Position};

    #[test]
    fn direction_keys() {
        for dir in Direction::ALL {
            assert_eq!(Some(dir), Direction::from_key(dir.key()));
            assert_eq!(dir, -(-dir));
        }
        assert_eq!(None, Direction::from_key('x'));
        assert_eq!(None, Direction::from_key('U'));
        assert!(Direction::Down.is_forward());
        assert!(!Direction::Left.is_forward());
    }

    #[test]
    fn orientation_directions() {
        assert!(Orientation::UpDown.allows(Direction::Up));
        assert!(!Orientation::UpDown.allows(Direction::Right));
        assert_eq!(Direction::Right, Orientation::LeftRight.forward());
        assert_eq!([Direction::Right, Direction::Left], Orientation::LeftRight.directions());
    }

    #[test]
    fn shifts_are_checked() {
        let origin = Position::from((0u8, 0));
        assert_eq!(None, origin.shift(Direction::Up, 1));
        assert_eq!(None, origin.shift(Direction::Left, 1));
        assert_eq!(Some(Position::from((0, 3))), origin.shift(Direction::Right, 3));

        let corner = Position::from((u8::MAX, 4u8));
        assert_eq!(None, corner.shift(Direction::Down, 1));
        assert_eq!(Some(Position::from((254, 4))), corner.shift(Direction::Up, 1));
    }

    #[test]
    fn indices() -> Result<(), DimensionError> {
        let dim = Dimensions::try_from((3u8, 4))?;
        assert_eq!(12, dim.area());
        assert_eq!(Some(0), Position::from((0, 0)).as_index(&dim));
        assert_eq!(Some(11), Position::from((2, 3)).as_index(&dim));
        assert_eq!(None, Position::from((2, 4)).as_index(&dim));
        assert_eq!(None, Position::from((3, 0)).as_index(&dim));
        Ok(())
    }

    #[test]
    fn bad_dimensions() {
        assert_eq!(Err(DimensionError::Zero), Dimensions::try_from((0u8, 7)));
        assert_eq!(Err(DimensionError::Overflow), Dimensions::try_from((16u8, 16)));
    }
}
