// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! Vehicles: rigid pieces with a fixed length and orientation and a mutable head position.

use alloc::vec::Vec;
use core::iter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BoardValue, Direction, Orientation, Position};

/// A vehicle, generic over the numeric type which backs its coordinates. The numeric type must be
/// unsigned and integral.
///
/// The head is the cell with the smallest coordinate the vehicle occupies; the remaining cells
/// follow it along [`Orientation::forward`].
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Deserialize, Serialize)]
pub struct Vehicle<V> {
    id: char,
    length: V,
    orientation: Orientation,
    head: Position<V>,
}

impl<V> Vehicle<V> {
    /// The identifier of the vehicle.
    pub fn id(&self) -> char {
        self.id
    }

    /// The length of the vehicle.
    pub fn length(&self) -> &V {
        &self.length
    }

    /// The orientation of the vehicle.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The current position of the head of the vehicle.
    pub fn head(&self) -> &Position<V> {
        &self.head
    }

    /// The moves this vehicle's orientation permits, each paired with a description.
    pub fn allowed_moves(&self) -> [(Direction, &'static str); 2] {
        self.orientation
            .directions()
            .map(|dir| (dir, dir.description()))
    }
}

/// An error raised when a vehicle refuses to move.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ApplyMoveError {
    /// The vehicle's orientation does not permit the direction.
    #[error("vehicle {id} cannot move {dir}: its orientation does not allow it")]
    Orientation {
        /// The vehicle which was asked to move.
        id: char,
        /// The requested direction.
        dir: Direction,
    },
    /// The vehicle would leave the coordinate space.
    #[error("vehicle {id} cannot move {dir}: it would leave the coordinate space")]
    Unaddressable {
        /// The vehicle which was asked to move.
        id: char,
        /// The requested direction.
        dir: Direction,
    },
}

impl<V> Vehicle<V>
where
    V: BoardValue,
{
    /// Create a new vehicle with the provided identifier, length, head position and orientation.
    /// Returns `None` if the vehicle is shorter than two cells or the tail cannot be represented
    /// by `V`.
    pub fn new<P: Into<Position<V>>>(
        id: char,
        length: V,
        head: P,
        orientation: Orientation,
    ) -> Option<Self> {
        if length <= V::one() {
            return None;
        }
        let head = head.into();
        head.shift(orientation.forward(), length - V::one())?;
        Some(Self {
            id,
            length,
            orientation,
            head,
        })
    }

    /// The cells this vehicle occupies, from head to tail.
    pub fn occupied_cells(&self) -> Vec<Position<V>> {
        let forward = self.orientation.forward();
        iter::successors(Some(self.head), |cell| cell.shift(forward, V::one()))
            .take(self.length.into())
            .collect()
    }

    /// The single cell this vehicle would newly occupy after moving one step in `dir`.
    ///
    /// Moving forward (down or right) claims the cell just past the tail, i.e. `length` steps
    /// from the head; moving backward claims the cell just before the head. `None` if `dir` is
    /// not permitted by the orientation, or if the cell cannot be represented (which places it
    /// out of bounds of any board).
    pub fn frontier_cell(&self, dir: Direction) -> Option<Position<V>> {
        if !self.orientation.allows(dir) {
            return None;
        }
        if dir.is_forward() {
            self.head.shift(dir, self.length)
        } else {
            self.head.shift(dir, V::one())
        }
    }

    /// Move the head one step in `dir`, returning the new head. No bounds or collision checks
    /// are performed; that is the responsibility of the board.
    pub fn apply_move(&mut self, dir: Direction) -> Result<Position<V>, ApplyMoveError> {
        let id = self.id;
        if !self.orientation.allows(dir) {
            return Err(ApplyMoveError::Orientation { id, dir });
        }
        // an addressable frontier keeps the tail addressable after the move
        let head = self
            .frontier_cell(dir)
            .and_then(|_| self.head.shift(dir, V::one()))
            .ok_or(ApplyMoveError::Unaddressable { id, dir })?;
        self.head = head;
        Ok(head)
    }
}

#[cfg(test)]
mod test {
    use crate::{ApplyMoveError, Direction, Orientation, Position, Vehicle};
    use alloc::vec;

    #[test]
    fn construction() {
        assert!(Vehicle::new('R', 0u8, (0, 0), Orientation::LeftRight).is_none());
        assert!(Vehicle::new('R', 1u8, (3, 7), Orientation::LeftRight).is_none());
        assert!(Vehicle::new('R', 2u8, (0, 255), Orientation::LeftRight).is_none());
        assert!(Vehicle::new('R', 2u8, (0, 255), Orientation::UpDown).is_some());
        assert!(Vehicle::new('R', 2u8, (254, 255), Orientation::UpDown).is_some());
    }

    #[test]
    fn occupied_cells() {
        let bus = Vehicle::new('B', 3u8, (0, 0), Orientation::UpDown).unwrap();
        assert_eq!(
            vec![
                Position::from((0, 0)),
                Position::from((1, 0)),
                Position::from((2, 0))
            ],
            bus.occupied_cells()
        );

        let car = Vehicle::new('R', 2u8, (3, 5), Orientation::LeftRight).unwrap();
        assert_eq!(
            vec![Position::from((3, 5)), Position::from((3, 6))],
            car.occupied_cells()
        );
    }

    #[test]
    fn allowed_moves() {
        let vertical = Vehicle::new('Y', 2u8, (1, 1), Orientation::UpDown).unwrap();
        let dirs = vertical.allowed_moves().map(|(dir, _)| dir);
        assert_eq!([Direction::Up, Direction::Down], dirs);

        let horizontal = Vehicle::new('O', 2u8, (1, 1), Orientation::LeftRight).unwrap();
        let [(right, right_desc), (left, _)] = horizontal.allowed_moves();
        assert_eq!((Direction::Right, Direction::Left), (right, left));
        assert_eq!(Direction::Right.description(), right_desc);
    }

    #[test]
    fn frontier_asymmetry() {
        let truck = Vehicle::new('G', 3u8, (2, 2), Orientation::UpDown).unwrap();
        assert_eq!(
            Some(Position::from((5, 2))),
            truck.frontier_cell(Direction::Down)
        );
        assert_eq!(
            Some(Position::from((1, 2))),
            truck.frontier_cell(Direction::Up)
        );
        assert_eq!(None, truck.frontier_cell(Direction::Left));
        assert_eq!(None, truck.frontier_cell(Direction::Right));

        let edge = Vehicle::new('O', 2u8, (0, 0), Orientation::LeftRight).unwrap();
        assert_eq!(None, edge.frontier_cell(Direction::Left));
        assert_eq!(
            Some(Position::from((0, 2))),
            edge.frontier_cell(Direction::Right)
        );
    }

    #[test]
    fn apply_move() {
        let mut car = Vehicle::new('W', 2u8, (4, 1), Orientation::LeftRight).unwrap();
        assert_eq!(Ok(Position::from((4, 2))), car.apply_move(Direction::Right));
        assert_eq!(Ok(Position::from((4, 1))), car.apply_move(Direction::Left));
        assert_eq!(Ok(Position::from((4, 0))), car.apply_move(Direction::Left));
        assert_eq!(
            Err(ApplyMoveError::Unaddressable {
                id: 'W',
                dir: Direction::Left
            }),
            car.apply_move(Direction::Left)
        );
        assert_eq!(
            Err(ApplyMoveError::Orientation {
                id: 'W',
                dir: Direction::Up
            }),
            car.apply_move(Direction::Up)
        );
        assert_eq!(&Position::from((4, 0)), car.head());
        assert_eq!(2, *car.length());
    }
}
