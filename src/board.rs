// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! The board: grid occupancy, vehicle admission, move legality and move execution.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};
use core::marker::PhantomData;
use core::num::NonZeroUsize;
use core::ops::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ApplyMoveError, BoardValue, DimensionError, Dimensions, Direction, Position, Vehicle};

/// The exit of a board: a single extra cell one column past the last column of `row`, which only
/// the `target` vehicle may enter. Occupying it wins the game.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Exit<V> {
    row: V,
    target: char,
}

impl<V> Exit<V> {
    /// An exit on `row`, reserved for the vehicle named `target`.
    pub fn new(row: V, target: char) -> Self {
        Self { row, target }
    }

    /// The row the exit is attached to.
    pub fn row(&self) -> &V {
        &self.row
    }

    /// The identifier of the vehicle which must reach the exit.
    pub fn target(&self) -> char {
        self.target
    }
}

impl<V> Exit<V>
where
    V: Copy,
{
    /// The coordinates of the exit cell on a board with the provided dimensions.
    pub fn position(&self, dim: &Dimensions<V>) -> Position<V> {
        Position::from((self.row, *dim.columns()))
    }
}

/// An error which denotes that a board layout could not be used.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum LayoutError<V> {
    /// The dimensions were unusable.
    #[error(transparent)]
    Dimensions(#[from] DimensionError),
    /// The exit is not attached to a row of the board.
    #[error("the exit row {row} lies outside a board of {rows} rows")]
    ExitRow {
        /// The requested exit row.
        row: V,
        /// The number of rows of the board.
        rows: V,
    },
}

/// A state of the game. This is guaranteed to be a valid state as long as it is constructed with
/// [`State::empty`] and manipulated via [`Board`] operations.
#[derive(Clone, Debug, Hash, Deserialize, Serialize)]
pub struct State<V> {
    dim: Dimensions<V>,
    exit: Exit<V>,
    vehicles: Vec<Vehicle<V>>,
}

impl<V> State<V> {
    /// The dimensions of this state.
    pub fn dimensions(&self) -> &Dimensions<V> {
        &self.dim
    }

    /// The exit of this state.
    pub fn exit(&self) -> &Exit<V> {
        &self.exit
    }

    /// The vehicles contained within this state, in admission order.
    pub fn vehicles(&self) -> &[Vehicle<V>] {
        &self.vehicles
    }
}

impl<V> State<V>
where
    V: BoardValue,
{
    /// Produce an empty state (i.e., one with no vehicles) with the provided dimensions and exit.
    pub fn empty<D>(dim: D, exit: Exit<V>) -> Result<Self, LayoutError<V>>
    where
        D: TryInto<Dimensions<V>, Error = DimensionError>,
    {
        let dim = dim.try_into()?;
        if exit.row >= *dim.rows() {
            return Err(LayoutError::ExitRow {
                row: exit.row,
                rows: *dim.rows(),
            });
        }
        Ok(Self {
            dim,
            exit,
            vehicles: Vec::new(),
        })
    }
}

/// An error which denotes that a vehicle could not be admitted to the board.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum AdmissionError<V> {
    /// A vehicle with the same identifier is already on the board.
    #[error("a vehicle named {0} is already on the board")]
    Duplicate(char),
    /// The vehicle would occupy a cell outside of the board.
    #[error("vehicle {id} would occupy {at}, which is outside the board")]
    OutOfBounds {
        /// The rejected vehicle.
        id: char,
        /// The offending cell.
        at: Position<V>,
    },
    /// The vehicle would overlap a vehicle already on the board.
    #[error("vehicle {id} would overlap vehicle {other} at {at}")]
    Overlap {
        /// The rejected vehicle.
        id: char,
        /// The vehicle already occupying the cell.
        other: char,
        /// The contested cell.
        at: Position<V>,
    },
}

/// The concrete slot for `position`: its grid index, or the slot just past the grid for the exit.
fn slot<V>(dim: &Dimensions<V>, exit: &Exit<V>, position: &Position<V>) -> Option<usize>
where
    V: BoardValue,
{
    position
        .as_index(dim)
        .or_else(|| (*position == exit.position(dim)).then_some(dim.area()))
}

/// As [`slot`], but the exit is only available to the target vehicle.
fn slot_for<V>(
    dim: &Dimensions<V>,
    exit: &Exit<V>,
    id: char,
    position: &Position<V>,
) -> Option<usize>
where
    V: BoardValue,
{
    slot(dim, exit, position).filter(|&slot| slot < dim.area() || id == exit.target)
}

fn add_vehicle_concrete<V>(
    board: &mut [Option<NonZeroUsize>],
    idx: NonZeroUsize,
    dim: &Dimensions<V>,
    exit: &Exit<V>,
    admitted: &[Vehicle<V>],
    vehicle: &Vehicle<V>,
) -> Result<(), AdmissionError<V>>
where
    V: BoardValue,
{
    let id = vehicle.id();
    if admitted.iter().any(|existing| existing.id() == id) {
        return Err(AdmissionError::Duplicate(id));
    }
    // the head is always a grid cell, only the cells behind it may reach the exit
    let head = *vehicle.head();
    if head.as_index(dim).is_none() {
        return Err(AdmissionError::OutOfBounds { id, at: head });
    }
    let cells = vehicle.occupied_cells();
    let mut slots = Vec::with_capacity(cells.len());
    for at in cells {
        let slot = slot_for(dim, exit, id, &at).ok_or(AdmissionError::OutOfBounds { id, at })?;
        if let Some(existing) = board[slot] {
            return Err(AdmissionError::Overlap {
                id,
                other: admitted[existing.get() - 1].id(),
                at,
            });
        }
        slots.push(slot);
    }
    for slot in slots {
        board[slot] = Some(idx);
    }
    Ok(())
}

impl<V> State<V>
where
    V: BoardValue,
{
    fn concrete(&self) -> Result<Vec<Option<NonZeroUsize>>, AdmissionError<V>> {
        let mut board = vec![None; self.dim.area() + 1];
        for (idx, vehicle) in self.vehicles.iter().enumerate() {
            add_vehicle_concrete(
                &mut board,
                NonZeroUsize::MIN.saturating_add(idx),
                &self.dim,
                &self.exit,
                &self.vehicles[..idx],
                vehicle,
            )?;
        }
        Ok(board)
    }

    /// An immutable representation of the current board, or an error if this state is invalid.
    pub fn board(&self) -> Result<Board<&Self, V>, AdmissionError<V>> {
        Ok(Board {
            concrete: self.concrete()?,
            state: self,
            phantom: PhantomData,
        })
    }

    /// A mutable representation of the current board, or an error if this state is invalid.
    pub fn board_mut(&mut self) -> Result<Board<&mut Self, V>, AdmissionError<V>> {
        Ok(Board {
            concrete: self.concrete()?,
            state: self,
            phantom: PhantomData,
        })
    }
}

/// A concretised representation of the board.
///
/// The concrete representation holds one slot per grid cell in row-major order, followed by one
/// slot for the exit. Each slot stores the 1-based admission index of the vehicle occupying it.
#[derive(Debug)]
pub struct Board<R, V> {
    state: R,
    concrete: Vec<Option<NonZeroUsize>>,
    phantom: PhantomData<V>,
}

impl<R, V> Board<R, V> {
    /// The [`Vec`] which represents the board literally.
    pub fn concrete(&self) -> &Vec<Option<NonZeroUsize>> {
        &self.concrete
    }
}

impl<R, V> Board<R, V>
where
    R: Deref<Target = State<V>>,
{
    /// Gets the current state of the board.
    pub fn state(&self) -> &State<V> {
        self.state.deref()
    }
}

/// A move which is currently legal on a board.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LegalMove {
    vehicle: char,
    direction: Direction,
    description: &'static str,
}

impl LegalMove {
    /// The vehicle to move.
    pub fn vehicle(&self) -> char {
        self.vehicle
    }

    /// The direction to move it in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The key of the direction.
    pub fn key(&self) -> char {
        self.direction.key()
    }

    /// A human-readable description of the move.
    pub fn description(&self) -> &'static str {
        self.description
    }
}

impl Display for LegalMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{},{}: {}", self.vehicle, self.key(), self.description)
    }
}

/// An error which describes an attempted illegal move.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum MoveError<V> {
    /// The direction key isn't one of `u`, `d`, `l` or `r`.
    #[error("'{0}' is not a direction key")]
    UnknownDirection(char),
    /// The vehicle that was designated to be moved doesn't exist.
    #[error("cannot move vehicle {0} because it doesn't exist")]
    UnknownVehicle(char),
    /// The direction isn't valid for the vehicle's orientation.
    #[error(
        "cannot move vehicle {id} {dir} because its orientation does not allow for movement in that direction"
    )]
    InvalidDirection {
        /// The vehicle which was to be moved.
        id: char,
        /// The requested direction.
        dir: Direction,
    },
    /// The vehicle would leave the board through anything but its exit.
    #[error("cannot move vehicle {id} {dir} because it enters an invalid position")]
    OutOfBounds {
        /// The vehicle which was to be moved.
        id: char,
        /// The requested direction.
        dir: Direction,
    },
    /// The vehicle would intersect another vehicle.
    #[error(
        "cannot move vehicle {id} {dir} because it would intersect with vehicle {other} at {at}"
    )]
    Intersects {
        /// The vehicle which was to be moved.
        id: char,
        /// The requested direction.
        dir: Direction,
        /// The contested cell.
        at: Position<V>,
        /// The vehicle occupying the contested cell.
        other: char,
    },
    /// The vehicle refused the move.
    #[error(transparent)]
    Vehicle(#[from] ApplyMoveError),
}

impl<R, V> Board<R, V>
where
    R: Deref<Target = State<V>>,
    V: BoardValue,
{
    fn index_of(&self, id: char) -> Option<usize> {
        self.state.vehicles.iter().position(|vehicle| vehicle.id() == id)
    }

    fn name_of(&self, occupant: Option<NonZeroUsize>) -> Option<char> {
        occupant.map(|idx| self.state.vehicles[idx.get() - 1].id())
    }

    fn occupant(&self, slot: usize) -> Option<char> {
        self.name_of(self.concrete[slot])
    }

    /// The vehicle on the board with the provided identifier, if any.
    pub fn vehicle(&self, id: char) -> Option<&Vehicle<V>> {
        self.state.vehicles.iter().find(|vehicle| vehicle.id() == id)
    }

    /// The coordinates of the exit cell.
    pub fn exit(&self) -> Position<V> {
        self.state.exit.position(&self.state.dim)
    }

    /// Fetches the vehicle occupying the requested position. [`None`] if the position is neither
    /// in the board nor its exit, [`Some`]`(`[`None`]`)` if the position exists, but is empty, and
    /// [`Some`]`(`[`Some`]`(id))` with `id` as the vehicle that occupies that position.
    pub fn get<P: Into<Position<V>>>(&self, position: P) -> Option<Option<char>> {
        slot(&self.state.dim, &self.state.exit, &position.into()).map(|slot| self.occupant(slot))
    }

    /// The vehicle occupying the requested position, or [`None`] if it is empty.
    ///
    /// # Panics
    ///
    /// If the position is neither in the board nor its exit.
    pub fn cell_content<P: Into<Position<V>>>(&self, position: P) -> Option<char> {
        let position = position.into();
        match self.get(position) {
            Some(content) => content,
            None => panic!("{position} is neither a cell of the board nor its exit"),
        }
    }

    /// The vehicle occupying the exit, if any.
    pub fn exit_content(&self) -> Option<char> {
        self.occupant(self.state.dim.area())
    }

    /// Whether the target vehicle has reached the exit.
    pub fn is_solved(&self) -> bool {
        self.exit_content().is_some()
    }

    /// The frontier cell of the vehicle at `idx` for `dir` and its slot, if the move is legal.
    fn frontier(&self, idx: usize, dir: Direction) -> Result<(Position<V>, usize), MoveError<V>> {
        let vehicle = &self.state.vehicles[idx];
        let id = vehicle.id();
        if !vehicle.orientation().allows(dir) {
            return Err(MoveError::InvalidDirection { id, dir });
        }
        let (dim, exit) = (&self.state.dim, &self.state.exit);
        let (at, slot) = vehicle
            .frontier_cell(dir)
            .and_then(|at| Some((at, slot_for(dim, exit, id, &at)?)))
            .ok_or(MoveError::OutOfBounds { id, dir })?;
        if let Some(other) = self.occupant(slot) {
            return Err(MoveError::Intersects { id, dir, at, other });
        }
        Ok((at, slot))
    }

    /// Check whether the vehicle named `id` may move one step in `dir`, returning the frontier
    /// cell it would newly occupy.
    pub fn check_move(&self, id: char, dir: Direction) -> Result<Position<V>, MoveError<V>> {
        let idx = self.index_of(id).ok_or(MoveError::UnknownVehicle(id))?;
        self.frontier(idx, dir).map(|(at, _)| at)
    }

    /// Whether the vehicle named `id` may move one step in `dir`.
    pub fn is_move_legal(&self, id: char, dir: Direction) -> bool {
        self.check_move(id, dir).is_ok()
    }

    /// Every move which is currently legal, by vehicle admission order and then by the order in
    /// which each vehicle reports its allowed moves.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        self.state
            .vehicles
            .iter()
            .enumerate()
            .flat_map(move |(idx, vehicle)| {
                vehicle
                    .allowed_moves()
                    .into_iter()
                    .filter(move |&(dir, _)| self.frontier(idx, dir).is_ok())
                    .map(move |(direction, description)| LegalMove {
                        vehicle: vehicle.id(),
                        direction,
                        description,
                    })
            })
            .collect()
    }
}

impl<R, V> Board<R, V>
where
    R: DerefMut<Target = State<V>>,
    V: BoardValue,
{
    /// Add a vehicle to the board, updating the backing state in the process. On failure, the
    /// board is left untouched and the vehicle is dropped.
    pub fn add_vehicle(
        &mut self,
        vehicle: Vehicle<V>,
    ) -> Result<NonZeroUsize, AdmissionError<V>> {
        let idx = NonZeroUsize::MIN.saturating_add(self.state.vehicles.len());
        add_vehicle_concrete(
            &mut self.concrete,
            idx,
            &self.state.dim,
            &self.state.exit,
            &self.state.vehicles,
            &vehicle,
        )
        .inspect_err(|err| tracing::debug!(%err, "rejected vehicle"))?;
        tracing::debug!(id = %vehicle.id(), head = %vehicle.head(), "admitted vehicle");
        self.state.vehicles.push(vehicle);
        Ok(idx)
    }

    /// Shift the vehicle named `id` one space in the designated direction, returning its new head.
    pub fn shift_vehicle(
        &mut self,
        id: char,
        dir: Direction,
    ) -> Result<Position<V>, MoveError<V>> {
        let idx = self.index_of(id).ok_or(MoveError::UnknownVehicle(id))?;
        let (at, inserted) = self.frontier(idx, dir)?;
        let length = *self.state.vehicles[idx].length();
        let (dim, exit) = (&self.state.dim, &self.state.exit);
        let vacated = at
            .shift(-dir, length)
            .and_then(|cell| slot(dim, exit, &cell))
            .ok_or(MoveError::OutOfBounds { id, dir })?;
        let [deleted, inserted] = self
            .concrete
            .get_disjoint_mut([vacated, inserted])
            .map_err(|_| MoveError::OutOfBounds { id, dir })?;
        let head = self.state.vehicles[idx].apply_move(dir)?;
        *inserted = deleted.take();
        tracing::debug!(%id, %dir, %head, "moved vehicle");
        Ok(head)
    }

    /// Execute the move of the vehicle named `id` in the direction named by `key`.
    pub fn execute_move(&mut self, id: char, key: char) -> Result<Position<V>, MoveError<V>> {
        let dir = Direction::from_key(key).ok_or(MoveError::UnknownDirection(key))?;
        self.shift_vehicle(id, dir)
            .inspect_err(|err| tracing::trace!(%err, "rejected move"))
    }
}

impl<R, V> Display for Board<R, V>
where
    R: Deref<Target = State<V>>,
    V: BoardValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let area = self.state.dim.area();
        let columns: usize = (*self.state.dim.columns()).into();
        let exit_row: usize = self.state.exit.row.into();
        for (row, cells) in self.concrete[..area].chunks(columns).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (column, cell) in cells.iter().enumerate() {
                if column > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.name_of(*cell).unwrap_or('_'))?;
            }
            if row == exit_row {
                write!(f, " {}", self.exit_content().unwrap_or('E'))?;
            }
        }
        Ok(())
    }
}
