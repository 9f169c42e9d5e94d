// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! rush-hour: a library implementing the sliding-block puzzle "Rush Hour".
//!
//! A fixed grid holds rectangular vehicles of fixed length and orientation (up/down or
//! left/right). A player repeatedly slides one vehicle one cell at a time along its orientation
//! until a designated target vehicle reaches the exit: a single extra cell attached one column
//! past the last column of one row. Vehicles may not intersect and they must stay within the
//! bounds of the board, the exit being the only exception.
//!
//! The movement rules live in [`Board`], which concretises a [`State`] into an occupancy grid and
//! keeps it consistent with the positions of its [`Vehicle`]s. The core is `no_std` (with
//! `alloc`); with the `std` feature, [`config`] loads vehicle layouts from JSON and [`game`] runs
//! the interactive turn loop used by the `rush-hour` binary.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod geometry;
mod vehicle;

#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
pub mod game;

pub use board::{AdmissionError, Board, Exit, LayoutError, LegalMove, MoveError, State};
pub use geometry::{BoardValue, DimensionError, Dimensions, Direction, Orientation, Position};
pub use vehicle::{ApplyMoveError, Vehicle};
