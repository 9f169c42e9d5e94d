// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! The interactive turn loop: presents the legal moves, reads the player's choice and executes it
//! until the target vehicle reaches the exit or the player quits.

use std::io::{self, BufRead, Write};
use std::ops::DerefMut;

use crate::{Board, BoardValue, Direction, State};

/// Typed by the player to leave the game.
pub const QUIT: &str = "!";

/// How a game ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The target vehicle reached the exit.
    Solved {
        /// The number of moves executed.
        moves: usize,
    },
    /// The player quit, or the input ended.
    Quit {
        /// The number of moves executed.
        moves: usize,
    },
}

/// Parse a choice of the form `X,k`: a vehicle name from `alphabet`, a comma, and one of the
/// direction keys `u`, `d`, `l` and `r`.
pub fn parse_choice(input: &str, alphabet: &str) -> Option<(char, char)> {
    let mut chars = input.chars();
    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some(id), Some(','), Some(key), None)
            if alphabet.contains(id) && Direction::from_key(key).is_some() =>
        {
            Some((id, key))
        }
        _ => None,
    }
}

enum Turn {
    Continue,
    Quit,
}

/// A game session on a board, reading choices from `input` and writing to `output`.
pub struct Game<R, V, I, O> {
    board: Board<R, V>,
    alphabet: String,
    input: I,
    output: O,
    moves: usize,
}

impl<R, V, I, O> Game<R, V, I, O>
where
    R: DerefMut<Target = State<V>>,
    V: BoardValue,
    I: BufRead,
    O: Write,
{
    /// Start a session on `board`, accepting the vehicle names in `alphabet`.
    pub fn new(board: Board<R, V>, alphabet: impl Into<String>, input: I, output: O) -> Self {
        Self {
            board,
            alphabet: alphabet.into(),
            input,
            output,
            moves: 0,
        }
    }

    /// The board being played.
    pub fn board(&self) -> &Board<R, V> {
        &self.board
    }

    /// Play until the board is solved or the player quits.
    pub fn play(&mut self) -> io::Result<Outcome> {
        tracing::info!(vehicles = self.board.state().vehicles().len(), "starting game");
        writeln!(self.output, "Welcome to Rush Hour!\n")?;
        writeln!(self.output, "{}", self.board)?;

        let outcome = loop {
            if self.board.is_solved() {
                break Outcome::Solved { moves: self.moves };
            }
            if let Turn::Quit = self.turn()? {
                break Outcome::Quit { moves: self.moves };
            }
        };

        if let Outcome::Solved { moves } = outcome {
            let target = self.board.state().exit().target();
            writeln!(self.output, "\n{target} reached the exit in {moves} moves!")?;
        }
        writeln!(self.output, "\nGame over!")?;
        tracing::info!(?outcome, "game over");
        Ok(outcome)
    }

    /// Write `prompt` and read the next trimmed line, or `None` at the end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn turn(&mut self) -> io::Result<Turn> {
        writeln!(self.output, "\nPossible moves for this turn:")?;
        for (number, legal) in self.board.legal_moves().iter().enumerate() {
            writeln!(self.output, " {}. {legal}", number + 1)?;
        }

        let mut prompt = "\nEnter vehicle and direction (e.g., R,r) or '!' to quit: ";
        let (id, key) = loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(Turn::Quit);
            };
            if line == QUIT {
                return Ok(Turn::Quit);
            }
            match parse_choice(&line, &self.alphabet) {
                Some(choice) => break choice,
                None => {
                    tracing::debug!(input = %line, "invalid choice");
                    prompt = "Invalid input. Enter vehicle and direction (e.g., R,r): ";
                }
            }
        };

        match self.board.execute_move(id, key) {
            Ok(_) => {
                self.moves += 1;
                writeln!(self.output, "\nMove '{id} -> {key}' executed successfully!")?;
                writeln!(self.output, "\nCurrent board:\n")?;
            }
            Err(err) => {
                tracing::debug!(%err, "impossible move");
                writeln!(self.output, "\nImpossible move: {err}. Try again.")?;
            }
        }
        writeln!(self.output, "{}", self.board)?;
        Ok(Turn::Continue)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Exit, Orientation, Position, Vehicle};
    use std::error::Error;

    fn session(
        vehicles: &[(char, u8, (u8, u8), Orientation)],
        input: &str,
    ) -> Result<(Outcome, State<u8>, String), Box<dyn Error>> {
        let mut state = State::empty((7u8, 7), Exit::new(3, 'R'))?;
        let mut out = Vec::new();
        let mut board = state.board_mut()?;
        for &(id, length, head, orientation) in vehicles {
            board.add_vehicle(Vehicle::new(id, length, head, orientation).unwrap())?;
        }
        let outcome = Game::new(board, "YBOGWR", input.as_bytes(), &mut out).play()?;
        Ok((outcome, state, String::from_utf8(out)?))
    }

    #[test]
    fn choices() {
        assert_eq!(Some(('R', 'r')), parse_choice("R,r", "YBOGWR"));
        assert_eq!(Some(('B', 'u')), parse_choice("B,u", "YBOGWR"));
        assert_eq!(None, parse_choice("R,x", "YBOGWR"));
        assert_eq!(None, parse_choice("Q,r", "YBOGWR"));
        assert_eq!(None, parse_choice("R r", "YBOGWR"));
        assert_eq!(None, parse_choice("R,rr", "YBOGWR"));
        assert_eq!(None, parse_choice("R,", "YBOGWR"));
        assert_eq!(None, parse_choice("", "YBOGWR"));
    }

    #[test]
    fn solving() -> Result<(), Box<dyn Error>> {
        let (outcome, state, out) =
            session(&[('R', 2, (3, 4), Orientation::LeftRight)], "R,r\nR,r\nR,r\n")?;
        assert_eq!(Outcome::Solved { moves: 2 }, outcome);
        assert_eq!(&Position::from((3, 6)), state.vehicles()[0].head());
        assert!(out.contains(" 1. R,r: moves the vehicle one step to the right"));
        assert!(out.contains(" 2. R,l: moves the vehicle one step to the left"));
        assert!(out.contains("_ _ _ _ _ _ R R"));
        assert!(out.contains("R reached the exit in 2 moves!"));
        assert!(out.ends_with("Game over!\n"));
        Ok(())
    }

    #[test]
    fn quitting() -> Result<(), Box<dyn Error>> {
        let (outcome, _, out) = session(&[('R', 2, (3, 0), Orientation::LeftRight)], "!\n")?;
        assert_eq!(Outcome::Quit { moves: 0 }, outcome);
        assert!(out.contains("R R _ _ _ _ _ E"));

        let (outcome, _, _) = session(&[('R', 2, (3, 0), Orientation::LeftRight)], "")?;
        assert_eq!(Outcome::Quit { moves: 0 }, outcome);
        Ok(())
    }

    #[test]
    fn invalid_input_prompts_again() -> Result<(), Box<dyn Error>> {
        let (outcome, state, out) = session(
            &[('R', 2, (3, 0), Orientation::LeftRight)],
            "hello\nR,x\n  R,r  \n!\n",
        )?;
        assert_eq!(Outcome::Quit { moves: 1 }, outcome);
        assert_eq!(2, out.matches("Invalid input.").count());
        assert_eq!(&Position::from((3, 1)), state.vehicles()[0].head());
        Ok(())
    }

    #[test]
    fn impossible_moves_leave_the_board() -> Result<(), Box<dyn Error>> {
        let (outcome, state, out) = session(
            &[
                ('B', 3, (0, 0), Orientation::UpDown),
                ('R', 2, (3, 0), Orientation::LeftRight),
            ],
            "B,u\nB,d\nY,d\nB,r\n!\n",
        )?;
        assert_eq!(Outcome::Quit { moves: 0 }, outcome);
        assert_eq!(4, out.matches("Impossible move").count());
        assert_eq!(&Position::from((0, 0)), state.vehicles()[0].head());
        Ok(())
    }
}
